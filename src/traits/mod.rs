//! Core traits for the dependency injection container.

mod resolver;

pub use resolver::{AnyArc, Resolver, ResolverCore};
pub(crate) use resolver::downcast;
