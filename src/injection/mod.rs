//! Injection plans: what a constructor or factory needs before it can run.
//!
//! A plan is an ordered list of [`TypeKey`](crate::TypeKey)s. It comes
//! either from an explicit [`Injection`] attached to the target, or from the
//! target's declared parameter types as recovered by [`Callable`].

mod callable;
mod injectable;
mod plan;

pub use callable::{Callable, Inject};
pub use injectable::{Constructor, Constructors, Injectable, Injection};
pub use plan::InjectionPlan;
