//! # ferrous-inject
//!
//! A small, thread-safe dependency injection container for Rust.
//!
//! ## Features
//!
//! - **Typed keys**: bindings are keyed by type plus an optional name
//! - **Constructor injection**: dependencies derived from constructor and
//!   factory signatures, or listed explicitly with [`Injection`]
//! - **Lifetimes**: singletons built at most once, transients built per resolution
//! - **Derived containers**: child containers fall back to their parent and
//!   may override its bindings without touching it
//! - **Circular dependency detection** with the full dependency path
//! - **Observers** for resolution events, with a `tracing` backend
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_inject::{Constructors, Container, Injectable, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!     fn constructors() -> Constructors<Self> {
//!         Constructors::single(|db: Arc<Database>| UserService { db })
//!     }
//! }
//!
//! let container = Container::new();
//! container.add_value(Database {
//!     connection_string: "postgres://localhost".to_string(),
//! });
//! container.add_class::<UserService>().unwrap();
//!
//! let users = container.resolve::<UserService>().unwrap();
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Named Bindings
//!
//! Several bindings of one type are told apart by name. A named binding is
//! never used for an unnamed request, and vice versa.
//!
//! ```rust
//! use ferrous_inject::{Container, Resolver};
//!
//! let container = Container::new();
//! container.add_named_value("primary", "db-1".to_string());
//! container.add_named_value("replica", "db-2".to_string());
//!
//! assert_eq!(container.resolve_named::<String>("replica").unwrap().as_str(), "db-2");
//! assert!(container.resolve::<String>().is_err());
//! ```
//!
//! ## Explicit Injection
//!
//! ```rust
//! use ferrous_inject::{Constructors, Container, Injectable, Injection, Resolver};
//! use std::sync::Arc;
//!
//! struct Pool { size: u32 }
//!
//! impl Injectable for Pool {
//!     fn constructors() -> Constructors<Self> {
//!         Constructors::single(|size: Arc<u32>| Pool { size: *size })
//!     }
//!
//!     fn injection() -> Option<Injection> {
//!         Some(Injection::new().named::<u32>("pool_size"))
//!     }
//! }
//!
//! let container = Container::new();
//! container.add_value(1u32);
//! container.add_named_value("pool_size", 16u32);
//! container.add_class::<Pool>().unwrap();
//!
//! assert_eq!(container.resolve::<Pool>().unwrap().size, 16);
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: built on first resolution, then shared
//! - **Transient**: built fresh on every resolution
//!
//! Values registered with `add_value` are always shared.

pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod injection;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod provider;
pub mod traits;

mod internal;
mod registration;

pub use config::{ContainerOptions, DEFAULT_MAX_DEPTH};
pub use container::Container;
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use injection::{Callable, Constructor, Constructors, Inject, Injectable, Injection, InjectionPlan};
pub use key::{key_of, named_key_of, TypeInfo, TypeKey};
pub use lifetime::Lifetime;
pub use observer::{ResolutionObserver, TracingObserver};
pub use provider::{ConstructorProvider, FactoryProvider, Provider, SingletonProvider, ValueProvider};
pub use traits::{AnyArc, Resolver, ResolverCore};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_singleton_resolution() {
        let container = Container::new();
        container.add_singleton_factory(|| 42usize);

        let a = container.resolve_required::<usize>();
        let b = container.resolve_required::<usize>();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_transient_resolution() {
        let container = Container::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        container.add_transient_factory(move || {
            let mut c = counter_clone.lock().unwrap();
            *c += 1;
            format!("instance-{}", *c)
        });

        let a = container.resolve_required::<String>();
        let b = container.resolve_required::<String>();

        assert_eq!(a.as_str(), "instance-1");
        assert_eq!(b.as_str(), "instance-2");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_trait_object_binding() {
        trait Greeter: Send + Sync {
            fn greet(&self) -> String;
        }

        struct English;

        impl Greeter for English {
            fn greet(&self) -> String {
                "hello".to_string()
            }
        }

        // Trait objects are bound through a sized handle
        let container = Container::new();
        container.add_value::<Arc<dyn Greeter>>(Arc::new(English));

        let greeter = container.resolve_required::<Arc<dyn Greeter>>();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn test_factory_receives_container() {
        let container = Container::new();
        container.add_value(2u8);
        container.add_transient_factory(|c: Arc<Container>| c.resolve_required::<u8>().to_string());

        assert_eq!(container.resolve_required::<String>().as_str(), "2");
    }

    #[test]
    fn test_not_found_names_the_key() {
        let container = Container::new();
        let err = container.resolve_named::<u8>("missing").unwrap_err();
        assert_eq!(err.to_string(), "Service not found: u8 [\"missing\"]");
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn test_debug_string_lists_bindings() {
        let container = Container::new();
        container.add_named_value("port", 80u16);
        let s = container.to_debug_string();
        assert!(s.contains("u16 [\"port\"]: Singleton"));
    }
}
