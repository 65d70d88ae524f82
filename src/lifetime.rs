//! Provider lifetime definitions.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Lifetimes controlling instance caching behavior
///
/// Class and factory registrations are wrapped in a
/// [`SingletonProvider`](crate::provider::SingletonProvider) unless
/// registered as [`Lifetime::Transient`].
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime, Resolver};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let container = Container::new();
///
/// let c = counter.clone();
/// container.add_named_factory("shared", Lifetime::Singleton, move || c.fetch_add(1, Ordering::SeqCst));
/// let c = counter.clone();
/// container.add_named_factory("fresh", Lifetime::Transient, move || c.fetch_add(1, Ordering::SeqCst));
///
/// let a = container.resolve_named::<usize>("shared").unwrap();
/// let b = container.resolve_named::<usize>("shared").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let x = container.resolve_named::<usize>("fresh").unwrap();
/// let y = container.resolve_named::<usize>("fresh").unwrap();
/// assert!(!Arc::ptr_eq(&x, &y));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Lifetime {
    /// One instance per provider, created on first resolution and cached forever
    #[default]
    Singleton,
    /// New instance per resolution, never cached
    Transient,
}
