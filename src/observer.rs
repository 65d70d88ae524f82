//! Resolution observers.
//!
//! The container never logs on its own. Attach an observer to see every
//! local resolution: when it starts, how long it took, and why it failed.
//! [`TracingObserver`] forwards these events to `tracing`.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::internal::RwLock;
use crate::key::TypeKey;

/// Hooks into resolution events.
///
/// Called synchronously on the resolving thread, for resolutions served by
/// the container the observer is attached to. Parent containers notify
/// their own observers.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, DiError, ResolutionObserver, Resolver, TypeKey};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl ResolutionObserver for Counter {
///     fn resolving(&self, _key: &TypeKey) {}
///     fn resolved(&self, _key: &TypeKey, _elapsed: Duration) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
///     fn failed(&self, _key: &TypeKey, _error: &DiError) {}
/// }
///
/// let counter = Arc::new(Counter::default());
/// let container = Container::new();
/// container.add_observer(counter.clone());
/// container.add_value(7u8);
///
/// container.resolve::<u8>().unwrap();
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// A local provider is about to produce `key`.
    fn resolving(&self, key: &TypeKey);

    /// The provider for `key` returned an instance.
    fn resolved(&self, key: &TypeKey, elapsed: Duration);

    /// Producing `key` failed. Nested failures are reported once per level.
    fn failed(&self, key: &TypeKey, error: &DiError);
}

/// Observers attached to one container.
#[derive(Default)]
pub(crate) struct Observers {
    observers: RwLock<Vec<Arc<dyn ResolutionObserver>>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.write().push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.read().is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    // Snapshot so observer callbacks run without the lock held.
    fn snapshot(&self) -> Vec<Arc<dyn ResolutionObserver>> {
        self.observers.read().clone()
    }

    pub(crate) fn resolving(&self, key: &TypeKey) {
        for observer in self.snapshot() {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &TypeKey, elapsed: Duration) {
        for observer in self.snapshot() {
            observer.resolved(key, elapsed);
        }
    }

    pub(crate) fn failed(&self, key: &TypeKey, error: &DiError) {
        for observer in self.snapshot() {
            observer.failed(key, error);
        }
    }
}

/// Observer that emits `tracing` events.
///
/// Successful resolutions are logged at `DEBUG` with the key and the
/// elapsed microseconds, failures at `WARN` with the error.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, TracingObserver};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.add_observer(Arc::new(TracingObserver::new()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    trace_start: bool,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also emit a `TRACE` event when each resolution starts.
    pub fn with_start_events(mut self) -> Self {
        self.trace_start = true;
        self
    }
}

impl ResolutionObserver for TracingObserver {
    fn resolving(&self, key: &TypeKey) {
        if self.trace_start {
            tracing::trace!(key = %key, "resolving");
        }
    }

    fn resolved(&self, key: &TypeKey, elapsed: Duration) {
        tracing::debug!(key = %key, elapsed_us = elapsed.as_micros() as u64, "resolved");
    }

    fn failed(&self, key: &TypeKey, error: &DiError) {
        tracing::warn!(key = %key, error = %error, "resolution failed");
    }
}
