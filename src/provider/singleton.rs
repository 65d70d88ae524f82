#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;
#[cfg(not(feature = "once-cell"))]
use std::sync::OnceLock as OnceCell;

use std::thread::{self, ThreadId};

use crate::error::{DiError, DiResult};
use crate::internal::Mutex;
use crate::key::{TypeInfo, TypeKey};
use crate::lifetime::Lifetime;
use crate::provider::Provider;
use crate::traits::{AnyArc, ResolverCore};

/// Memoizes the first instance produced by a base provider.
///
/// The base provider runs at most once, even when several threads make the
/// first call at the same time: the cache is checked without locking, then
/// re-checked under a mutex owned by this provider before the base is
/// invoked. A failed invocation caches nothing, so the next call tries
/// again.
///
/// A thread that re-enters the provider while its own first call is still
/// running gets [`DiError::Circular`] instead of waiting on itself.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, FactoryProvider, Resolver, SingletonProvider, TypeKey};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// let base = FactoryProvider::new(|| vec![1u8, 2, 3]);
/// container.add_provider(TypeKey::of::<Vec<u8>>(), SingletonProvider::new(base)).unwrap();
///
/// let a = container.resolve::<Vec<u8>>().unwrap();
/// let b = container.resolve::<Vec<u8>>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct SingletonProvider {
    base: Box<dyn Provider>,
    cache: OnceCell<AnyArc>,
    init: Mutex<()>,
    // Thread currently running the base provider, if any
    producing: Mutex<Option<ThreadId>>,
}

impl SingletonProvider {
    pub fn new<P: Provider + 'static>(base: P) -> Self {
        Self {
            base: Box::new(base),
            cache: OnceCell::new(),
            init: Mutex::new(()),
            producing: Mutex::new(None),
        }
    }

    /// Whether the instance has been produced yet.
    pub fn is_initialized(&self) -> bool {
        self.cache.get().is_some()
    }
}

impl Provider for SingletonProvider {
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        // Fast path: no lock once initialized
        if let Some(value) = self.cache.get() {
            return Ok(value.clone());
        }

        let current = thread::current().id();
        if *self.producing.lock() == Some(current) {
            let key = TypeKey::from_info(self.base.provided_type(), None);
            return Err(DiError::Circular(vec![key, key]));
        }

        let _init = self.init.lock();
        if let Some(value) = self.cache.get() {
            return Ok(value.clone());
        }

        let value = {
            let _producing = Producing::mark(&self.producing, current);
            self.base.produce(resolver)?
        };
        // Only this thread can set the cell while holding `init`
        let _ = self.cache.set(value.clone());
        Ok(value)
    }

    fn provided_type(&self) -> TypeInfo {
        self.base.provided_type()
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }
}

/// Marks a thread as producing for as long as it lives, unwinding included.
struct Producing<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> Producing<'a> {
    fn mark(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
        *slot.lock() = Some(thread);
        Self { slot }
    }
}

impl Drop for Producing<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}
