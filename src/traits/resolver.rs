//! Resolver traits for service resolution.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;

/// Type-erased, shareable instance as stored and produced by providers.
///
/// The concrete type behind the `dyn Any` is always the type identified by
/// the key it was resolved for; typed access goes through a checked
/// downcast.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Core resolver trait for object-safe service resolution.
///
/// Implemented by [`Container`](crate::Container) and consumed by
/// providers to satisfy their own dependencies. Parent resolvers of derived
/// containers are held as `Arc<dyn ResolverCore>`, so any implementation can
/// sit at the top of a hierarchy.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves the instance registered under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The produced instance
    /// * `Err(DiError)` - Not found, circular, or a failure inside the provider
    fn resolve_any(&self, key: &TypeKey) -> DiResult<AnyArc>;

    /// Whether `key` can be resolved. Pure lookup, never fails.
    fn can_resolve_key(&self, key: &TypeKey) -> bool;
}

/// High-level resolver interface with generic methods for type-safe resolution.
///
/// Blanket-implemented for every [`ResolverCore`], including
/// `dyn ResolverCore`.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{Container, Resolver};
///
/// let container = Container::new();
/// container.add_value(42usize);
/// container.add_named_value("greeting", "hello".to_string());
///
/// assert_eq!(*container.resolve::<usize>().unwrap(), 42);
/// assert_eq!(container.resolve_named::<String>("greeting").unwrap().as_str(), "hello");
/// assert!(container.can_resolve::<usize>());
/// assert!(!container.can_resolve::<String>());
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves the unnamed binding of `T`.
    fn resolve<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        downcast(self.resolve_any(&TypeKey::of::<T>())?)
    }

    /// Resolves the binding of `T` registered under `name`.
    fn resolve_named<T: Send + Sync + 'static>(&self, name: &'static str) -> DiResult<Arc<T>> {
        downcast(self.resolve_any(&TypeKey::named::<T>(name))?)
    }

    /// Resolves the unnamed binding of `T`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved.
    fn resolve_required<T: Send + Sync + 'static>(&self) -> Arc<T> {
        self.resolve::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Resolves a named binding of `T`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved.
    fn resolve_named_required<T: Send + Sync + 'static>(&self, name: &'static str) -> Arc<T> {
        self.resolve_named::<T>(name).unwrap_or_else(|e| {
            panic!("Failed to resolve named {} ({}): {}", std::any::type_name::<T>(), name, e)
        })
    }

    fn can_resolve<T: ?Sized + 'static>(&self) -> bool {
        self.can_resolve_key(&TypeKey::of::<T>())
    }

    fn can_resolve_named<T: ?Sized + 'static>(&self, name: &'static str) -> bool {
        self.can_resolve_key(&TypeKey::named::<T>(name))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

impl<R: ResolverCore + ?Sized> ResolverCore for Arc<R> {
    fn resolve_any(&self, key: &TypeKey) -> DiResult<AnyArc> {
        (**self).resolve_any(key)
    }

    fn can_resolve_key(&self, key: &TypeKey) -> bool {
        (**self).can_resolve_key(key)
    }
}

/// Checked downcast of a type-erased instance.
pub(crate) fn downcast<T: Send + Sync + 'static>(any: AnyArc) -> DiResult<Arc<T>> {
    any.downcast::<T>().map_err(|_| DiError::TypeMismatch {
        expected: std::any::type_name::<T>(),
    })
}
