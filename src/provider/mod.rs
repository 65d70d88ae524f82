//! Providers: recipes that produce one instance of a fixed type per call.
//!
//! Four variants cover registration needs:
//!
//! - [`ValueProvider`] hands out one pre-built instance
//! - [`SingletonProvider`] memoizes the first result of another provider
//! - [`ConstructorProvider`] builds an [`Injectable`](crate::Injectable) type
//! - [`FactoryProvider`] calls an injectable function or closure
//!
//! Custom providers implement [`Provider`] directly and are bound with
//! [`Container::add_provider`](crate::Container::add_provider).

use std::sync::Arc;

use crate::error::DiResult;
use crate::key::TypeInfo;
use crate::lifetime::Lifetime;
use crate::traits::{AnyArc, ResolverCore};

mod constructor;
mod factory;
mod singleton;
mod value;

pub use constructor::ConstructorProvider;
pub use factory::FactoryProvider;
pub use singleton::SingletonProvider;
pub use value::ValueProvider;

/// Produces one instance of [`provided_type`](Provider::provided_type) per call.
///
/// `resolver` is the container performing the resolution; providers with
/// dependencies resolve them through it (unless bound to a specific
/// resolver).
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{AnyArc, Container, DiResult, Provider, Resolver, ResolverCore, TypeInfo, TypeKey};
/// use std::sync::Arc;
///
/// struct Doubler;
///
/// impl Provider for Doubler {
///     fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
///         let base = resolver.resolve::<u32>()?;
///         Ok(Arc::new(*base as u64 * 2))
///     }
///
///     fn provided_type(&self) -> TypeInfo {
///         TypeInfo::of::<u64>()
///     }
/// }
///
/// let container = Container::new();
/// container.add_value(21u32);
/// container.add_provider(TypeKey::of::<u64>(), Doubler).unwrap();
/// assert_eq!(*container.resolve::<u64>().unwrap(), 42);
/// ```
pub trait Provider: Send + Sync {
    /// Produces an instance, resolving dependencies through `resolver`.
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc>;

    /// The type every produced instance has.
    fn provided_type(&self) -> TypeInfo;

    /// Caching behavior, for introspection.
    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        (**self).produce(resolver)
    }

    fn provided_type(&self) -> TypeInfo {
        (**self).provided_type()
    }

    fn lifetime(&self) -> Lifetime {
        (**self).lifetime()
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        (**self).produce(resolver)
    }

    fn provided_type(&self) -> TypeInfo {
        (**self).provided_type()
    }

    fn lifetime(&self) -> Lifetime {
        (**self).lifetime()
    }
}

/// Picks the resolver a provider with dependencies should use.
pub(crate) fn effective_resolver<'a>(
    bound: &'a Option<Arc<dyn ResolverCore>>,
    caller: &'a dyn ResolverCore,
) -> &'a dyn ResolverCore {
    match bound {
        Some(bound) => bound.as_ref(),
        None => caller,
    }
}
