use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::injection::{Constructor, Injectable, InjectionPlan};
use crate::key::TypeInfo;
use crate::provider::{effective_resolver, Provider};
use crate::traits::{AnyArc, ResolverCore};

/// Builds a fresh `T` by calling one of its declared constructors.
///
/// The constructor and its [`InjectionPlan`] are chosen in [`new`](Self::new),
/// so an ambiguous or mismatched declaration fails at registration rather
/// than on every resolution.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{ConstructorProvider, Constructors, Container, Injectable, Resolver, TypeKey};
/// use std::sync::Arc;
///
/// struct Endpoint { url: String }
///
/// impl Injectable for Endpoint {
///     fn constructors() -> Constructors<Self> {
///         Constructors::single(|host: Arc<String>, port: Arc<u16>| Endpoint {
///             url: format!("{}:{}", host, port),
///         })
///     }
/// }
///
/// let provider = ConstructorProvider::<Endpoint>::new().unwrap();
/// assert_eq!(provider.plan().dependencies(), &[TypeKey::of::<String>(), TypeKey::of::<u16>()]);
///
/// let container = Container::new();
/// container.add_value("localhost".to_string());
/// container.add_value(8080u16);
/// container.add_provider(TypeKey::of::<Endpoint>(), provider).unwrap();
/// assert_eq!(container.resolve::<Endpoint>().unwrap().url, "localhost:8080");
/// ```
pub struct ConstructorProvider<T> {
    plan: InjectionPlan,
    constructor: Constructor<T>,
    resolver: Option<Arc<dyn ResolverCore>>,
}

impl<T: Injectable> ConstructorProvider<T> {
    /// Derives the plan from `T::constructors()` and `T::injection()`.
    pub fn new() -> DiResult<Self> {
        let constructors = T::constructors();
        let injection = T::injection();
        let (index, plan) = InjectionPlan::for_constructors(&constructors, injection.as_ref())?;
        let constructor = constructors
            .get(index)
            .cloned()
            .ok_or(DiError::NoConstructor(std::any::type_name::<T>()))?;

        Ok(Self {
            plan,
            constructor,
            resolver: None,
        })
    }

    /// Resolves dependencies through `resolver` instead of the calling container.
    pub fn bound_to(mut self, resolver: Arc<dyn ResolverCore>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn plan(&self) -> &InjectionPlan {
        &self.plan
    }
}

impl<T: Injectable> Provider for ConstructorProvider<T> {
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        let resolver = effective_resolver(&self.resolver, resolver);
        let args = self.plan.resolve(resolver)?;
        Ok(Arc::new(self.constructor.call(args)?))
    }

    fn provided_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }
}
