use std::sync::Arc;

use crate::error::DiResult;
use crate::injection::{Callable, Injection, InjectionPlan};
use crate::key::TypeInfo;
use crate::provider::{effective_resolver, Provider};
use crate::traits::{AnyArc, ResolverCore};

type Invoke<T> = Box<dyn Fn(Vec<AnyArc>) -> DiResult<T> + Send + Sync>;

/// Calls a function or closure with injected arguments.
///
/// Works with free functions, capturing closures and boxed `Fn` values
/// alike; anything implementing [`Callable`].
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, FactoryProvider, Injection, Resolver, TypeKey};
/// use std::sync::Arc;
///
/// fn banner(name: Arc<String>, width: Arc<usize>) -> String {
///     format!("{:*^width$}", name, width = *width)
/// }
///
/// let container = Container::new();
/// container.add_value("hi".to_string());
/// container.add_value(2usize);
/// container.add_named_value("wide", 6usize);
///
/// let provider = FactoryProvider::with_injection(
///     banner,
///     Injection::new().arg::<String>().named::<usize>("wide"),
/// ).unwrap();
/// container.add_provider(TypeKey::named::<String>("banner"), provider).unwrap();
///
/// assert_eq!(container.resolve_named::<String>("banner").unwrap().as_str(), "**hi**");
/// ```
pub struct FactoryProvider<T> {
    plan: InjectionPlan,
    invoke: Invoke<T>,
    resolver: Option<Arc<dyn ResolverCore>>,
}

impl<T: Send + Sync + 'static> FactoryProvider<T> {
    /// Plan derived from the callable's parameter types.
    pub fn new<F, Args>(factory: F) -> Self
    where
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        Self {
            plan: InjectionPlan::from_parameters(&F::parameters()),
            invoke: Box::new(move |args| factory.invoke(args)),
            resolver: None,
        }
    }

    /// Plan taken from `injection`, checked against the callable's parameters.
    pub fn with_injection<F, Args>(factory: F, injection: Injection) -> DiResult<Self>
    where
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        let plan = InjectionPlan::derive(std::any::type_name::<F>(), &F::parameters(), Some(&injection))?;
        Ok(Self {
            plan,
            invoke: Box::new(move |args| factory.invoke(args)),
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

impl<T: Send + Sync + 'static> Provider for FactoryProvider<T> {
    fn produce(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        let resolver = effective_resolver(&self.resolver, resolver);
        let args = self.plan.resolve(resolver)?;
        Ok(Arc::new((self.invoke)(args)?))
    }

    fn provided_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }
}
