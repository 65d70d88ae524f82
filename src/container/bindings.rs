//! Registration shorthands: values, classes and factories.
//!
//! Each method wraps the matching provider, caches it behind a
//! [`SingletonProvider`] when the lifetime asks for it, and binds it with
//! its type known at compile time.

use std::sync::Arc;

use super::Container;
use crate::error::DiResult;
use crate::injection::{Callable, Injectable, Injection};
use crate::key::{TypeInfo, TypeKey};
use crate::lifetime::Lifetime;
use crate::provider::{ConstructorProvider, FactoryProvider, Provider, SingletonProvider, ValueProvider};
use crate::registration::ProviderRef;

impl Container {
    /// Binds a pre-built value; every resolution shares it.
    pub fn add_value<T: Send + Sync + 'static>(&self, value: T) -> &Self {
        self.insert(TypeKey::of::<T>(), Arc::new(ValueProvider::new(value)))
    }

    pub fn add_named_value<T: Send + Sync + 'static>(&self, name: &'static str, value: T) -> &Self {
        self.insert(TypeKey::named::<T>(name), Arc::new(ValueProvider::new(value)))
    }

    /// Binds an existing `Arc`; resolutions are pointer-equal to it.
    ///
    /// ```rust
    /// use ferrous_inject::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// let shared = Arc::new(vec![1, 2, 3]);
    /// let container = Container::new();
    /// container.add_instance(shared.clone());
    ///
    /// assert!(Arc::ptr_eq(&container.resolve::<Vec<i32>>().unwrap(), &shared));
    /// ```
    pub fn add_instance<T: Send + Sync + 'static>(&self, instance: Arc<T>) -> &Self {
        self.insert(TypeKey::of::<T>(), Arc::new(ValueProvider::from_arc(instance)))
    }

    pub fn add_named_instance<T: Send + Sync + 'static>(&self, name: &'static str, instance: Arc<T>) -> &Self {
        self.insert(TypeKey::named::<T>(name), Arc::new(ValueProvider::from_arc(instance)))
    }

    /// Binds `T`, built through its constructors, with the default lifetime.
    ///
    /// Fails when the constructor to use cannot be determined; see
    /// [`InjectionPlan::for_constructors`](crate::InjectionPlan::for_constructors).
    pub fn add_class<T: Injectable>(&self) -> DiResult<&Self> {
        self.add_class_with::<T>(None, self.inner.options.default_lifetime)
    }

    pub fn add_singleton_class<T: Injectable>(&self) -> DiResult<&Self> {
        self.add_class_with::<T>(None, Lifetime::Singleton)
    }

    pub fn add_transient_class<T: Injectable>(&self) -> DiResult<&Self> {
        self.add_class_with::<T>(None, Lifetime::Transient)
    }

    pub fn add_named_class<T: Injectable>(&self, name: &'static str, lifetime: Lifetime) -> DiResult<&Self> {
        self.add_class_with::<T>(Some(name), lifetime)
    }

    fn add_class_with<T: Injectable>(&self, name: Option<&'static str>, lifetime: Lifetime) -> DiResult<&Self> {
        let provider = ConstructorProvider::<T>::new()?;
        Ok(self.bind(TypeKey::from_info(TypeInfo::of::<T>(), name), lifetime, provider))
    }

    /// Binds the result of `factory`, with the default lifetime.
    ///
    /// The factory's parameters are resolved by type, left to right.
    ///
    /// ```rust
    /// use ferrous_inject::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// container.add_value(3usize);
    /// container.add_factory(|n: Arc<usize>| "ab".repeat(*n));
    ///
    /// assert_eq!(container.resolve::<String>().unwrap().as_str(), "ababab");
    /// ```
    pub fn add_factory<T, F, Args>(&self, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        self.bind(TypeKey::of::<T>(), self.inner.options.default_lifetime, FactoryProvider::new(factory))
    }

    pub fn add_singleton_factory<T, F, Args>(&self, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        self.bind(TypeKey::of::<T>(), Lifetime::Singleton, FactoryProvider::new(factory))
    }

    pub fn add_transient_factory<T, F, Args>(&self, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        self.bind(TypeKey::of::<T>(), Lifetime::Transient, FactoryProvider::new(factory))
    }

    pub fn add_named_factory<T, F, Args>(&self, name: &'static str, lifetime: Lifetime, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        self.bind(TypeKey::named::<T>(name), lifetime, FactoryProvider::new(factory))
    }

    /// Binds the result of `factory`, resolving its arguments as `injection` lists.
    ///
    /// Fails if `injection` does not fit the factory's parameters.
    ///
    /// ```rust
    /// use ferrous_inject::{Container, Injection, Lifetime, Resolver};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// container.add_value(1i32);
    /// container.add_named_value("a", 5i32);
    /// container
    ///     .add_injected_factory(Injection::new().named::<i32>("a"), Lifetime::Transient, |n: Arc<i32>| *n as i64)
    ///     .unwrap();
    ///
    /// assert_eq!(*container.resolve::<i64>().unwrap(), 5);
    /// ```
    pub fn add_injected_factory<T, F, Args>(&self, injection: Injection, lifetime: Lifetime, factory: F) -> DiResult<&Self>
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        let provider = FactoryProvider::with_injection(factory, injection)?;
        Ok(self.bind(TypeKey::of::<T>(), lifetime, provider))
    }

    pub fn add_named_injected_factory<T, F, Args>(
        &self,
        name: &'static str,
        injection: Injection,
        lifetime: Lifetime,
        factory: F,
    ) -> DiResult<&Self>
    where
        T: Send + Sync + 'static,
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        let provider = FactoryProvider::with_injection(factory, injection)?;
        Ok(self.bind(TypeKey::named::<T>(name), lifetime, provider))
    }

    fn bind<P: Provider + 'static>(&self, key: TypeKey, lifetime: Lifetime, provider: P) -> &Self {
        let provider: ProviderRef = match lifetime {
            Lifetime::Singleton => Arc::new(SingletonProvider::new(provider)),
            Lifetime::Transient => Arc::new(provider),
        };
        self.insert(key, provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContainerOptions;
    use crate::error::DiError;
    use crate::injection::Constructors;
    use crate::traits::Resolver;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(usize);

    static BUILT: AtomicUsize = AtomicUsize::new(0);

    impl Injectable for Counter {
        fn constructors() -> Constructors<Self> {
            Constructors::single(|| Counter(BUILT.fetch_add(1, Ordering::SeqCst)))
        }
    }

    struct TwoWays;

    impl Injectable for TwoWays {
        fn constructors() -> Constructors<Self> {
            Constructors::new().with(|| TwoWays).with(|_: Arc<u8>| TwoWays)
        }
    }

    #[test]
    fn test_class_lifetimes() {
        let container = Container::new();
        container.add_singleton_class::<Counter>().unwrap();
        let a = container.resolve::<Counter>().unwrap();
        let b = container.resolve::<Counter>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        container.add_transient_class::<Counter>().unwrap();
        let c = container.resolve::<Counter>().unwrap();
        let d = container.resolve::<Counter>().unwrap();
        assert!(!Arc::ptr_eq(&c, &d));
        assert!(d.0 > c.0);
    }

    #[test]
    fn test_ambiguous_class_is_rejected_at_registration() {
        let container = Container::new();
        assert!(matches!(
            container.add_class::<TwoWays>(),
            Err(DiError::AmbiguousConstructor { candidates: 2, .. })
        ));
        assert!(!container.can_resolve::<TwoWays>());
    }

    #[test]
    fn test_named_class() {
        let container = Container::new();
        container.add_named_class::<Counter>("c", Lifetime::Singleton).unwrap();
        assert!(container.can_resolve_named::<Counter>("c"));
        assert!(!container.can_resolve::<Counter>());
    }

    #[test]
    fn test_default_lifetime_follows_options() {
        let transient = Container::with_options(ContainerOptions {
            default_lifetime: Lifetime::Transient,
            ..ContainerOptions::default()
        });
        transient.add_factory(|| 1u64);
        let descriptors = transient.descriptors();
        let d = descriptors.iter().find(|d| d.type_name() == "u64").unwrap();
        assert_eq!(d.lifetime, Lifetime::Transient);

        let singleton = Container::new();
        singleton.add_factory(|| 1u64);
        let descriptors = singleton.descriptors();
        let d = descriptors.iter().find(|d| d.type_name() == "u64").unwrap();
        assert_eq!(d.lifetime, Lifetime::Singleton);
    }

    #[test]
    fn test_injected_factory_rejects_mismatched_plan() {
        let container = Container::new();
        let result = container.add_injected_factory(
            Injection::new().arg::<u16>(),
            Lifetime::Transient,
            |n: Arc<u8>| *n as u32,
        );
        assert!(matches!(result, Err(DiError::ParameterMismatch { index: 0, .. })));
    }

    #[test]
    fn test_named_injected_factory() {
        let container = Container::new();
        container.add_named_value("left", 2u8);
        container.add_named_value("right", 40u8);
        container
            .add_named_injected_factory(
                "sum",
                Injection::new().named::<u8>("left").named::<u8>("right"),
                Lifetime::Singleton,
                |a: Arc<u8>, b: Arc<u8>| *a as u32 + *b as u32,
            )
            .unwrap();
        assert_eq!(*container.resolve_named::<u32>("sum").unwrap(), 42);
    }
}
