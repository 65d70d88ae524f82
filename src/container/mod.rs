//! The container: a registry of providers plus resolution.
//!
//! A [`Container`] is a cheap-to-clone handle over shared state. Derived
//! containers hold a parent resolver and consult it for every key they
//! cannot serve locally; the parent is never modified.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use crate::config::ContainerOptions;
use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::{RwLock, StackGuard};
use crate::key::{TypeInfo, TypeKey};
use crate::lifetime::Lifetime;
use crate::observer::{Observers, ResolutionObserver};
use crate::provider::Provider;
use crate::registration::{ProviderRef, Registry};
use crate::traits::{AnyArc, ResolverCore};

mod bindings;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Dependency injection container.
///
/// Holds providers keyed by [`TypeKey`] and resolves instances through
/// them, recursively satisfying each provider's dependencies. Registration
/// and resolution may happen concurrently from any number of threads.
///
/// Every container binds [`Container`] to itself, so constructors and
/// factories can take an `Arc<Container>` parameter to reach the container
/// that is building them.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Constructors, Container, Injectable, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// impl Injectable for UserService {
///     fn constructors() -> Constructors<Self> {
///         Constructors::single(|db: Arc<Database>| UserService { db })
///     }
/// }
///
/// let container = Container::new();
/// container.add_value(Database { url: "postgres://localhost".to_string() });
/// container.add_class::<UserService>().unwrap();
///
/// let users = container.resolve::<UserService>().unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
///
/// Derived containers see everything their parent binds and may rebind keys
/// without affecting it:
///
/// ```rust
/// use ferrous_inject::{Container, Resolver};
///
/// let parent = Container::new();
/// parent.add_value(6u32);
///
/// let child = parent.create_child();
/// assert_eq!(*child.resolve::<u32>().unwrap(), 6);
///
/// child.add_value(7u32);
/// assert_eq!(*child.resolve::<u32>().unwrap(), 7);
/// assert_eq!(*parent.resolve::<u32>().unwrap(), 6);
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    id: u64,
    registry: RwLock<Registry>,
    parent: Option<Arc<dyn ResolverCore>>,
    observers: Observers,
    options: ContainerOptions,
}

/// Binds `Container` to the container that owns it.
///
/// Holds a weak reference; the registry lives inside the container, so a
/// strong one would keep it alive forever. Each call hands out a new handle
/// to the same container, hence the transient lifetime.
struct SelfProvider {
    inner: Weak<ContainerInner>,
}

impl Provider for SelfProvider {
    fn produce(&self, _resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        let inner = self.inner.upgrade().ok_or(DiError::ContainerDropped)?;
        Ok(Arc::new(Container { inner }))
    }

    fn provided_type(&self) -> TypeInfo {
        TypeInfo::of::<Container>()
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }
}

impl Container {
    /// Creates an empty root container with default options.
    pub fn new() -> Self {
        Self::build(None, ContainerOptions::default())
    }

    /// Creates an empty root container.
    pub fn with_options(options: ContainerOptions) -> Self {
        Self::build(None, options)
    }

    /// Creates a container that falls back to `parent` for unbound keys.
    ///
    /// `parent` may be any resolver, not only another `Container`.
    pub fn derived_from(parent: Arc<dyn ResolverCore>) -> Self {
        Self::build(Some(parent), ContainerOptions::default())
    }

    pub fn derived_with_options(parent: Arc<dyn ResolverCore>, options: ContainerOptions) -> Self {
        Self::build(Some(parent), options)
    }

    /// Creates a derived container whose parent is this one.
    ///
    /// The child inherits this container's options, not its observers.
    pub fn create_child(&self) -> Self {
        Self::build(Some(Arc::new(self.clone())), self.inner.options.clone())
    }

    fn build(parent: Option<Arc<dyn ResolverCore>>, options: ContainerOptions) -> Self {
        let inner = Arc::new_cyclic(|weak| {
            let mut registry = Registry::new();
            registry.insert(
                TypeKey::of::<Container>(),
                Arc::new(SelfProvider { inner: weak.clone() }),
            );
            ContainerInner {
                id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
                registry: RwLock::new(registry),
                parent,
                observers: Observers::new(),
                options,
            }
        });
        Self { inner }
    }

    /// Binds `provider` to `key`, replacing any provider already bound there.
    ///
    /// Fails with [`DiError::ProviderTypeMismatch`] if the provider does not
    /// produce the key's type.
    pub fn add_provider<P: Provider + 'static>(&self, key: TypeKey, provider: P) -> DiResult<&Self> {
        self.add_shared_provider(key, Arc::new(provider))
    }

    /// Like [`add_provider`](Self::add_provider), for a provider that is
    /// already shared, e.g. one bound in several containers.
    pub fn add_shared_provider(&self, key: TypeKey, provider: Arc<dyn Provider>) -> DiResult<&Self> {
        let provided = provider.provided_type();
        if provided != key.type_info() {
            return Err(DiError::ProviderTypeMismatch {
                key,
                provided: provided.name(),
            });
        }
        Ok(self.insert(key, provider))
    }

    // Callers guarantee the provider produces the key's type.
    fn insert(&self, key: TypeKey, provider: ProviderRef) -> &Self {
        self.inner.registry.write().insert(key, provider);
        self
    }

    /// Attaches an observer for resolutions served by this container.
    pub fn add_observer(&self, observer: Arc<dyn ResolutionObserver>) -> &Self {
        self.inner.observers.add(observer);
        self
    }

    /// Whether this container itself binds `key`, ignoring the parent.
    pub fn contains_key(&self, key: &TypeKey) -> bool {
        self.inner.registry.read().contains_key(key)
    }

    /// Number of local bindings, including the self-binding.
    pub fn binding_count(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// Describes every local binding, ordered by type name then name.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.inner.registry.read().descriptors()
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    pub fn parent(&self) -> Option<&Arc<dyn ResolverCore>> {
        self.inner.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Whether both handles refer to the same container.
    pub fn same(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn produce_local(&self, key: &TypeKey, provider: &dyn Provider) -> DiResult<AnyArc> {
        let options = &self.inner.options;
        // A singleton re-entering itself would block on its own init lock
        let detect_cycles = options.detect_cycles || provider.lifetime() == Lifetime::Singleton;
        let _guard = StackGuard::enter(self.inner.id, *key, detect_cycles, options.max_depth)?;

        let observers = &self.inner.observers;
        if !observers.has_observers() {
            return self.produce_checked(key, provider);
        }

        observers.resolving(key);
        let start = Instant::now();
        let result = self.produce_checked(key, provider);
        match &result {
            Ok(_) => observers.resolved(key, start.elapsed()),
            Err(err) => observers.failed(key, err),
        }
        result
    }

    fn produce_checked(&self, key: &TypeKey, provider: &dyn Provider) -> DiResult<AnyArc> {
        let instance = provider.produce(self)?;
        let any: &dyn Any = &*instance;
        if any.type_id() != key.type_id() {
            return Err(DiError::TypeMismatch {
                expected: key.type_name(),
            });
        }
        Ok(instance)
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("=== Container #{} ===\n", self.inner.id));
        s.push_str(if self.is_root() { "Root\n" } else { "Derived\n" });
        s.push_str("Bindings:\n");
        for descriptor in self.descriptors() {
            s.push_str(&format!("  {}: {:?}\n", descriptor.key, descriptor.lifetime));
        }
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &TypeKey) -> DiResult<AnyArc> {
        // Guard dropped at the end of the statement; producing re-enters.
        let local = self.inner.registry.read().get(key);
        if let Some(provider) = local {
            return self.produce_local(key, provider.as_ref());
        }
        match &self.inner.parent {
            Some(parent) => parent.resolve_any(key),
            None => Err(DiError::NotFound(*key)),
        }
    }

    fn can_resolve_key(&self, key: &TypeKey) -> bool {
        self.contains_key(key)
            || self
                .inner
                .parent
                .as_ref()
                .is_some_and(|parent| parent.can_resolve_key(key))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("bindings", &self.binding_count())
            .field("derived", &self.inner.parent.is_some())
            .field("observers", &self.inner.observers.len())
            .finish()
    }
}
