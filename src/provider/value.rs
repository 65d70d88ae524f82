use std::sync::Arc;

use crate::error::DiResult;
use crate::key::TypeInfo;
use crate::lifetime::Lifetime;
use crate::provider::Provider;
use crate::traits::{AnyArc, ResolverCore};

/// Hands out the same instance on every call.
///
/// The instance is shared, not copied: every resolution observes the
/// identical `Arc`.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Resolver, TypeKey, ValueProvider};
/// use std::sync::Arc;
///
/// let shared = Arc::new(String::from("config"));
/// let container = Container::new();
/// container.add_provider(TypeKey::of::<String>(), ValueProvider::from_arc(shared.clone())).unwrap();
///
/// assert!(Arc::ptr_eq(&container.resolve::<String>().unwrap(), &shared));
/// ```
pub struct ValueProvider {
    instance: AnyArc,
    ty: TypeInfo,
}

impl ValueProvider {
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Shares an existing `Arc`; resolutions are pointer-equal to it.
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            instance: value,
            ty: TypeInfo::of::<T>(),
        }
    }
}

impl Provider for ValueProvider {
    fn produce(&self, _resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        Ok(self.instance.clone())
    }

    fn provided_type(&self) -> TypeInfo {
        self.ty
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }
}
