//! Binding descriptors for introspection and diagnostics.

use crate::key::{TypeInfo, TypeKey};
use crate::lifetime::Lifetime;
use crate::provider::Provider;

/// Describes one binding of a container
///
/// Obtained from [`Container::descriptors`](crate::Container::descriptors);
/// useful for startup checks and debug output.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime};
///
/// let container = Container::new();
/// container.add_named_value("port", 8080u16);
/// container.add_transient_factory(|| String::from("fresh"));
///
/// let descriptors = container.descriptors();
/// let port = descriptors.iter().find(|d| d.service_name() == Some("port")).unwrap();
/// assert_eq!(port.type_name(), "u16");
/// assert_eq!(port.lifetime, Lifetime::Singleton);
///
/// let fresh = descriptors.iter().find(|d| d.type_name().contains("String")).unwrap();
/// assert_eq!(fresh.lifetime, Lifetime::Transient);
/// assert!(!fresh.is_named());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// The registration slot
    pub key: TypeKey,
    /// Type the provider reports it produces
    pub provided_type: TypeInfo,
    /// Caching behavior of the provider
    pub lifetime: Lifetime,
}

impl BindingDescriptor {
    pub(crate) fn new(key: TypeKey, provider: &dyn Provider) -> Self {
        Self {
            key,
            provided_type: provider.provided_type(),
            lifetime: provider.lifetime(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.key.type_name()
    }

    pub fn service_name(&self) -> Option<&'static str> {
        self.key.service_name()
    }

    pub fn is_named(&self) -> bool {
        self.key.is_named()
    }
}
