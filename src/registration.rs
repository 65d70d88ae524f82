//! Provider registry: type identity to provider group.

use std::any::TypeId;
use std::sync::Arc;

use crate::descriptors::BindingDescriptor;
use crate::internal::Map;
use crate::key::{TypeInfo, TypeKey};
use crate::provider::Provider;

/// Shared handle to a registered provider.
///
/// Lookups clone the handle and release the registry lock before the
/// provider runs, since producing an instance re-enters the registry.
pub(crate) type ProviderRef = Arc<dyn Provider>;

/// All providers registered for one type.
pub(crate) struct ProviderGroup {
    pub(crate) ty: TypeInfo,
    pub(crate) default: Option<ProviderRef>,
    pub(crate) named: Map<&'static str, ProviderRef>,
}

impl ProviderGroup {
    fn new(ty: TypeInfo) -> Self {
        Self {
            ty,
            default: None,
            named: Map::default(),
        }
    }

    fn slot(&self, name: Option<&'static str>) -> Option<&ProviderRef> {
        match name {
            None => self.default.as_ref(),
            Some(name) => self.named.get(name),
        }
    }
}

/// Registry holding all provider groups of one container
pub(crate) struct Registry {
    groups: Map<TypeId, ProviderGroup>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            groups: Map::default(),
        }
    }

    /// Inserts or replaces the provider in the key's slot.
    pub(crate) fn insert(&mut self, key: TypeKey, provider: ProviderRef) {
        let group = self
            .groups
            .entry(key.type_id())
            .or_insert_with(|| ProviderGroup::new(key.type_info()));
        match key.service_name() {
            None => group.default = Some(provider),
            Some(name) => {
                group.named.insert(name, provider);
            }
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &TypeKey) -> Option<ProviderRef> {
        self.groups
            .get(&key.type_id())
            .and_then(|group| group.slot(key.service_name()))
            .cloned()
    }

    #[inline(always)]
    pub(crate) fn contains_key(&self, key: &TypeKey) -> bool {
        self.groups
            .get(&key.type_id())
            .is_some_and(|group| group.slot(key.service_name()).is_some())
    }

    pub(crate) fn len(&self) -> usize {
        self.groups
            .values()
            .map(|g| usize::from(g.default.is_some()) + g.named.len())
            .sum()
    }

    /// Descriptors of every binding, ordered by type name then name.
    pub(crate) fn descriptors(&self) -> Vec<BindingDescriptor> {
        let mut out = Vec::with_capacity(self.len());
        for group in self.groups.values() {
            if let Some(provider) = &group.default {
                out.push(BindingDescriptor::new(TypeKey::from_info(group.ty, None), provider.as_ref()));
            }
            for (name, provider) in &group.named {
                out.push(BindingDescriptor::new(
                    TypeKey::from_info(group.ty, Some(*name)),
                    provider.as_ref(),
                ));
            }
        }
        out.sort_by(|a, b| {
            a.type_name()
                .cmp(b.type_name())
                .then_with(|| a.service_name().cmp(&b.service_name()))
        });
        out
    }
}
