//! Type keys for the dependency injection container.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Process-stable identity of a type.
///
/// Pairs the `TypeId` used for lookup with the `type_name` used in
/// diagnostics. Equality and hashing only look at the `TypeId`; the name
/// is carried along for error messages and debug output.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::TypeInfo;
///
/// let info = TypeInfo::of::<String>();
/// assert_eq!(info, TypeInfo::of::<String>());
/// assert_ne!(info, TypeInfo::of::<u32>());
/// assert_eq!(info.name(), "alloc::string::String");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Type identity of `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` used for registry lookup.
    #[inline(always)]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The human-readable type name (`std::any::type_name`).
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Key identifying a registration slot: a type plus an optional name.
///
/// Two keys are equal iff their type identities are equal and their names
/// are equal (both absent, or both present and string-equal). Within one
/// container a type has at most one unnamed provider and at most one
/// provider per name.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Resolver, ResolverCore, TypeKey};
///
/// let container = Container::new();
/// container.add_value(42u32);
/// container.add_named_value("port", 8080u32);
///
/// assert!(container.can_resolve_key(&TypeKey::of::<u32>()));
/// assert!(container.can_resolve_key(&TypeKey::named::<u32>("port")));
/// assert!(!container.can_resolve_key(&TypeKey::named::<u32>("timeout")));
///
/// assert_eq!(*container.resolve_named::<u32>("port").unwrap(), 8080);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    ty: TypeInfo,
    name: Option<&'static str>,
}

impl TypeKey {
    /// Unnamed key for `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            ty: TypeInfo::of::<T>(),
            name: None,
        }
    }

    /// Named key for `T`.
    #[inline(always)]
    pub fn named<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            ty: TypeInfo::of::<T>(),
            name: Some(name),
        }
    }

    /// Builds a key from an existing type identity.
    pub fn from_info(ty: TypeInfo, name: Option<&'static str>) -> Self {
        Self { ty, name }
    }

    /// The type identity part of the key.
    #[inline(always)]
    pub fn type_info(&self) -> TypeInfo {
        self.ty
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.ty.id
    }

    /// The type name for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::TypeKey;
    ///
    /// assert_eq!(TypeKey::of::<u32>().type_name(), "u32");
    /// assert_eq!(TypeKey::named::<u32>("port").type_name(), "u32");
    /// ```
    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    /// The service name for named keys, or `None` for unnamed keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::TypeKey;
    ///
    /// assert_eq!(TypeKey::of::<String>().service_name(), None);
    /// assert_eq!(TypeKey::named::<String>("greeting").service_name(), Some("greeting"));
    /// ```
    #[inline(always)]
    pub fn service_name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

// TypeId + name only; the type_name string is diagnostic
impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.ty.id == other.ty.id && self.name == other.name
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.id.hash(state);
        match self.name {
            None => 0u8.hash(state),
            Some(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            None => f.write_str(self.ty.name),
            Some(name) => write!(f, "{} [\"{}\"]", self.ty.name, name),
        }
    }
}

/// Unnamed key for `T`.
#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> TypeKey {
    TypeKey::of::<T>()
}

/// Named key for `T`.
#[inline(always)]
pub fn named_key_of<T: ?Sized + 'static>(name: &'static str) -> TypeKey {
    TypeKey::named::<T>(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(key: &TypeKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_requires_same_type_and_name() {
        assert_eq!(TypeKey::of::<u32>(), TypeKey::of::<u32>());
        assert_eq!(TypeKey::named::<u32>("a"), TypeKey::named::<u32>("a"));
        assert_ne!(TypeKey::of::<u32>(), TypeKey::named::<u32>("a"));
        assert_ne!(TypeKey::named::<u32>("a"), TypeKey::named::<u32>("b"));
        assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<u64>());
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        assert_eq!(hash_of(&TypeKey::of::<String>()), hash_of(&key_of::<String>()));
        assert_eq!(
            hash_of(&TypeKey::named::<String>("x")),
            hash_of(&named_key_of::<String>("x"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeKey::of::<u32>().to_string(), "u32");
        assert_eq!(TypeKey::named::<u32>("port").to_string(), "u32 [\"port\"]");
    }

    #[test]
    fn test_from_info_keeps_name() {
        let key = TypeKey::from_info(TypeInfo::of::<i32>(), Some("a"));
        assert_eq!(key, TypeKey::named::<i32>("a"));
        assert!(key.is_named());
        assert!(!TypeKey::from_info(TypeInfo::of::<i32>(), None).is_named());
    }
}
