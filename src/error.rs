//! Error types for the dependency injection container.

use crate::key::TypeKey;

/// Dependency injection errors
///
/// Every failure of registration or resolution surfaces as one of these
/// variants and propagates synchronously to the immediate caller. Nothing
/// is retried, defaulted or logged on the way out.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, DiError, Resolver, TypeKey};
///
/// let container = Container::new();
/// match container.resolve::<String>() {
///     Err(DiError::NotFound(key)) => {
///         assert_eq!(key, TypeKey::of::<String>());
///         assert_eq!(key.type_name(), "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_inject::{DiError, TypeKey};
///
/// let circular = DiError::Circular(vec![TypeKey::of::<u8>(), TypeKey::of::<u16>(), TypeKey::of::<u8>()]);
/// assert_eq!(circular.to_string(), "Circular dependency: u8 -> u16 -> u8");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// Nothing registered for the key, locally or in any parent
    #[error("Service not found: {0}")]
    NotFound(TypeKey),
    /// A type-erased instance was not of the requested type
    #[error("Type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },
    /// A provider was bound under a key for a different type
    #[error("Provider for {provided} cannot be bound to {key}")]
    ProviderTypeMismatch { key: TypeKey, provided: &'static str },
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", format_path(.0))]
    Circular(Vec<TypeKey>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A constructible type declares no constructor
    #[error("{0} declares no constructor")]
    NoConstructor(&'static str),
    /// Several constructors are eligible and nothing disambiguates them
    #[error("{type_name} has {candidates} eligible constructors; attach an explicit injection plan")]
    AmbiguousConstructor {
        type_name: &'static str,
        candidates: usize,
    },
    /// No constructor matches the explicit injection plan
    #[error("No constructor of {0} matches its injection plan")]
    NoMatchingConstructor(&'static str),
    /// Plan length differs from the callable's parameter count
    #[error("Injection plan for {target} lists {planned} arguments, callable takes {expected}")]
    ArityMismatch {
        target: &'static str,
        planned: usize,
        expected: usize,
    },
    /// Plan item type differs from the callable's parameter type
    #[error("Argument {index} of {target}: plan provides {planned}, callable expects {expected}")]
    ParameterMismatch {
        target: &'static str,
        index: usize,
        planned: &'static str,
        expected: &'static str,
    },
    /// A self-binding outlived its container
    #[error("Container has been dropped")]
    ContainerDropped,
    /// Container options could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_path(path: &[TypeKey]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for DI operations
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{DiResult, DiError, TypeKey};
///
/// fn lookup(found: bool) -> DiResult<u32> {
///     if found {
///         Ok(7)
///     } else {
///         Err(DiError::NotFound(TypeKey::of::<u32>()))
///     }
/// }
///
/// assert_eq!(lookup(true).unwrap(), 7);
/// assert!(lookup(false).is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
