//! Constructible types and explicit injection annotations.

use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::injection::Callable;
use crate::key::{TypeInfo, TypeKey};
use crate::traits::AnyArc;

/// Explicit injection plan attached to a type or a factory.
///
/// Each item is either a bare type (resolve the unnamed binding) or a type
/// with a name (resolve the named binding). When present, the items ARE the
/// plan; nothing is derived from the signature.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Injection, TypeKey};
///
/// let injection = Injection::new().named::<i32>("a").arg::<String>();
/// assert_eq!(injection.items(), &[TypeKey::named::<i32>("a"), TypeKey::of::<String>()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injection {
    items: Vec<TypeKey>,
}

impl Injection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unnamed dependency on `T`.
    pub fn arg<T: ?Sized + 'static>(mut self) -> Self {
        self.items.push(TypeKey::of::<T>());
        self
    }

    /// Appends a dependency on the binding of `T` named `name`.
    pub fn named<T: ?Sized + 'static>(mut self, name: &'static str) -> Self {
        self.items.push(TypeKey::named::<T>(name));
        self
    }

    /// Appends an arbitrary key.
    pub fn key(mut self, key: TypeKey) -> Self {
        self.items.push(key);
        self
    }

    pub fn items(&self) -> &[TypeKey] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<TypeKey> for Injection {
    fn from_iter<I: IntoIterator<Item = TypeKey>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

type Invoke<T> = Arc<dyn Fn(Vec<AnyArc>) -> DiResult<T> + Send + Sync>;

/// One declared constructor of `T`.
pub struct Constructor<T> {
    parameters: Vec<TypeInfo>,
    invoke: Invoke<T>,
}

impl<T: 'static> Constructor<T> {
    /// Wraps any injectable callable returning `T`.
    pub fn new<F, Args>(f: F) -> Self
    where
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        Self {
            parameters: F::parameters(),
            invoke: Arc::new(move |args| f.invoke(args)),
        }
    }

    /// Declared parameter types, left to right.
    pub fn parameters(&self) -> &[TypeInfo] {
        &self.parameters
    }

    pub(crate) fn call(&self, args: Vec<AnyArc>) -> DiResult<T> {
        (self.invoke)(args)
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            invoke: self.invoke.clone(),
        }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// The declared constructors of `T`, in declaration order.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Constructors, TypeInfo};
/// use std::sync::Arc;
///
/// struct Point { x: i32, y: i32 }
///
/// let constructors = Constructors::new()
///     .with(|x: Arc<i32>| Point { x: *x, y: 0 })
///     .with(|x: Arc<i32>, y: Arc<i64>| Point { x: *x, y: *y as i32 });
///
/// assert_eq!(constructors.len(), 2);
/// assert_eq!(constructors.get(1).unwrap().parameters(), &[TypeInfo::of::<i32>(), TypeInfo::of::<i64>()]);
/// ```
pub struct Constructors<T> {
    list: Vec<Constructor<T>>,
}

impl<T: 'static> Constructors<T> {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// A type with exactly one constructor.
    pub fn single<F, Args>(f: F) -> Self
    where
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        Self::new().with(f)
    }

    /// Declares another constructor.
    pub fn with<F, Args>(mut self, f: F) -> Self
    where
        F: Callable<Args, Output = T>,
        Args: 'static,
    {
        self.list.push(Constructor::new(f));
        self
    }

    pub fn get(&self, index: usize) -> Option<&Constructor<T>> {
        self.list.get(index)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constructor<T>> {
        self.list.iter()
    }
}

impl<T: 'static> Default for Constructors<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A type the container can build by calling one of its constructors.
///
/// `constructors` lists the declared constructors; `injection` is the
/// optional explicit plan. Without a plan the type must declare exactly one
/// constructor. With a plan, the constructor whose parameter types match the
/// plan's item types is used.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Constructors, Container, Injectable, Injection, Resolver};
/// use std::sync::Arc;
///
/// struct Greeter { greeting: String }
///
/// impl Injectable for Greeter {
///     fn constructors() -> Constructors<Self> {
///         Constructors::single(|count: Arc<i32>, name: Arc<String>| Greeter {
///             greeting: format!("{} x {}", name, count),
///         })
///     }
///
///     fn injection() -> Option<Injection> {
///         Some(Injection::new().named::<i32>("a").arg::<String>())
///     }
/// }
///
/// let container = Container::new();
/// container.add_value(1i32);
/// container.add_named_value("a", 3i32);
/// container.add_value("hi".to_string());
/// container.add_class::<Greeter>().unwrap();
///
/// assert_eq!(container.resolve::<Greeter>().unwrap().greeting, "hi x 3");
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Declared constructors, in declaration order.
    fn constructors() -> Constructors<Self>;

    /// Explicit injection plan, if any.
    fn injection() -> Option<Injection> {
        None
    }
}
