//! Parameter introspection for constructors and factory functions.
//!
//! Rust has no runtime reflection over function signatures, so the
//! parameter list of a callable is recovered from its `Fn` signature at
//! compile time: every `Fn(A1, .., An) -> Out` whose parameters implement
//! [`Inject`] is a [`Callable`], and reports its parameter types in
//! declaration order.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeInfo;
use crate::traits::AnyArc;

/// A parameter type that can be filled from a resolved instance.
///
/// Implemented for `Arc<T>`: a parameter `Arc<T>` asks the container for
/// its binding of `T`.
pub trait Inject: Sized + 'static {
    /// The type whose binding satisfies this parameter.
    fn type_info() -> TypeInfo;

    /// Converts a resolved instance into the parameter value.
    fn from_instance(instance: AnyArc) -> DiResult<Self>;
}

impl<T: Send + Sync + 'static> Inject for Arc<T> {
    #[inline]
    fn type_info() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    #[inline]
    fn from_instance(instance: AnyArc) -> DiResult<Self> {
        crate::traits::downcast::<T>(instance)
    }
}

/// A function whose declared parameters can all be injected.
///
/// `Args` is the tuple of parameter types; it only exists to keep the
/// implementations for different arities apart and is inferred at the call
/// site.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Callable, TypeInfo};
/// use std::sync::Arc;
///
/// fn describe<F: Callable<Args>, Args>(_f: &F) -> Vec<TypeInfo> {
///     F::parameters()
/// }
///
/// let greet = |count: Arc<i32>, name: Arc<String>| format!("{} x {}", name, count);
/// assert_eq!(describe(&greet), vec![TypeInfo::of::<i32>(), TypeInfo::of::<String>()]);
/// ```
pub trait Callable<Args>: Send + Sync + 'static {
    /// Value returned by the callable.
    type Output;

    /// Declared parameter types, left to right.
    fn parameters() -> Vec<TypeInfo>;

    /// Invokes the callable with resolved arguments in parameter order.
    fn invoke(&self, args: Vec<AnyArc>) -> DiResult<Self::Output>;
}

fn next_arg<A: Inject>(
    args: &mut std::vec::IntoIter<AnyArc>,
    expected: usize,
    supplied: usize,
) -> DiResult<A> {
    let instance = args.next().ok_or(DiError::ArityMismatch {
        target: std::any::type_name::<A>(),
        planned: supplied,
        expected,
    })?;
    A::from_instance(instance)
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Callable<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + Send + Sync + 'static,
            $($arg: Inject,)*
        {
            type Output = Out;

            fn parameters() -> Vec<TypeInfo> {
                vec![$($arg::type_info()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, args: Vec<AnyArc>) -> DiResult<Out> {
                let expected = count!($($arg)*);
                let supplied = args.len();
                if supplied != expected {
                    return Err(DiError::ArityMismatch {
                        target: std::any::type_name::<Func>(),
                        planned: supplied,
                        expected,
                    });
                }
                let mut args = args.into_iter();
                $(let $arg = next_arg::<$arg>(&mut args, expected, supplied)?;)*
                Ok((self)($($arg),*))
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
