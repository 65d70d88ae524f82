//! Injection plan derivation.

use crate::error::{DiError, DiResult};
use crate::injection::{Constructors, Injection};
use crate::key::{TypeInfo, TypeKey};
use crate::traits::{AnyArc, ResolverCore};

#[cfg(feature = "smallvec")]
type Slots = smallvec::SmallVec<[TypeKey; 4]>;
#[cfg(not(feature = "smallvec"))]
type Slots = Vec<TypeKey>;

/// Ordered list of keys to resolve before invoking a constructor or factory.
///
/// Derived once, when a provider is built, and immutable afterwards.
/// Derivation is a pure function of the target's parameter types and its
/// optional [`Injection`]; it never touches a resolver.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Injection, InjectionPlan, TypeInfo, TypeKey};
///
/// let params = [TypeInfo::of::<i32>(), TypeInfo::of::<String>()];
///
/// let derived = InjectionPlan::derive("greet", &params, None).unwrap();
/// assert_eq!(derived.dependencies(), &[TypeKey::of::<i32>(), TypeKey::of::<String>()]);
///
/// let annotated = Injection::new().named::<i32>("a").arg::<String>();
/// let explicit = InjectionPlan::derive("greet", &params, Some(&annotated)).unwrap();
/// assert_eq!(explicit.dependencies(), &[TypeKey::named::<i32>("a"), TypeKey::of::<String>()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPlan {
    dependencies: Slots,
}

impl InjectionPlan {
    /// One unnamed dependency per declared parameter, left to right.
    pub fn from_parameters(parameters: &[TypeInfo]) -> Self {
        Self {
            dependencies: parameters
                .iter()
                .map(|ty| TypeKey::from_info(*ty, None))
                .collect(),
        }
    }

    /// Plan for a callable: the annotation if present, else its parameters.
    ///
    /// An annotation must list exactly one item per parameter, each of the
    /// parameter's type; only the names may differ.
    pub fn derive(
        target: &'static str,
        parameters: &[TypeInfo],
        annotation: Option<&Injection>,
    ) -> DiResult<Self> {
        let Some(annotation) = annotation else {
            return Ok(Self::from_parameters(parameters));
        };

        if annotation.len() != parameters.len() {
            return Err(DiError::ArityMismatch {
                target,
                planned: annotation.len(),
                expected: parameters.len(),
            });
        }
        for (index, (item, param)) in annotation.items().iter().zip(parameters).enumerate() {
            if item.type_info() != *param {
                return Err(DiError::ParameterMismatch {
                    target,
                    index,
                    planned: item.type_name(),
                    expected: param.name(),
                });
            }
        }

        Ok(Self {
            dependencies: annotation.items().iter().copied().collect(),
        })
    }

    /// Picks the constructor of `T` to use and derives its plan.
    ///
    /// Without an annotation the type must declare exactly one constructor.
    /// With one, exactly one constructor's parameter types must equal the
    /// annotation's item types, in order. Returns the constructor's index.
    pub fn for_constructors<T: 'static>(
        constructors: &Constructors<T>,
        annotation: Option<&Injection>,
    ) -> DiResult<(usize, Self)> {
        let type_name = std::any::type_name::<T>();
        if constructors.is_empty() {
            return Err(DiError::NoConstructor(type_name));
        }

        let Some(annotation) = annotation else {
            if constructors.len() > 1 {
                return Err(DiError::AmbiguousConstructor {
                    type_name,
                    candidates: constructors.len(),
                });
            }
            let Some(only) = constructors.get(0) else {
                return Err(DiError::NoConstructor(type_name));
            };
            return Ok((0, Self::from_parameters(only.parameters())));
        };

        let matching: Vec<usize> = constructors
            .iter()
            .enumerate()
            .filter(|(_, ctor)| {
                ctor.parameters().len() == annotation.len()
                    && ctor
                        .parameters()
                        .iter()
                        .zip(annotation.items())
                        .all(|(param, item)| *param == item.type_info())
            })
            .map(|(index, _)| index)
            .collect();

        match matching.as_slice() {
            [] => Err(DiError::NoMatchingConstructor(type_name)),
            [index] => Ok((
                *index,
                Self {
                    dependencies: annotation.items().iter().copied().collect(),
                },
            )),
            many => Err(DiError::AmbiguousConstructor {
                type_name,
                candidates: many.len(),
            }),
        }
    }

    pub fn dependencies(&self) -> &[TypeKey] {
        &self.dependencies
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Resolves every dependency in order; the first failure aborts.
    pub(crate) fn resolve(&self, resolver: &dyn ResolverCore) -> DiResult<Vec<AnyArc>> {
        self.dependencies
            .iter()
            .map(|key| resolver.resolve_any(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Widget;

    #[test]
    fn test_derive_rejects_wrong_arity() {
        let params = [TypeInfo::of::<i32>()];
        let annotation = Injection::new().arg::<i32>().arg::<i32>();
        assert!(matches!(
            InjectionPlan::derive("f", &params, Some(&annotation)),
            Err(DiError::ArityMismatch { planned: 2, expected: 1, .. })
        ));
    }

    #[test]
    fn test_derive_rejects_wrong_type() {
        let params = [TypeInfo::of::<i32>(), TypeInfo::of::<u8>()];
        let annotation = Injection::new().arg::<i32>().named::<u16>("x");
        assert!(matches!(
            InjectionPlan::derive("f", &params, Some(&annotation)),
            Err(DiError::ParameterMismatch { index: 1, planned: "u16", expected: "u8", .. })
        ));
    }

    #[test]
    fn test_single_constructor_is_used() {
        let ctors = Constructors::single(|_: Arc<i32>, _: Arc<String>| Widget);
        let (index, plan) = InjectionPlan::for_constructors(&ctors, None).unwrap();
        assert_eq!(index, 0);
        assert_eq!(plan.dependencies(), &[TypeKey::of::<i32>(), TypeKey::of::<String>()]);
    }

    #[test]
    fn test_no_constructor() {
        let ctors: Constructors<Widget> = Constructors::new();
        assert!(matches!(
            InjectionPlan::for_constructors(&ctors, None),
            Err(DiError::NoConstructor(_))
        ));
    }

    #[test]
    fn test_multiple_constructors_without_annotation_are_ambiguous() {
        let ctors = Constructors::new()
            .with(|| Widget)
            .with(|_: Arc<i32>| Widget);
        assert!(matches!(
            InjectionPlan::for_constructors(&ctors, None),
            Err(DiError::AmbiguousConstructor { candidates: 2, .. })
        ));
    }

    #[test]
    fn test_annotation_selects_matching_constructor() {
        let ctors = Constructors::new()
            .with(|| Widget)
            .with(|_: Arc<i32>| Widget)
            .with(|_: Arc<i32>, _: Arc<String>| Widget);
        let annotation = Injection::new().named::<i32>("a");
        let (index, plan) = InjectionPlan::for_constructors(&ctors, Some(&annotation)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(plan.dependencies(), &[TypeKey::named::<i32>("a")]);
    }

    #[test]
    fn test_annotation_without_matching_constructor() {
        let ctors = Constructors::single(|_: Arc<i32>| Widget);
        let annotation = Injection::new().arg::<String>();
        assert!(matches!(
            InjectionPlan::for_constructors(&ctors, Some(&annotation)),
            Err(DiError::NoMatchingConstructor(_))
        ));
    }

    #[test]
    fn test_duplicate_signatures_are_ambiguous_even_with_annotation() {
        let ctors = Constructors::new()
            .with(|_: Arc<i32>| Widget)
            .with(|_: Arc<i32>| Widget);
        let annotation = Injection::new().arg::<i32>();
        assert!(matches!(
            InjectionPlan::for_constructors(&ctors, Some(&annotation)),
            Err(DiError::AmbiguousConstructor { candidates: 2, .. })
        ));
    }
}
