use std::fmt;

use super::subst::Substitution;
use super::ty::Type;

/// Failure raised while reconciling two type terms.
///
/// Both variants render as the same `Can't match <left> with <right>`
/// line; the distinction only matters to callers inspecting the failure
/// structurally.
///
/// # Variants
///
/// * `Mismatch` - Two distinct non-variable shapes (e.g. `Bool` vs `Int`,
///   or a base type vs an arrow)
/// * `Occurs` - Binding the unknown would create an infinite type
///   (e.g. `u1` vs `u1 -> Int`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { left: Type, right: Type },
    Occurs { id: usize, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { left, right } => {
                write!(f, "Can't match {} with {}", left.pretty(), right.pretty())
            }
            UnifyError::Occurs { id, ty } => {
                write!(
                    f,
                    "Can't match {} with {}",
                    Type::Unknown(*id).pretty(),
                    ty.pretty()
                )
            }
        }
    }
}

/// Does `Unknown(id)` occur anywhere in `ty`?
///
/// `ty` must already be fully applied; the unifier applies the current
/// substitution to both sides before dispatching, so the check never has
/// to chase bindings itself.
///
/// # Arguments
///
/// * `id` - The unknown id to look for
/// * `ty` - The fully applied type to search
///
/// # Returns
///
/// `true` if `Unknown(id)` appears in any node of `ty`
fn occurs_in(id: usize, ty: &Type) -> bool {
    match ty {
        Type::Int | Type::Bool | Type::String => false,
        Type::Unknown(other) => *other == id,
        Type::Func(arg, result) => occurs_in(id, arg) || occurs_in(id, result),
    }
}

/// Reconcile two type terms by extending `subst` so that afterwards
/// `subst.apply(t1) == subst.apply(t2)`.
///
/// Both sides are applied first, then dispatched on shape: equal base
/// types succeed, arrows unify argument then result, and an unknown binds
/// to the opposite side unless that would create an infinite type.
///
/// # Arguments
///
/// * `subst` - The current substitution, extended in place on success
/// * `t1`, `t2` - The type terms to reconcile
///
/// # Returns
///
/// `Ok(())` if the terms were made equal under `subst`
/// `Err(UnifyError)` on a shape mismatch or occurs-check violation; the
/// substitution may hold bindings from already-unified subterms
///
/// # Example
///
/// ```text
/// let mut subst = Substitution::empty();
/// unify(&mut subst, &Type::func(Type::Unknown(1), Type::Bool),
///                   &Type::func(Type::Int, Type::Unknown(2)))?;
/// // subst = {1 := Int, 2 := Bool}
/// ```
pub fn unify(subst: &mut Substitution, t1: &Type, t2: &Type) -> Result<(), UnifyError> {
    let t1 = subst.apply(t1);
    let t2 = subst.apply(t2);

    match (&t1, &t2) {
        (Type::Int, Type::Int) => Ok(()),
        (Type::Bool, Type::Bool) => Ok(()),
        (Type::String, Type::String) => Ok(()),

        (Type::Unknown(id1), Type::Unknown(id2)) if id1 == id2 => Ok(()),
        (Type::Unknown(id), other) | (other, Type::Unknown(id)) => {
            if occurs_in(*id, other) {
                Err(UnifyError::Occurs {
                    id: *id,
                    ty: other.clone(),
                })
            } else {
                subst.extend(*id, other.clone());
                Ok(())
            }
        }

        (Type::Func(arg1, result1), Type::Func(arg2, result2)) => {
            unify(subst, arg1, arg2)?;
            unify(subst, result1, result2)
        }

        _ => Err(UnifyError::Mismatch {
            left: t1.clone(),
            right: t2.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_identical_base_types() {
        let mut subst = Substitution::empty();
        assert_eq!(unify(&mut subst, &Type::Int, &Type::Int), Ok(()));
        assert_eq!(unify(&mut subst, &Type::Bool, &Type::Bool), Ok(()));
        assert_eq!(unify(&mut subst, &Type::String, &Type::String), Ok(()));
        assert!(subst.is_empty());
    }

    #[test]
    fn test_unify_unknown_with_base() {
        let mut subst = Substitution::empty();
        unify(&mut subst, &Type::Unknown(1), &Type::Int).unwrap();
        assert_eq!(subst.apply(&Type::Unknown(1)), Type::Int);
    }

    #[test]
    fn test_unify_base_with_unknown() {
        let mut subst = Substitution::empty();
        unify(&mut subst, &Type::Int, &Type::Unknown(1)).unwrap();
        assert_eq!(subst.apply(&Type::Unknown(1)), Type::Int);
    }

    #[test]
    fn test_unify_same_unknown_adds_no_binding() {
        let mut subst = Substitution::empty();
        unify(&mut subst, &Type::Unknown(1), &Type::Unknown(1)).unwrap();
        assert!(subst.is_empty());
    }

    #[test]
    fn test_unify_two_unknowns() {
        let mut subst = Substitution::empty();
        unify(&mut subst, &Type::Unknown(1), &Type::Unknown(2)).unwrap();
        assert_eq!(
            subst.apply(&Type::Unknown(1)),
            subst.apply(&Type::Unknown(2))
        );
    }

    #[test]
    fn test_unify_sees_existing_bindings() {
        let mut subst = Substitution::empty();
        unify(&mut subst, &Type::Unknown(1), &Type::Int).unwrap();
        // u1 is already Int, so unifying it with Bool must fail
        let result = unify(&mut subst, &Type::Unknown(1), &Type::Bool);
        assert_eq!(
            result,
            Err(UnifyError::Mismatch {
                left: Type::Int,
                right: Type::Bool
            })
        );
    }

    #[test]
    fn test_unify_function_types() {
        let mut subst = Substitution::empty();
        let t1 = Type::func(Type::Unknown(1), Type::Unknown(2));
        let t2 = Type::func(Type::Int, Type::Bool);
        unify(&mut subst, &t1, &t2).unwrap();
        assert_eq!(subst.apply(&Type::Unknown(1)), Type::Int);
        assert_eq!(subst.apply(&Type::Unknown(2)), Type::Bool);
    }

    #[test]
    fn test_unify_threads_argument_bindings_into_result() {
        // (u1 -> u1) ~ (Int -> u2): the argument pass binds u1, the
        // result pass must see it
        let mut subst = Substitution::empty();
        let t1 = Type::func(Type::Unknown(1), Type::Unknown(1));
        let t2 = Type::func(Type::Int, Type::Unknown(2));
        unify(&mut subst, &t1, &t2).unwrap();
        assert_eq!(subst.apply(&Type::Unknown(2)), Type::Int);
    }

    #[test]
    fn test_unify_postcondition() {
        let mut subst = Substitution::empty();
        let t1 = Type::func(Type::Unknown(1), Type::func(Type::Unknown(2), Type::Int));
        let t2 = Type::func(Type::Bool, Type::Unknown(3));
        unify(&mut subst, &t1, &t2).unwrap();
        assert_eq!(subst.apply(&t1), subst.apply(&t2));
    }

    #[test]
    fn test_unify_mismatch_base() {
        let mut subst = Substitution::empty();
        let result = unify(&mut subst, &Type::Bool, &Type::Int);
        assert_eq!(result.unwrap_err().to_string(), "Can't match Bool with Int");
    }

    #[test]
    fn test_unify_mismatch_shape() {
        let mut subst = Substitution::empty();
        let result = unify(&mut subst, &Type::Int, &Type::func(Type::Int, Type::Int));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Can't match Int with Int -> Int"
        );
    }

    #[test]
    fn test_unify_occurs_check() {
        let mut subst = Substitution::empty();
        let ty = Type::func(Type::Unknown(1), Type::Int);
        let result = unify(&mut subst, &Type::Unknown(1), &ty);
        assert_eq!(
            result,
            Err(UnifyError::Occurs {
                id: 1,
                ty: ty.clone()
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Can't match u1 with u1 -> Int"
        );
    }

    #[test]
    fn test_unify_occurs_check_through_bindings() {
        // u1 := u2 -> Int, then u2 ~ u1 would be infinite
        let mut subst = Substitution::empty();
        unify(
            &mut subst,
            &Type::Unknown(1),
            &Type::func(Type::Unknown(2), Type::Int),
        )
        .unwrap();
        let result = unify(&mut subst, &Type::Unknown(2), &Type::Unknown(1));
        assert!(matches!(result, Err(UnifyError::Occurs { .. })));
    }

    #[test]
    fn test_substitution_stays_occurs_free() {
        let mut subst = Substitution::empty();
        let t1 = Type::func(Type::Unknown(1), Type::Unknown(2));
        let t2 = Type::func(Type::Unknown(2), Type::Int);
        unify(&mut subst, &t1, &t2).unwrap();

        for (id, ty) in &subst.0 {
            assert!(
                !occurs_in(*id, &subst.apply(ty)),
                "binding u{} is cyclic",
                id
            );
        }
    }

    #[test]
    fn test_occurs_in_helper() {
        assert!(occurs_in(1, &Type::Unknown(1)));
        assert!(!occurs_in(1, &Type::Unknown(2)));
        assert!(!occurs_in(1, &Type::Int));
        assert!(occurs_in(1, &Type::func(Type::Int, Type::Unknown(1))));
        assert!(occurs_in(
            1,
            &Type::func(Type::func(Type::Unknown(1), Type::Int), Type::Bool)
        ));
    }
}
