use crate::ast::{Expression, FunctionCall, IfThenElse, Lambda, LetIn};

use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::Type;
use super::unify::unify;

/// The inference engine.
///
/// Owns the mutable substitution and the fresh-unknown counter for the
/// duration of a call; environments and expression trees are read-only
/// inputs. One engine serves one caller at a time - concurrent inference
/// needs one engine per caller, and they share nothing.
pub struct Infer {
    /// Bindings accumulated by unification. Exposed for diagnostics and
    /// for the test harness, which inspects it between cases.
    pub subst: Substitution,
    next_unknown: usize,
}

impl Infer {
    pub fn new() -> Self {
        Infer {
            subst: Substitution::empty(),
            next_unknown: 0,
        }
    }

    /// Discard all accumulated state.
    ///
    /// The test harness resets the engine between cases so that printed
    /// unknowns are deterministic (`u1`, `u2`, ... per case). Partial
    /// substitution state from a failed inference must never leak into
    /// the next one.
    pub fn reset(&mut self) {
        self.subst.clear();
        self.next_unknown = 0;
    }

    /// Produce a fresh unknown; the first after a reset is `u1`.
    fn fresh_unknown(&mut self) -> Type {
        self.next_unknown += 1;
        Type::Unknown(self.next_unknown)
    }

    /// Infer the principal type of `expr` under `env`.
    ///
    /// The returned type is zonked: the accumulated substitution has been
    /// applied to it, so the only unknowns remaining are the ones the
    /// expression leaves truly unconstrained.
    pub fn infer_expr(&mut self, env: &TypeEnv, expr: &Expression) -> Result<Type, TypeError> {
        let ty = self.infer(env, expr)?;
        Ok(self.subst.apply(&ty))
    }

    fn infer(&mut self, env: &TypeEnv, expr: &Expression) -> Result<Type, TypeError> {
        match expr {
            Expression::Integer(_) => Ok(Type::Int),

            Expression::Boolean(_) => Ok(Type::Bool),

            Expression::String(_) => Ok(Type::String),

            Expression::Ident(ident) => match env.lookup(&ident.value) {
                Some(ty) => Ok(ty.clone()),
                None => Err(TypeError::unknown_variable(
                    ident.value.clone(),
                    ident.position.clone(),
                )),
            },

            Expression::Lambda(lambda) => self.infer_lambda(env, lambda),

            Expression::FunctionCall(call) => self.infer_call(env, call),

            Expression::IfThenElse(cond) => self.infer_if_then_else(env, cond),

            Expression::LetIn(binding) => self.infer_let_in(env, binding),
        }
    }

    fn infer_lambda(&mut self, env: &TypeEnv, lambda: &Lambda) -> Result<Type, TypeError> {
        let param_ty = self.fresh_unknown();
        let env1 = env.extend(lambda.param.value.clone(), param_ty.clone());
        let body_ty = self.infer(&env1, &lambda.body)?;
        Ok(Type::func(param_ty, body_ty))
    }

    fn infer_call(&mut self, env: &TypeEnv, call: &FunctionCall) -> Result<Type, TypeError> {
        let func_ty = self.infer(env, &call.func)?;
        let arg_ty = self.infer(env, &call.arg)?;

        let result_ty = self.fresh_unknown();
        let expected_func_ty = Type::func(arg_ty, result_ty.clone());

        unify(&mut self.subst, &func_ty, &expected_func_ty)
            .map_err(|e| TypeError::from_unify_error(e, call.position.clone()))?;

        Ok(result_ty)
    }

    fn infer_if_then_else(&mut self, env: &TypeEnv, cond: &IfThenElse) -> Result<Type, TypeError> {
        let condition_ty = self.infer(env, &cond.condition)?;
        unify(&mut self.subst, &condition_ty, &Type::Bool)
            .map_err(|e| TypeError::from_unify_error(e, cond.condition.position()))?;

        // Both branches must agree; their common type is the result
        let then_ty = self.infer(env, &cond.then_branch)?;
        let else_ty = self.infer(env, &cond.else_branch)?;
        unify(&mut self.subst, &then_ty, &else_ty)
            .map_err(|e| TypeError::from_unify_error(e, cond.position.clone()))?;

        Ok(then_ty)
    }

    /// `let name = bound in body`, with `name` visible inside `bound`.
    ///
    /// The name is pre-bound to a fresh unknown so recursive uses inside
    /// `bound` constrain it; unifying the unknown with the inferred bound
    /// type then closes the loop. The binding is monomorphic: `body` sees
    /// the solved type itself, not a generalized scheme, so using the
    /// name at two incompatible types is a unification failure.
    fn infer_let_in(&mut self, env: &TypeEnv, binding: &LetIn) -> Result<Type, TypeError> {
        let bound_ty_var = self.fresh_unknown();
        let env1 = env.extend(binding.name.value.clone(), bound_ty_var.clone());

        let bound_ty = self.infer(&env1, &binding.bound)?;
        unify(&mut self.subst, &bound_ty_var, &bound_ty)
            .map_err(|e| TypeError::from_unify_error(e, binding.bound.position()))?;

        self.infer(&env1, &binding.body)
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Boolean, Ident, Integer, StringLiteral};

    // Helpers to build test expressions
    fn int_expr(value: i128) -> Expression {
        Expression::Integer(Integer {
            value,
            position: lachs::Span::default(),
        })
    }

    fn bool_expr(value: bool) -> Expression {
        Expression::Boolean(Boolean {
            value,
            position: lachs::Span::default(),
        })
    }

    fn string_expr(value: &str) -> Expression {
        Expression::String(StringLiteral {
            value: value.to_string(),
            position: lachs::Span::default(),
        })
    }

    fn ident_expr(name: &str) -> Expression {
        Expression::Ident(Ident {
            value: name.to_string(),
            position: lachs::Span::default(),
        })
    }

    fn lambda_expr(param: &str, body: Expression) -> Expression {
        Expression::Lambda(Lambda {
            param: Ident {
                value: param.to_string(),
                position: lachs::Span::default(),
            },
            body: Box::new(body),
            position: lachs::Span::default(),
        })
    }

    fn call_expr(func: Expression, arg: Expression) -> Expression {
        Expression::FunctionCall(FunctionCall {
            func: Box::new(func),
            arg: Box::new(arg),
            position: lachs::Span::default(),
        })
    }

    fn if_expr(condition: Expression, then_branch: Expression, else_branch: Expression) -> Expression {
        Expression::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            position: lachs::Span::default(),
        })
    }

    fn let_expr(name: &str, bound: Expression, body: Expression) -> Expression {
        Expression::LetIn(LetIn {
            name: Ident {
                value: name.to_string(),
                position: lachs::Span::default(),
            },
            bound: Box::new(bound),
            body: Box::new(body),
            position: lachs::Span::default(),
        })
    }

    #[test]
    fn test_infer_literals() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        assert_eq!(infer.infer_expr(&env, &int_expr(42)), Ok(Type::Int));
        assert_eq!(infer.infer_expr(&env, &bool_expr(true)), Ok(Type::Bool));
        assert_eq!(
            infer.infer_expr(&env, &string_expr("hello")),
            Ok(Type::String)
        );
    }

    #[test]
    fn test_infer_unknown_variable() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let result = infer.infer_expr(&env, &ident_expr("x"));
        match result {
            Err(TypeError::UnknownVariable { name, .. }) => assert_eq!(name, "x"),
            other => panic!("expected UnknownVariable error, got: {:?}", other),
        }
    }

    #[test]
    fn test_infer_bound_variable() {
        let mut infer = Infer::new();
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::Int)]);
        assert_eq!(infer.infer_expr(&env, &ident_expr("x")), Ok(Type::Int));
    }

    #[test]
    fn test_infer_identity_lambda_shares_unknown() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = lambda_expr("x", ident_expr("x"));
        let ty = infer.infer_expr(&env, &expr).unwrap();

        match ty {
            Type::Func(arg, result) => assert_eq!(*arg, *result),
            other => panic!("expected function type, got: {:?}", other),
        }
    }

    #[test]
    fn test_infer_fresh_unknowns_start_at_one() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = lambda_expr("x", ident_expr("x"));
        let ty = infer.infer_expr(&env, &expr).unwrap();
        assert_eq!(ty, Type::func(Type::Unknown(1), Type::Unknown(1)));
    }

    #[test]
    fn test_infer_application() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = call_expr(lambda_expr("x", ident_expr("x")), int_expr(42));
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Int));
    }

    #[test]
    fn test_infer_if_then_else() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = if_expr(bool_expr(true), int_expr(0), int_expr(1));
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Int));
    }

    #[test]
    fn test_infer_if_condition_must_be_bool() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = if_expr(int_expr(1), int_expr(0), int_expr(1));
        let err = infer.infer_expr(&env, &expr).unwrap_err();
        assert_eq!(err.to_string(), "Can't match Int with Bool");
    }

    #[test]
    fn test_infer_if_branches_must_agree() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = if_expr(bool_expr(true), int_expr(0), string_expr("no"));
        let err = infer.infer_expr(&env, &expr).unwrap_err();
        assert_eq!(err.to_string(), "Can't match Int with String");
    }

    #[test]
    fn test_infer_let_binds_body() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr("x", int_expr(42), ident_expr("x"));
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Int));
    }

    #[test]
    fn test_infer_let_is_monomorphic() {
        // let f = \x -> x in (\ignored -> f true) (f 5)
        // f is solved to Int -> Int by the first use, so the second fails.
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr(
            "f",
            lambda_expr("x", ident_expr("x")),
            call_expr(
                lambda_expr("ignored", call_expr(ident_expr("f"), bool_expr(true))),
                call_expr(ident_expr("f"), int_expr(5)),
            ),
        );
        assert!(infer.infer_expr(&env, &expr).is_err());
    }

    #[test]
    fn test_infer_let_name_scoped_to_bound_and_body() {
        // let x = (let y = 42 in y) in y - the inner y escapes its scope
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr(
            "x",
            let_expr("y", int_expr(42), ident_expr("y")),
            ident_expr("y"),
        );
        let err = infer.infer_expr(&env, &expr).unwrap_err();
        assert_eq!(err.to_string(), "Unknown variable y");
    }

    #[test]
    fn test_infer_let_shadowing() {
        // let x = 1 in let x = true in x
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr(
            "x",
            int_expr(1),
            let_expr("x", bool_expr(true), ident_expr("x")),
        );
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Bool));
    }

    #[test]
    fn test_infer_let_outer_binding_restored_after_inner_scope() {
        // let x = 1 in (\ignored -> x) (let x = true in x)
        // The inner let rebinds x for its own body only.
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr(
            "x",
            int_expr(1),
            call_expr(
                lambda_expr("ignored", ident_expr("x")),
                let_expr("x", bool_expr(true), ident_expr("x")),
            ),
        );
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Int));
    }

    #[test]
    fn test_infer_recursive_let() {
        // let loop = \x -> loop x in loop
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = let_expr(
            "loop",
            lambda_expr("x", call_expr(ident_expr("loop"), ident_expr("x"))),
            ident_expr("loop"),
        );
        let ty = infer.infer_expr(&env, &expr).unwrap();
        assert!(matches!(ty, Type::Func(_, _)));
    }

    #[test]
    fn test_infer_zonks_result() {
        // (\f -> f 1) (\x -> x) : the raw result is an unknown that the
        // substitution has already solved to Int
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = call_expr(
            lambda_expr("f", call_expr(ident_expr("f"), int_expr(1))),
            lambda_expr("x", ident_expr("x")),
        );
        assert_eq!(infer.infer_expr(&env, &expr), Ok(Type::Int));
    }

    #[test]
    fn test_reset_restarts_fresh_supply() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();
        let expr = lambda_expr("x", ident_expr("x"));

        let first = infer.infer_expr(&env, &expr).unwrap();
        infer.reset();
        let second = infer.infer_expr(&env, &expr).unwrap();

        assert_eq!(first, second);
        assert!(infer.subst.is_empty());
    }

    #[test]
    fn test_engine_state_discarded_after_failure() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();

        let bad = if_expr(int_expr(1), int_expr(0), int_expr(1));
        assert!(infer.infer_expr(&env, &bad).is_err());

        infer.reset();
        let good = lambda_expr("x", ident_expr("x"));
        assert_eq!(
            infer.infer_expr(&env, &good),
            Ok(Type::func(Type::Unknown(1), Type::Unknown(1)))
        );
    }
}
