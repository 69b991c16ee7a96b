//! # Type Substitutions for Unification
//!
//! This module implements the substitution used in Hindley-Milner type
//! inference to record what each unknown has been resolved to.
//!
//! ## Overview
//!
//! A substitution maps unknown ids to types. Unification extends it one
//! binding at a time; applying it rewrites a type until no mapped unknown
//! remains:
//!
//! ```text
//! // Substitution: {1 := Int}
//!
//! apply(u1)        = Int
//! apply(u1 -> u1)  = Int -> Int
//! apply(u1 -> u2)  = Int -> u2
//! ```
//!
//! ## Transitive chains
//!
//! Bindings may point at other unknowns (`{1 := u2, 2 := Int}`).
//! `apply` resolves such chains lazily during traversal, so the result
//! never contains an unknown that is itself a key:
//!
//! ```text
//! // Substitution: {1 := u2, 2 := Int}
//! apply(u1) = Int      // u1 -> u2 -> Int, resolved in one pass
//! ```
//!
//! The occurs check in [`crate::types::unify`] guarantees the chains are
//! acyclic, so this resolution always terminates.
//!
//! ## Composition
//!
//! `compose` combines two substitutions into one equivalent to applying
//! them in order:
//!
//! ```text
//! s1.compose(&s2).apply(t) == s2.apply(&s1.apply(t))
//! ```
//!
//! The engine itself keeps a single substitution that unification extends
//! in place, so it never needs `compose`; the operation exists for callers
//! that combine the substitutions of independent inference runs.
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - Type terms that substitutions apply to
//! - [`crate::types::unify`] - Unification that extends the substitution

use std::collections::HashMap;

use super::ty::Type;

/// A substitution mapping unknown ids to types.
///
/// Internally a flat hash map. The unifier maintains two invariants:
/// no key maps to itself, and no binding introduces a cycle (occurs
/// check), so repeated application always reaches a fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub HashMap<usize, Type>);

impl Substitution {
    /// Create an empty substitution (no mappings).
    ///
    /// # Returns
    ///
    /// A new substitution with no bindings
    ///
    /// # Example
    ///
    /// ```text
    /// let subst = Substitution::empty();
    /// // Applying an empty substitution to any type returns the same type
    /// assert_eq!(subst.apply(&Type::Int), Type::Int);
    /// ```
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    /// Create a substitution with a single mapping.
    ///
    /// # Arguments
    ///
    /// * `id` - The unknown id to map
    /// * `ty` - The type to map the unknown to
    ///
    /// # Returns
    ///
    /// A new substitution with one binding: `id := ty`
    ///
    /// # Example
    ///
    /// ```text
    /// let subst = Substitution::singleton(1, Type::Int);
    /// assert_eq!(subst.apply(&Type::Unknown(1)), Type::Int);
    /// ```
    pub fn singleton(id: usize, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(id, ty);
        Substitution(map)
    }

    /// Apply this substitution to a type.
    ///
    /// Recursively replaces every mapped unknown with the application of
    /// the substitution to its binding, so the result contains no unknown
    /// that is a key of this substitution.
    ///
    /// # Arguments
    ///
    /// * `ty` - The type to apply the substitution to
    ///
    /// # Returns
    ///
    /// A new type with all bindings expanded to a fixed point
    ///
    /// # Examples
    ///
    /// ```text
    /// // Substitution: {1 := Int, 2 := u3}
    ///
    /// apply(u1)       = Int
    /// apply(u2)       = u3    // not a key, kept
    /// apply(u4)       = u4    // unmapped, kept
    /// apply(u1 -> u2) = Int -> u3
    /// ```
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int | Type::Bool | Type::String => ty.clone(),
            Type::Unknown(id) => match self.0.get(id) {
                Some(bound) => self.apply(bound),
                None => ty.clone(),
            },
            Type::Func(arg, result) => Type::func(self.apply(arg), self.apply(result)),
        }
    }

    /// Insert a single binding.
    ///
    /// The caller is responsible for the occurs precondition: `Unknown(id)`
    /// must not occur in `apply(ty)`. The unifier is the only writer in
    /// the engine and checks this before every insertion.
    ///
    /// # Arguments
    ///
    /// * `id` - The unknown id to bind
    /// * `ty` - The type to bind it to
    ///
    /// # Example
    ///
    /// ```text
    /// let mut subst = Substitution::empty();
    /// subst.extend(1, Type::Int);
    /// // subst = {1 := Int}
    /// ```
    pub fn extend(&mut self, id: usize, ty: Type) {
        self.0.insert(id, ty);
    }

    /// Compose with another substitution: apply `self` first, then `other`.
    ///
    /// Satisfies `s1.compose(&s2).apply(t) == s2.apply(&s1.apply(t))`.
    ///
    /// # Arguments
    ///
    /// * `other` - The substitution applied after this one
    ///
    /// # Returns
    ///
    /// A new substitution equivalent to applying `self` then `other`
    ///
    /// # Example
    ///
    /// ```text
    /// s1 = {1 := u2}
    /// s2 = {2 := Int}
    ///
    /// s1.compose(&s2) = {1 := Int, 2 := Int}
    ///
    /// // Check: compose(s1, s2)(u1) = s2(s1(u1)) = s2(u2) = Int
    /// ```
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = HashMap::new();

        // Apply other to all bindings of self
        for (id, ty) in &self.0 {
            result.insert(*id, other.apply(ty));
        }

        // Add bindings from other not overridden above
        for (id, ty) in &other.0 {
            if !result.contains_key(id) {
                result.insert(*id, ty.clone());
            }
        }

        Substitution(result)
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Check whether this substitution has any bindings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
