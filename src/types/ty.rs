//! # Core Type System Definitions
//!
//! This module defines the type terms manipulated by Hindley-Milner
//! type inference.
//!
//! ## Overview
//!
//! A type term is one of three shapes:
//!
//! - A **base type**: `Int`, `Bool`, or `String`
//! - An **unknown** - a unification variable awaiting resolution, printed
//!   as `u1`, `u2`, ...
//! - A **function arrow** `Func(arg, result)`, written `arg -> result`
//!
//! ## Surface syntax
//!
//! Arrows are right-associative: `Int -> Int -> Bool` reads as
//! `Int -> (Int -> Bool)`. The pretty printer only parenthesizes the
//! argument of an arrow when that argument is itself an arrow:
//!
//! ```text
//! Func(Int, Func(Int, Bool))   prints as   Int -> Int -> Bool
//! Func(Func(Int, Int), Bool)   prints as   (Int -> Int) -> Bool
//! Func(Unknown(1), Unknown(1)) prints as   u1 -> u1
//! ```
//!
//! Equality on type terms is structural, so two independently built terms
//! compare equal exactly when they print the same.
//!
//! ## Related Modules
//!
//! - [`crate::types::infer`] - Type inference producing these terms
//! - [`crate::types::subst`] - Substitutions resolving unknowns
//! - [`crate::types::unify`] - Unification over these terms

use std::fmt;

/// All possible types in Ruml.
///
/// # Variants
///
/// * `Int` - Integer type
/// * `Bool` - Boolean type
/// * `String` - String type
/// * `Unknown` - Unification variable, identified by a positive integer
/// * `Func` - Function type `argument_type -> result_type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    String,
    Unknown(usize),
    Func(Box<Type>, Box<Type>),
}

impl Type {
    /// Create a function type from argument and result types.
    ///
    /// # Arguments
    ///
    /// * `arg` - Argument type (type of the function's input)
    /// * `result` - Result type (type of the function's output)
    ///
    /// # Returns
    ///
    /// A function type `arg -> result`
    ///
    /// # Examples
    ///
    /// ```text
    /// Type::func(Int, Int)              // Int -> Int
    /// Type::func(Int, func(Int, Int))   // Int -> Int -> Int
    /// ```
    pub fn func(arg: Type, result: Type) -> Self {
        Type::Func(Box::new(arg), Box::new(result))
    }

    /// Convert this type to its surface string representation.
    ///
    /// # Returns
    ///
    /// A string representation of this type
    ///
    /// # Examples
    ///
    /// ```text
    /// Int.pretty()                      // "Int"
    /// Unknown(3).pretty()               // "u3"
    /// Func(Int, Bool).pretty()          // "Int -> Bool"
    ///
    /// // Arrow arguments keep their parentheses:
    /// Func(Func(Int, Int), Bool).pretty()  // "(Int -> Int) -> Bool"
    /// Func(Int, Func(Int, Bool)).pretty()  // "Int -> Int -> Bool"
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::String => "String".to_string(),
            Type::Unknown(id) => format!("u{}", id),
            Type::Func(arg, result) => {
                let arg_str = if matches!(**arg, Type::Func(_, _)) {
                    format!("({})", arg.pretty())
                } else {
                    arg.pretty()
                };
                format!("{} -> {}", arg_str, result.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
