//! # Abstract Syntax Tree for Ruml Expressions
//!
//! This module defines the expression tree produced by the parser and
//! consumed by type inference.
//!
//! ## Pipeline Position
//!
//! ```text
//! Lexer → Token Stream → Parser → [AST] → Type Inference
//! ```
//!
//! Ruml is an expression language: a program is a single expression, and
//! the surface syntax maps one-to-one onto the tree. Lambdas take exactly
//! one parameter (multi-parameter functions are written curried, `\x ->
//! \y -> ...`), and function calls take exactly one argument (application
//! is left-associative juxtaposition, so `f x y` is `(f x) y`). Because of
//! this the tree needs no desugaring before inference.
//!
//! Every node carries a [`lachs::Span`] so later phases can point error
//! messages at the source.

pub mod expression;

pub use expression::*;
