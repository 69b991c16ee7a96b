//! Ruml - An ML-inspired expression language with Hindley-Milner type inference
//!
//! This library provides the core components for lexing, parsing, and
//! inferring the principal type of Ruml expressions.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod types;
