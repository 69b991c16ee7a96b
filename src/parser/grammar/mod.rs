//! Grammar module for the Ruml language
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: Basic literals (identifiers, integers, strings, booleans)
//! - `expression`: Expression forms (lambdas, let/in, if/then/else, application)
//! - `ty`: The type-literal surface used by tests and diagnostics

mod expression;
mod literal;
mod ty;

pub use expression::expression;
pub use ty::type_literal;

use crate::ast::Expression;
use crate::types::Type;

use super::combinators::BoxedParser;
use super::state::{ParseError, ParseResult, ParseState, Parser};

/// Parse a complete expression from the token stream.
///
/// Rejects trailing input and reports the furthest error recorded during
/// parsing, which is usually more precise than the error of whichever
/// alternative failed last.
pub fn parse_expression(state: &mut ParseState) -> ParseResult<Expression> {
    run_to_end(state, expression())
}

/// Parse a complete type literal from the token stream.
pub fn parse_type(state: &mut ParseState) -> ParseResult<Type> {
    run_to_end(state, type_literal())
}

fn run_to_end<T: 'static>(state: &mut ParseState, parser: BoxedParser<T>) -> ParseResult<T> {
    match parser.parse(state) {
        Ok(result) => {
            if state.has_next() {
                let err = state.error_here("expected end of input");
                state.record_error(err);
                Err(state.furthest_error().cloned().unwrap_or_else(|| {
                    ParseError::new("expected end of input")
                }))
            } else {
                Ok(result)
            }
        }
        Err(err) => Err(state.furthest_error().cloned().unwrap_or(err)),
    }
}
