//! Parsers for the type-literal surface
//!
//! Types are written the way they are printed: uppercase names for the
//! base types (`Int`, `Bool`, `String`), `uN` for unification variables,
//! and `->` for function arrows, which associate to the right
//! (`A -> B -> C` is `A -> (B -> C)`). Parentheses group.
//!
//! This surface is consumed by tests (building environments and expected
//! results) and is the inverse of [`crate::types::Type::pretty`].

use crate::lexer::Token;
use crate::types::Type;

use crate::parser::combinators::{BoxedParser, expect_arrow, expect_lparen, expect_rparen, optional};
use crate::parser::state::{ParseError, ParseState, Parser};

/// type_name := "Int" | "Bool" | "String" | "u" digits
fn type_name() -> BoxedParser<Type> {
    BoxedParser::new(|state: &mut ParseState| {
        let pos = state.position();
        match state.peek() {
            Some(Token::Ident(_)) => {
                if let Token::Ident(id) = state.advance().unwrap() {
                    match id.value.as_str() {
                        "Int" => Ok(Type::Int),
                        "Bool" => Ok(Type::Bool),
                        "String" => Ok(Type::String),
                        other => {
                            if let Some(unknown) = parse_unknown(other) {
                                return Ok(unknown);
                            }
                            let err = ParseError::new("unexpected token")
                                .expected("type name")
                                .found(format!("identifier '{}'", other))
                                .at(id.position);
                            // Record against the failing token, not one past it
                            state.restore(pos);
                            state.record_error(err.clone());
                            Err(err)
                        }
                    }
                } else {
                    unreachable!()
                }
            }
            Some(tok) => {
                let err = ParseError::new("unexpected token")
                    .expected("type name")
                    .found(tok.describe())
                    .at(tok.pos());
                state.record_error(err.clone());
                Err(err)
            }
            None => {
                let err = ParseError::new("unexpected end of input").expected("type name");
                state.record_error(err.clone());
                Err(err)
            }
        }
    })
}

/// `uN` with N a positive decimal number denotes the unknown with id N.
fn parse_unknown(name: &str) -> Option<Type> {
    let digits = name.strip_prefix('u')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(Type::Unknown)
}

/// type_atom := "(" type ")" | type_name
fn type_atom() -> BoxedParser<Type> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();

        if expect_lparen().parse(state).is_ok() {
            let ty = type_literal().parse(state)?;
            expect_rparen().parse(state)?;
            return Ok(ty);
        }
        state.restore(pos);

        type_name().parse(state)
    })
}

/// type := type_atom ("->" type)?
///
/// Arrows associate to the right by parsing the result side recursively.
pub fn type_literal() -> BoxedParser<Type> {
    BoxedParser::new(move |state: &mut ParseState| {
        let arg = type_atom().parse(state)?;

        if optional(expect_arrow()).parse(state)?.is_some() {
            let result = type_literal().parse(state)?;
            Ok(Type::func(arg, result))
        } else {
            Ok(arg)
        }
    })
}
