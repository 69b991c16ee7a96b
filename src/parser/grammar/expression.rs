//! Expression parsers for the Ruml language

use crate::ast::{Expression, FunctionCall, IfThenElse, Lambda, LetIn};

use crate::parser::combinators::{
    BoxedParser, expect_arrow, expect_backslash, expect_else, expect_equals, expect_if, expect_in,
    expect_let, expect_lparen, expect_rparen, expect_then, many,
};
use crate::parser::state::{ParseState, Parser};

use super::literal::{boolean, ident, integer, string_literal};

/// atom := "(" expression ")" | ident | integer | string | boolean
///
/// Atoms are the only things that may appear as arguments in an
/// application chain; anything larger must be parenthesized.
fn atom() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();

        // Try parenthesized expression
        if expect_lparen().parse(state).is_ok() {
            let expr = expression().parse(state)?;
            expect_rparen().parse(state)?;
            return Ok(expr);
        }
        state.restore(pos);

        let bool_expr = boolean() >> Expression::Boolean;
        let ident_expr = ident() >> Expression::Ident;
        let int_expr = integer() >> Expression::Integer;
        let str_expr = string_literal() >> Expression::String;

        (bool_expr | ident_expr | int_expr | str_expr).parse(state)
    })
}

/// application := atom atom*
///
/// Juxtaposition is left-associative: `f x y` parses as `(f x) y`.
fn application() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = atom().parse(state)?;
        let args = many(atom()).parse(state)?;

        Ok(args.into_iter().fold(first, |func, arg| {
            let position = func.position().merge(&arg.position());
            Expression::FunctionCall(FunctionCall {
                func: Box::new(func),
                arg: Box::new(arg),
                position,
            })
        }))
    })
}

/// lambda := "\" ident "->" expression
pub fn lambda() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_backslash().parse(state)?.pos();
        let param = ident().parse(state)?;
        expect_arrow().parse(state)?;
        let body = expression().parse(state)?;

        let position = start.merge(&body.position());
        Ok(Expression::Lambda(Lambda {
            param,
            body: Box::new(body),
            position,
        }))
    })
}

/// let_in := "let" ident "=" expression "in" expression
///
/// The bound name is visible inside its own definition, so every binding
/// is potentially recursive.
pub fn let_in() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_let().parse(state)?.pos();
        let name = ident().parse(state)?;
        expect_equals().parse(state)?;
        let bound = expression().parse(state)?;
        expect_in().parse(state)?;
        let body = expression().parse(state)?;

        let position = start.merge(&body.position());
        Ok(Expression::LetIn(LetIn {
            name,
            bound: Box::new(bound),
            body: Box::new(body),
            position,
        }))
    })
}

/// if_then_else := "if" expression "then" expression "else" expression
pub fn if_then_else() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_if().parse(state)?.pos();
        let condition = expression().parse(state)?;
        expect_then().parse(state)?;
        let then_branch = expression().parse(state)?;
        expect_else().parse(state)?;
        let else_branch = expression().parse(state)?;

        let position = start.merge(&else_branch.position());
        Ok(Expression::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            position,
        }))
    })
}

/// expression := lambda | let_in | if_then_else | application
pub fn expression() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();

        if let Ok(expr) = lambda().parse(state) {
            return Ok(expr);
        }
        state.restore(pos);

        if let Ok(expr) = let_in().parse(state) {
            return Ok(expr);
        }
        state.restore(pos);

        if let Ok(expr) = if_then_else().parse(state) {
            return Ok(expr);
        }
        state.restore(pos);

        application().parse(state)
    })
}
