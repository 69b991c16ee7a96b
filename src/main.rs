use std::process;

use ruml::lexer::Token;
use ruml::parser::{ParseState, parse_expression};
use ruml::types::{Infer, Type, TypeEnv};

const INPUT: &str = r"let sum = \x -> if eq_int x 0 then 0 else add x (sum (sub x 1)) in sum 3";

fn main() -> anyhow::Result<()> {
    let lexed = Token::lex(INPUT)?;
    let mut state = ParseState::new(lexed);

    let expr = match parse_expression(&mut state) {
        Ok(expr) => expr,
        Err(e) => {
            println!("{e}");
            process::exit(-1);
        }
    };

    let env = TypeEnv::with_bindings(vec![
        (
            "eq_int".to_string(),
            Type::func(Type::Int, Type::func(Type::Int, Type::Bool)),
        ),
        (
            "add".to_string(),
            Type::func(Type::Int, Type::func(Type::Int, Type::Int)),
        ),
        (
            "sub".to_string(),
            Type::func(Type::Int, Type::func(Type::Int, Type::Int)),
        ),
    ]);

    let mut infer = Infer::new();
    match infer.infer_expr(&env, &expr) {
        Ok(ty) => println!("{ty}"),
        Err(e) => {
            println!("{e}");
            process::exit(-1);
        }
    }

    Ok(())
}
