use std::io;
use std::process;

use camlet::core::core_env;
use camlet::fmt::print_type;
use camlet::lexer::Token;
use camlet::parser::{parse_expression, ParseState};
use camlet::types::infer::Infer;

/// Read one expression from stdin, print its principal type on stdout.
/// Parse and inference failures go to stderr with a non-zero exit.
fn main() -> anyhow::Result<()> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let tokens = Token::lex(&line)?;
    let mut state = ParseState::new(tokens);
    let expr = match parse_expression(&mut state) {
        Ok(expr) => expr,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let mut env = core_env()?;
    let mut infer = Infer::new();
    match infer.top_typeof(&mut env, &expr) {
        Ok(ty) => println!("{}", print_type(&ty)),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }

    Ok(())
}
