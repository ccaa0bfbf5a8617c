pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

use interpreter::{GlobalScope, InterpretError, Interpreter};
use lexer::Lexer;
use parser::Parser;

/// Lexes, parses and runs `source`, returning the resulting global scope.
pub fn run(source: &str) -> Result<GlobalScope, InterpretError> {
    let parser = Parser::new(Lexer::new(source))?;
    let mut interpreter = Interpreter::new(parser);
    interpreter.interpret()?;
    Ok(interpreter.into_global_scope())
}
