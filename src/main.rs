use std::io::Write;

use clap::{Args, Parser, Subcommand};
use pascal::{
    interpreter::{GlobalScope, InterpretError, Interpreter},
    lexer::{LexError, Lexer},
    parser::ParseError,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Repl)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a program and print its global scope
    Run(FileArgs),
    /// Print the token stream of a program
    Tokens(FileArgs),
    /// Print the parsed syntax tree of a program
    Ast(FileArgs),
    Repl,
}

#[derive(Debug, Args)]
struct FileArgs {
    file: String,
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("Failed to read {file}: {source}")]
    Read {
        file: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Interpret(#[from] InterpretError),
}

fn main() {
    let args = Cli::parse();

    let result = match args.command() {
        Command::Run(args) => run_command(args),
        Command::Tokens(args) => tokens_command(args),
        Command::Ast(args) => ast_command(args),
        Command::Repl => {
            repl_command();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Reads a source file line by line, joining the lines with '\n' and without a
/// trailing newline.
fn read_source(file: &str) -> Result<String, CommandError> {
    let contents = std::fs::read_to_string(file).map_err(|source| CommandError::Read {
        file: file.to_string(),
        source,
    })?;
    Ok(contents.lines().collect::<Vec<_>>().join("\n"))
}

fn run_command(args: &FileArgs) -> Result<(), CommandError> {
    let source = read_source(&args.file)?;
    let scope = pascal::run(&source)?;
    println!("Global Scope Variables:");
    print!("{scope}");
    Ok(())
}

fn tokens_command(args: &FileArgs) -> Result<(), CommandError> {
    let source = read_source(&args.file)?;
    println!("{:>4} {:>4}  {:<10} {}", "line", "col", "kind", "value");
    for token in Lexer::new(&source) {
        let token = token?;
        println!(
            "{:>4} {:>4}  {:<10} {}",
            token.line(),
            token.column(),
            token.token_type,
            token.value
        );
    }
    Ok(())
}

fn ast_command(args: &FileArgs) -> Result<(), CommandError> {
    let source = read_source(&args.file)?;
    let program = pascal::parser::Parser::new(Lexer::new(&source))?.parse()?;
    println!("{program}");
    Ok(())
}

fn repl_command() {
    println!("Welcome to the Pascal REPL!");
    println!("Enter one program per line, e.g. BEGIN x := 1 END.");
    println!("EOF to exit. (Ctrl+D on *nix, Ctrl+Z on Windows)");

    let mut scope = GlobalScope::new();
    let mut input = String::new();

    loop {
        print!("> ");
        if std::io::stdout().flush().is_err() {
            break;
        }

        match std::io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let source = input.trim();
        if !source.is_empty() {
            match repl_line(source, scope.clone()) {
                Ok(updated) => {
                    scope = updated;
                    print!("{scope}");
                }
                Err(e) => println!("Error: {e}"),
            }
        }

        input.clear()
    }
}

/// Runs one line against a copy of the scope so a failing line leaves the
/// session untouched.
fn repl_line(source: &str, scope: GlobalScope) -> Result<GlobalScope, InterpretError> {
    let parser = pascal::parser::Parser::new(Lexer::new(source))?;
    let mut interpreter = Interpreter::with_scope(parser, scope);
    interpreter.interpret()?;
    Ok(interpreter.into_global_scope())
}
