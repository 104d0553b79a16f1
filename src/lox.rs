//! Pipeline driver: wires the scanner, parser, resolver, and evaluator
//! together, and hosts the two entry points of the binary (script execution
//! and the interactive prompt).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::info;

use crate::ast::{ExprId, Stmt};
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::token::Token;

/// One interpreter session.
///
/// A session owns the evaluator (globals, side-table, output sink) and the
/// expression-id watermark, so several sources can run through it in turn and
/// still share definitions.  This is what keeps a function defined on one
/// REPL line callable from the next.
pub struct Lox<W: Write> {
    interpreter: Interpreter<W>,
    next_expr_id: ExprId,
}

impl<W: Write> Lox<W> {
    pub fn new(writer: W) -> Self {
        Lox {
            interpreter: Interpreter::new(writer),
            next_expr_id: 0,
        }
    }

    /// Run one complete source text through the pipeline.
    ///
    /// The scanner and parser accumulate diagnostics, so a failing stage
    /// reports everything it found; resolution and evaluation stop at their
    /// first error.
    pub fn run(&mut self, source: &str) -> Result<(), Vec<LoxError>> {
        info!("Running {} byte(s) of source", source.len());

        let scanner = Scanner::new(source.as_bytes());

        let mut tokens: Vec<Token> = Vec::new();
        let mut errors: Vec<LoxError> = Vec::new();

        for item in scanner {
            match item {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let parser = Parser::new(tokens, self.next_expr_id);

        let (statements, next_expr_id): (Vec<Stmt>, ExprId) = parser.parse()?;

        self.next_expr_id = next_expr_id;

        let mut resolver = Resolver::new(&mut self.interpreter);

        resolver.resolve(&statements).map_err(|e| vec![e])?;

        self.interpreter.interpret(&statements).map_err(|e| vec![e])
    }
}

/// Execute a script file against a fresh session writing to stdout.
pub fn run_file(path: &Path) -> Result<(), Vec<LoxError>> {
    let bytes: Vec<u8> = fs::read(path).map_err(|e| vec![LoxError::from(e)])?;

    let source: String = String::from_utf8(bytes).map_err(|e| vec![LoxError::from(e)])?;

    let mut session: Lox<io::Stdout> = Lox::new(io::stdout());

    session.run(&source)
}

/// Interactive prompt.  Each line is a complete program; errors are printed
/// and the loop continues.  EOF ends the session.
pub fn run_prompt() -> Result<(), LoxError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut session: Lox<io::Stdout> = Lox::new(io::stdout());

    let mut input = String::new();

    loop {
        stdout.write_all(b"> ")?;
        stdout.flush()?;

        input.clear();

        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        if let Err(errors) = session.run(&input) {
            for e in errors {
                eprintln!("{}", e);
            }
        }
    }

    Ok(())
}
