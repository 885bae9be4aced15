//! One interpreter session: scan → parse → resolve → interpret.
//!
//! A session keeps its [`Interpreter`] between calls to [`Lox::run`], so a
//! REPL line can use globals defined by earlier lines.

use std::io::Write;

use log::{debug, info};
use thiserror::Error;

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::{Locals, Resolver};
use crate::scanner;
use crate::stmt::Stmt;

/// Why a source text did not run to completion.
#[derive(Debug, Error)]
pub enum RunError {
    /// Lexical, syntax or resolution errors; nothing was executed.
    #[error("{}", join_lines(.0))]
    Static(Vec<LoxError>),

    /// Execution started and stopped at this error.
    #[error(transparent)]
    Runtime(LoxError),
}

impl RunError {
    /// Conventional sysexits code: 65 (data error) or 70 (software error).
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => 65,
            RunError::Runtime(_) => 70,
        }
    }
}

fn join_lines(errors: &[LoxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Scan and parse `source`, collecting lexical and syntax errors together.
pub fn parse_source(source: &str) -> Result<Vec<Stmt>, RunError> {
    let (tokens, mut errors) = scanner::scan(source.as_bytes());

    match Parser::new(&tokens).parse() {
        Ok(statements) if errors.is_empty() => Ok(statements),
        Ok(_) => Err(RunError::Static(errors)),
        Err(parse_errors) => {
            errors.extend(parse_errors);
            Err(RunError::Static(errors))
        }
    }
}

pub struct Lox<'out> {
    interpreter: Interpreter<'out>,
}

impl<'out> Lox<'out> {
    pub fn new(out: &'out mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(out),
        }
    }

    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        info!("Running {} bytes of source", source.len());

        let statements: Vec<Stmt> = parse_source(source)?;
        debug!("Parsed {} statements", statements.len());

        let locals: Locals = Resolver::new()
            .resolve(&statements)
            .map_err(RunError::Static)?;

        self.interpreter.resolve(locals);
        self.interpreter
            .interpret(&statements)
            .map_err(RunError::Runtime)
    }
}
