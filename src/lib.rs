//! # sprola
//!
//! sprola is an interpreter for SPROLA, a small integer-only procedural
//! language, written in Rust. Source text is tokenized, parsed into a tree of
//! function declarations, statements and expressions, and executed by a
//! tree-walking evaluator starting at the `entry` function.
//!
//! ```
//! let source = "function square(n) { return n * n; }
//!               function entry() { print square(7); return 0; }";
//!
//! let mut output = Vec::new();
//! let result = sprola::run_source(source, &b""[..], &mut output).unwrap();
//!
//! assert_eq!(result, Some(0));
//! assert_eq!(output, b"49\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::{
    ast::Program,
    error::{Error, ParseError},
    interpreter::{
        evaluator::core::Interpreter,
        lexer::{Token, tokenize},
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `FunctionDecl`, `Statement` and `Expr`
/// types that represent source code as a tree, the factory that builds them,
/// and their textual rendering. The AST is built by the parser and traversed
/// by the evaluator.
///
/// # Responsibilities
/// - Defines node types for every language construct.
/// - Provides one constructor per node kind.
/// - Renders nodes back to source text that parses to the same tree.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error that can be raised while parsing or
/// running a program, and a top-level [`error::Error`] that wraps them
/// together with file I/O failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and offending tokens to parse errors.
/// - Implements `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, the variable environment and
/// evaluation.
pub mod interpreter;

/// Tokenizes SPROLA source text.
///
/// The returned list always ends with exactly one end-of-input token.
///
/// # Example
/// ```
/// use sprola::{interpreter::lexer::TokenKind, tokenize_source};
///
/// let tokens = tokenize_source("print 1;");
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[3].kind, TokenKind::Eof);
/// ```
#[must_use]
pub fn tokenize_source(source: &str) -> Vec<Token> {
    tokenize(source)
}

/// Tokenizes and parses SPROLA source text into a [`Program`].
///
/// # Errors
/// Returns the first [`ParseError`] encountered. There is no recovery.
///
/// # Example
/// ```
/// use sprola::parse_source;
///
/// let program = parse_source("function entry() { return 1 + 2 * 3; }").unwrap();
/// assert_eq!(program.functions[0].name, "entry");
/// assert_eq!(program.to_string(), "function entry() {\n    return (1 + (2 * 3));\n}");
///
/// let err = parse_source("function entry() { return 1 }").unwrap_err();
/// assert_eq!(err.line(), 1);
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    parse_program(tokenize(source))
}

/// Parses and runs SPROLA source text.
///
/// `print` writes to `output`; `input` reads from `input`.
///
/// # Returns
/// The value returned by `entry`, or `None` if `entry` ends without
/// `return`.
///
/// # Errors
/// Returns [`Error::Parse`] if the source does not parse and
/// [`Error::Runtime`] if execution fails. Output written before a runtime
/// failure stays in `output`.
pub fn run_source<R, W>(source: &str, input: R, output: W) -> Result<Option<i64>, Error>
    where R: BufRead,
          W: Write
{
    let program = parse_source(source)?;
    let mut interpreter = Interpreter::new(input, output);
    Ok(interpreter.run(&program)?)
}
