/// Parsing errors.
///
/// Defines the errors raised while turning a token stream into a program:
/// missing punctuation, unexpected tokens and literals that do not fit.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, a missing `entry` function, arithmetic faults and input failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of the source-to-result pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The source file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path that was being read.
        path:   String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
