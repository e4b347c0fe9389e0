use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while parsing.
pub enum ParseError {
    /// A required token was missing; `token` is the lexeme found in its
    /// place (empty at end of input).
    #[error("Error on line {line}: Parse error: {message} at token '{token}'")]
    Expected {
        /// What the parser was looking for.
        message: String,
        /// The token encountered.
        token:   String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A token that cannot start an expression.
    #[error("Error on line {line}: Unexpected token: {token}")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal too large for a 64-bit value.
    #[error("Error on line {line}: Literal is too large: {literal}")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Blocks, parentheses, negations and operators nested past the parser's
    /// limit.
    #[error("Error on line {line}: Nesting deeper than {limit} levels at token '{token}'")]
    NestingTooDeep {
        /// The token where the limit was crossed.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
        /// The maximum nesting depth.
        limit: usize,
    },
}

impl ParseError {
    /// The lexeme of the token the error was raised at.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Expected { token, .. }
            | Self::UnexpectedToken { token, .. }
            | Self::NestingTooDeep { token, .. } => token,
            Self::LiteralTooLarge { literal, .. } => literal,
        }
    }

    /// The source line the error was raised at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::LiteralTooLarge { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
