use thiserror::Error;

#[derive(Debug, Error)]
/// Represents all errors that can occur during evaluation.
///
/// Every runtime error ends the run; none is recoverable from inside a
/// program.
pub enum RuntimeError {
    /// Read or assignment of a name that no scope in the chain defines.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that was never declared.
    #[error("Undefined function '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// The program has no zero-parameter function named `entry`.
    #[error("No entry() function found.")]
    MissingEntry,
    /// The wrong number of arguments was supplied to a function.
    #[error("Function '{name}' expects {expected} argument(s) but got {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// Attempted division or remainder by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// Arithmetic operation overflowed.
    #[error("Integer overflow while computing {left} {op} {right}.")]
    Overflow {
        /// Left operand.
        left:  i64,
        /// Operator spelling.
        op:    &'static str,
        /// Right operand.
        right: i64,
    },
    /// Function calls nested deeper than the interpreter allows.
    #[error("Call depth exceeded {limit} in call to '{name}'.")]
    StackOverflow {
        /// The function being entered.
        name:  String,
        /// The configured limit.
        limit: usize,
    },
    /// `input` found no more tokens.
    #[error("Input exhausted: expected an integer.")]
    InputExhausted,
    /// `input` read something that is not an integer.
    #[error("Invalid input '{token}': expected an integer.")]
    InvalidInput {
        /// The offending input token.
        token: String,
    },
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
