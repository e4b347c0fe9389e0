/// Binary operator evaluation logic.
///
/// Applies arithmetic, comparison and equality operators to integer operands
/// with overflow and zero-divisor checks.
pub mod binary;

/// Core evaluation logic and interpreter state.
///
/// Contains the [`core::Interpreter`], the [`core::Flow`] signal used for
/// `return`, expression evaluation and the program entry point.
pub mod core;

/// Function declaration and call handling.
///
/// Registers declared functions, evaluates arguments, checks arity and runs
/// bodies in their own frame.
pub mod function;

/// The `input` expression.
pub mod input;

/// Statement execution: declarations, assignment, `print`, `return`,
/// conditionals and both loop forms.
pub mod statement;
