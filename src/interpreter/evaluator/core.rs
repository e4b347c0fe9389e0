use std::{
    collections::{HashMap, VecDeque},
    io::{BufRead, Write},
};

use crate::{
    ast::{Expr, FunctionDecl, Program},
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::binary::eval_binary},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest nesting of function calls before the run is aborted with
/// [`RuntimeError::StackOverflow`].
pub const MAX_CALL_DEPTH: usize = 512;

/// Outcome of executing a statement.
///
/// `Return` travels outward through every enclosing block, `if` and loop
/// until the function call that owns it turns it into the call's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// A `return` ran; stop the current function with this value.
    Return(i64),
}

/// Stores the runtime state of one program run.
///
/// The interpreter owns the function table, the variable environment and the
/// two I/O endpoints. `print` writes to `output`; `input` reads
/// whitespace-delimited integers from `input`.
///
/// ## Usage
///
/// Create an `Interpreter` with any [`BufRead`] source and [`Write`] sink,
/// then call [`Interpreter::run`] with a parsed [`Program`]. The program must
/// outlive the interpreter because the function table borrows from it.
///
/// # Example
/// ```
/// use sprola::{interpreter::evaluator::core::Interpreter, parse_source};
///
/// let program = parse_source("function entry() { print 6 * 7; return 1; }").unwrap();
///
/// let mut output = Vec::new();
/// let mut interpreter = Interpreter::new(&b""[..], &mut output);
/// let result = interpreter.run(&program).unwrap();
///
/// assert_eq!(result, Some(1));
/// drop(interpreter);
/// assert_eq!(output, b"42\n");
/// ```
pub struct Interpreter<'p, R, W> {
    /// Declared functions by name, filled when a run starts.
    pub(super) functions:     HashMap<&'p str, &'p FunctionDecl>,
    /// Variable frames; one per active call on top of the globals.
    pub(super) environment:   Environment,
    /// Number of user function calls currently executing.
    pub(super) call_depth:    usize,
    pub(super) input:         R,
    /// Tokens read from `input` but not yet consumed by an `input`
    /// expression.
    pub(super) pending_input: VecDeque<String>,
    pub(super) output:        W,
}

impl<'p, R, W> Interpreter<'p, R, W>
    where R: BufRead,
          W: Write
{
    /// Creates an interpreter with an empty function table and a fresh
    /// environment holding only the global frame.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { functions: HashMap::new(),
               environment: Environment::new(),
               call_depth: 0,
               input,
               pending_input: VecDeque::new(),
               output }
    }

    /// Executes `program` by calling its `entry` function.
    ///
    /// Every function is registered before anything runs, so functions may
    /// call each other regardless of declaration order. A name declared
    /// twice refers to its last declaration.
    ///
    /// # Returns
    /// `Some(value)` if `entry` finished with `return value`, `None` if it
    /// ran off the end of its body.
    ///
    /// # Errors
    /// - [`RuntimeError::MissingEntry`] if there is no parameterless `entry`.
    /// - Any runtime error raised while executing the program.
    pub fn run(&mut self, program: &'p Program) -> EvalResult<Option<i64>> {
        self.register_functions(program);

        let entry = self.functions
                        .get("entry")
                        .copied()
                        .filter(|function| function.params.is_empty())
                        .ok_or(RuntimeError::MissingEntry)?;

        let result = self.invoke(entry, Vec::new());
        self.output.flush()?;

        match result? {
            Flow::Return(value) => Ok(Some(value)),
            Flow::Normal => Ok(None),
        }
    }

    /// Evaluates an expression to an integer.
    ///
    /// Operands of a binary expression and arguments of a call are evaluated
    /// left to right, all of them before the operator or call is applied.
    ///
    /// # Errors
    /// Propagates undefined names, arithmetic failures, input failures and
    /// anything raised inside a called function.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<i64> {
        match expr {
            Expr::IntegerLiteral(value) => Ok(*value),
            Expr::VarRef(name) => self.environment.get(name),
            Expr::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, left, right)
            },
            Expr::FuncCall { name, args } => self.eval_call(name, args),
            Expr::Input => self.read_input(),
        }
    }

    /// The variable environment, for inspection after or between runs.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Consumes the interpreter and hands back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;

    fn run_with_input(source: &str, input: &str) -> (EvalResult<Option<i64>>, String) {
        let program = parse_source(source).unwrap();
        let mut interpreter = Interpreter::new(input.as_bytes(), Vec::new());
        let result = interpreter.run(&program);
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        (result, output)
    }

    fn run(source: &str) -> (EvalResult<Option<i64>>, String) {
        run_with_input(source, "")
    }

    #[test]
    fn prints_sum() {
        let (result, output) = run("function entry() { var x <- 1 + 2; print x; }");
        assert_eq!(result.unwrap(), None);
        assert_eq!(output, "3\n");
    }

    #[test]
    fn entry_return_value() {
        let (result, output) = run("function entry() { return 42; }");
        assert_eq!(result.unwrap(), Some(42));
        assert!(output.is_empty());
    }

    #[test]
    fn missing_entry() {
        let (result, _) = run("function main() { return 1; }");
        assert!(matches!(result, Err(RuntimeError::MissingEntry)));

        let (result, _) = run("function entry(x) { return x; }");
        assert!(matches!(result, Err(RuntimeError::MissingEntry)));
    }

    #[test]
    fn last_declaration_of_a_name_wins() {
        let (result, _) = run("function f() { return 1; } function f() { return 2; } function entry() { return f(); }");
        assert_eq!(result.unwrap(), Some(2));

        let (result, output) = run("function entry() { print 1; } function entry() { return 7; }");
        assert_eq!(result.unwrap(), Some(7));
        assert!(output.is_empty());
    }

    #[test]
    fn undefined_variable() {
        let (result, _) = run("function entry() { print y; }");
        assert_eq!(result.unwrap_err().to_string(), "Undefined variable 'y'");
    }

    #[test]
    fn output_before_failure_is_kept() {
        let (result, output) = run("function entry() { print 1; print 1 / 0; }");
        assert!(matches!(result, Err(RuntimeError::DivisionByZero)));
        assert_eq!(output, "1\n");
    }

    #[test]
    fn reads_input() {
        let (result, output) =
            run_with_input("function entry() { var a <- input; var b <- input; print a * b; return input; }",
                           "6 7\n\n  -3\n");
        assert_eq!(result.unwrap(), Some(-3));
        assert_eq!(output, "42\n");
    }

    #[test]
    fn input_errors() {
        let (result, _) = run_with_input("function entry() { return input; }", "  \n");
        assert!(matches!(result, Err(RuntimeError::InputExhausted)));

        let (result, _) = run_with_input("function entry() { return input; }", "seven\n");
        assert!(matches!(result, Err(RuntimeError::InvalidInput { token }) if token == "seven"));
    }

    #[test]
    fn globals_hold_only_the_global_frame_after_run() {
        let program = parse_source("function entry() { var x <- 1; return x; }").unwrap();
        let mut interpreter = Interpreter::new(&b""[..], Vec::new());
        interpreter.run(&program).unwrap();
        assert_eq!(interpreter.environment().depth(), 1);
        assert!(interpreter.environment().get("x").is_err());
    }
}
