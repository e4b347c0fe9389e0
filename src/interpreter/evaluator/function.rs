use std::io::{BufRead, Write};

use crate::{
    ast::{Expr, FunctionDecl, Program},
    error::RuntimeError,
    interpreter::{
        environment::ScopeId,
        evaluator::core::{EvalResult, Flow, Interpreter, MAX_CALL_DEPTH},
    },
};

impl<'p, R, W> Interpreter<'p, R, W>
    where R: BufRead,
          W: Write
{
    /// Fills the function table from `program`, replacing whatever a
    /// previous run left behind.
    ///
    /// When a name is declared more than once, the last declaration wins.
    pub(super) fn register_functions(&mut self, program: &'p Program) {
        self.functions.clear();

        for function in &program.functions {
            self.functions.insert(function.name.as_str(), function);
        }
    }

    /// Evaluates a call expression.
    ///
    /// The function is looked up first, then every argument is evaluated
    /// left to right, then the argument count is checked against the
    /// parameter list.
    ///
    /// # Returns
    /// The value of the callee's `return`, or `0` if its body finishes
    /// without one.
    ///
    /// # Errors
    /// - [`RuntimeError::UndefinedFunction`] for an unknown name.
    /// - [`RuntimeError::ArgumentCountMismatch`] for a wrong number of
    ///   arguments.
    /// - Anything raised while evaluating arguments or the body.
    pub(super) fn eval_call(&mut self, name: &str, args: &[Expr]) -> EvalResult<i64> {
        let function = self.functions
                           .get(name)
                           .copied()
                           .ok_or_else(|| RuntimeError::UndefinedFunction { name:
                                                                                name.to_string() })?;

        let values = args.iter()
                         .map(|arg| self.eval(arg))
                         .collect::<EvalResult<Vec<_>>>()?;

        if values.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: function.params.len(),
                                                             found:    values.len(), });
        }

        match self.invoke(function, values)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(0),
        }
    }

    /// Runs `function` in a fresh frame whose parent is the global frame,
    /// binding parameters to `args` by position.
    ///
    /// The frame is removed again whether the body succeeds or fails.
    pub(super) fn invoke(&mut self, function: &'p FunctionDecl, args: Vec<i64>) -> EvalResult<Flow> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow { name:  function.name.clone(),
                                                     limit: MAX_CALL_DEPTH, });
        }

        self.environment.push_scope(ScopeId::GLOBAL);
        for (param, value) in function.params.iter().zip(args) {
            self.environment.define(param, value);
        }

        self.call_depth += 1;
        let flow = self.exec_block(&function.body);
        self.call_depth -= 1;

        self.environment.pop_scope();
        flow
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{
        error::RuntimeError,
        interpreter::evaluator::core::{EvalResult, Interpreter, MAX_CALL_DEPTH},
        parse_source,
    };

    fn run(source: &str) -> (EvalResult<Option<i64>>, String) {
        let program = parse_source(source).unwrap();
        let mut interpreter = Interpreter::new(&b""[..], Vec::new());
        let result = interpreter.run(&program);
        (result, String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn call_with_argument() {
        let (result, output) = run("function double(n) { return n + n; }
                                    function entry() { print double(5); }");
        assert_eq!(result.unwrap(), None);
        assert_eq!(output, "10\n");
    }

    #[test]
    fn functions_may_be_declared_after_use() {
        let (result, _) = run("function entry() { return add(2, 3); }
                               function add(a, b) { return a + b; }");
        assert_eq!(result.unwrap(), Some(5));
    }

    #[test]
    fn recursion() {
        let (result, _) = run("function fact(n) { if (n < 2) { return 1; } return n * fact(n - 1); }
                               function entry() { return fact(10); }");
        assert_eq!(result.unwrap(), Some(3_628_800));
    }

    #[test]
    fn call_without_return_yields_zero() {
        let (result, output) = run("function noisy() { print 1; }
                                    function entry() { return noisy() + 5; }");
        assert_eq!(result.unwrap(), Some(5));
        assert_eq!(output, "1\n");
    }

    #[test]
    fn callee_cannot_see_caller_locals() {
        let (result, _) = run("function peek() { return secret; }
                               function entry() { var secret <- 1; return peek(); }");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { name }) if name == "secret"));
    }

    #[test]
    fn parameters_shadow_nothing_outside_the_call() {
        let (result, output) = run("function set(x) { x <- 100; return x; }
                                    function entry() { var x <- 1; print set(x); print x; }");
        assert_eq!(result.unwrap(), None);
        assert_eq!(output, "100\n1\n");
    }

    #[test]
    fn undefined_function() {
        let (result, _) = run("function entry() { return nope(); }");
        assert_eq!(result.unwrap_err().to_string(), "Undefined function 'nope'");
    }

    #[test]
    fn argument_count_is_checked_after_evaluation() {
        let (result, output) = run("function one(a) { return a; }
                                    function side() { print 7; return 0; }
                                    function entry() { return one(side(), side()); }");
        assert!(matches!(result,
                         Err(RuntimeError::ArgumentCountMismatch { expected: 1, found: 2, .. })));
        assert_eq!(output, "7\n7\n");
    }

    #[test]
    fn runaway_recursion_is_reported() {
        // Debug builds need more stack than the default test thread has.
        let handle = thread::Builder::new().stack_size(64 * 1024 * 1024)
                                           .spawn(|| {
                                               run("function down(n) { return down(n + 1); }
                                                    function entry() { return down(0); }").0
                                           })
                                           .unwrap();

        let result = handle.join().unwrap();
        assert!(matches!(result,
                         Err(RuntimeError::StackOverflow { ref name, limit })
                         if name == "down" && limit == MAX_CALL_DEPTH));
    }
}
