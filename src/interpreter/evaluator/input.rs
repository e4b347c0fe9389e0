use std::io::BufRead;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

impl<R, W> Interpreter<'_, R, W>
    where R: BufRead
{
    /// Reads the next whitespace-delimited integer from the input source.
    ///
    /// Blocks until a line is available. Tokens after the first one on a
    /// line are kept for later `input` expressions; blank lines are
    /// skipped.
    ///
    /// # Errors
    /// - [`RuntimeError::InputExhausted`] at end of stream.
    /// - [`RuntimeError::InvalidInput`] if the token is not an `i64`.
    /// - [`RuntimeError::Io`] if reading fails.
    pub(super) fn read_input(&mut self) -> EvalResult<i64> {
        let token = self.next_input_token()?;
        token.parse().map_err(|_| RuntimeError::InvalidInput { token })
    }

    fn next_input_token(&mut self) -> EvalResult<String> {
        loop {
            if let Some(token) = self.pending_input.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(RuntimeError::InputExhausted);
            }
            self.pending_input
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
