use std::io::{BufRead, Write};

use crate::{
    ast::{Block, ElifBranch, Expr, Statement},
    interpreter::evaluator::core::{EvalResult, Flow, Interpreter},
};

impl<R, W> Interpreter<'_, R, W>
    where R: BufRead,
          W: Write
{
    /// Executes the statements of a block in order.
    ///
    /// Blocks do not open a scope: a `var` inside an `if` body is still
    /// visible after the `if`, for the rest of the function call.
    ///
    /// # Returns
    /// [`Flow::Return`] as soon as any statement returns, skipping the rest;
    /// [`Flow::Normal`] otherwise.
    pub fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        for statement in &block.statements {
            if let flow @ Flow::Return(_) = self.exec_statement(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// Propagates every error raised while evaluating the statement's
    /// expressions, plus [`crate::error::RuntimeError::Io`] if `print` cannot
    /// write.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VarDecl { name, initializer } => {
                let value = self.eval(initializer)?;
                self.environment.define(name, value);
                Ok(Flow::Normal)
            },
            Statement::Assignment { name, value } => {
                let value = self.eval(value)?;
                self.environment.assign(name, value)?;
                Ok(Flow::Normal)
            },
            Statement::Print { expr } => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{value}")?;
                Ok(Flow::Normal)
            },
            Statement::Return { expr } => Ok(Flow::Return(self.eval(expr)?)),
            Statement::If { condition,
                            then_branch,
                            elif_branches,
                            else_branch, } => {
                self.exec_if(condition, then_branch, elif_branches, else_branch.as_ref())
            },
            Statement::While { condition, body } => self.exec_while(condition, body),
            Statement::RunWhile { body, condition } => self.exec_run_while(body, condition),
            Statement::Block(block) => self.exec_block(block),
        }
    }

    /// Runs the first branch whose condition is non-zero, falling back to
    /// `else_branch` when none is.
    fn exec_if(&mut self,
               condition: &Expr,
               then_branch: &Block,
               elif_branches: &[ElifBranch],
               else_branch: Option<&Block>)
               -> EvalResult<Flow> {
        if self.eval(condition)? != 0 {
            return self.exec_block(then_branch);
        }

        for branch in elif_branches {
            if self.eval(&branch.condition)? != 0 {
                return self.exec_block(&branch.body);
            }
        }

        match else_branch {
            Some(block) => self.exec_block(block),
            None => Ok(Flow::Normal),
        }
    }

    fn exec_while(&mut self, condition: &Expr, body: &Block) -> EvalResult<Flow> {
        while self.eval(condition)? != 0 {
            if let flow @ Flow::Return(_) = self.exec_block(body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs `body` once, then again for as long as `condition` is non-zero.
    fn exec_run_while(&mut self, body: &Block, condition: &Expr) -> EvalResult<Flow> {
        loop {
            if let flow @ Flow::Return(_) = self.exec_block(body)? {
                return Ok(flow);
            }
            if self.eval(condition)? == 0 {
                return Ok(Flow::Normal);
            }
        }
    }
}
