//! Node constructors.
//!
//! Each function builds exactly one node kind. Nodes are plain owned values:
//! a child belongs to the node that holds it and nothing is shared.

use crate::ast::{BinaryOperator, Block, ElifBranch, Expr, FunctionDecl, Program, Statement};

/// Builds the root node.
#[must_use]
pub const fn program(functions: Vec<FunctionDecl>) -> Program {
    Program { functions }
}

/// Builds a function declaration.
///
/// # Example
/// ```
/// use sprola::ast::factory::{block, function_decl, integer, return_stmt};
///
/// let answer = function_decl("answer", Vec::<String>::new(), block(vec![return_stmt(integer(42))]));
/// assert_eq!(answer.to_string(), "function answer() {\n    return 42;\n}");
/// ```
#[must_use]
pub fn function_decl<S>(name: impl Into<String>,
                        params: impl IntoIterator<Item = S>,
                        body: Block)
                        -> FunctionDecl
    where S: Into<String>
{
    FunctionDecl { name: name.into(),
                   params: params.into_iter().map(Into::into).collect(),
                   body }
}

/// Builds a block.
#[must_use]
pub const fn block(statements: Vec<Statement>) -> Block {
    Block { statements }
}

/// Builds `var name <- initializer;`.
#[must_use]
pub fn var_decl(name: impl Into<String>, initializer: Expr) -> Statement {
    Statement::VarDecl { name: name.into(),
                         initializer }
}

/// Builds `name <- value;`.
#[must_use]
pub fn assignment(name: impl Into<String>, value: Expr) -> Statement {
    Statement::Assignment { name: name.into(),
                            value }
}

/// Builds `print expr;`.
#[must_use]
pub const fn print_stmt(expr: Expr) -> Statement {
    Statement::Print { expr }
}

/// Builds `return expr;`.
#[must_use]
pub const fn return_stmt(expr: Expr) -> Statement {
    Statement::Return { expr }
}

/// Builds an `if` statement with its `elif` arms and optional `else`.
#[must_use]
pub const fn if_stmt(condition: Expr,
                     then_branch: Block,
                     elif_branches: Vec<ElifBranch>,
                     else_branch: Option<Block>)
                     -> Statement {
    Statement::If { condition,
                    then_branch,
                    elif_branches,
                    else_branch }
}

/// Builds one `elif` arm.
#[must_use]
pub const fn elif_branch(condition: Expr, body: Block) -> ElifBranch {
    ElifBranch { condition, body }
}

/// Builds `while (condition) body`.
#[must_use]
pub const fn while_stmt(condition: Expr, body: Block) -> Statement {
    Statement::While { condition, body }
}

/// Builds `run body while (condition)`.
#[must_use]
pub const fn run_while_stmt(body: Block, condition: Expr) -> Statement {
    Statement::RunWhile { body, condition }
}

/// Wraps a block as a statement.
#[must_use]
pub const fn block_stmt(block: Block) -> Statement {
    Statement::Block(block)
}

/// Builds an integer literal.
#[must_use]
pub const fn integer(value: i64) -> Expr {
    Expr::IntegerLiteral(value)
}

/// Builds a variable reference.
#[must_use]
pub fn var_ref(name: impl Into<String>) -> Expr {
    Expr::VarRef(name.into())
}

/// Builds `left op right`.
#[must_use]
pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right) }
}

/// Builds arithmetic negation as `0 - operand`.
#[must_use]
pub fn negate(operand: Expr) -> Expr {
    binary(integer(0), BinaryOperator::Sub, operand)
}

/// Builds a call of a user-defined function.
#[must_use]
pub fn func_call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::FuncCall { name: name.into(),
                     args }
}

/// Builds an `input` expression.
#[must_use]
pub const fn input() -> Expr {
    Expr::Input
}
