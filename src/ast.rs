use std::fmt::{self, Write};

/// Construction functions for every node kind.
///
/// The parser builds trees exclusively through these functions.
pub mod factory;

/// The root of a parsed program: every top-level function, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Function declarations in declaration order.
    pub functions: Vec<FunctionDecl>,
}

/// A user-defined function: name, positional parameters and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:   String,
    /// Parameter names, bound positionally at call time.
    pub params: Vec<String>,
    /// The body executed when the function is called.
    pub body:   Block,
}

/// A brace-delimited sequence of statements.
///
/// Blocks do not open a scope; only function calls do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Statements in execution order.
    pub statements: Vec<Statement>,
}

/// An `elif (condition) { ... }` arm of an [`Statement::If`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElifBranch {
    /// The arm's condition.
    pub condition: Expr,
    /// Executed when the condition is non-zero and no earlier arm matched.
    pub body:      Block,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A variable declaration using `var`.
    VarDecl {
        /// The name of the variable.
        name:        String,
        /// The initial value of the variable.
        initializer: Expr,
    },
    /// Assignment to an already declared variable.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
    },
    /// `print expr;`
    Print {
        /// The expression whose value is printed.
        expr: Expr,
    },
    /// `return expr;`
    Return {
        /// The returned expression.
        expr: Expr,
    },
    /// `if`, any number of `elif` arms, optional `else`.
    If {
        /// The primary condition.
        condition:     Expr,
        /// Executed when the primary condition is non-zero.
        then_branch:   Block,
        /// Tried in order when the primary condition is zero.
        elif_branches: Vec<ElifBranch>,
        /// Executed when nothing else matched.
        else_branch:   Option<Block>,
    },
    /// `while (condition) { ... }`
    While {
        /// Re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
    },
    /// `run { ... } while (condition)`; the body runs once before the first
    /// test.
    RunWhile {
        /// The loop body.
        body:      Block,
        /// Evaluated after every iteration.
        condition: Expr,
    },
    /// A nested block. Produced by declarations naming more than one
    /// variable, e.g. `var a <- 1, b <- 2;`.
    Block(Block),
}

impl Statement {
    /// A short name for the statement kind, e.g. `"var"` or `"run-while"`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::VarDecl { .. } => "var",
            Self::Assignment { .. } => "assignment",
            Self::Print { .. } => "print",
            Self::Return { .. } => "return",
            Self::If { .. } => "if",
            Self::While { .. } => "while",
            Self::RunWhile { .. } => "run-while",
            Self::Block(_) => "block",
        }
    }
}

/// An expression. Every expression evaluates to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal.
    IntegerLiteral(i64),
    /// Reference to a variable by name.
    VarRef(String),
    /// A binary operation. Unary minus is represented as `0 - operand`.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// Call of a user-defined function.
    FuncCall {
        /// Name of the function being called.
        name: String,
        /// Arguments, evaluated left to right.
        args: Vec<Self>,
    },
    /// `input`: reads one integer from the input stream.
    Input,
}

impl Expr {
    /// Number of binary and call nodes on the longest path from this node
    /// to a leaf. Literals, variables and `input` have depth 0.
    ///
    /// This is also the deepest parenthesis nesting in the rendered form.
    ///
    /// # Example
    /// ```
    /// use sprola::ast::{BinaryOperator, factory};
    ///
    /// let sum = factory::binary(factory::integer(1), BinaryOperator::Add, factory::var_ref("x"));
    /// assert_eq!(sum.depth(), 1);
    /// assert_eq!(factory::func_call("f", vec![factory::negate(sum)]).depth(), 3);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];

        while let Some((expr, level)) = pending.pop() {
            match expr {
                Self::Binary { left, right, .. } => {
                    deepest = deepest.max(level + 1);
                    pending.push((left.as_ref(), level + 1));
                    pending.push((right.as_ref(), level + 1));
                },
                Self::FuncCall { args, .. } => {
                    deepest = deepest.max(level + 1);
                    pending.extend(args.iter().map(|arg| (arg, level + 1)));
                },
                Self::IntegerLiteral(_) | Self::VarRef(_) | Self::Input => {},
            }
        }
        deepest
    }
}

/// Represents a binary operator.
///
/// Comparison and equality operators produce `1` for true and `0` for false.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`~`)
    NotEqual,
}

impl BinaryOperator {
    /// The operator's source spelling.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "~",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

const INDENT: &str = "    ";

fn write_indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl Block {
    /// Writes `{`, the statements one per line at `depth + 1`, and a closing
    /// `}` at `depth`. The opening brace is written in place.
    fn render(&self, f: &mut impl Write, depth: usize) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{\n")?;
        for statement in &self.statements {
            write_indent(f, depth + 1)?;
            statement.render(f, depth + 1)?;
            f.write_char('\n')?;
        }
        write_indent(f, depth)?;
        f.write_char('}')
    }

    /// Declarations that were written as one `var a <- 1, b <- 2;`.
    fn as_declarations(&self) -> Option<Vec<(&str, &Expr)>> {
        if self.statements.is_empty() {
            return None;
        }
        self.statements
            .iter()
            .map(|s| match s {
                Statement::VarDecl { name, initializer } => Some((name.as_str(), initializer)),
                _ => None,
            })
            .collect()
    }
}

impl Statement {
    fn render(&self, f: &mut impl Write, depth: usize) -> fmt::Result {
        match self {
            Self::VarDecl { name, initializer } => write!(f, "var {name} <- {initializer};"),
            Self::Assignment { name, value } => write!(f, "{name} <- {value};"),
            Self::Print { expr } => write!(f, "print {expr};"),
            Self::Return { expr } => write!(f, "return {expr};"),
            Self::If { condition,
                       then_branch,
                       elif_branches,
                       else_branch, } => {
                write!(f, "if ({condition}) ")?;
                then_branch.render(f, depth)?;
                for elif in elif_branches {
                    write!(f, " elif ({}) ", elif.condition)?;
                    elif.body.render(f, depth)?;
                }
                if let Some(else_branch) = else_branch {
                    f.write_str(" else ")?;
                    else_branch.render(f, depth)?;
                }
                Ok(())
            },
            Self::While { condition, body } => {
                write!(f, "while ({condition}) ")?;
                body.render(f, depth)
            },
            Self::RunWhile { body, condition } => {
                f.write_str("run ")?;
                body.render(f, depth)?;
                write!(f, " while ({condition})")
            },
            Self::Block(block) => match block.as_declarations() {
                Some(decls) => {
                    f.write_str("var ")?;
                    for (i, (name, initializer)) in decls.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{name} <- {initializer}")?;
                    }
                    f.write_char(';')
                },
                None => block.render(f, depth),
            },
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{function}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}({}) ", self.name, self.params.join(", "))?;
        self.body.render(f, 0)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for ElifBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elif ({}) ", self.condition)?;
        self.body.render(f, 0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerLiteral(value) => write!(f, "{value}"),
            Self::VarRef(name) => f.write_str(name),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::FuncCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_char(')')
            },
            Self::Input => f.write_str("input"),
        }
    }
}
