/// The environment module holds variable bindings during execution.
///
/// Bindings live in frames linked to a parent frame. The global frame is
/// created with the environment; every function call adds a frame whose
/// parent is the global frame and removes it when the call ends.
///
/// # Responsibilities
/// - Defines names in the innermost frame, shadowing outer bindings.
/// - Resolves reads and assignments through the parent chain.
/// - Reports names that no frame binds.
pub mod environment;
/// The evaluator module executes a parsed program.
///
/// The evaluator registers the program's functions, calls `entry`, and walks
/// the tree: it evaluates expressions to integers, runs statements, threads
/// the `return` signal outward and performs `print` and `input`.
///
/// # Responsibilities
/// - Evaluates expressions with checked integer arithmetic.
/// - Executes statements, conditionals, loops and function calls.
/// - Reports runtime errors such as undefined names or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// a keyword, identifier, integer literal, operator, punctuation mark or line
/// comment. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   line.
/// - Terminates every stream with a single end-of-input token.
/// - Drops characters that begin no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer with recursive
/// descent and constructs a [`crate::ast::Program`] through the node factory.
///
/// # Responsibilities
/// - Converts tokens into function declarations, statements and expressions.
/// - Encodes operator precedence and left associativity.
/// - Reports the first syntax error with its line and offending token.
pub mod parser;
