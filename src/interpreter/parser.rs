/// Binary expression parsing.
///
/// One function per precedence level, from equality down to factor. Each
/// level is left-associative.
pub mod binary;
/// Block and function declaration parsing.
pub mod block;
/// Parser entry points and the result alias.
pub mod core;
/// Statement parsing, dispatched on the leading keyword.
pub mod statement;
/// Unary minus and primary expressions.
pub mod unary;
/// Token cursor helpers shared by all parsing functions.
pub mod utils;
