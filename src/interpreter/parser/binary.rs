use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, factory},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            unary::parse_unary,
            utils::{advance, check_height, peek},
        },
    },
};

/// Maps a token kind to its binary operator.
///
/// Returns `None` for every kind that is not a binary operator.
///
/// # Example
/// ```
/// use sprola::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Neq), Some(BinaryOperator::NotEqual));
/// assert_eq!(token_to_binary_operator(TokenKind::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Mod => Some(BinaryOperator::Mod),
        TokenKind::Lt => Some(BinaryOperator::Less),
        TokenKind::Le => Some(BinaryOperator::LessEqual),
        TokenKind::Gt => Some(BinaryOperator::Greater),
        TokenKind::Ge => Some(BinaryOperator::GreaterEqual),
        TokenKind::Eq => Some(BinaryOperator::Equal),
        TokenKind::Neq => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Consumes the next token if it is one of `allowed` operators.
fn next_operator<'a, I>(tokens: &mut Peekable<I>, allowed: &[BinaryOperator]) -> Option<BinaryOperator>
    where I: Iterator<Item = &'a Token>
{
    if let Some(op) = token_to_binary_operator(peek(tokens).kind)
       && allowed.contains(&op)
    {
        advance(tokens);
        return Some(op);
    }
    None
}

/// Parses a left-associative chain of `operand`s joined by `allowed`
/// operators.
///
/// Each operator makes the chain one level deeper; its height is checked
/// after every operator.
fn parse_chain<'a, I>(tokens: &mut Peekable<I>,
                      depth: usize,
                      allowed: &[BinaryOperator],
                      operand: impl Fn(&mut Peekable<I>, usize) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = operand(tokens, depth)?;
    let mut height = left.depth();
    while let Some(op) = next_operator(tokens, allowed) {
        let right = operand(tokens, depth)?;
        height = height.max(right.depth()) + 1;
        check_height(tokens, height)?;
        left = factory::binary(left, op, right);
    }
    Ok(left)
}

/// Parses equality expressions: `=` and `~`.
///
/// Grammar: `equality := comparison (("=" | "~") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_chain(tokens,
                depth,
                &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                parse_comparison)
}

/// Parses relational expressions: `<`, `<=`, `>`, `>=`.
///
/// Grammar: `comparison := term (("<" | "<=" | ">" | ">=") term)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_chain(tokens,
                depth,
                &[BinaryOperator::Less,
                  BinaryOperator::LessEqual,
                  BinaryOperator::Greater,
                  BinaryOperator::GreaterEqual],
                parse_term)
}

/// Parses addition and subtraction.
///
/// Grammar: `term := factor (("+" | "-") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_chain(tokens, depth, &[BinaryOperator::Add, BinaryOperator::Sub], parse_factor)
}

/// Parses multiplication, division and remainder.
///
/// Grammar: `factor := unary (("*" | "/" | "%") unary)*`
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_chain(tokens,
                depth,
                &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod],
                parse_unary)
}
