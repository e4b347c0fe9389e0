use std::iter::Peekable;

use crate::{
    ast::{Expr, Program, factory},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_equality,
            block::parse_function,
            utils::{check, check_height, skip_comments},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply blocks and expressions may nest.
///
/// Blocks and expressions are limited separately. A function body is block
/// depth 1 and each nested block goes one level deeper. Inside an
/// expression, each parenthesised group, argument list and unary minus goes
/// one level deeper, and no expression may have an [`Expr::depth`] above
/// this. Deeper input is rejected with
/// [`ParseError::NestingTooDeep`], which keeps parsing, evaluation and
/// rendering from recursing without bound.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses a whole token stream into a [`Program`].
///
/// The stream is expected to end with [`TokenKind::Eof`]; a sentinel is
/// appended when it does not. Comments are allowed before, between and
/// after function declarations.
///
/// Grammar: `program := function*`
///
/// # Errors
/// Returns the first [`ParseError`] encountered. There is no recovery.
///
/// # Example
/// ```
/// use sprola::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let program = parse_program(tokenize("function entry() { return 1; }")).unwrap();
/// assert_eq!(program.functions[0].name, "entry");
/// ```
pub fn parse_program(mut tokens: Vec<Token>) -> ParseResult<Program> {
    if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
        let line = tokens.last().map_or(1, |t| t.line);
        tokens.push(Token::eof(line));
    }

    let mut iter = tokens.iter().peekable();
    let mut functions = Vec::new();

    skip_comments(&mut iter);
    while !check(&mut iter, TokenKind::Eof) {
        functions.push(parse_function(&mut iter)?);
        skip_comments(&mut iter);
    }

    Ok(factory::program(functions))
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, equality, and recursively descends through the
/// hierarchy.
///
/// Grammar: `expr := equality`
///
/// # Errors
/// Besides syntax errors, returns [`ParseError::NestingTooDeep`] if the
/// expression nests past [`MAX_NESTING_DEPTH`].
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_nested_expression(tokens, 0)
}

/// Parses an expression that starts `depth` levels inside an enclosing one,
/// such as a parenthesised group or a call argument.
pub(crate) fn parse_nested_expression<'a, I>(tokens: &mut Peekable<I>,
                                             depth: usize)
                                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_equality(tokens, depth)?;
    check_height(tokens, expr.depth())?;
    Ok(expr)
}
