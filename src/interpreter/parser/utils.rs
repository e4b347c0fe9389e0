use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{MAX_NESTING_DEPTH, ParseResult},
    },
};

/// Returned by [`peek`] once the underlying iterator is drained, so callers
/// always see an end-of-input token instead of `None`.
static END_OF_INPUT: Token = Token::eof(0);

/// Returns the next token without consuming it.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> &'a Token
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().copied().unwrap_or(&END_OF_INPUT)
}

/// Consumes and returns the next token. The end-of-input token is never
/// consumed, so repeated calls at the end keep returning it.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>) -> &'a Token
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens);
    if token.kind != TokenKind::Eof {
        tokens.next();
    }
    token
}

/// Tests whether the next token is of the given kind.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>, kind: TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    peek(tokens).kind == kind
}

/// Consumes the next token if it is one of `kinds`.
///
/// Comments are not skipped: a comment where an optional token could appear
/// simply does not match.
pub(in crate::interpreter::parser) fn match_any<'a, I>(tokens: &mut Peekable<I>,
                                                       kinds: &[TokenKind])
                                                       -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    if kinds.contains(&peek(tokens).kind) {
        Some(advance(tokens))
    } else {
        None
    }
}

/// Skips any run of comment tokens.
pub(in crate::interpreter::parser) fn skip_comments<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while check(tokens, TokenKind::Comment) {
        advance(tokens);
    }
}

/// Consumes a required token of the given kind.
///
/// Leading comments are skipped first. When the token is missing, the error
/// carries `message` and the lexeme found instead.
///
/// # Errors
/// Returns [`ParseError::Expected`] if the next code token is of another
/// kind.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    message: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    skip_comments(tokens);
    let token = peek(tokens);
    if token.kind == kind {
        return Ok(advance(tokens));
    }
    Err(ParseError::Expected { message: message.to_string(),
                               token:   token.lexeme.clone(),
                               line:    token.line, })
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by parameter lists and call arguments. An immediately encountered
/// closing token produces an empty list; the closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Propagates item errors, and reports `message` if the list is not followed
/// by `closing`.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind,
    message: &str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    if !check(tokens, closing) {
        loop {
            items.push(parse_item(tokens)?);
            if match_any(tokens, &[TokenKind::Comma]).is_none() {
                break;
            }
        }
    }
    expect(tokens, closing, message)?;
    Ok(items)
}

/// Consumes an identifier and returns its name.
///
/// # Errors
/// Reports `message` if the next code token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              message: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::Identifier, message).map(|token| token.lexeme.clone())
}

/// Enters one more level of nesting below `depth` and returns the new depth.
///
/// # Errors
/// Returns [`ParseError::NestingTooDeep`] at the next token once `depth`
/// has reached [`MAX_NESTING_DEPTH`].
pub(in crate::interpreter::parser) fn nest<'a, I>(tokens: &mut Peekable<I>,
                                                  depth: usize)
                                                  -> ParseResult<usize>
    where I: Iterator<Item = &'a Token>
{
    if depth >= MAX_NESTING_DEPTH {
        return Err(too_deep(tokens));
    }
    Ok(depth + 1)
}

/// Checks the depth of an expression that has just been built.
///
/// # Errors
/// Returns [`ParseError::NestingTooDeep`] at the next token if `height`
/// exceeds [`MAX_NESTING_DEPTH`].
pub(in crate::interpreter::parser) fn check_height<'a, I>(tokens: &mut Peekable<I>,
                                                          height: usize)
                                                          -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    if height > MAX_NESTING_DEPTH {
        return Err(too_deep(tokens));
    }
    Ok(())
}

fn too_deep<'a, I>(tokens: &mut Peekable<I>) -> ParseError
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens);
    ParseError::NestingTooDeep { token: token.lexeme.clone(),
                                 line:  token.line,
                                 limit: MAX_NESTING_DEPTH, }
}
