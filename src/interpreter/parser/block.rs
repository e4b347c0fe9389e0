use std::iter::Peekable;

use crate::{
    ast::{Block, FunctionDecl, factory},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{check, expect, nest, parse_comma_separated, parse_identifier, skip_comments},
        },
    },
};

/// Parses a function declaration.
///
/// Grammar: `function := "function" IDENT "(" (IDENT ("," IDENT)*)? ")" block`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `function` keyword.
///
/// # Returns
/// The declaration, with parameters in source order.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::Function, "Expected 'function' keyword.")?;
    let name = parse_identifier(tokens, "Expected function name.")?;
    expect(tokens, TokenKind::LParen, "Expected '(' after function name.")?;

    let params = parse_comma_separated(tokens,
                                       |t| parse_identifier(t, "Expected parameter name."),
                                       TokenKind::RParen,
                                       "Expected ')' after parameters.")?;

    let body = parse_block(tokens, 0)?;
    Ok(factory::function_decl(name, params, body))
}

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Comments may appear anywhere
/// between statements. Parsing stops at the closing `}` or, if it is
/// missing, at end of input, which is then reported as the error token.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening `{`.
/// - `depth`: Nesting depth outside the block; its statements sit one level
///   deeper.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Block>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LBrace, "Expected '{' to begin block.")?;
    let depth = nest(tokens, depth)?;

    let mut statements = Vec::new();
    skip_comments(tokens);
    while !check(tokens, TokenKind::RBrace) && !check(tokens, TokenKind::Eof) {
        statements.push(parse_statement(tokens, depth)?);
        skip_comments(tokens);
    }

    expect(tokens, TokenKind::RBrace, "Expected '}' after block.")?;
    Ok(factory::block(statements))
}
