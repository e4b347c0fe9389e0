use std::iter::Peekable;

use crate::{
    ast::{Statement, factory},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{expect, match_any, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The leading keyword selects the form:
/// - `var` declaration,
/// - `if` / `while` / `run` control flow,
/// - `print` and `return`.
///
/// Anything else is parsed as an assignment, so a stray token is reported as
/// a missing variable name.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let Some(keyword) = match_any(tokens,
                                  &[TokenKind::Var,
                                    TokenKind::If,
                                    TokenKind::While,
                                    TokenKind::Run,
                                    TokenKind::Print,
                                    TokenKind::Return])
    else {
        return parse_assignment(tokens, depth);
    };

    match keyword.kind {
        TokenKind::Var => parse_var_declaration(tokens, depth),
        TokenKind::If => parse_if(tokens, depth),
        TokenKind::While => parse_while(tokens, depth),
        TokenKind::Run => parse_run_while(tokens, depth),
        TokenKind::Print => {
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::Semicolon, "Expected ';' after print statement.")?;
            Ok(factory::print_stmt(expr))
        },
        _ => {
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::Semicolon, "Expected ';' after return statement.")?;
            Ok(factory::return_stmt(expr))
        },
    }
}

/// Parses a variable declaration after the `var` keyword.
///
/// Several names may be declared at once: `var a <- 1, b <- a + 1;`. A single
/// name yields a [`Statement::VarDecl`]; more than one yields a
/// [`Statement::Block`] of declarations, executed in order.
///
/// Grammar: `varDecl := "var" IDENT "<-" expr ("," IDENT "<-" expr)* ";"`
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let mut declarations = Vec::new();
    loop {
        let name = parse_identifier(tokens, "Expected variable name.")?;
        expect(tokens, TokenKind::Assign, "Expected '<-' in variable declaration.")?;
        let initializer = parse_expression(tokens)?;
        declarations.push(factory::var_decl(name, initializer));

        if match_any(tokens, &[TokenKind::Comma]).is_none() {
            break;
        }
    }
    expect(tokens, TokenKind::Semicolon, "Expected ';' after variable declaration.")?;

    Ok(match <[Statement; 1]>::try_from(declarations) {
        Ok([declaration]) => declaration,
        Err(declarations) => factory::block_stmt(factory::block(declarations)),
    })
}

/// Parses `name <- expr;`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let name = parse_identifier(tokens, "Expected variable name.")?;
    expect(tokens, TokenKind::Assign, "Expected '<-' in assignment.")?;
    let value = parse_expression(tokens)?;
    expect(tokens, TokenKind::Semicolon, "Expected ';' after assignment.")?;
    Ok(factory::assignment(name, value))
}

/// Parses an `if` statement after the keyword, including any `elif` arms
/// and the optional `else` block.
///
/// Grammar:
/// ```text
///     ifStmt := "if" "(" expr ")" block ("elif" "(" expr ")" block)* ("else" block)?
/// ```
fn parse_if<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LParen, "Expected '(' after 'if'.")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "Expected ')' after if condition.")?;
    let then_branch = parse_block(tokens, depth)?;

    let mut elif_branches = Vec::new();
    while match_any(tokens, &[TokenKind::Elif]).is_some() {
        expect(tokens, TokenKind::LParen, "Expected '(' after 'elif'.")?;
        let elif_condition = parse_expression(tokens)?;
        expect(tokens, TokenKind::RParen, "Expected ')' after elif condition.")?;
        let body = parse_block(tokens, depth)?;
        elif_branches.push(factory::elif_branch(elif_condition, body));
    }

    let else_branch = if match_any(tokens, &[TokenKind::Else]).is_some() {
        Some(parse_block(tokens, depth)?)
    } else {
        None
    };

    Ok(factory::if_stmt(condition, then_branch, elif_branches, else_branch))
}

/// Parses `while (condition) block` after the keyword.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LParen, "Expected '(' after 'while'.")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "Expected ')' after while condition.")?;
    let body = parse_block(tokens, depth)?;
    Ok(factory::while_stmt(condition, body))
}

/// Parses `run block while (condition)` after the `run` keyword. No
/// semicolon follows the condition.
fn parse_run_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let body = parse_block(tokens, depth)?;
    expect(tokens, TokenKind::While, "Expected 'while' after 'run' block.")?;
    expect(tokens, TokenKind::LParen, "Expected '(' after 'while'.")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "Expected ')' after run-while condition.")?;
    Ok(factory::run_while_stmt(body, condition))
}
