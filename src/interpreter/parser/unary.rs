use std::iter::Peekable;

use crate::{
    ast::{Expr, factory},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_nested_expression},
            utils::{advance, expect, match_any, nest, parse_comma_separated, peek},
        },
    },
};

/// Parses a unary expression.
///
/// Negation is right-associative, so `--x` cannot occur (it scans as a
/// comment) but `- -x` parses as `0 - (0 - x)`. There is no dedicated unary
/// node: `-e` becomes `0 - e`.
///
/// Each `-` nests one level deeper.
///
/// Grammar: `unary := "-" unary | primary`
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    if match_any(tokens, &[TokenKind::Minus]).is_some() {
        let inner = nest(tokens, depth)?;
        let operand = parse_unary(tokens, inner)?;
        return Ok(factory::negate(operand));
    }
    parse_primary(tokens, depth)
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := INTEGER
///              | "input"
///              | IDENT ("(" (expr ("," expr)*)? ")")?
///              | "(" expr ")"
/// ```
///
/// # Errors
/// - [`ParseError::LiteralTooLarge`] for an integer that does not fit `i64`.
/// - [`ParseError::UnexpectedToken`] for any token that cannot start an
///   expression.
/// - [`ParseError::NestingTooDeep`] if a group or argument list opens past
///   the nesting limit.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens);
    match token.kind {
        TokenKind::Integer => {
            advance(tokens);
            token.lexeme
                 .parse()
                 .map(factory::integer)
                 .map_err(|_| ParseError::LiteralTooLarge { literal: token.lexeme.clone(),
                                                            line:    token.line, })
        },
        TokenKind::Input => {
            advance(tokens);
            Ok(factory::input())
        },
        TokenKind::Identifier => {
            advance(tokens);
            if match_any(tokens, &[TokenKind::LParen]).is_none() {
                return Ok(factory::var_ref(token.lexeme.as_str()));
            }
            let inner = nest(tokens, depth)?;
            let args = parse_comma_separated(tokens,
                                             |t| parse_nested_expression(t, inner),
                                             TokenKind::RParen,
                                             "Expected ')' after arguments.")?;
            Ok(factory::func_call(token.lexeme.as_str(), args))
        },
        TokenKind::LParen => {
            advance(tokens);
            let inner = nest(tokens, depth)?;
            let expr = parse_nested_expression(tokens, inner)?;
            expect(tokens, TokenKind::RParen, "Expected ')' after expression.")?;
            Ok(expr)
        },
        _ => Err(ParseError::UnexpectedToken { token: token.lexeme.clone(),
                                               line:  token.line, }),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, Statement},
        interpreter::{lexer::tokenize, parser::core::parse_program},
    };

    fn printed(expr: &str) -> Expr {
        let source = format!("function entry() {{ print {expr}; }}");
        let mut program = parse_program(tokenize(&source)).unwrap();
        match program.functions.remove(0).body.statements.remove(0) {
            Statement::Print { expr } => expr,
            other => panic!("expected print, got {other:?}"),
        }
    }

    #[test]
    fn literals_variables_and_input() {
        assert_eq!(printed("42"), Expr::IntegerLiteral(42));
        assert_eq!(printed("total"), Expr::VarRef("total".to_string()));
        assert_eq!(printed("input"), Expr::Input);
    }

    #[test]
    fn calls() {
        assert_eq!(printed("f()").to_string(), "f()");
        assert_eq!(printed("g(1, x + 2, h(input))").to_string(), "g(1, (x + 2), h(input))");
    }

    #[test]
    fn nested_negation() {
        assert_eq!(printed("- -x").to_string(), "(0 - (0 - x))");
        assert_eq!(printed("-2 * 3").to_string(), "((0 - 2) * 3)");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(printed("(1 + 2) * 3").to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn unclosed_call() {
        let source = "function entry() { print f(1, 2; }";
        let err = parse_program(tokenize(source)).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 1: Parse error: Expected ')' after arguments. at token ';'");
    }
}
