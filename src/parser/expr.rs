use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::{
        ast::Expr,
        expressions::{CallExpr, LiteralExpr, LiteralKind, SymbolExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{parser::Parser, types::parse_type_annotation};

lazy_static! {
    static ref DECIMAL_NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref HEX_NUMBER: Regex = Regex::new(r"^0x[0-9a-fA-F]+$").unwrap();
}

/// Whether a number token is decimal digits or `0x` followed by hex digits.
pub fn is_valid_number_literal(value: &str) -> bool {
    DECIMAL_NUMBER.is_match(value) || HEX_NUMBER.is_match(value)
}

/// Parses a literal or a bare identifier, never a call.
pub fn parse_elementary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud_fn) => nud_fn(parser),
        None => Err(Error::new(
            ErrorImpl::LiteralOrIdentifierExpected,
            parser.get_position(),
        )),
    }
}

/// Parses a full expression: a literal, an identifier or a call.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_elementary_expr(parser)?;

    match left {
        Expr::Symbol(callee) if parser.current_token_kind() == TokenKind::OpenParen => {
            Ok(Expr::Call(parse_call_expr(parser, callee)?))
        }
        _ => Ok(left),
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Literal(parse_literal(parser)?))
}

/// Parses a number, boolean or string literal with its type annotation.
pub fn parse_literal(parser: &mut Parser) -> Result<LiteralExpr, Error> {
    let token = parser.current_token().clone();

    let kind = match token.kind {
        TokenKind::Number => {
            if !is_valid_number_literal(&token.value) {
                return Err(Error::new(ErrorImpl::InvalidNumberLiteral, token.span.start));
            }
            LiteralKind::Number
        }
        TokenKind::True | TokenKind::False => LiteralKind::Boolean,
        TokenKind::String => LiteralKind::String,
        _ => {
            return Err(Error::new(ErrorImpl::LiteralExpected, token.span.start));
        }
    };
    parser.advance();

    let ty = if parser.dialect().is_typed() {
        Some(parse_type_annotation(parser)?)
    } else {
        None
    };

    Ok(LiteralExpr {
        kind,
        value: token.value,
        ty,
        span: Span {
            start: token.span.start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(Expr::Symbol(SymbolExpr {
        value: token.value,
        span: token.span,
    }))
}

/// Parses the parenthesised argument list following `callee`.
pub fn parse_call_expr(parser: &mut Parser, callee: SymbolExpr) -> Result<CallExpr, Error> {
    parser.enter_recursion()?;
    let arguments = parse_arguments(parser);
    parser.leave_recursion();

    Ok(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: parser.previous_end(),
        },
        callee,
        arguments: arguments?,
    })
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(arguments)
}
