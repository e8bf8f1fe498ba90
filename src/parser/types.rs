use crate::{
    ast::types::{TypeName, TypedName},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::parser::Parser;

/// Parses `:type` after a literal or a declared name.
///
/// Any identifier is accepted here; names outside the elementary set are
/// rejected later by the analyzer.
pub fn parse_type_annotation(parser: &mut Parser) -> Result<TypeName, Error> {
    parser.expect(TokenKind::Colon)?;
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeName::resolve(&token.value, token.span.start))
}

/// Consumes an identifier that is about to be bound to something new.
pub fn parse_declared_name(parser: &mut Parser) -> Result<Token, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.dialect().builtin(&token.value).is_some() {
        return Err(Error::new(
            ErrorImpl::BuiltinAsIdentifier { name: token.value },
            token.span.start,
        ));
    }

    Ok(token)
}

/// `name` or `name:type`, depending on the flavour.
pub fn parse_typed_name(parser: &mut Parser) -> Result<TypedName, Error> {
    let token = parse_declared_name(parser)?;

    let ty = if parser.dialect().is_typed() {
        Some(parse_type_annotation(parser)?)
    } else {
        None
    };

    Ok(TypedName {
        name: token.value,
        ty,
        span: Span {
            start: token.span.start,
            end: parser.previous_end(),
        },
    })
}

/// One or more typed names separated by commas.
pub fn parse_typed_name_list(parser: &mut Parser) -> Result<Vec<TypedName>, Error> {
    let mut names = vec![parse_typed_name(parser)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parse_typed_name(parser)?);
    }

    Ok(names)
}
