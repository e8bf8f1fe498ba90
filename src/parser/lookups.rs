use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser<'_>) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::Number, parse_literal_expr);
    parser.nud(TokenKind::String, parse_literal_expr);
    parser.nud(TokenKind::True, parse_literal_expr);
    parser.nud(TokenKind::False, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
    parser.stmt(TokenKind::Function, parse_fn_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Switch, parse_switch_stmt);
    parser.stmt(TokenKind::For, parse_for_loop_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
}

// Lookup tables inside parser struct
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
