use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::SymbolExpr,
        statements::{
            AssignmentStmt, BlockStmt, BreakStmt, Case, ContinueStmt, ExpressionStmt, FnDeclStmt,
            ForLoopStmt, IfStmt, SwitchStmt, VarDeclStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_call_expr, parse_elementary_expr, parse_expr, parse_literal},
    parser::{ForLoopComponent, Parser},
    types::{parse_declared_name, parse_typed_name_list},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return stmt_fn(parser);
    }

    parse_assignment_or_call_stmt(parser)
}

/// Parses `{ statements }`, counting one level of nesting.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.enter_recursion()?;
    let block = parse_block_body(parser);
    parser.leave_recursion();
    block
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;
    let id = parser.advance_id();

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let statement_start = parser.position_index();

        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) if is_recoverable(parser, &error) => {
                parser.record_recovered(error);
                parser.synchronize(statement_start);
            }
            Err(error) => return Err(error),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        id,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

fn is_recoverable(parser: &Parser, error: &Error) -> bool {
    parser.config().error_recovery && !matches!(error.get_impl(), ErrorImpl::RecursionDepthExceeded)
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;
    let variables = parse_typed_name_list(parser)?;

    let assigned_value = if parser.at_assign() {
        parser.expect_assign()?;
        Some(parse_expr(parser)?)
    } else {
        None
    };

    Ok(Stmt::VarDecl(VarDeclStmt {
        variables,
        assigned_value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start.clone();
    if parser.for_loop_component() == ForLoopComponent::ForLoopPre {
        return Err(Error::new(ErrorImpl::FunctionInForInit, start));
    }
    parser.expect(TokenKind::Function)?;

    let identifier = parse_declared_name(parser)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = if parser.current_token_kind() != TokenKind::CloseParen {
        parse_typed_name_list(parser)?
    } else {
        vec![]
    };
    parser.expect(TokenKind::CloseParen)?;

    let returns = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_typed_name_list(parser)?
    } else {
        vec![]
    };

    let id = parser.advance_id();
    // break/continue never reach through a function boundary
    let body = parse_block_in(parser, ForLoopComponent::None)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        id,
        identifier,
        parameters,
        returns,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;
    let condition = parse_expr(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::If(IfStmt {
        condition,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Switch)?.span.start;
    let expression = parse_expr(parser)?;

    let mut cases = vec![];
    let mut has_default = false;
    loop {
        match parser.current_token_kind() {
            TokenKind::Case => {
                if has_default {
                    return Err(Error::new(ErrorImpl::CaseAfterDefault, parser.get_position()));
                }
                let case_start = parser.advance().span.start;
                let value = parse_literal(parser)?;
                let body = parse_block(parser)?;
                cases.push(Case {
                    value: Some(value),
                    body,
                    span: Span {
                        start: case_start,
                        end: parser.previous_end(),
                    },
                });
            }
            TokenKind::Default => {
                if has_default {
                    return Err(Error::new(ErrorImpl::DuplicateDefault, parser.get_position()));
                }
                has_default = true;
                let case_start = parser.advance().span.start;
                let body = parse_block(parser)?;
                cases.push(Case {
                    value: None,
                    body,
                    span: Span {
                        start: case_start,
                        end: parser.previous_end(),
                    },
                });
            }
            _ => break,
        }
    }

    if cases.is_empty() {
        return Err(Error::new(ErrorImpl::SwitchWithoutCases, parser.get_position()));
    }

    Ok(Stmt::Switch(SwitchStmt {
        expression,
        cases,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_for_loop_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;

    let pre = parse_block_in(parser, ForLoopComponent::ForLoopPre)?;
    let condition = parse_expr(parser)?;
    let post = parse_block_in(parser, ForLoopComponent::ForLoopPost)?;
    let body = parse_block_in(parser, ForLoopComponent::ForLoopBody)?;

    Ok(Stmt::ForLoop(ForLoopStmt {
        pre,
        condition,
        post,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

/// Parses a block with `component` as the enclosing loop context.
fn parse_block_in(parser: &mut Parser, component: ForLoopComponent) -> Result<BlockStmt, Error> {
    let previous = parser.set_for_loop_component(component);
    let block = parse_block(parser);
    parser.set_for_loop_component(previous);
    block
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parse_loop_keyword(parser, TokenKind::Break)?;
    Ok(Stmt::Break(BreakStmt { span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parse_loop_keyword(parser, TokenKind::Continue)?;
    Ok(Stmt::Continue(ContinueStmt { span }))
}

fn parse_loop_keyword(parser: &mut Parser, kind: TokenKind) -> Result<Span, Error> {
    let token = parser.expect(kind)?;

    if parser.for_loop_component() != ForLoopComponent::ForLoopBody {
        return Err(Error::new(
            ErrorImpl::KeywordOutsideLoop { keyword: token.value },
            token.span.start,
        ));
    }

    Ok(token.span)
}

/// Everything that does not start with a keyword or `{`: a call statement or
/// an assignment to one or more variables.
pub fn parse_assignment_or_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let elementary = parse_elementary_expr(parser)?;

    match parser.current_token_kind() {
        TokenKind::OpenParen => match elementary {
            Expr::Symbol(callee) => {
                let expression = parse_call_expr(parser, callee)?;
                Ok(Stmt::Expression(ExpressionStmt {
                    span: expression.span.clone(),
                    expression,
                }))
            }
            _ => Err(Error::new(ErrorImpl::CallOrAssignmentExpected, parser.get_position())),
        },
        TokenKind::Comma => {
            let mut targets = vec![assignment_target(
                parser,
                elementary,
                ErrorImpl::MultipleAssignmentTarget,
            )?];

            while parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                let next = parse_elementary_expr(parser)?;
                targets.push(assignment_target(parser, next, ErrorImpl::VariableNameExpected)?);
            }

            finish_assignment(parser, targets)
        }
        TokenKind::Colon => {
            if parser.peek_kind(1) != TokenKind::Assignment {
                return Err(match elementary {
                    Expr::Symbol(label) => Error::new(ErrorImpl::LabelsNotSupported, label.span.start),
                    _ => Error::new(ErrorImpl::LabelNameMustPrecedeColon, parser.get_position()),
                });
            }

            let target = assignment_target(parser, elementary, ErrorImpl::LabelNameMustPrecedeColon)?;
            finish_assignment(parser, vec![target])
        }
        _ => Err(Error::new(ErrorImpl::CallOrAssignmentExpected, parser.get_position())),
    }
}

/// Checks that `expr` can be assigned to.
fn assignment_target(parser: &Parser, expr: Expr, otherwise: ErrorImpl) -> Result<SymbolExpr, Error> {
    match expr {
        Expr::Symbol(symbol) => {
            if parser.dialect().builtin(&symbol.value).is_some() {
                return Err(Error::new(
                    ErrorImpl::AssignToBuiltin { name: symbol.value },
                    symbol.span.start,
                ));
            }
            Ok(symbol)
        }
        other => Err(Error::new(otherwise, other.get_span().start.clone())),
    }
}

fn finish_assignment(parser: &mut Parser, targets: Vec<SymbolExpr>) -> Result<Stmt, Error> {
    parser.expect_assign()?;
    let value = parse_expr(parser)?;

    let start = match targets.first() {
        Some(target) => target.span.start.clone(),
        None => value.get_span().start.clone(),
    };

    Ok(Stmt::Assignment(AssignmentStmt {
        targets,
        value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
