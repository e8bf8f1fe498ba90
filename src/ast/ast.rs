use crate::Span;

use super::{
    expressions::{CallExpr, LiteralExpr, SymbolExpr},
    statements::{
        AssignmentStmt, BlockStmt, BreakStmt, ContinueStmt, ExpressionStmt, FnDeclStmt,
        ForLoopStmt, IfStmt, SwitchStmt, VarDeclStmt,
    },
};

/// Identity of a scope-introducing node, unique within one parse.
///
/// Blocks and function definitions carry one; the analyzer keys its side
/// table by it.
pub type NodeId = u32;

/// Statement Types
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StmtType {
    ExpressionStmt,
    BlockStmt,
    VarDeclStmt,
    AssignmentStmt,
    IfStmt,
    SwitchStmt,
    ForLoopStmt,
    BreakStmt,
    ContinueStmt,
    FnDeclStmt,
}

/// A statement of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    Switch(SwitchStmt),
    ForLoop(ForLoopStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    FnDecl(FnDeclStmt),
}

impl Stmt {
    /// Returns the type of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::Assignment(_) => StmtType::AssignmentStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::Switch(_) => StmtType::SwitchStmt,
            Stmt::ForLoop(_) => StmtType::ForLoopStmt,
            Stmt::Break(_) => StmtType::BreakStmt,
            Stmt::Continue(_) => StmtType::ContinueStmt,
            Stmt::FnDecl(_) => StmtType::FnDeclStmt,
        }
    }

    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Switch(stmt) => &stmt.span,
            Stmt::ForLoop(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
        }
    }
}

/// An expression: a typed literal, an identifier or a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Call(CallExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}
