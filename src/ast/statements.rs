use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, NodeId, Stmt},
    expressions::{CallExpr, LiteralExpr, SymbolExpr},
    types::TypedName,
};

/// `{ ... }`: an ordered list of statements forming one lexical scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A function call used as a full statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: CallExpr,
    pub span: Span,
}

/// `let a:u256, b:u256 := f()`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub variables: Vec<TypedName>,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// `a, b := f()`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub targets: Vec<SymbolExpr>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// One arm of a switch; `value` is `None` for the `default` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: Option<LiteralExpr>,
    pub body: BlockStmt,
    pub span: Span,
}

impl Case {
    pub fn is_default(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub expression: Expr,
    pub cases: Vec<Case>,
    pub span: Span,
}

/// `for { pre } condition { post } { body }`
///
/// The scope of `pre` encloses the condition, `post` and `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoopStmt {
    pub pre: BlockStmt,
    pub condition: Expr,
    pub post: BlockStmt,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub id: NodeId,
    pub identifier: String,
    pub parameters: Vec<TypedName>,
    pub returns: Vec<TypedName>,
    pub body: BlockStmt,
    pub span: Span,
}
