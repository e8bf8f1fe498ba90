use crate::{lexer::lexer::unescape_string, Span};

use super::{ast::Expr, types::TypeName};

// LITERALS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    Boolean,
    String,
}

/// Literal Expression
///
/// `value` is the source text; for strings it is the body between the
/// quotes with escapes left in place. `ty` is `None` only under the untyped
/// strict flavour.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub value: String,
    pub ty: Option<TypeName>,
    pub span: Span,
}

impl LiteralExpr {
    /// Bytes a string literal denotes.
    pub fn string_bytes(&self) -> Vec<u8> {
        unescape_string(&self.value)
    }
}

/// Symbol Expression
/// Represents an identifier in the AST, used as a value or assignment target.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

/// Call Expression
/// Represents a function call. The callee is always a plain name.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: SymbolExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
