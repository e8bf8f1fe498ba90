//! Type names as they appear in the AST.
//!
//! The language only knows a fixed, closed set of elementary types. Any
//! other name written in a type position is kept as a [`SymbolType`] so the
//! analyzer can reject it with a precise diagnostic.

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use crate::{Position, Span};

lazy_static! {
    pub static ref ELEMENTARY_TYPES: HashMap<&'static str, ElementaryType> = {
        let mut map = HashMap::new();
        map.insert("bool", ElementaryType::Bool);
        map.insert("u8", ElementaryType::U8);
        map.insert("s8", ElementaryType::S8);
        map.insert("u32", ElementaryType::U32);
        map.insert("s32", ElementaryType::S32);
        map.insert("u64", ElementaryType::U64);
        map.insert("s64", ElementaryType::S64);
        map.insert("u128", ElementaryType::U128);
        map.insert("s128", ElementaryType::S128);
        map.insert("u256", ElementaryType::U256);
        map.insert("s256", ElementaryType::S256);
        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementaryType {
    Bool,
    U8,
    S8,
    U32,
    S32,
    U64,
    S64,
    U128,
    S128,
    U256,
    S256,
}

impl ElementaryType {
    pub fn from_name(name: &str) -> Option<ElementaryType> {
        ELEMENTARY_TYPES.get(name).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementaryType::Bool => "bool",
            ElementaryType::U8 => "u8",
            ElementaryType::S8 => "s8",
            ElementaryType::U32 => "u32",
            ElementaryType::S32 => "s32",
            ElementaryType::U64 => "u64",
            ElementaryType::S64 => "s64",
            ElementaryType::U128 => "u128",
            ElementaryType::S128 => "s128",
            ElementaryType::U256 => "u256",
            ElementaryType::S256 => "s256",
        }
    }
}

/// Represents a type reference that is not an elementary type.
///
/// Always invalid after analysis: user defined types are not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

impl SymbolType {
    pub fn get_position(&self) -> Position {
        self.position.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    Elementary(ElementaryType),
    Symbol(SymbolType),
}

impl TypeName {
    /// Classifies a name written in a type position.
    pub fn resolve(name: &str, position: Position) -> TypeName {
        match ElementaryType::from_name(name) {
            Some(elementary) => TypeName::Elementary(elementary),
            None => TypeName::Symbol(SymbolType {
                name: name.to_string(),
                position,
            }),
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeName::Elementary(elementary) => write!(f, "{}", elementary.name()),
            TypeName::Symbol(symbol) => write!(f, "{}", symbol.name),
        }
    }
}

/// `name:type` in declarations, parameter and return lists.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedName {
    pub name: String,
    pub ty: Option<TypeName>,
    pub span: Span,
}
