//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. The grammar has no operators, so instead of
//! binding powers it dispatches on the leading token of each statement and
//! expression through lookup tables. It handles:
//!
//! - Statement parsing (declarations, assignments, calls, functions, control flow)
//! - Expression parsing (typed literals, identifiers, calls)
//! - Type annotations under the typed flavour
//! - Recursion limits and optional statement-level recovery

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
