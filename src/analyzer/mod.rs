//! Semantic analysis module.
//!
//! This module walks a parsed program and checks everything the grammar
//! cannot express:
//!
//! - Resolving identifiers and calls through a stack of lexical scopes
//! - Checking argument and value counts of calls, declarations and assignments
//! - Validating type names and literal ranges
//! - Detecting duplicate declarations and duplicate switch cases
//!
//! Every problem is reported and the walk continues, so one pass surfaces
//! all independent errors. The scopes it builds are kept in an
//! [`scope::AnalysisInfo`] side table.

pub mod analyzer;
pub mod literals;
pub mod scope;

#[cfg(test)]
mod tests;
