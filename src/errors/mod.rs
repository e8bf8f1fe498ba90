//! Error types and the diagnostic sink.
//!
//! This module defines the errors produced by every stage of the front end:
//!
//! - Error structures with source position information
//! - Categories (parser, type, declaration) and severities
//! - The exact message text consumers match on
//! - The [`reporter::ErrorReporter`] sink collecting diagnostics in order

pub mod errors;
pub mod reporter;
