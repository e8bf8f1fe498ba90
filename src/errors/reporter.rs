//! The diagnostic sink shared by the parser and the analyzer.
//!
//! Both stages only ever append to an [`ErrorReporter`]; emission order is
//! source order and callers are allowed to rely on [`ErrorReporter::first`].

use std::{fmt::Display, slice::Iter};

use crate::Position;

use super::errors::{Error, ErrorCategory, Severity};

/// A single rendered entry of the sink.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: ErrorCategory,
    pub message: String,
    pub position: Position,
    pub error: Error,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        Diagnostic {
            severity: error.severity(),
            category: error.category(),
            message: error.message(),
            position: error.get_position().clone(),
            error,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_error() {
            write!(f, "{}: {}", self.category, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        ErrorReporter {
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, error: Error) {
        tracing::debug!(
            category = %error.category(),
            severity = %error.severity(),
            offset = error.get_position().0,
            "{}",
            error
        );
        self.diagnostics.push(Diagnostic::from(error));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn contains_only_warnings(&self) -> bool {
        !self.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|x| x.is_error()).count()
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|x| x.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|x| x.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|x| !x.is_error())
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorReporter {
    type Item = &'a Diagnostic;
    type IntoIter = Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
