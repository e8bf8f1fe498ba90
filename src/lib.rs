#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::{
    analyzer::analyzer::analyze,
    dialect::dialect::Dialect,
    errors::{
        errors::ErrorTip,
        reporter::{Diagnostic, ErrorReporter},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod dialect;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a source together with the source's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within the
/// line. An offset at the very end of the source maps to the end of the last
/// line, so end-of-source errors still get a caret.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of source: after a trailing newline this is an empty new line.
    if source.ends_with('\n') || source.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        let line = source.rsplit('\n').next().unwrap_or_default();
        Some((line_number - 1, line.to_string(), line.len()))
    }
}

/// Renders a diagnostic with the offending source line and a caret.
///
/// ```text
/// ParserError: Labels are not supported.
/// -> contract.yul
///    |
/// 20 | label:
///    | ^
/// ```
pub fn display_error(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = String::new();
    let position = &diagnostic.position;

    match diagnostic.error.get_tip() {
        ErrorTip::None => {
            let _ = writeln!(out, "{}", diagnostic);
        }
        tip => {
            let _ = writeln!(out, "{} ({})", diagnostic, tip);
        }
    }
    let _ = writeln!(out, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}

/// Scans, parses and analyzes `source` in one go.
///
/// Returns whether the source is valid together with every diagnostic that
/// was produced. Parsing is skipped on scanner errors and analysis is skipped
/// when parsing failed.
#[tracing::instrument(skip_all, fields(flavour = ?dialect.flavour))]
pub fn check_source(source: &str, dialect: &Dialect) -> (bool, ErrorReporter) {
    let mut reporter = ErrorReporter::new();

    let tokens = match tokenize(source.to_string(), None) {
        Ok(tokens) => tokens,
        Err(error) => {
            reporter.report(error);
            return (false, reporter);
        }
    };

    let Some(ast) = parse(tokens, dialect, &mut reporter) else {
        return (false, reporter);
    };

    let valid = analyze(&ast, dialect, &mut reporter);
    (valid, reporter)
}
