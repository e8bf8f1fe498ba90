use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Broad class of a diagnostic, matching the stage that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ParserError,
    TypeError,
    DeclarationError,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The contract message, e.g. `Labels are not supported.`
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn category(&self) -> ErrorCategory {
        self.internal_error.category()
    }

    pub fn severity(&self) -> Severity {
        self.internal_error.severity()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::LiteralOrIdentifierExpected => "LiteralOrIdentifierExpected",
            ErrorImpl::LiteralExpected => "LiteralExpected",
            ErrorImpl::CallOrAssignmentExpected => "CallOrAssignmentExpected",
            ErrorImpl::LabelsNotSupported => "LabelsNotSupported",
            ErrorImpl::LabelNameMustPrecedeColon => "LabelNameMustPrecedeColon",
            ErrorImpl::MultipleAssignmentTarget => "MultipleAssignmentTarget",
            ErrorImpl::VariableNameExpected => "VariableNameExpected",
            ErrorImpl::InvalidNumberLiteral => "InvalidNumberLiteral",
            ErrorImpl::BuiltinAsIdentifier { .. } => "BuiltinAsIdentifier",
            ErrorImpl::AssignToBuiltin { .. } => "AssignToBuiltin",
            ErrorImpl::RecursionDepthExceeded => "RecursionDepthExceeded",
            ErrorImpl::SwitchWithoutCases => "SwitchWithoutCases",
            ErrorImpl::CaseAfterDefault => "CaseAfterDefault",
            ErrorImpl::DuplicateDefault => "DuplicateDefault",
            ErrorImpl::KeywordOutsideLoop { .. } => "KeywordOutsideLoop",
            ErrorImpl::FunctionInForInit => "FunctionInForInit",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::NumberLiteralTooLarge => "NumberLiteralTooLarge",
            ErrorImpl::StringLiteralTooLong { .. } => "StringLiteralTooLong",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::LiteralArgumentsExpected => "LiteralArgumentsExpected",
            ErrorImpl::CallToVariable { .. } => "CallToVariable",
            ErrorImpl::FunctionUsedAsValue { .. } => "FunctionUsedAsValue",
            ErrorImpl::ExpectedSingleValue { .. } => "ExpectedSingleValue",
            ErrorImpl::ValuesNotConsumed { .. } => "ValuesNotConsumed",
            ErrorImpl::VariableCountMismatch { .. } => "VariableCountMismatch",
            ErrorImpl::IdentifierNotFound { .. } => "IdentifierNotFound",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::VariableNotLvalue { .. } => "VariableNotLvalue",
            ErrorImpl::NameAlreadyTaken { .. } => "NameAlreadyTaken",
            ErrorImpl::DuplicateCase => "DuplicateCase",
            ErrorImpl::SwitchOnlyDefault => "SwitchOnlyDefault",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LabelsNotSupported => ErrorTip::Suggestion(String::from(
                "jumps and labels are not part of this language, use functions and loops",
            )),
            ErrorImpl::InvalidNumberLiteral => ErrorTip::Suggestion(String::from(
                "number literals are decimal or 0x-prefixed hexadecimal integers",
            )),
            ErrorImpl::InvalidType { .. } => ErrorTip::Suggestion(String::from(
                "valid types are bool, u8, s8, u32, s32, u64, s64, u128, s128, u256 and s256",
            )),
            ErrorImpl::IdentifierNotFound { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared in any enclosing scope", name))
            }
            ErrorImpl::FunctionNotFound { name } => {
                ErrorTip::Suggestion(format!("no function or builtin named `{}`", name))
            }
            ErrorImpl::VariableNotLvalue { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a variable in scope", name))
            }
            ErrorImpl::ValuesNotConsumed { .. } => ErrorTip::Suggestion(String::from(
                "bind the results with `let` or assign them to existing variables",
            )),
            ErrorImpl::RecursionDepthExceeded => ErrorTip::Suggestion(String::from(
                "reduce the nesting of blocks and calls",
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

fn value_count(count: &usize) -> String {
    if *count == 1 {
        String::from("1 value")
    } else {
        format!("{} values", count)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Scanner and parser
    #[error("Invalid token \"{token}\".")]
    UnrecognisedToken { token: String },
    #[error("Expected {expected} but got {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Literal or identifier expected.")]
    LiteralOrIdentifierExpected,
    #[error("Literal expected.")]
    LiteralExpected,
    #[error("Call or assignment expected.")]
    CallOrAssignmentExpected,
    #[error("Labels are not supported.")]
    LabelsNotSupported,
    #[error("Label name / variable name must precede \":\".")]
    LabelNameMustPrecedeColon,
    #[error("Label name / variable name must precede \",\" (multiple assignment).")]
    MultipleAssignmentTarget,
    #[error("Variable name expected in multiple assignment.")]
    VariableNameExpected,
    #[error("Invalid number literal.")]
    InvalidNumberLiteral,
    #[error("Cannot use builtin function name \"{name}\" as identifier name.")]
    BuiltinAsIdentifier { name: String },
    #[error("Cannot assign to builtin function \"{name}\".")]
    AssignToBuiltin { name: String },
    #[error("Maximum recursion depth reached during parsing.")]
    RecursionDepthExceeded,
    #[error("Switch statement without any cases.")]
    SwitchWithoutCases,
    #[error("Case not allowed after default case.")]
    CaseAfterDefault,
    #[error("Only one default case allowed.")]
    DuplicateDefault,
    #[error("Keyword \"{keyword}\" needs to be inside for-loop body.")]
    KeywordOutsideLoop { keyword: String },
    #[error("Functions cannot be defined inside a for-loop init block.")]
    FunctionInForInit,

    // Types
    #[error("\"{name}\" is not a valid type (user defined types are not yet supported).")]
    InvalidType { name: String },
    #[error("Number literal too large (> 256 bits)")]
    NumberLiteralTooLarge,
    #[error("String literal too long ({length} > 32)")]
    StringLiteralTooLong { length: usize },
    #[error("Function expects {expected} arguments but got {received}.")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("Function expects direct literals as arguments.")]
    LiteralArgumentsExpected,
    #[error("Attempt to call variable instead of function.")]
    CallToVariable { name: String },
    #[error("Function {name} used without being called.")]
    FunctionUsedAsValue { name: String },
    #[error("Expected expression to evaluate to one value, but got {count} values.")]
    ExpectedSingleValue { count: usize },
    #[error("Top-level expressions are not supposed to return values (this expression returns {}). Use ``pop()`` or assign them.", value_count(.count))]
    ValuesNotConsumed { count: usize },

    // Declarations
    #[error("Variable count mismatch: {variables} variables and {values} values.")]
    VariableCountMismatch { variables: usize, values: usize },
    #[error("Identifier not found.")]
    IdentifierNotFound { name: String },
    #[error("Function not found.")]
    FunctionNotFound { name: String },
    #[error("Variable not found or variable not lvalue.")]
    VariableNotLvalue { name: String },
    #[error("{kind} name {name} already taken in this scope.")]
    NameAlreadyTaken { kind: String, name: String },
    #[error("Duplicate case defined.")]
    DuplicateCase,

    // Warnings
    #[error("\"switch\" statement with only a default case.")]
    SwitchOnlyDefault,
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::LiteralOrIdentifierExpected
            | ErrorImpl::LiteralExpected
            | ErrorImpl::CallOrAssignmentExpected
            | ErrorImpl::LabelsNotSupported
            | ErrorImpl::LabelNameMustPrecedeColon
            | ErrorImpl::MultipleAssignmentTarget
            | ErrorImpl::VariableNameExpected
            | ErrorImpl::InvalidNumberLiteral
            | ErrorImpl::BuiltinAsIdentifier { .. }
            | ErrorImpl::AssignToBuiltin { .. }
            | ErrorImpl::RecursionDepthExceeded
            | ErrorImpl::SwitchWithoutCases
            | ErrorImpl::CaseAfterDefault
            | ErrorImpl::DuplicateDefault
            | ErrorImpl::KeywordOutsideLoop { .. }
            | ErrorImpl::FunctionInForInit => ErrorCategory::ParserError,
            ErrorImpl::InvalidType { .. }
            | ErrorImpl::NumberLiteralTooLarge
            | ErrorImpl::StringLiteralTooLong { .. }
            | ErrorImpl::ArgumentCountMismatch { .. }
            | ErrorImpl::LiteralArgumentsExpected
            | ErrorImpl::CallToVariable { .. }
            | ErrorImpl::FunctionUsedAsValue { .. }
            | ErrorImpl::ExpectedSingleValue { .. }
            | ErrorImpl::ValuesNotConsumed { .. }
            | ErrorImpl::SwitchOnlyDefault => ErrorCategory::TypeError,
            ErrorImpl::VariableCountMismatch { .. }
            | ErrorImpl::IdentifierNotFound { .. }
            | ErrorImpl::FunctionNotFound { .. }
            | ErrorImpl::VariableNotLvalue { .. }
            | ErrorImpl::NameAlreadyTaken { .. }
            | ErrorImpl::DuplicateCase => ErrorCategory::DeclarationError,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ErrorImpl::SwitchOnlyDefault => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
