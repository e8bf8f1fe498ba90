//! Unit tests for the analyzer module.
//!
//! This module contains tests for:
//! - Scoping, hoisting and shadowing
//! - Call arity and value counts
//! - Type names and literal ranges
//! - Switch case checks
//! - The analysis side table

use crate::{
    check_source,
    dialect::dialect::{BuiltinFunction, Dialect},
    errors::{errors::ErrorCategory, reporter::ErrorReporter},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    analyzer::analyze_with_info,
    literals::U256,
    scope::Identifier,
};

const MAX_DECIMAL: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";
const TWO_POW_256_DECIMAL: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639936";

fn succeeds(source: &str) -> bool {
    succeeds_with(source, &Dialect::typed())
}

fn succeeds_with(source: &str, dialect: &Dialect) -> bool {
    let (valid, reporter) = check_source(source, dialect);
    valid && !reporter.has_errors()
}

/// Messages and categories of every diagnostic, in emission order.
fn diagnostics_with(source: &str, dialect: &Dialect) -> Vec<(ErrorCategory, String)> {
    let (_, reporter) = check_source(source, dialect);
    reporter.iter().map(|x| (x.category, x.message.clone())).collect()
}

fn single_error(source: &str) -> (ErrorCategory, String) {
    single_error_with(source, &Dialect::typed())
}

fn single_error_with(source: &str, dialect: &Dialect) -> (ErrorCategory, String) {
    let (valid, reporter) = check_source(source, dialect);
    assert!(!valid, "expected {:?} to fail", source);
    assert_eq!(reporter.len(), 1, "diagnostics: {:?}", reporter);
    let first = reporter.first().unwrap();
    (first.category, first.message.clone())
}

fn strict_with_builtin() -> Dialect {
    Dialect::strict().with_builtin(BuiltinFunction::new("builtin", 2, 3))
}

#[test]
fn test_valid_programs() {
    assert!(succeeds("{ }"));
    assert!(succeeds("{ let x:u256 := 7:u256 }"));
    assert!(succeeds("{ let x:bool := true:bool }"));
    assert!(succeeds("{ let x:u256 }"));
    assert!(succeeds("{ let x:u256 := 2:u256 let y:u256 := x }"));
    assert!(succeeds(
        "{ function add(a:u256, b:u256) -> c:u256 {} let y:u256 := 2:u256 let x:u256 := add(7:u256, add(6:u256, y)) }"
    ));
    assert!(succeeds(
        "{ let x:u256 := 7:u256 { let y:u256 := 3:u256 } { let z:u256 := 2:u256 } }"
    ));
    assert!(succeeds(
        "{ function f(a:u256) -> b:u256 {} function g(a:u256, b:u256, c:u256) {} function x() { g(1:u256, 2:u256, f(3:u256)) x() } }"
    ));
    assert!(succeeds(
        "{ function f() -> a:u256, b:u256, c:u256 {} let x:u256, y:u256, z:u256 := f() }"
    ));
}

#[test]
fn test_keyword_like_identifiers() {
    assert!(succeeds("{ let return:u256 := 1:u256 }"));
    assert!(succeeds("{ let byte:u256 := 1:u256 }"));
    assert!(succeeds("{ let address:u256 := 1:u256 }"));
    assert!(succeeds("{ let bool:u256 := 1:u256 }"));
}

#[test]
fn test_elementary_types() {
    for ty in ["bool", "u8", "s8", "u32", "s32", "u64", "s64", "u128", "s128", "u256", "s256"] {
        let source = format!("{{ let x:{} := 1:{} }}", ty, ty);
        assert!(succeeds(&source), "{}", source);
    }
    // Literal and variable types are not required to agree.
    assert!(succeeds("{ let x:s8 := 1:u8 }"));
}

#[test]
fn test_invalid_types() {
    let expected = (
        ErrorCategory::TypeError,
        String::from("\"invalid\" is not a valid type (user defined types are not yet supported)."),
    );

    assert_eq!(single_error("{ let x:bool := 1:invalid }"), expected);
    assert_eq!(single_error("{ let x:invalid := 1:bool }"), expected);
    assert_eq!(single_error("{ function f(a:invalid) {} }"), expected);
    assert_eq!(single_error("{ function f() -> r:invalid {} }"), expected);
}

#[test]
fn test_number_literal_range() {
    assert!(succeeds(&format!("{{ let x:u256 := {}:u256 }}", MAX_DECIMAL)));
    assert!(succeeds(&format!("{{ let x:u256 := 0x{}:u256 }}", "f".repeat(64))));
    assert!(succeeds(&format!("{{ let x:u256 := 0x{}1:u256 }}", "0".repeat(80))));

    let expected = (
        ErrorCategory::TypeError,
        String::from("Number literal too large (> 256 bits)"),
    );
    assert_eq!(
        single_error(&format!("{{ let x:u256 := {}:u256 }}", TWO_POW_256_DECIMAL)),
        expected
    );
    assert_eq!(
        single_error(&format!("{{ let x:u256 := 0x1{}:u256 }}", "f".repeat(64))),
        expected
    );
}

#[test]
fn test_string_literal_length() {
    assert!(succeeds(&format!("{{ let x:u256 := \"{}\":u256 }}", "a".repeat(32))));
    assert_eq!(
        single_error(&format!("{{ let x:u256 := \"{}\":u256 }}", "a".repeat(33))),
        (ErrorCategory::TypeError, String::from("String literal too long (33 > 32)"))
    );
}

#[test]
fn test_string_literal_length_counts_escaped_bytes() {
    assert!(succeeds(&format!("{{ let x:u256 := \"{}\":u256 }}", r"\xff".repeat(20))));
    assert!(succeeds(&format!("{{ let x:u256 := \"{}\":u256 }}", r"\xff".repeat(32))));
    assert!(succeeds(&format!("{{ let x:u256 := \"{}\":u256 }}", r"\n".repeat(32))));
    assert_eq!(
        single_error(&format!("{{ let x:u256 := \"{}\":u256 }}", r"\x80".repeat(33))),
        (ErrorCategory::TypeError, String::from("String literal too long (33 > 32)"))
    );
}

#[test]
fn test_duplicate_case_compares_decoded_strings() {
    assert_eq!(
        single_error("{ switch 1:u256 case \"a\":u256 { } case \"\\x61\":u256 { } }"),
        (ErrorCategory::DeclarationError, String::from("Duplicate case defined."))
    );
}

#[test]
fn test_scoping_rules() {
    // Declarations become visible after themselves.
    assert_eq!(
        single_error("{ let x:u256 := x }"),
        (ErrorCategory::DeclarationError, String::from("Identifier not found."))
    );
    // Names do not leak out of their block.
    assert_eq!(
        single_error("{ { let x:u256 } let y:u256 := x }"),
        (ErrorCategory::DeclarationError, String::from("Identifier not found."))
    );
    // Inner declarations may shadow outer ones.
    assert!(succeeds("{ let x:u256 { let x:bool } }"));
    // Functions may be used before their definition and recursively.
    assert!(succeeds("{ f() function f() { f() } }"));
    assert!(succeeds("{ function f(a:u256) -> b:u256 { b := a } }"));
}

#[test]
fn test_redeclaration() {
    assert_eq!(
        single_error("{ let x:u256 let x:u256 }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable name x already taken in this scope.")
        )
    );
    assert_eq!(
        single_error("{ function f() {} function f() {} }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Function name f already taken in this scope.")
        )
    );
    assert_eq!(
        single_error("{ function f(a:u256) { let a:u256 } }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable name a already taken in this scope.")
        )
    );
    assert_eq!(
        single_error("{ function f() {} let f:u256 }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable name f already taken in this scope.")
        )
    );
}

#[test]
fn test_call_resolution() {
    assert_eq!(
        single_error("{ f() }"),
        (ErrorCategory::DeclarationError, String::from("Function not found."))
    );
    assert_eq!(
        single_error("{ let x:u256 x() }"),
        (
            ErrorCategory::TypeError,
            String::from("Attempt to call variable instead of function.")
        )
    );
    assert_eq!(
        single_error("{ function f() -> r:u256 {} let x:u256 := f }"),
        (ErrorCategory::TypeError, String::from("Function f used without being called."))
    );
    assert_eq!(
        single_error("{ function f(a:u256) {} f() }"),
        (ErrorCategory::TypeError, String::from("Function expects 1 arguments but got 0."))
    );
}

#[test]
fn test_assignment_targets() {
    assert_eq!(
        single_error("{ x := 1:u256 }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable not found or variable not lvalue.")
        )
    );
    assert_eq!(
        single_error("{ function f() {} f := 1:u256 }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable not found or variable not lvalue.")
        )
    );
    assert_eq!(
        single_error("{ function f() -> a:u256, b:u256 {} let x:u256 x := f() }"),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable count mismatch: 1 variables and 2 values.")
        )
    );
}

#[test]
fn test_value_counts() {
    assert_eq!(
        single_error("{ function f() -> a:u256, b:u256 {} if f() {} }"),
        (
            ErrorCategory::TypeError,
            String::from("Expected expression to evaluate to one value, but got 2 values.")
        )
    );
    assert_eq!(
        single_error("{ function f() {} function g(a:u256) {} g(f()) }"),
        (
            ErrorCategory::TypeError,
            String::from("Expected expression to evaluate to one value, but got 0 values.")
        )
    );
    assert_eq!(
        single_error("{ function f() -> a:u256 {} f() }"),
        (
            ErrorCategory::TypeError,
            String::from(
                "Top-level expressions are not supposed to return values (this expression returns 1 value). Use ``pop()`` or assign them."
            )
        )
    );
    assert_eq!(
        single_error("{ function f() -> a:u256, b:u256 {} f() }"),
        (
            ErrorCategory::TypeError,
            String::from(
                "Top-level expressions are not supposed to return values (this expression returns 2 values). Use ``pop()`` or assign them."
            )
        )
    );
}

#[test]
fn test_if_condition_accepts_any_single_value() {
    assert!(succeeds("{ if true:bool {} }"));
    assert!(succeeds("{ if false:bool { let x:u256 := 3:u256 } }"));
    assert!(succeeds("{ function f() -> x:bool {} if f() { let b:bool := f() } }"));
    assert!(succeeds("{ if 42:u256 { } }"));
}

#[test]
fn test_switch_cases() {
    assert!(succeeds(
        "{ let x:u256 switch x case 0:u256 { } case 1:u256 { } default { } }"
    ));
    assert_eq!(
        single_error("{ let x:u256 switch x case 1:u256 {} case 0x01:u256 {} }"),
        (ErrorCategory::DeclarationError, String::from("Duplicate case defined."))
    );
    assert_eq!(
        single_error("{ let x:u256 switch x case \"a\":u256 {} case \"a\":u256 {} }"),
        (ErrorCategory::DeclarationError, String::from("Duplicate case defined."))
    );
}

#[test]
fn test_switch_with_only_default_is_a_warning() {
    let (valid, reporter) = check_source("{ let x:u256 switch x default { } }", &Dialect::typed());

    assert!(valid);
    assert!(reporter.contains_only_warnings());
    assert_eq!(reporter.len(), 1);
    assert_eq!(
        reporter.first().unwrap().message,
        "\"switch\" statement with only a default case."
    );
}

#[test]
fn test_for_loop_scopes() {
    assert!(succeeds(
        "{ for { let i:u256 := 0:u256 } i { i := i } { let y:u256 := i } }"
    ));
    assert_eq!(
        single_error("{ for { let i:u256 } i { } { } let z:u256 := i }"),
        (ErrorCategory::DeclarationError, String::from("Identifier not found."))
    );
}

#[test]
fn test_builtins() {
    let dialect = strict_with_builtin();

    assert!(succeeds_with("{ let a, b, c := builtin(1, 2) }", &dialect));
    assert_eq!(
        single_error_with("{ let a, b, c := builtin(1) }", &dialect),
        (ErrorCategory::TypeError, String::from("Function expects 2 arguments but got 1."))
    );
    assert_eq!(
        single_error_with("{ let a, b := builtin(1, 2) }", &dialect),
        (
            ErrorCategory::DeclarationError,
            String::from("Variable count mismatch: 2 variables and 3 values.")
        )
    );
    assert_eq!(
        single_error_with("{ let a := builtin }", &dialect),
        (ErrorCategory::TypeError, String::from("Function builtin used without being called."))
    );
}

#[test]
fn test_literal_arguments() {
    let dialect = Dialect::strict()
        .with_builtin(BuiltinFunction::new("datasize", 1, 1).with_literal_arguments());

    assert!(succeeds_with("{ let x := datasize(\"main\") }", &dialect));
    assert_eq!(
        single_error_with("{ let s := 1 let x := datasize(s) }", &dialect),
        (ErrorCategory::TypeError, String::from("Function expects direct literals as arguments."))
    );
}

#[test]
fn test_all_errors_reported_in_source_order() {
    let diagnostics = diagnostics_with(
        "{ let x:u256 := y let z:invalid f(1:u256) }",
        &Dialect::typed(),
    );

    let messages: Vec<&str> = diagnostics.iter().map(|x| x.1.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Identifier not found.",
            "\"invalid\" is not a valid type (user defined types are not yet supported).",
            "Function not found.",
        ]
    );
}

#[test]
fn test_unresolved_values_do_not_cascade() {
    // The unknown callee yields no value count, so no count mismatch follows.
    let diagnostics = diagnostics_with("{ let a:u256, b:u256 := g() }", &Dialect::typed());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_analysis_info() {
    let source = "{ let x:u256 function f(a:u256) -> r:u256 { let y:u256 } }";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let dialect = Dialect::typed();
    let mut reporter = ErrorReporter::new();
    let ast = parse(tokens, &dialect, &mut reporter).unwrap();

    let (valid, info) = analyze_with_info(&ast, &dialect, &mut reporter);
    assert!(valid);

    let root = info.scope(ast.id).unwrap();
    assert!(root.parent.is_none());
    let names: Vec<&str> = root.names().map(|x| x.0).collect();
    assert_eq!(names, vec!["f", "x"]);
    assert!(matches!(root.get_identifier("x"), Some(Identifier::Variable { .. })));

    let crate::ast::ast::Stmt::FnDecl(function) = &ast.body[1] else {
        panic!("expected a function definition");
    };
    let signature = info.function_signature(function.id).unwrap();
    assert_eq!(signature.name, "f");
    assert_eq!(signature.parameter_count(), 1);
    assert_eq!(signature.return_count(), 1);

    let body = info.scope(function.body.id).unwrap();
    assert_eq!(body.parent, Some(ast.id));
    let names: Vec<&str> = body.names().map(|x| x.0).collect();
    assert_eq!(names, vec!["a", "r", "y"]);
}

#[test]
fn test_u256_from_literal() {
    assert_eq!(U256::from_literal("0"), Some(U256::ZERO));
    assert!(U256::from_literal("0x00").unwrap().is_zero());
    assert_eq!(U256::from_literal("42"), Some(U256::from_u64(42)));
    assert_eq!(U256::from_literal("0x2a"), Some(U256::from_u64(42)));
    assert_eq!(U256::from_literal(MAX_DECIMAL), Some(U256::MAX));
    assert_eq!(U256::from_literal(TWO_POW_256_DECIMAL), None);
    assert_eq!(U256::from_literal("0x"), None);
    assert_eq!(U256::from_literal("1e5"), None);
}

#[test]
fn test_u256_display() {
    assert_eq!(U256::ZERO.to_string(), "0x0");
    assert_eq!(U256::from_u64(255).to_string(), "0xff");
    assert_eq!(
        U256::from_literal("0x10000000000000000").unwrap().to_string(),
        "0x10000000000000000"
    );
}
