use super::dialect::{AsmFlavour, BuiltinFunction, BuiltinSpecError, Dialect};
use crate::ast::types::ElementaryType;

#[test]
fn test_default_dialect_is_typed_and_empty() {
    let dialect = Dialect::default();

    assert_eq!(dialect.flavour, AsmFlavour::Typed);
    assert!(dialect.is_typed());
    assert!(dialect.builtin("add").is_none());
}

#[test]
fn test_builtin_lookup() {
    let dialect = Dialect::strict().with_builtin(BuiltinFunction::new("builtin", 2, 3));

    let builtin = dialect.builtin("builtin").unwrap();
    assert_eq!(builtin.parameter_count(), 2);
    assert_eq!(builtin.return_count(), 3);
    assert!(!builtin.movable);
    assert!(dialect.builtin("other").is_none());
    assert!(!dialect.is_typed());
}

#[test]
fn test_typed_builtin() {
    let builtin = BuiltinFunction::typed(
        "add",
        &[ElementaryType::U256, ElementaryType::U256],
        &[ElementaryType::U256],
    )
    .movable();

    assert_eq!(builtin.parameters[0], Some(ElementaryType::U256));
    assert_eq!(builtin.return_count(), 1);
    assert!(builtin.movable);
}

#[test]
fn test_builtin_from_spec() {
    let builtin: BuiltinFunction = "datasize:1:1:literal:movable".parse().unwrap();

    assert_eq!(builtin.name, "datasize");
    assert_eq!(builtin.parameter_count(), 1);
    assert!(builtin.literal_arguments);
    assert!(builtin.movable);
}

#[test]
fn test_builtin_from_malformed_spec() {
    assert_eq!(
        "sstore:2".parse::<BuiltinFunction>(),
        Err(BuiltinSpecError::Malformed("sstore:2".to_string()))
    );
    assert_eq!(
        "sstore:two:0".parse::<BuiltinFunction>(),
        Err(BuiltinSpecError::InvalidCount("two".to_string()))
    );
    assert_eq!(
        "sstore:2:0:pure".parse::<BuiltinFunction>(),
        Err(BuiltinSpecError::UnknownFlag("pure".to_string()))
    );
}
