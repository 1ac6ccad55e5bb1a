use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_inspect_has_prefix() {
    let err = ErrorValue::new("boom");
    assert_eq!(err.message(), "boom");
    assert_eq!(err.inspect(), "ERROR: boom");
    assert_eq!(err.to_string(), "ERROR: boom");
}

#[test]
fn test_undefined_method_message() {
    let err = undefined_method("bark", "#<Dog>", "Dog");
    assert_eq!(err.message(), "undefined method `bark' for #<Dog>:Dog");
}

#[test]
fn test_classless_message_names_tag() {
    let err = undefined_method_for_classless("call", TypeTag::Builtin);
    assert!(err.message().contains("BUILTIN"));
}

#[test]
fn test_wrong_arg_count_message() {
    let err = wrong_arg_count("initialize", 1, 3);
    assert_eq!(
        err.message(),
        "wrong number of arguments for `initialize' (given 3, expected 1)"
    );
}

#[test]
fn test_construction_error_display() {
    let err = ConstructionError::DuplicateParameter { name: "x".into() };
    assert_eq!(
        err.to_string(),
        "duplicate parameter `x` in function definition"
    );

    let err = ConstructionError::InvalidSuperclass {
        name: "Comparable".into(),
        kind: "module",
    };
    assert_eq!(
        err.to_string(),
        "superclass must be a class, got module `Comparable`"
    );
}
