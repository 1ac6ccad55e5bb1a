//! Error types for the object model.
//!
//! Two tiers exist and they never mix:
//!
//! - **Domain errors** (`ErrorValue`) are language-level failures: a method
//!   that does not exist, a wrong argument count, a builtin fed the wrong
//!   kind of value. They travel as ordinary `Value::Error` values and are
//!   surfaced to the user as `ERROR: <message>`.
//! - **Construction errors** (`ConstructionError`) reject invalid inputs to
//!   value constructors. They are returned as `Err` at the construction site
//!   and indicate a bug in the caller, not in the interpreted program.
//!
//! All domain error messages are built by the factory functions below so
//! the wording lives in one place.

use std::fmt;

use thiserror::Error;

use crate::tag::TypeTag;

/// Prefix rendered in front of every domain error message.
pub const ERROR_PREFIX: &str = "ERROR: ";

/// A recoverable, language-level error carried as a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The user-visible form, `ERROR: <message>`.
    pub fn inspect(&self) -> String {
        format!("{ERROR_PREFIX}{}", self.message)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ERROR_PREFIX}{}", self.message)
    }
}

/// Invalid input to a value constructor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("duplicate parameter `{name}` in function definition")]
    DuplicateParameter { name: String },
    #[error("superclass must be a class, got {kind} `{name}`")]
    InvalidSuperclass { name: String, kind: &'static str },
    #[error("class name must not be empty")]
    EmptyClassName,
}

// Method Dispatch Errors

/// No method `method` anywhere in the receiver's ancestor chain.
#[cold]
pub fn undefined_method(method: &str, receiver: &str, class_name: &str) -> ErrorValue {
    ErrorValue::new(format!(
        "undefined method `{method}' for {receiver}:{class_name}"
    ))
}

/// The receiver has no class at all (functions, builtins, errors).
#[cold]
pub fn undefined_method_for_classless(method: &str, tag: TypeTag) -> ErrorValue {
    ErrorValue::new(format!(
        "undefined method `{method}' for value of type {tag} (no class)"
    ))
}

#[cold]
pub fn wrong_arg_count(method: &str, expected: usize, got: usize) -> ErrorValue {
    ErrorValue::new(format!(
        "wrong number of arguments for `{method}' (given {got}, expected {expected})"
    ))
}

#[cold]
pub fn wrong_arg_type(method: &str, expected: &str, got: TypeTag) -> ErrorValue {
    ErrorValue::new(format!(
        "wrong argument type for `{method}' (expected {expected}, got {got})"
    ))
}

// Class and Singleton Errors

#[cold]
pub fn singleton_not_allowed(receiver: &str, tag: TypeTag) -> ErrorValue {
    ErrorValue::new(format!("can't define singleton for {receiver} ({tag})"))
}

#[cold]
pub fn not_a_class(receiver: &str) -> ErrorValue {
    ErrorValue::new(format!("{receiver} is not a class"))
}

#[cold]
pub fn uninstantiable_class(class_name: &str) -> ErrorValue {
    ErrorValue::new(format!("allocator undefined for {class_name}"))
}

// Call Errors

#[cold]
pub fn not_callable(receiver: &str, tag: TypeTag) -> ErrorValue {
    ErrorValue::new(format!("{receiver} ({tag}) is not callable"))
}

#[cfg(test)]
mod tests;
