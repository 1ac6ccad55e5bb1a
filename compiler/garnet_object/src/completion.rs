//! Statement completion records.
//!
//! Evaluating a statement either completes normally with a value or
//! completes abruptly with an early return or an error. `Completion` makes
//! that explicit so the evaluator can propagate abrupt completions with `?`
//! instead of inspecting every intermediate value for sentinels.
//!
//! At a function-call boundary a pending return becomes the call's result;
//! an error keeps propagating.

use crate::errors::ErrorValue;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Normal(Value),
    /// Early return with its payload.
    Return(Value),
    Error(ErrorValue),
}

impl Completion {
    #[inline]
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Completion::Normal(_))
    }

    /// Back to a plain value, re-wrapping an early return as a sentinel.
    pub fn into_value(self) -> Value {
        match self {
            Completion::Normal(value) => value,
            Completion::Return(value) => Value::return_value(value),
            Completion::Error(e) => Value::Error(e),
        }
    }

    /// `Ok` for a normal completion, `Err` for an abrupt one.
    pub fn into_result(self) -> Result<Value, Completion> {
        match self {
            Completion::Normal(value) => Ok(value),
            abrupt => Err(abrupt),
        }
    }

    /// The result of a function call whose body completed with `self`.
    pub fn at_call_boundary(self) -> Value {
        match self {
            Completion::Normal(value) | Completion::Return(value) => value,
            Completion::Error(e) => Value::Error(e),
        }
    }
}

impl From<Value> for Completion {
    fn from(value: Value) -> Self {
        match value {
            Value::ReturnValue(payload) => Completion::Return(Value::clone(&payload)),
            Value::Error(e) => Completion::Error(e),
            value => Completion::Normal(value),
        }
    }
}

/// Strip early-return wrappers at a call boundary.
pub fn unwrap_return_value(mut value: Value) -> Value {
    while let Value::ReturnValue(payload) = &value {
        let inner = Value::clone(payload);
        value = inner;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_value_is_normal() {
        let completion = Completion::from(Value::int(3));
        assert!(!completion.is_abrupt());
        assert_eq!(completion.into_result(), Ok(Value::int(3)));
    }

    #[test]
    fn test_return_value_is_abrupt() {
        let completion = Completion::from(Value::return_value(Value::int(5)));
        assert_eq!(completion, Completion::Return(Value::int(5)));
        assert!(completion.is_abrupt());
        assert_eq!(completion.at_call_boundary(), Value::int(5));
    }

    #[test]
    fn test_error_survives_call_boundary() {
        let completion = Completion::from(Value::error("boom"));
        assert!(completion.is_abrupt());
        assert_eq!(completion.at_call_boundary(), Value::error("boom"));
    }

    #[test]
    fn test_into_value_rewraps_return() {
        let value = Completion::Return(Value::Nil).into_value();
        assert!(value.is_return_value());
        assert_eq!(Completion::from(value), Completion::Return(Value::Nil));
    }

    #[test]
    fn test_unwrap_return_value() {
        assert_eq!(unwrap_return_value(Value::int(1)), Value::int(1));
        assert_eq!(
            unwrap_return_value(Value::return_value(Value::symbol("done"))),
            Value::symbol("done")
        );
        let nested = Value::return_value(Value::return_value(Value::int(9)));
        assert_eq!(unwrap_return_value(nested), Value::int(9));
    }

    #[test]
    fn test_unwrap_leaves_errors_alone() {
        assert_eq!(unwrap_return_value(Value::error("x")), Value::error("x"));
    }
}
