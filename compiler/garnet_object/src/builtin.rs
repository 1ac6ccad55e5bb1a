//! Native functions bridged into the object model.

// Builtins share one host closure between every copy of the value
#![expect(
    clippy::disallowed_types,
    reason = "Rc shares the host closure between copies of a Builtin"
)]

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Host callable: variadic values in, one value out.
///
/// Must be total over its inputs: wrong arity or wrong argument kinds are
/// reported by returning `Value::Error`, never by panicking.
pub type BuiltinFn = dyn Fn(&[Value]) -> Value;

/// A native function value. Classless and not dispatchable.
#[derive(Clone)]
pub struct Builtin {
    name: &'static str,
    func: Rc<BuiltinFn>,
}

impl Builtin {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Builtin {
            name,
            func: Rc::new(func),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    pub fn inspect(&self) -> String {
        "builtin function".to_string()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Builtin) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}
