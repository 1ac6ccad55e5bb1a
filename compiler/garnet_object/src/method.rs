//! Method implementations and method tables.

// Methods share their implementation between every class that inherits them
#![expect(
    clippy::disallowed_types,
    reason = "Rc shares native method closures across tables and lookups"
)]

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::class::ClassRef;
use crate::dispatch::CallContext;
use crate::function::Function;
use crate::value::{Heap, Value};

/// Mapping from method name to implementation. Names are unique; iteration
/// order is unspecified.
pub type MethodTable = FxHashMap<String, RubyMethod>;

/// Host implementation of a method: receives the dispatch context, the
/// receiver and the arguments, and reports failures as `Value::Error`.
pub type NativeFn = dyn Fn(&mut CallContext<'_>, &Value, &[Value]) -> Value;

/// Number of arguments a method accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Any,
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => n == count,
            Arity::Any => true,
        }
    }
}

/// A native method: a named host closure.
#[derive(Clone)]
pub struct NativeMethod {
    name: &'static str,
    arity: Arity,
    func: Rc<NativeFn>,
}

impl NativeMethod {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Run the host closure. Arity is checked by the caller
    /// (`CallContext::invoke_method`).
    #[inline]
    pub(crate) fn call(
        &self,
        ctx: &mut CallContext<'_>,
        receiver: &Value,
        args: &[Value],
    ) -> Value {
        (self.func)(ctx, receiver, args)
    }
}

/// Implementation stored in a method table.
#[derive(Clone)]
pub enum RubyMethod {
    Native(NativeMethod),
    /// User-defined method; the body runs with `self` bound to the receiver.
    User(Heap<Function>),
}

impl RubyMethod {
    pub fn native<F>(name: &'static str, arity: Arity, func: F) -> Self
    where
        F: Fn(&mut CallContext<'_>, &Value, &[Value]) -> Value + 'static,
    {
        RubyMethod::Native(NativeMethod {
            name,
            arity,
            func: Rc::new(func),
        })
    }

    pub fn user(function: Function) -> Self {
        RubyMethod::User(Heap::new(function))
    }

    /// Reuse a closure value as a method, sharing it rather than copying.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Function(function) => Some(RubyMethod::User(function.clone())),
            _ => None,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            RubyMethod::Native(native) => native.arity,
            RubyMethod::User(function) => Arity::Exact(function.arity()),
        }
    }

    /// Identity comparison: both handles refer to the same implementation.
    pub fn ptr_eq(&self, other: &RubyMethod) -> bool {
        match (self, other) {
            (RubyMethod::Native(a), RubyMethod::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (RubyMethod::User(a), RubyMethod::User(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for RubyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubyMethod::Native(native) => write!(f, "Native({}/{:?})", native.name, native.arity),
            RubyMethod::User(function) => write!(f, "User({})", function.inspect()),
        }
    }
}

/// A resolved method together with the class whose table held it.
#[derive(Clone, Debug)]
pub struct MethodLookup {
    pub method: RubyMethod,
    pub owner: ClassRef,
}
