//! Runtime values.
//!
//! `Value` is the closed set of everything the evaluator can hold: ordinary
//! objects, class-objects, closures, native functions, and the two control
//! sentinels (`ReturnValue`, `Error`).
//!
//! # Construction
//!
//! Heap storage goes through [`Heap`], whose constructor is crate-private,
//! so values are built with the factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("woof");          // OK
//! let d = Value::instance_of(&dog)?;      // OK
//! let s = Value::String(Heap::new(...));  // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Identity and equality
//!
//! Cloning a `Value` never copies an object: clones share the allocation,
//! and with it the object's instance variables and eigenclass. `==` compares
//! immediates, strings and arrays by content and everything else by
//! identity.

mod heap;
mod objects;

use std::fmt;

use crate::builtin::Builtin;
use crate::class::{ClassRef, InstanceLayout};
use crate::core_classes::CoreClasses;
use crate::eigenclass::SingletonSlot;
use crate::errors::{uninstantiable_class, ErrorValue};
use crate::function::Function;
use crate::tag::TypeTag;
use crate::traits::RubyObject;

pub use heap::Heap;
pub use objects::{RArray, RException, RObject, RString};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Immediates
    Nil,
    Boolean(bool),
    Integer(i64),
    Symbol(Heap<str>),

    // Heap objects (identity, singleton slot)
    String(Heap<RString>),
    Array(Heap<RArray>),
    Object(Heap<RObject>),
    Exception(Heap<RException>),
    /// Class-object: a class, module or eigenclass used as a value.
    Class(ClassRef),

    // Callables (classless)
    Function(Heap<Function>),
    Builtin(Builtin),

    // Control sentinels
    /// Early return in flight. Transparent to class-sensitive logic.
    ReturnValue(Heap<Value>),
    /// Recoverable failure in flight. Classless.
    Error(ErrorValue),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(RString::new(s.into())))
    }

    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Heap::from(name))
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Heap::new(RArray::new(elements)))
    }

    pub fn class_object(class: ClassRef) -> Self {
        Value::Class(class)
    }

    pub fn function(function: Function) -> Self {
        Value::Function(Heap::new(function))
    }

    pub fn builtin(builtin: Builtin) -> Self {
        Value::Builtin(builtin)
    }

    pub fn exception(class: &ClassRef, message: impl Into<String>) -> Self {
        Value::Exception(Heap::new(RException::new(class.clone(), message.into())))
    }

    /// Wrap `value` as an early-return sentinel.
    pub fn return_value(value: Value) -> Self {
        Value::ReturnValue(Heap::new(value))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(ErrorValue::new(message))
    }

    /// Allocate a fresh, uninitialized instance of `class`.
    ///
    /// Classes without an instance layout (`Integer`, `Symbol`, modules,
    /// eigenclasses, ...) cannot be allocated.
    pub fn instance_of(class: &ClassRef) -> Result<Value, ErrorValue> {
        match class.instance_layout() {
            Some(InstanceLayout::Object) => Ok(Value::Object(Heap::new(RObject::new(
                class.clone(),
                TypeTag::Object,
            )))),
            Some(InstanceLayout::BasicObject) => Ok(Value::Object(Heap::new(RObject::new(
                class.clone(),
                TypeTag::BasicObject,
            )))),
            Some(InstanceLayout::Exception) => Ok(Value::exception(class, class.name())),
            None => Err(uninstantiable_class(class.name())),
        }
    }
}

impl From<ErrorValue> for Value {
    fn from(error: ErrorValue) -> Self {
        Value::Error(error)
    }
}

// Accessors and Predicates

impl Value {
    /// Everything except `nil` and `false` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    #[inline]
    pub fn is_return_value(&self) -> bool {
        matches!(self, Value::ReturnValue(_))
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&RObject> {
        match self {
            Value::Object(o) => Some(&**o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(&**f),
            _ => None,
        }
    }

    /// The slot an eigenclass attaches to. `None` for values that cannot
    /// carry singleton methods.
    pub(crate) fn singleton_slot(&self) -> Option<&SingletonSlot> {
        match self {
            Value::String(s) => Some(s.singleton()),
            Value::Array(a) => Some(a.singleton()),
            Value::Object(o) => Some(o.singleton()),
            Value::Exception(e) => Some(e.singleton()),
            Value::Class(c) => Some(c.singleton()),
            Value::Nil
            | Value::Boolean(_)
            | Value::Integer(_)
            | Value::Symbol(_)
            | Value::Function(_)
            | Value::Builtin(_)
            | Value::ReturnValue(_)
            | Value::Error(_) => None,
        }
    }

    /// The eigenclass of this object, if one has been created.
    pub fn eigenclass(&self) -> Option<ClassRef> {
        self.singleton_slot().and_then(SingletonSlot::get)
    }

    /// The class this value was created as, ignoring any eigenclass.
    pub fn nominal_class(&self, core: &CoreClasses) -> Option<ClassRef> {
        let class = match self {
            Value::Nil => core.nil_class(),
            Value::Boolean(true) => core.true_class(),
            Value::Boolean(false) => core.false_class(),
            Value::Integer(_) => core.integer(),
            Value::Symbol(_) => core.symbol(),
            Value::String(_) => core.string(),
            Value::Array(_) => core.array(),
            Value::Object(o) => o.nominal_class(),
            Value::Exception(e) => e.nominal_class(),
            Value::Class(c) => return Some(c.nominal_class(core)),
            Value::ReturnValue(inner) => return inner.nominal_class(core),
            Value::Function(_) | Value::Builtin(_) | Value::Error(_) => return None,
        };
        Some(class.clone())
    }

    /// Object identity. Immediates are identical when equal.
    pub fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => **a == **b,
            (Value::String(a), Value::String(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Exception(a), Value::Exception(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a.ptr_eq(b),
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    fn inspect_with(&self, seen: &mut Vec<*const ()>) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Symbol(s) => format!(":{}", &**s),
            Value::String(s) => format!("{:?}", s.as_str()),
            Value::Array(array) => {
                let addr = array.addr();
                if seen.contains(&addr) {
                    return "[...]".to_string();
                }
                seen.push(addr);
                let parts: Vec<String> = array
                    .elements()
                    .iter()
                    .map(|element| element.inspect_with(seen))
                    .collect();
                seen.pop();
                format!("[{}]", parts.join(", "))
            }
            Value::Object(o) => format!("#<{}>", o.nominal_class().name()),
            Value::Exception(e) => format!("#<{}: {}>", e.nominal_class().name(), e.message()),
            Value::Class(c) => c.inspect(),
            Value::Function(f) => f.inspect(),
            Value::Builtin(b) => b.inspect(),
            Value::ReturnValue(inner) => inner.inspect_with(seen),
            Value::Error(e) => e.inspect(),
        }
    }
}

impl RubyObject for Value {
    fn type_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Integer(_) => TypeTag::Integer,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(o) => o.tag(),
            Value::Exception(_) => TypeTag::Exception,
            Value::Class(c) => c.type_tag(),
            Value::Function(_) => TypeTag::Function,
            Value::Builtin(_) => TypeTag::Builtin,
            Value::ReturnValue(_) => TypeTag::ReturnValue,
            Value::Error(_) => TypeTag::Error,
        }
    }

    fn inspect(&self) -> String {
        self.inspect_with(&mut Vec::new())
    }

    fn class(&self, core: &CoreClasses) -> Option<ClassRef> {
        match self {
            // Delegated so a pending return stays transparent to class checks
            Value::ReturnValue(inner) => inner.class(core),
            other => other.eigenclass().or_else(|| other.nominal_class(core)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut Vec::new())
    }
}

impl Value {
    /// Structural equality. A pair of arrays already under comparison is
    /// treated as equal, so self-containing arrays terminate.
    fn eq_with(&self, other: &Value, comparing: &mut Vec<(*const (), *const ())>) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let pair = (a.addr(), b.addr());
                if comparing.contains(&pair) {
                    return true;
                }
                let (left, right) = (a.elements(), b.elements());
                if left.len() != right.len() {
                    return false;
                }
                comparing.push(pair);
                let equal = left
                    .iter()
                    .zip(right.iter())
                    .all(|(x, y)| x.eq_with(y, comparing));
                comparing.pop();
                equal
            }
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a.eq_with(b, comparing),
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => self.same_object(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_tag(), self.inspect())
    }
}
