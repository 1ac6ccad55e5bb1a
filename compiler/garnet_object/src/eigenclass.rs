//! Eigenclasses (singleton classes).
//!
//! An eigenclass holds methods defined on one object alone. It lives in an
//! optional slot on the object, is created the first time a singleton method
//! is defined, and from then on answers `class()` for that object. Its
//! superclass is the object's nominal class at creation time, so lookup
//! falls through to ordinary instance methods.
//!
//! Immediate values (nil, booleans, integers, symbols) and classless values
//! have no slot and reject singleton definitions with a domain error.

use std::cell::RefCell;
use std::fmt;

use crate::class::ClassRef;
use crate::core_classes::CoreClasses;
use crate::errors::{singleton_not_allowed, ErrorValue};
use crate::method::RubyMethod;
use crate::traits::RubyObject;
use crate::value::Value;

/// Optional eigenclass owned by exactly one object.
#[derive(Default)]
pub struct SingletonSlot(RefCell<Option<ClassRef>>);

impl SingletonSlot {
    #[inline]
    pub fn get(&self) -> Option<ClassRef> {
        self.0.borrow().clone()
    }

    /// Return the attached eigenclass, creating it with `create` if absent.
    fn get_or_attach(&self, create: impl FnOnce() -> ClassRef) -> ClassRef {
        if let Some(existing) = self.get() {
            return existing;
        }
        let eigenclass = create();
        *self.0.borrow_mut() = Some(eigenclass.clone());
        eigenclass
    }
}

impl fmt::Debug for SingletonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            Some(eigenclass) => write!(f, "SingletonSlot({})", eigenclass.name()),
            None => f.write_str("SingletonSlot(empty)"),
        }
    }
}

/// The eigenclass of `value`, created on first use.
///
/// Idempotent: every call for the same object returns the same class.
pub fn singleton_class(value: &Value, core: &CoreClasses) -> Result<ClassRef, ErrorValue> {
    let Some(slot) = value.singleton_slot() else {
        return Err(singleton_not_allowed(&value.inspect(), value.type_tag()));
    };
    let Some(nominal) = value.class(core) else {
        return Err(singleton_not_allowed(&value.inspect(), value.type_tag()));
    };
    Ok(slot.get_or_attach(|| {
        let owner = value.inspect();
        tracing::debug!(%owner, superclass = %nominal.name(), "create eigenclass");
        ClassRef::new_eigenclass(&owner, nominal)
    }))
}

/// Define `name` on `value` alone.
pub fn define_singleton_method(
    value: &Value,
    name: impl Into<String>,
    method: RubyMethod,
    core: &CoreClasses,
) -> Result<(), ErrorValue> {
    let eigenclass = singleton_class(value, core)?;
    eigenclass.define_method(name, method);
    Ok(())
}

/// Names defined directly on `value`'s eigenclass, sorted. Empty when the
/// object has no eigenclass.
pub fn singleton_method_names(value: &Value) -> Vec<String> {
    value
        .singleton_slot()
        .and_then(SingletonSlot::get)
        .map(|eigenclass| eigenclass.method_names())
        .unwrap_or_default()
}
