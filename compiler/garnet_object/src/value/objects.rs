//! Heap object layouts.
//!
//! Every heap object that can acquire singleton behavior carries a
//! `SingletonSlot`. Immediates (nil, booleans, integers, symbols) do not.

use std::cell::{Ref, RefCell};

use rustc_hash::FxHashMap;

use crate::class::ClassRef;
use crate::eigenclass::SingletonSlot;
use crate::tag::TypeTag;

use super::Value;

/// Instance of a user-defined class, `Object` or `BasicObject`.
#[derive(Debug)]
pub struct RObject {
    /// `Object` or `BasicObject`, fixed at allocation.
    tag: TypeTag,
    class: ClassRef,
    ivars: RefCell<FxHashMap<String, Value>>,
    singleton: SingletonSlot,
}

impl RObject {
    pub(super) fn new(class: ClassRef, tag: TypeTag) -> Self {
        RObject {
            tag,
            class,
            ivars: RefCell::new(FxHashMap::default()),
            singleton: SingletonSlot::default(),
        }
    }

    #[inline]
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// The class this object was allocated from.
    #[inline]
    pub fn nominal_class(&self) -> &ClassRef {
        &self.class
    }

    pub fn get_ivar(&self, name: &str) -> Option<Value> {
        self.ivars.borrow().get(name).cloned()
    }

    pub fn set_ivar(&self, name: impl Into<String>, value: Value) {
        self.ivars.borrow_mut().insert(name.into(), value);
    }

    /// Instance variable names, sorted.
    pub fn ivar_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ivars.borrow().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    #[inline]
    pub(crate) fn singleton(&self) -> &SingletonSlot {
        &self.singleton
    }
}

/// Immutable string contents with singleton support.
#[derive(Debug)]
pub struct RString {
    value: String,
    singleton: SingletonSlot,
}

impl RString {
    pub(super) fn new(value: String) -> Self {
        RString {
            value,
            singleton: SingletonSlot::default(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[inline]
    pub(crate) fn singleton(&self) -> &SingletonSlot {
        &self.singleton
    }
}

/// Growable array.
#[derive(Debug)]
pub struct RArray {
    elements: RefCell<Vec<Value>>,
    singleton: SingletonSlot,
}

impl RArray {
    pub(super) fn new(elements: Vec<Value>) -> Self {
        RArray {
            elements: RefCell::new(elements),
            singleton: SingletonSlot::default(),
        }
    }

    pub fn elements(&self) -> Ref<'_, Vec<Value>> {
        self.elements.borrow()
    }

    pub fn push(&self, value: Value) {
        self.elements.borrow_mut().push(value);
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    #[inline]
    pub(crate) fn singleton(&self) -> &SingletonSlot {
        &self.singleton
    }
}

/// Instance of `Exception` or one of its subclasses.
#[derive(Debug)]
pub struct RException {
    class: ClassRef,
    message: String,
    singleton: SingletonSlot,
}

impl RException {
    pub(super) fn new(class: ClassRef, message: String) -> Self {
        RException {
            class,
            message,
            singleton: SingletonSlot::default(),
        }
    }

    #[inline]
    pub fn nominal_class(&self) -> &ClassRef {
        &self.class
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub(crate) fn singleton(&self) -> &SingletonSlot {
        &self.singleton
    }
}
