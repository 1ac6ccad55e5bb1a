//! Lexical environment shared by reference between scopes and closures.
//!
//! An `Environment` is a handle to one scope. Scopes link to their parent,
//! so name resolution walks outward. Cloning the handle shares the scope:
//! a closure that captured it sees later assignments made through any other
//! handle, and vice versa.

// Rc is the intentional implementation detail of LocalScope<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::value::Value;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// All scope allocations go through `LocalScope::new()`. The wrapper is not
/// thread-safe; the object model runs on a single evaluator thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings of one scope plus the link to its parent.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

impl Scope {
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Rebind `name` in the nearest scope that already binds it.
    /// Returns the value back if no scope does.
    fn rebind(&mut self, name: &str, value: Value) -> Option<Value> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return None;
        }
        match &self.parent {
            Some(parent) => parent.0.borrow_mut().rebind(name, value),
            None => Some(value),
        }
    }
}

/// Handle to a lexical scope.
#[derive(Clone, Default)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A fresh top-level scope.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope::default()))
    }

    /// A child scope whose lookups fall back to `self`.
    #[must_use]
    pub fn enclosed(&self) -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Resolve `name`, innermost scope first.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().lookup(name)
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Update the nearest existing binding of `name`; bind it in this scope
    /// if no enclosing scope has it.
    pub fn assign(&self, name: &str, value: Value) {
        let unbound = self.0.borrow_mut().rebind(name, value);
        if let Some(value) = unbound {
            self.set(name, value);
        }
    }

    /// Whether `name` is bound in this scope itself (not a parent).
    pub fn is_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Parent scope, if any.
    pub fn outer(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
