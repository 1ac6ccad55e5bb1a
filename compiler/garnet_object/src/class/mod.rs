//! Class-objects: values that are simultaneously instances and classes.
//!
//! A `ClassRef` is a shared handle to one `RClass`. Identity is pointer
//! identity; two handles are equal only if they refer to the same class.
//!
//! # Two chains
//!
//! - The **subclass chain** (`superclass`) is fixed at construction, which
//!   keeps it acyclic and finite. Instance methods resolve along it.
//! - The **class-of chain** (`RubyObject::class`) answers what a class is an
//!   instance of: its eigenclass if it has one, otherwise `Class` (or
//!   `Module` for modules). Class methods resolve along it.

// ClassRef is the owning wrapper around Rc<RClass>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of ClassRef"
)]

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::core_classes::CoreClasses;
use crate::eigenclass::SingletonSlot;
use crate::errors::ConstructionError;
use crate::method::{MethodLookup, MethodTable, RubyMethod};
use crate::tag::TypeTag;
use crate::traits::{RubyClass, RubyObject};

/// What sort of class-object this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Module,
    /// Per-object singleton class. Never named, never instantiated.
    Eigenclass,
}

impl ClassKind {
    pub fn describe(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Module => "module",
            ClassKind::Eigenclass => "eigenclass",
        }
    }
}

/// What `Class#new` allocates for instances of a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceLayout {
    BasicObject,
    Object,
    Exception,
}

/// Class data behind a `ClassRef`.
pub struct RClass {
    name: String,
    kind: ClassKind,
    /// Tag this class-object reports as a value.
    tag: TypeTag,
    /// Resolved at construction: user classes inherit their superclass's.
    layout: Option<InstanceLayout>,
    superclass: Option<ClassRef>,
    methods: RefCell<MethodTable>,
    singleton: SingletonSlot,
}

/// Shared handle to a class-object.
#[derive(Clone)]
pub struct ClassRef(Rc<RClass>);

impl ClassRef {
    fn from_parts(
        name: String,
        kind: ClassKind,
        tag: TypeTag,
        layout: Option<InstanceLayout>,
        superclass: Option<ClassRef>,
    ) -> Self {
        ClassRef(Rc::new(RClass {
            name,
            kind,
            tag,
            layout,
            superclass,
            methods: RefCell::new(MethodTable::default()),
            singleton: SingletonSlot::default(),
        }))
    }

    /// Bootstrap constructor for the built-in hierarchy.
    pub(crate) fn builtin(
        name: &str,
        tag: TypeTag,
        superclass: Option<&ClassRef>,
        layout: Option<InstanceLayout>,
    ) -> Self {
        Self::from_parts(
            name.to_string(),
            ClassKind::Class,
            tag,
            layout,
            superclass.cloned(),
        )
    }

    /// Define a named class. Only a real class can be a superclass.
    pub fn new_class(
        name: impl Into<String>,
        superclass: &ClassRef,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyClassName);
        }
        if superclass.kind() != ClassKind::Class {
            return Err(ConstructionError::InvalidSuperclass {
                name: superclass.name().to_string(),
                kind: superclass.kind().describe(),
            });
        }
        Ok(Self::from_parts(
            name,
            ClassKind::Class,
            TypeTag::Class,
            superclass.instance_layout(),
            Some(superclass.clone()),
        ))
    }

    /// Define a module: a method container outside the subclass chain.
    pub fn new_module(name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyClassName);
        }
        Ok(Self::from_parts(
            name,
            ClassKind::Module,
            TypeTag::Module,
            None,
            None,
        ))
    }

    pub(crate) fn new_eigenclass(owner: &str, superclass: ClassRef) -> Self {
        Self::from_parts(
            format!("#<Class:{owner}>"),
            ClassKind::Eigenclass,
            TypeTag::Eigenclass,
            None,
            Some(superclass),
        )
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn kind(&self) -> ClassKind {
        self.0.kind
    }

    #[inline]
    pub fn is_eigenclass(&self) -> bool {
        self.0.kind == ClassKind::Eigenclass
    }

    #[inline]
    pub fn instance_layout(&self) -> Option<InstanceLayout> {
        self.0.layout
    }

    #[inline]
    pub(crate) fn singleton(&self) -> &SingletonSlot {
        &self.0.singleton
    }

    /// The eigenclass attached to this class-object, if one was created.
    pub fn eigenclass(&self) -> Option<ClassRef> {
        self.0.singleton.get()
    }

    /// Insert or replace a method in this class's own table.
    pub fn define_method(&self, name: impl Into<String>, method: RubyMethod) {
        let name = name.into();
        tracing::trace!(class = %self.name(), method = %name, "define method");
        self.0.methods.borrow_mut().insert(name, method);
    }

    /// A method from this class's own table, ignoring ancestors.
    pub fn own_method(&self, name: &str) -> Option<RubyMethod> {
        self.0.methods.borrow().get(name).cloned()
    }

    /// Own method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.methods.borrow().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Walk this class and its superclasses; first match wins.
    pub fn find_method(&self, name: &str) -> Option<MethodLookup> {
        self.ancestors().find_map(|class| {
            class.own_method(name).map(|method| MethodLookup {
                method,
                owner: class,
            })
        })
    }

    /// This class followed by every superclass up to the root.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }

    /// Whether `other` appears in this class's subclass chain (inclusive).
    pub fn is_subclass_of(&self, other: &ClassRef) -> bool {
        self.ancestors().any(|class| class == *other)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ClassRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ClassRef {}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef").field(&self.0.name).finish()
    }
}

impl RubyClass for ClassRef {
    fn methods(&self) -> Ref<'_, MethodTable> {
        self.0.methods.borrow()
    }

    fn superclass(&self) -> Option<ClassRef> {
        self.0.superclass.clone()
    }
}

impl RubyObject for ClassRef {
    fn type_tag(&self) -> TypeTag {
        self.0.tag
    }

    fn inspect(&self) -> String {
        self.0.name.clone()
    }

    fn class(&self, core: &CoreClasses) -> Option<ClassRef> {
        if let Some(eigenclass) = self.0.singleton.get() {
            return Some(eigenclass);
        }
        Some(self.nominal_class(core))
    }
}

impl ClassRef {
    /// What this class-object is an instance of, ignoring any eigenclass.
    pub fn nominal_class(&self, core: &CoreClasses) -> ClassRef {
        match self.0.kind {
            ClassKind::Module => core.module().clone(),
            ClassKind::Class | ClassKind::Eigenclass => core.class().clone(),
        }
    }
}

/// Iterator over a subclass chain, see [`ClassRef::ancestors`].
pub struct Ancestors {
    next: Option<ClassRef>,
}

impl Iterator for Ancestors {
    type Item = ClassRef;

    fn next(&mut self) -> Option<ClassRef> {
        let current = self.next.take()?;
        self.next = current.superclass();
        Some(current)
    }
}
