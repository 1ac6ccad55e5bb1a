//! The built-in class hierarchy.
//!
//! `CoreClasses` owns the bootstrap classes and is passed explicitly to every
//! class-sensitive operation; there is no global class table.
//!
//! ```text
//! BasicObject
//! └── Object
//!     ├── Module
//!     │   └── Class          (class-of-classes)
//!     ├── Integer, String, Symbol, Array
//!     ├── TrueClass, FalseClass, NilClass
//!     └── Exception
//! ```
//!
//! Every class-object is an instance of `Class`, every module an instance of
//! `Module`, so class methods resolve through `Class → Module → Object →
//! BasicObject` unless an eigenclass intervenes.

mod kernel;

use crate::class::{ClassRef, InstanceLayout};
use crate::tag::TypeTag;

/// Handles to the bootstrap classes.
#[derive(Clone, Debug)]
pub struct CoreClasses {
    basic_object: ClassRef,
    object: ClassRef,
    module: ClassRef,
    class: ClassRef,
    integer: ClassRef,
    string: ClassRef,
    symbol: ClassRef,
    array: ClassRef,
    true_class: ClassRef,
    false_class: ClassRef,
    nil_class: ClassRef,
    exception: ClassRef,
}

impl CoreClasses {
    /// Build the hierarchy and install the native methods.
    pub fn new() -> Self {
        let basic_object = ClassRef::builtin(
            "BasicObject",
            TypeTag::BasicObjectClass,
            None,
            Some(InstanceLayout::BasicObject),
        );
        let object = ClassRef::builtin(
            "Object",
            TypeTag::ObjectClass,
            Some(&basic_object),
            Some(InstanceLayout::Object),
        );
        let module = ClassRef::builtin("Module", TypeTag::ModuleClass, Some(&object), None);
        let class = ClassRef::builtin("Class", TypeTag::ClassClass, Some(&module), None);
        let value_class = |name: &str, tag: TypeTag| ClassRef::builtin(name, tag, Some(&object), None);

        let core = CoreClasses {
            integer: value_class("Integer", TypeTag::IntegerClass),
            string: value_class("String", TypeTag::StringClass),
            // No dedicated class-object tag exists for symbols
            symbol: value_class("Symbol", TypeTag::Class),
            array: value_class("Array", TypeTag::ArrayClass),
            true_class: value_class("TrueClass", TypeTag::BooleanClass),
            false_class: value_class("FalseClass", TypeTag::BooleanClass),
            nil_class: value_class("NilClass", TypeTag::NilClass),
            exception: ClassRef::builtin(
                "Exception",
                TypeTag::ExceptionClass,
                Some(&object),
                Some(InstanceLayout::Exception),
            ),
            basic_object,
            object,
            module,
            class,
        };
        kernel::install(&core);
        tracing::debug!("core classes bootstrapped");
        core
    }

    #[inline]
    pub fn basic_object(&self) -> &ClassRef {
        &self.basic_object
    }

    #[inline]
    pub fn object(&self) -> &ClassRef {
        &self.object
    }

    #[inline]
    pub fn module(&self) -> &ClassRef {
        &self.module
    }

    /// The class-of-classes.
    #[inline]
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    #[inline]
    pub fn integer(&self) -> &ClassRef {
        &self.integer
    }

    #[inline]
    pub fn string(&self) -> &ClassRef {
        &self.string
    }

    #[inline]
    pub fn symbol(&self) -> &ClassRef {
        &self.symbol
    }

    #[inline]
    pub fn array(&self) -> &ClassRef {
        &self.array
    }

    #[inline]
    pub fn true_class(&self) -> &ClassRef {
        &self.true_class
    }

    #[inline]
    pub fn false_class(&self) -> &ClassRef {
        &self.false_class
    }

    #[inline]
    pub fn nil_class(&self) -> &ClassRef {
        &self.nil_class
    }

    #[inline]
    pub fn exception(&self) -> &ClassRef {
        &self.exception
    }

    /// Look up a built-in class by its constant name.
    pub fn get(&self, name: &str) -> Option<&ClassRef> {
        self.all().into_iter().find(|class| class.name() == name)
    }

    fn all(&self) -> [&ClassRef; 12] {
        [
            &self.basic_object,
            &self.object,
            &self.module,
            &self.class,
            &self.integer,
            &self.string,
            &self.symbol,
            &self.array,
            &self.true_class,
            &self.false_class,
            &self.nil_class,
            &self.exception,
        ]
    }
}

impl Default for CoreClasses {
    fn default() -> Self {
        Self::new()
    }
}
