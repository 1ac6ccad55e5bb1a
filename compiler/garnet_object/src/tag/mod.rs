//! Type tags: the closed set of runtime categories.
//!
//! Every category that denotes a class comes in two flavours: the tag an
//! instance reports (`Integer`) and the tag the category's class-object
//! reports (`IntegerClass`). Tags are stable for a value's lifetime and are
//! meant for cheap category checks, not for dispatch.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Eigenclass,
    Function,
    ReturnValue,
    BasicObject,
    BasicObjectClass,
    Object,
    ObjectClass,
    Class,
    ClassClass,
    Array,
    ArrayClass,
    Integer,
    IntegerClass,
    String,
    StringClass,
    Symbol,
    Boolean,
    BooleanClass,
    Nil,
    NilClass,
    Error,
    Exception,
    ExceptionClass,
    Module,
    ModuleClass,
    Builtin,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 26] = [
        TypeTag::Eigenclass,
        TypeTag::Function,
        TypeTag::ReturnValue,
        TypeTag::BasicObject,
        TypeTag::BasicObjectClass,
        TypeTag::Object,
        TypeTag::ObjectClass,
        TypeTag::Class,
        TypeTag::ClassClass,
        TypeTag::Array,
        TypeTag::ArrayClass,
        TypeTag::Integer,
        TypeTag::IntegerClass,
        TypeTag::String,
        TypeTag::StringClass,
        TypeTag::Symbol,
        TypeTag::Boolean,
        TypeTag::BooleanClass,
        TypeTag::Nil,
        TypeTag::NilClass,
        TypeTag::Error,
        TypeTag::Exception,
        TypeTag::ExceptionClass,
        TypeTag::Module,
        TypeTag::ModuleClass,
        TypeTag::Builtin,
    ];

    /// Upper-snake-case name, as shown in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeTag::Eigenclass => "EIGENCLASS",
            TypeTag::Function => "FUNCTION",
            TypeTag::ReturnValue => "RETURN_VALUE",
            TypeTag::BasicObject => "BASIC_OBJECT",
            TypeTag::BasicObjectClass => "BASIC_OBJECT_CLASS",
            TypeTag::Object => "OBJECT",
            TypeTag::ObjectClass => "OBJECT_CLASS",
            TypeTag::Class => "CLASS",
            TypeTag::ClassClass => "CLASS_CLASS",
            TypeTag::Array => "ARRAY",
            TypeTag::ArrayClass => "ARRAY_CLASS",
            TypeTag::Integer => "INTEGER",
            TypeTag::IntegerClass => "INTEGER_CLASS",
            TypeTag::String => "STRING",
            TypeTag::StringClass => "STRING_CLASS",
            TypeTag::Symbol => "SYMBOL",
            TypeTag::Boolean => "BOOLEAN",
            TypeTag::BooleanClass => "BOOLEAN_CLASS",
            TypeTag::Nil => "NIL",
            TypeTag::NilClass => "NIL_CLASS",
            TypeTag::Error => "ERROR",
            TypeTag::Exception => "EXCEPTION",
            TypeTag::ExceptionClass => "EXCEPTION_CLASS",
            TypeTag::Module => "MODULE",
            TypeTag::ModuleClass => "MODULE_CLASS",
            TypeTag::Builtin => "BUILTIN",
        }
    }

    /// The class-object counterpart of an instance tag, if the category
    /// denotes a class.
    pub const fn class_tag(self) -> Option<TypeTag> {
        match self {
            TypeTag::BasicObject => Some(TypeTag::BasicObjectClass),
            TypeTag::Object => Some(TypeTag::ObjectClass),
            TypeTag::Class => Some(TypeTag::ClassClass),
            TypeTag::Array => Some(TypeTag::ArrayClass),
            TypeTag::Integer => Some(TypeTag::IntegerClass),
            TypeTag::String => Some(TypeTag::StringClass),
            TypeTag::Boolean => Some(TypeTag::BooleanClass),
            TypeTag::Nil => Some(TypeTag::NilClass),
            TypeTag::Exception => Some(TypeTag::ExceptionClass),
            TypeTag::Module => Some(TypeTag::ModuleClass),
            _ => None,
        }
    }

    /// Whether a value carrying this tag is itself a class-object.
    pub const fn is_class_object(self) -> bool {
        matches!(
            self,
            TypeTag::Eigenclass
                | TypeTag::Class
                | TypeTag::Module
                | TypeTag::BasicObjectClass
                | TypeTag::ObjectClass
                | TypeTag::ClassClass
                | TypeTag::ArrayClass
                | TypeTag::IntegerClass
                | TypeTag::StringClass
                | TypeTag::BooleanClass
                | TypeTag::NilClass
                | TypeTag::ExceptionClass
                | TypeTag::ModuleClass
        )
    }

    /// Tags whose values never belong to a class (see `RubyObject::class`).
    pub const fn is_classless(self) -> bool {
        matches!(self, TypeTag::Function | TypeTag::Builtin | TypeTag::Error)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
