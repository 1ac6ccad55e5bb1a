//! The two capability facets of the object model.
//!
//! `RubyObject` is the instance facet every runtime value has; `RubyClass`
//! is the class facet every class value has. A class-object implements both
//! and is usable wherever either facet is expected, which is how classes are
//! first-class values without multiple inheritance.

use std::cell::Ref;

use crate::class::ClassRef;
use crate::core_classes::CoreClasses;
use crate::method::MethodTable;
use crate::tag::TypeTag;

/// Instance facet: tag, display form and class.
pub trait RubyObject {
    /// Runtime category. Stable for the value's lifetime.
    fn type_tag(&self) -> TypeTag;

    /// Human-readable form for the REPL and debugging. Pure; never used for
    /// equality or hashing.
    fn inspect(&self) -> String;

    /// The class used for dispatch: the eigenclass when one exists, the
    /// nominal class otherwise.
    ///
    /// `None` is a checked answer, not a failure: functions, builtins and
    /// errors have no class.
    fn class(&self, core: &CoreClasses) -> Option<ClassRef>;
}

/// Class facet: method table and superclass link.
pub trait RubyClass {
    fn methods(&self) -> Ref<'_, MethodTable>;

    /// `None` only at the root of the hierarchy.
    fn superclass(&self) -> Option<ClassRef>;
}

/// A value that is both an instance and a class.
pub trait RubyClassObject: RubyObject + RubyClass {}

impl<T: RubyObject + RubyClass + ?Sized> RubyClassObject for T {}
