//! Garnet Object - Runtime object model for the Garnet interpreter.
//!
//! This crate defines what a value *is* at runtime: its type tag, its
//! display form, its class, and how a method name resolves against it.
//! Evaluation lives elsewhere; the evaluator plugs in through
//! [`FunctionInvoker`] to run user-defined bodies.
//!
//! # Architecture
//!
//! - `Value`: the closed set of runtime values, including the
//!   `ReturnValue` and `Error` sentinels
//! - `RubyObject` / `RubyClass`: the instance and class facets; a
//!   class-object (`ClassRef`) implements both
//! - `CoreClasses`: the bootstrap hierarchy, passed explicitly
//! - `singleton_class`: per-object eigenclasses, created on demand
//! - `lookup_method` / `CallContext::send`: linear method resolution
//!   through eigenclass, nominal class and superclasses
//! - `Function` / `Environment`: closures sharing their defining scope
//! - `Completion`: normal vs. abrupt statement results
//!
//! # Errors
//!
//! Language-level failures are values (`Value::Error`) and propagate like
//! any other result. Invalid constructor input is rejected up front with
//! [`ConstructionError`].

pub mod builtin;
pub mod class;
pub mod completion;
pub mod core_classes;
pub mod dispatch;
pub mod eigenclass;
pub mod environment;
pub mod errors;
pub mod function;
pub mod method;
pub mod tag;
pub mod traits;
pub mod value;

#[cfg(test)]
mod test_helpers;

pub use builtin::{Builtin, BuiltinFn};
pub use class::{ClassKind, ClassRef, InstanceLayout};
pub use completion::{unwrap_return_value, Completion};
pub use core_classes::CoreClasses;
pub use dispatch::{lookup_method, respond_to, CallContext, FunctionInvoker};
pub use eigenclass::{define_singleton_method, singleton_class, singleton_method_names};
pub use environment::Environment;
pub use errors::{ConstructionError, ErrorValue};
pub use function::Function;
pub use method::{Arity, MethodLookup, MethodTable, NativeMethod, RubyMethod};
pub use tag::TypeTag;
pub use traits::{RubyClass, RubyClassObject, RubyObject};
pub use value::{Heap, Value};
