//! Method lookup and invocation.
//!
//! Lookup is linear: start at the receiver's `class()` (its eigenclass if it
//! has one), check that class's own table, then follow superclass links
//! until a match or the root. There is no cache; the cost is bounded by the
//! ancestor chain, which is fixed at class construction and acyclic.
//!
//! User-defined method bodies are run by the evaluator through the
//! [`FunctionInvoker`] it supplies. Everything else (native methods,
//! builtins, arity checks, early-return unwrapping) happens here.

use crate::completion::unwrap_return_value;
use crate::core_classes::CoreClasses;
use crate::errors::{
    not_callable, undefined_method, undefined_method_for_classless, wrong_arg_count, ErrorValue,
};
use crate::function::Function;
use crate::method::{Arity, MethodLookup, RubyMethod};
use crate::traits::RubyObject;
use crate::value::Value;

/// Runs user-defined function bodies.
///
/// Implemented by the evaluator. `invoke` binds `args` to the function's
/// parameters in a fresh scope enclosed by the function's environment, binds
/// `self` to `receiver` when one is given, and evaluates the body. It may
/// return a `ReturnValue`; callers unwrap it at the call boundary.
pub trait FunctionInvoker {
    fn invoke(
        &mut self,
        core: &CoreClasses,
        function: &Function,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> Value;
}

/// Everything a method call needs: the core classes and a way to run
/// user-defined bodies.
pub struct CallContext<'a> {
    core: &'a CoreClasses,
    invoker: &'a mut dyn FunctionInvoker,
}

impl<'a> CallContext<'a> {
    pub fn new(core: &'a CoreClasses, invoker: &'a mut dyn FunctionInvoker) -> Self {
        CallContext { core, invoker }
    }

    #[inline]
    pub fn core(&self) -> &'a CoreClasses {
        self.core
    }

    /// Send `method` to `receiver`.
    ///
    /// An `Error` receiver is returned unchanged, and a `ReturnValue`
    /// receiver dispatches on its payload.
    #[tracing::instrument(level = "debug", skip(self, receiver, args), fields(receiver = %receiver.type_tag()))]
    pub fn send(&mut self, receiver: &Value, method: &str, args: &[Value]) -> Value {
        match receiver {
            Value::Error(_) => return receiver.clone(),
            Value::ReturnValue(inner) => return self.send(inner, method, args),
            _ => {}
        }
        match lookup_method(receiver, method, self.core) {
            Ok(found) => self.invoke_method(receiver, method, &found.method, args),
            Err(e) => Value::Error(e),
        }
    }

    /// Invoke an already-resolved method on `receiver`.
    pub fn invoke_method(
        &mut self,
        receiver: &Value,
        name: &str,
        method: &RubyMethod,
        args: &[Value],
    ) -> Value {
        if let Arity::Exact(expected) = method.arity() {
            if expected != args.len() {
                return Value::Error(wrong_arg_count(name, expected, args.len()));
            }
        }
        match method {
            RubyMethod::Native(native) => native.call(self, receiver, args),
            RubyMethod::User(function) => unwrap_return_value(self.invoker.invoke(
                self.core,
                function,
                Some(receiver),
                args,
            )),
        }
    }

    /// Call a function or builtin value directly, outside method dispatch.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> Value {
        match callee {
            Value::Function(function) => {
                if function.arity() != args.len() {
                    return Value::Error(wrong_arg_count("call", function.arity(), args.len()));
                }
                unwrap_return_value(self.invoker.invoke(self.core, function, None, args))
            }
            Value::Builtin(builtin) => builtin.call(args),
            Value::ReturnValue(inner) => self.call(inner, args),
            Value::Error(_) => callee.clone(),
            other => Value::Error(not_callable(&other.inspect(), other.type_tag())),
        }
    }
}

/// Resolve `name` for `receiver`.
///
/// Fails with a domain error when the receiver is classless or no class in
/// its chain defines `name`.
#[tracing::instrument(level = "trace", skip(receiver, core))]
pub fn lookup_method(
    receiver: &Value,
    name: &str,
    core: &CoreClasses,
) -> Result<MethodLookup, ErrorValue> {
    let Some(class) = receiver.class(core) else {
        return Err(undefined_method_for_classless(name, receiver.type_tag()));
    };
    if let Some(found) = class.find_method(name) {
        tracing::trace!(owner = %found.owner.name(), "method found");
        return Ok(found);
    }
    let class_name = receiver
        .nominal_class(core)
        .map_or_else(|| class.name().to_string(), |nominal| nominal.name().to_string());
    Err(undefined_method(name, &receiver.inspect(), &class_name))
}

/// Whether `receiver` can answer `name`.
pub fn respond_to(receiver: &Value, name: &str, core: &CoreClasses) -> bool {
    lookup_method(receiver, name, core).is_ok()
}
