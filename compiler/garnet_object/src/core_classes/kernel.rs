//! Native methods installed on the core classes.

use crate::class::InstanceLayout;
use crate::dispatch::{respond_to, CallContext};
use crate::eigenclass::{singleton_class, singleton_method_names};
use crate::errors::{not_a_class, wrong_arg_count, wrong_arg_type};
use crate::method::{Arity, RubyMethod};
use crate::traits::{RubyClass, RubyObject};
use crate::value::Value;

use super::CoreClasses;

pub(super) fn install(core: &CoreClasses) {
    let basic_object = core.basic_object();
    basic_object.define_method(
        "initialize",
        RubyMethod::native("initialize", Arity::Exact(0), |_, _, _| Value::Nil),
    );
    basic_object.define_method(
        "==",
        RubyMethod::native("==", Arity::Exact(1), |_, receiver, args| {
            Value::boolean(receiver == &args[0])
        }),
    );
    basic_object.define_method(
        "equal?",
        RubyMethod::native("equal?", Arity::Exact(1), |_, receiver, args| {
            Value::boolean(receiver.same_object(&args[0]))
        }),
    );

    let object = core.object();
    object.define_method("class", RubyMethod::native("class", Arity::Exact(0), object_class));
    object.define_method(
        "inspect",
        RubyMethod::native("inspect", Arity::Exact(0), |_, receiver, _| {
            Value::string(receiver.inspect())
        }),
    );
    object.define_method(
        "respond_to?",
        RubyMethod::native("respond_to?", Arity::Exact(1), object_respond_to),
    );
    object.define_method(
        "singleton_class",
        RubyMethod::native("singleton_class", Arity::Exact(0), |ctx, receiver, _| {
            match singleton_class(receiver, ctx.core()) {
                Ok(eigenclass) => Value::class_object(eigenclass),
                Err(e) => Value::Error(e),
            }
        }),
    );
    object.define_method(
        "singleton_methods",
        RubyMethod::native("singleton_methods", Arity::Exact(0), |_, receiver, _| {
            symbol_array(singleton_method_names(receiver))
        }),
    );

    let module = core.module();
    module.define_method("name", RubyMethod::native("name", Arity::Exact(0), module_name));
    module.define_method(
        "instance_methods",
        RubyMethod::native("instance_methods", Arity::Exact(0), |_, receiver, _| {
            match receiver.as_class() {
                Some(class) => symbol_array(class.method_names()),
                None => Value::Error(not_a_class(&receiver.inspect())),
            }
        }),
    );

    let class = core.class();
    class.define_method("new", RubyMethod::native("new", Arity::Any, class_new));
    class.define_method(
        "superclass",
        RubyMethod::native("superclass", Arity::Exact(0), class_superclass),
    );

    core.exception().define_method(
        "message",
        RubyMethod::native("message", Arity::Exact(0), |_, receiver, _| match receiver {
            Value::Exception(e) => Value::string(e.message()),
            other => Value::Error(wrong_arg_type("message", "Exception", other.type_tag())),
        }),
    );
}

/// `Class#new`: allocate, then run `initialize` with the arguments.
fn class_new(ctx: &mut CallContext<'_>, receiver: &Value, args: &[Value]) -> Value {
    let Some(class) = receiver.as_class() else {
        return Value::Error(not_a_class(&receiver.inspect()));
    };
    if class.instance_layout() == Some(InstanceLayout::Exception) {
        return match args {
            [] => Value::exception(class, class.name()),
            [message] => match message.as_str() {
                Some(text) => Value::exception(class, text),
                None => Value::Error(wrong_arg_type("new", "String", message.type_tag())),
            },
            _ => Value::Error(wrong_arg_count("new", 1, args.len())),
        };
    }
    let instance = match Value::instance_of(class) {
        Ok(instance) => instance,
        Err(e) => return Value::Error(e),
    };
    let initialized = ctx.send(&instance, "initialize", args);
    if initialized.is_error() {
        return initialized;
    }
    instance
}

fn class_superclass(_: &mut CallContext<'_>, receiver: &Value, _: &[Value]) -> Value {
    match receiver.as_class() {
        Some(class) => class.superclass().map_or(Value::Nil, Value::class_object),
        None => Value::Error(not_a_class(&receiver.inspect())),
    }
}

/// `Module#name`: `nil` for eigenclasses, which are anonymous.
fn module_name(_: &mut CallContext<'_>, receiver: &Value, _: &[Value]) -> Value {
    match receiver.as_class() {
        Some(class) if class.is_eigenclass() => Value::Nil,
        Some(class) => Value::string(class.name()),
        None => Value::Error(not_a_class(&receiver.inspect())),
    }
}

/// `Object#class` reports the nominal class, never the eigenclass.
fn object_class(ctx: &mut CallContext<'_>, receiver: &Value, _: &[Value]) -> Value {
    receiver
        .nominal_class(ctx.core())
        .map_or(Value::Nil, Value::class_object)
}

fn object_respond_to(ctx: &mut CallContext<'_>, receiver: &Value, args: &[Value]) -> Value {
    let name = match &args[0] {
        Value::Symbol(name) => &**name,
        Value::String(name) => name.as_str(),
        other => return Value::Error(wrong_arg_type("respond_to?", "Symbol", other.type_tag())),
    };
    Value::boolean(respond_to(receiver, name, ctx.core()))
}

fn symbol_array(names: Vec<String>) -> Value {
    Value::array(names.iter().map(|name| Value::symbol(name)).collect())
}
