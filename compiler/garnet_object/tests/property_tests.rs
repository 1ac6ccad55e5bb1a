//! Property-based tests for the object model.
//!
//! Checks, over generated values and class chains:
//! 1. Type tags never change, including across eigenclass creation
//! 2. A pending `ReturnValue` reports its payload's class
//! 3. Lookup returns the nearest definer in the subclass chain
//! 4. `singleton_class` returns the same eigenclass on every call
//! 5. Native methods dispatch on integers without an evaluator

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::disallowed_types,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use garnet_object::{
    define_singleton_method, lookup_method, singleton_class, Arity, CallContext, ClassRef,
    CoreClasses, Function, FunctionInvoker, RubyMethod, RubyObject, Value,
};
use proptest::prelude::*;

/// Native-only dispatch: no user-defined bodies are ever run here.
struct NoEvaluator;

impl FunctionInvoker for NoEvaluator {
    fn invoke(&mut self, _: &CoreClasses, _: &Function, _: Option<&Value>, _: &[Value]) -> Value {
        Value::error("no evaluator")
    }
}

/// Shape of a value to build against a fresh `CoreClasses`.
#[derive(Clone, Debug)]
enum Shape {
    Nil,
    Bool(bool),
    Int(i64),
    Symbol(String),
    Str(String),
    Array(Vec<i64>),
    Instance { with_eigenclass: bool },
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Nil),
        any::<bool>().prop_map(Shape::Bool),
        any::<i64>().prop_map(Shape::Int),
        "[a-z_]{1,12}".prop_map(Shape::Symbol),
        ".{0,16}".prop_map(Shape::Str),
        prop::collection::vec(any::<i64>(), 0..6).prop_map(Shape::Array),
        any::<bool>().prop_map(|with_eigenclass| Shape::Instance { with_eigenclass }),
    ]
}

fn build(shape: &Shape, core: &CoreClasses) -> Value {
    match shape {
        Shape::Nil => Value::Nil,
        Shape::Bool(b) => Value::boolean(*b),
        Shape::Int(n) => Value::int(*n),
        Shape::Symbol(s) => Value::symbol(s),
        Shape::Str(s) => Value::string(s.as_str()),
        Shape::Array(items) => Value::array(items.iter().copied().map(Value::int).collect()),
        Shape::Instance { with_eigenclass } => {
            let value = Value::instance_of(core.object()).unwrap();
            if *with_eigenclass {
                singleton_class(&value, core).unwrap();
            }
            value
        }
    }
}

fn marker() -> RubyMethod {
    RubyMethod::native("marker", Arity::Exact(0), |_, _, _| Value::Nil)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn type_tag_is_stable(shape in shape_strategy()) {
        let core = CoreClasses::new();
        let value = build(&shape, &core);
        let before = value.type_tag();
        let _ = define_singleton_method(&value, "extra", marker(), &core);
        prop_assert_eq!(value.type_tag(), before);
        prop_assert_eq!(value.clone().type_tag(), before);
    }

    #[test]
    fn return_value_reports_payload_class(shape in shape_strategy(), depth in 1usize..4) {
        let core = CoreClasses::new();
        let value = build(&shape, &core);
        let mut pending = value.clone();
        for _ in 0..depth {
            pending = Value::return_value(pending);
        }
        prop_assert_eq!(pending.class(&core), value.class(&core));
        prop_assert_eq!(pending.inspect(), value.inspect());
    }

    #[test]
    fn lookup_finds_nearest_definer(defines in prop::collection::vec(any::<bool>(), 1..8)) {
        let core = CoreClasses::new();
        // chain[0] is the root user class, chain[last] the most derived
        let mut chain: Vec<ClassRef> = Vec::new();
        for (i, has_method) in defines.iter().enumerate() {
            let superclass = chain.last().cloned().unwrap_or_else(|| core.object().clone());
            let class = ClassRef::new_class(format!("C{}", i), &superclass).unwrap();
            if *has_method {
                class.define_method("probe", marker());
            }
            chain.push(class);
        }
        let leaf = chain.last().unwrap().clone();
        let instance = Value::instance_of(&leaf).unwrap();
        let expected = chain.iter().rev().zip(defines.iter().rev()).find(|(_, d)| **d).map(|(c, _)| c.clone());

        match lookup_method(&instance, "probe", &core) {
            Ok(found) => prop_assert_eq!(Some(found.owner), expected),
            Err(_) => prop_assert!(expected.is_none()),
        }
    }

    #[test]
    fn singleton_class_is_idempotent(text in ".{0,16}") {
        let core = CoreClasses::new();
        let value = Value::string(text.as_str());
        let first = singleton_class(&value, &core).unwrap();
        let second = singleton_class(&value, &core).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(value.class(&core), Some(first));
    }

    #[test]
    fn native_dispatch_on_immediates(n in any::<i64>()) {
        let core = CoreClasses::new();
        let mut invoker = NoEvaluator;
        let mut ctx = CallContext::new(&core, &mut invoker);
        let inspected = ctx.send(&Value::int(n), "inspect", &[]);
        prop_assert_eq!(inspected, Value::string(n.to_string()));
        let class = ctx.send(&Value::int(n), "class", &[]);
        prop_assert_eq!(class, Value::class_object(core.integer().clone()));
    }
}
