//! Shared fixtures for unit tests: a minimal tree-walking evaluator that
//! drives the object model the way the real evaluator does.

use std::sync::Once;

use garnet_ir::{BlockStatement, Expression, Identifier, Statement};

use crate::completion::Completion;
use crate::core_classes::CoreClasses;
use crate::dispatch::{CallContext, FunctionInvoker};
use crate::environment::Environment;
use crate::errors::ErrorValue;
use crate::function::Function;
use crate::method::RubyMethod;
use crate::value::Value;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set. Safe to call from every test.
pub(crate) fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another test binary may already own the global subscriber
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(filter)
                .try_init();
        }
    });
}

/// Runs function bodies by walking the tree.
pub(crate) struct TreeWalker;

impl FunctionInvoker for TreeWalker {
    fn invoke(
        &mut self,
        core: &CoreClasses,
        function: &Function,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> Value {
        let env = function.env().enclosed();
        for (param, arg) in function.parameters().iter().zip(args) {
            env.set(param.as_str(), arg.clone());
        }
        if let Some(receiver) = receiver {
            env.set("self", receiver.clone());
        }
        let mut ctx = CallContext::new(core, self);
        eval_block(&mut ctx, function.body(), &env).into_value()
    }
}

/// Send `method` to `receiver` with a fresh `TreeWalker`.
pub(crate) fn send(core: &CoreClasses, receiver: &Value, method: &str, args: &[Value]) -> Value {
    let mut walker = TreeWalker;
    CallContext::new(core, &mut walker).send(receiver, method, args)
}

/// Evaluate a block in `env` the way a top-level program runs.
pub(crate) fn run(core: &CoreClasses, block: &BlockStatement, env: &Environment) -> Value {
    let mut walker = TreeWalker;
    let mut ctx = CallContext::new(core, &mut walker);
    eval_block(&mut ctx, block, env).at_call_boundary()
}

/// A user-defined method closing over `env`.
pub(crate) fn user_method(params: &[&str], body: BlockStatement, env: &Environment) -> RubyMethod {
    let params = params.iter().copied().map(Identifier::new).collect();
    match Function::new(params, body.into(), env.clone()) {
        Ok(function) => RubyMethod::user(function),
        Err(e) => panic!("invalid test method: {e}"),
    }
}

fn eval_block(ctx: &mut CallContext<'_>, block: &BlockStatement, env: &Environment) -> Completion {
    let mut last = Value::Nil;
    for statement in &block.statements {
        match eval_statement(ctx, statement, env) {
            Ok(value) => last = value,
            Err(abrupt) => return abrupt,
        }
    }
    Completion::Normal(last)
}

fn eval_statement(
    ctx: &mut CallContext<'_>,
    statement: &Statement,
    env: &Environment,
) -> Result<Value, Completion> {
    match statement {
        Statement::Expression(expr) => eval_expression(ctx, expr, env),
        Statement::Return(expr) => {
            let value = match expr {
                Some(expr) => eval_expression(ctx, expr, env)?,
                None => Value::Nil,
            };
            Err(Completion::Return(value))
        }
    }
}

fn eval_expression(
    ctx: &mut CallContext<'_>,
    expr: &Expression,
    env: &Environment,
) -> Result<Value, Completion> {
    let value = match expr {
        Expression::Integer(n) => Value::int(*n),
        Expression::Str(s) => Value::string(s.as_str()),
        Expression::Symbol(s) => Value::symbol(s),
        Expression::Boolean(b) => Value::boolean(*b),
        Expression::Nil => Value::Nil,
        Expression::SelfExpr => current_self(env),
        Expression::Identifier(ident) => match env.get(ident.as_str()) {
            Some(value) => value,
            None => match ctx.core().get(ident.as_str()) {
                Some(class) => Value::class_object(class.clone()),
                None => ctx.send(&current_self(env), ident.as_str(), &[]),
            },
        },
        Expression::InstanceVariable(name) => match current_self(env).as_object() {
            Some(object) => object.get_ivar(name).unwrap_or(Value::Nil),
            None => Value::Nil,
        },
        Expression::Assignment { target, value } => {
            let value = eval_expression(ctx, value, env)?;
            match &**target {
                Expression::Identifier(ident) => env.assign(ident.as_str(), value.clone()),
                Expression::InstanceVariable(name) => match current_self(env).as_object() {
                    Some(object) => object.set_ivar(name.as_str(), value.clone()),
                    None => return Err(abort("instance variable outside an object")),
                },
                other => return Err(abort(format!("cannot assign to {other}"))),
            }
            value
        }
        Expression::MethodCall {
            receiver,
            method,
            arguments,
        } => {
            let receiver = match receiver {
                Some(receiver) => eval_expression(ctx, receiver, env)?,
                None => current_self(env),
            };
            let args = eval_arguments(ctx, arguments, env)?;
            ctx.send(&receiver, method, &args)
        }
        Expression::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(ctx, function, env)?;
            let args = eval_arguments(ctx, arguments, env)?;
            ctx.call(&callee, &args)
        }
        Expression::FunctionLiteral { parameters, body } => {
            match Function::new(parameters.clone(), body.clone(), env.clone()) {
                Ok(function) => Value::function(function),
                Err(e) => return Err(abort(e.to_string())),
            }
        }
    };
    Completion::from(value).into_result()
}

fn eval_arguments(
    ctx: &mut CallContext<'_>,
    arguments: &[Expression],
    env: &Environment,
) -> Result<Vec<Value>, Completion> {
    arguments
        .iter()
        .map(|argument| eval_expression(ctx, argument, env))
        .collect()
}

fn current_self(env: &Environment) -> Value {
    env.get("self").unwrap_or(Value::Nil)
}

fn abort(message: impl Into<String>) -> Completion {
    Completion::Error(ErrorValue::new(message))
}
