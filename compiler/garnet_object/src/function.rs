//! User-defined closures.
//!
//! A `Function` owns its parameter list, shares its body with the syntax
//! tree, and shares (does not copy) the environment it was defined in. A
//! later mutation of that environment is visible the next time the closure
//! runs.
//!
//! Functions have no class: the evaluator calls them through its own call
//! path, never through method dispatch.

// Function bodies are shared read-only with the syntax tree
#![expect(
    clippy::disallowed_types,
    reason = "Rc shares the BlockStatement owned by the syntax tree"
)]

use std::fmt;
use std::rc::Rc;

use garnet_ir::{BlockStatement, Identifier};
use rustc_hash::FxHashSet;

use crate::environment::Environment;
use crate::errors::ConstructionError;

pub struct Function {
    parameters: Vec<Identifier>,
    body: Rc<BlockStatement>,
    env: Environment,
}

impl Function {
    /// Build a closure over `env`.
    ///
    /// Parameter names must be unique. The body is always present: a
    /// closure without a body cannot be expressed.
    pub fn new(
        parameters: Vec<Identifier>,
        body: Rc<BlockStatement>,
        env: Environment,
    ) -> Result<Self, ConstructionError> {
        let mut seen = FxHashSet::default();
        for param in &parameters {
            if !seen.insert(param.as_str()) {
                return Err(ConstructionError::DuplicateParameter {
                    name: param.value.clone(),
                });
            }
        }
        Ok(Function {
            parameters,
            body,
            env,
        })
    }

    #[inline]
    pub fn parameters(&self) -> &[Identifier] {
        &self.parameters
    }

    #[inline]
    pub fn body(&self) -> &BlockStatement {
        &self.body
    }

    /// The defining environment. Shared with the defining scope.
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// `fn(a, b) {\n<body>\n}`
    pub fn inspect(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(Identifier::as_str).collect();
        format!("fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garnet_ir::{Expression, Statement};
    use pretty_assertions::assert_eq;

    fn body_x() -> Rc<BlockStatement> {
        Rc::new(BlockStatement::of(Expression::ident("x")))
    }

    #[test]
    fn test_inspect_renders_params_and_body() {
        let f = Function::new(vec![Identifier::new("x")], body_x(), Environment::new());
        let Ok(f) = f else {
            panic!("construction should succeed");
        };
        assert_eq!(f.inspect(), "fn(x) {\nx\n}");
        assert!(f.inspect().contains("fn(x) {"));
        // stable across calls
        assert_eq!(f.inspect(), f.inspect());
    }

    #[test]
    fn test_inspect_multiple_params_and_statements() {
        let body = Rc::new(BlockStatement::new(vec![
            Statement::expr(Expression::assign(
                Expression::ident("sum"),
                Expression::send(Expression::ident("a"), "+", vec![Expression::ident("b")]),
            )),
            Statement::ret(Expression::ident("sum")),
        ]));
        let params = vec![Identifier::new("a"), Identifier::new("b")];
        let Ok(f) = Function::new(params, body, Environment::new()) else {
            panic!("construction should succeed");
        };
        assert_eq!(f.inspect(), "fn(a, b) {\nsum = a.+(b)\nreturn sum\n}");
        assert_eq!(f.arity(), 2);
    }

    #[test]
    fn test_empty_parameter_list() {
        let Ok(f) = Function::new(vec![], body_x(), Environment::new()) else {
            panic!("construction should succeed");
        };
        assert_eq!(f.arity(), 0);
        assert!(f.inspect().starts_with("fn() {"));
    }

    #[test]
    fn test_duplicate_parameter_fails_at_construction() {
        let params = vec![Identifier::new("x"), Identifier::new("x")];
        let result = Function::new(params, body_x(), Environment::new());
        assert_eq!(
            result.err(),
            Some(ConstructionError::DuplicateParameter { name: "x".into() })
        );
    }

    #[test]
    fn test_env_is_shared_not_copied() {
        let env = Environment::new();
        let Ok(f) = Function::new(vec![], body_x(), env.clone()) else {
            panic!("construction should succeed");
        };
        env.set("x", crate::Value::int(7));
        assert_eq!(f.env().get("x"), Some(crate::Value::int(7)));
        assert!(f.env().ptr_eq(&env));
    }
}
