//! Tree-shaped AST for method bodies, blocks and closures.
//!
//! Bodies are shared between the tree and every closure created from them,
//! so `FunctionLiteral` holds its block behind an `Rc`.

// Function bodies are shared read-only between the tree and runtime closures
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the shared ownership of function bodies"
)]

use std::fmt;
use std::rc::Rc;

/// A bare identifier (`x`, `speak`, `name`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier {
            value: value.into(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    Str(String),
    /// Symbol literal, stored without the leading `:`.
    Symbol(String),
    Boolean(bool),
    Nil,
    /// The current receiver (`self`).
    SelfExpr,
    /// Instance variable read, stored without the leading `@`.
    InstanceVariable(String),
    /// `target = value` where target is an identifier or instance variable.
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    /// Message send. A missing receiver means an implicit `self`.
    MethodCall {
        receiver: Option<Box<Expression>>,
        method: String,
        arguments: Vec<Expression>,
    },
    /// Direct call of a function value (`f(1, 2)`).
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: Rc<BlockStatement>,
    },
}

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Str(value.into())
    }

    pub fn ivar(name: impl Into<String>) -> Self {
        Expression::InstanceVariable(name.into())
    }

    pub fn assign(target: Expression, value: Expression) -> Self {
        Expression::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn send(receiver: Expression, method: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::MethodCall {
            receiver: Some(Box::new(receiver)),
            method: method.into(),
            arguments,
        }
    }

    /// Message send to the implicit receiver.
    pub fn send_self(method: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::MethodCall {
            receiver: None,
            method: method.into(),
            arguments,
        }
    }

    pub fn call(function: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            function: Box::new(function),
            arguments,
        }
    }

    pub fn function(parameters: Vec<Identifier>, body: BlockStatement) -> Self {
        Expression::FunctionLiteral {
            parameters,
            body: Rc::new(body),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::Integer(n) => write!(f, "{n}"),
            Expression::Str(s) => write!(f, "{s:?}"),
            Expression::Symbol(s) => write!(f, ":{s}"),
            Expression::Boolean(b) => write!(f, "{b}"),
            Expression::Nil => f.write_str("nil"),
            Expression::SelfExpr => f.write_str("self"),
            Expression::InstanceVariable(name) => write!(f, "@{name}"),
            Expression::Assignment { target, value } => write!(f, "{target} = {value}"),
            Expression::MethodCall {
                receiver,
                method,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{method}(")?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Expression::FunctionLiteral { parameters, body } => {
                f.write_str("fn(")?;
                write_list(f, parameters)?;
                write!(f, ") {{\n{body}\n}}")
            }
        }
    }
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Expression(Expression),
    /// `return` with an optional value (`nil` when absent).
    Return(Option<Expression>),
}

impl Statement {
    pub fn expr(expression: Expression) -> Self {
        Statement::Expression(expression)
    }

    pub fn ret(expression: Expression) -> Self {
        Statement::Return(Some(expression))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expression(expression) => write!(f, "{expression}"),
            Statement::Return(Some(expression)) => write!(f, "return {expression}"),
            Statement::Return(None) => f.write_str("return"),
        }
    }
}

/// A sequence of statements: a method body, block body or closure body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        BlockStatement { statements }
    }

    /// Body consisting of a single expression statement.
    pub fn of(expression: Expression) -> Self {
        BlockStatement {
            statements: vec![Statement::Expression(expression)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
