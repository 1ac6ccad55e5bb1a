//! Garnet IR - syntax tree types shared between the parser, the evaluator
//! and the runtime object model.
//!
//! The object model only needs a small slice of the tree: function bodies are
//! held by reference inside closures and rendered back to source text when a
//! closure is inspected. Every node therefore implements `Display` with a
//! deterministic, source-like rendering.

pub mod ast;

pub use ast::{BlockStatement, Expression, Identifier, Statement};
