//! # inlay-ast
//!
//! The syntax tree model shared between a host compiler and the inlay pass, the host boundary
//! ([`Program`]), and a generic rewriting traversal over it ([`fold`]).

#[macro_use]
extern crate tracing;

pub mod build;
pub mod fold;
mod node;
pub mod print;
mod program;
mod source_file;
mod span;

pub use node::{Node, NodeId, NodeKind, UnaryOperator};
pub use program::{Declaration, InMemoryProgram, ModuleSymbol, Program};
pub use source_file::{LineColumn, SourceFile};
pub use span::Span;
