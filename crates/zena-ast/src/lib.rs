//! Arena-backed AST node types shared by the parser, checker and bundler.
//!
//! Nodes are plain data (`Node { kind: NodeKind, span: Span }`) stored by
//! value in a `NodeArena` and referenced by `NodeId`. The AST is immutable
//! once built; derived facts (inferred types, resolved bindings, export
//! names) live in side-tables owned by later phases, never on the node
//! itself.

pub mod arena;
pub mod node;
pub mod node_id;
pub mod operators;

pub use arena::NodeArena;
pub use node::{Node, NodeKind, PrimitiveKind, RecordKey, TemplateQuasi};
pub use node_id::{NodeId, NodeList};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
