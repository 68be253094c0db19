//! `NodeArena` — owns every node of one AST by value, indexed by `NodeId`.

use crate::node::{Node, NodeKind};
use crate::node_id::NodeId;
use zena_common::Span;

#[derive(Default, Clone, Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena::default()
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, span));
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Post-order walk over a node and all of its descendants.
    pub fn walk_postorder(&self, root: NodeId, mut visit: impl FnMut(NodeId)) {
        fn go(arena: &NodeArena, id: NodeId, visit: &mut dyn FnMut(NodeId)) {
            for child in arena.get(id).children() {
                go(arena, child, visit);
            }
            visit(id);
        }
        go(self, root, &mut visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use smallvec::smallvec;

    #[test]
    fn alloc_returns_increasing_ids() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(NodeKind::NullLit, Span::new(0, 1));
        let b = arena.alloc(NodeKind::NullLit, Span::new(1, 2));
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
    }

    #[test]
    fn walk_postorder_visits_children_before_parent() {
        let mut arena = NodeArena::new();
        let left = arena.alloc(NodeKind::NullLit, Span::new(0, 1));
        let right = arena.alloc(NodeKind::NullLit, Span::new(1, 2));
        let bin = arena.alloc(
            NodeKind::Binary { op: crate::operators::BinaryOp::Add, left, right },
            Span::new(0, 2),
        );
        let mut order = Vec::new();
        arena.walk_postorder(bin, |id| order.push(id));
        assert_eq!(order, vec![left, right, bin]);
    }

    #[test]
    fn block_children_are_its_statements() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(NodeKind::Break, Span::new(0, 1));
        let b = arena.alloc(NodeKind::Continue, Span::new(1, 2));
        let block = arena.alloc(NodeKind::Block { statements: smallvec![a, b] }, Span::new(0, 2));
        assert_eq!(arena.get(block).children().as_slice(), &[a, b]);
    }
}
