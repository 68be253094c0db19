//! `NodeId` — a stable, arena-relative index identifying one AST node.
//!
//! Nodes refer to each other by `NodeId`, not by owning pointer, which is
//! what lets a
//! class's method refer back to the class (via `this`) and a mixin's field
//! refer to a class that applies the mixin, without a cyclic ownership
//! graph.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.0 == u32::MAX
    }
}

/// A small, usually-inline list of child node ids (e.g. statements in a
/// block, arguments to a call). Most lists in real source are short, so
/// four inline slots avoid a heap allocation for the common case.
pub type NodeList = SmallVec<[NodeId; 4]>;
