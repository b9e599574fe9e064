//! Index-based storage for trie nodes.
//!
//! Nodes live in one contiguous vector and refer to each other by [`NodeId`],
//! so the trie edges and the failure links (which point backwards and across
//! branches) need neither reference counting nor lifetimes.

use std::ops::{Index, IndexMut};

use super::symbol::Symbol;
use super::transitions::Transitions;

/// Identifier of a node: an index into the arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The root node, allocated first by every arena.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the trie, one per distinct pattern prefix.
#[derive(Clone, Debug)]
pub(crate) struct Node<C: Symbol> {
    pub(crate) transitions: Transitions<C>,
    /// Number of patterns ending exactly here. Zero for interior nodes.
    pub(crate) terminal_count: u32,
    /// Index of the last pattern that ended here.
    pub(crate) pattern_index: usize,
    /// Length in symbols of the pattern ending here.
    pub(crate) pattern_len: usize,
    /// Longest proper suffix of this node's path that is also a trie path.
    pub(crate) fail: NodeId,
}

impl<C: Symbol> Node<C> {
    fn new() -> Self {
        Node {
            transitions: Transitions::None,
            terminal_count: 0,
            pattern_index: 0,
            pattern_len: 0,
            fail: NodeId::ROOT,
        }
    }

    /// True if at least one pattern ends at this node.
    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.terminal_count > 0
    }
}

/// Growable arena owning every node of one automaton.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<C: Symbol> {
    nodes: Vec<Node<C>>,
}

impl<C: Symbol> NodeArena<C> {
    /// Creates an arena holding only the root.
    pub(crate) fn new() -> Self {
        NodeArena {
            nodes: vec![Node::new()],
        }
    }

    /// Allocates a fresh node and returns its id.
    pub(crate) fn alloc(&mut self) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena exceeded u32::MAX nodes");
        self.nodes.push(Node::new());
        NodeId(id)
    }

    /// Returns the child of `parent` labelled `symbol`, allocating it if missing.
    pub(crate) fn child_or_alloc(&mut self, parent: NodeId, symbol: C) -> NodeId {
        if let Some(child) = self[parent].transitions.get(symbol) {
            return child;
        }
        let child = self.alloc();
        self[parent].transitions.insert(symbol, child);
        child
    }

    /// Returns the number of nodes, root included.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<C: Symbol> Index<NodeId> for NodeArena<C> {
    type Output = Node<C>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.index()]
    }
}

impl<C: Symbol> IndexMut<NodeId> for NodeArena<C> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<C> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_arena_has_only_root() {
        let arena = NodeArena::<char>::new();
        assert_eq!(arena.len(), 1);
        assert!(!arena[NodeId::ROOT].is_terminal());
        assert_eq!(arena[NodeId::ROOT].transitions.iter().next(), None);
    }

    #[test]
    fn child_or_alloc_reuses_existing_edges() {
        let mut arena = NodeArena::new();
        let a = arena.child_or_alloc(NodeId::ROOT, 'a');
        let b = arena.child_or_alloc(a, 'b');
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.child_or_alloc(NodeId::ROOT, 'a'), a);
        assert_eq!(arena.child_or_alloc(a, 'b'), b);
        assert_eq!(arena.len(), 3);
        assert_ne!(a, b);
    }
}
