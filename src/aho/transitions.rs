use std::slice;

use hashbrown::hash_map;
use hashbrown::HashMap;

use super::node_arena::NodeId;
use super::symbol::Symbol;

/// Number of outgoing edges at which a node switches from a linear scan to a
/// hash map.
const DENSE_THRESHOLD: usize = 16;

/// A compact representation of the outgoing edges of a trie node that doesn't
/// allocate until there are at least three of them.
#[derive(Clone, Debug)]
pub(crate) enum Transitions<C: Symbol> {
    /// No edges.
    None,
    /// Exactly one edge (symbol, node).
    One((C, NodeId)),
    /// Exactly two edges (symbol1, node1, symbol2, node2).
    Two((C, NodeId, C, NodeId)),
    /// Three or more edges, scanned linearly in insertion order.
    Many(Vec<(C, NodeId)>),
    /// Wide fan-out, typical for the root of a large Unicode dictionary.
    Dense(HashMap<C, NodeId>),
}

impl<C: Symbol> Default for Transitions<C> {
    fn default() -> Self {
        Transitions::None
    }
}

impl<C: Symbol> Transitions<C> {
    /// Returns the node that `symbol`'s edge leads to, or None if no such edge exists.
    #[inline]
    pub(crate) fn get(&self, symbol: C) -> Option<NodeId> {
        match self {
            Transitions::None => None,
            Transitions::One((ch, node)) => (*ch == symbol).then_some(*node),
            Transitions::Two((c1, n1, c2, n2)) => {
                if symbol == *c1 {
                    Some(*n1)
                } else if symbol == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Transitions::Many(edges) => {
                // Unrolled by 2 to expose load-level parallelism on short lists.
                let chunks = edges.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == symbol {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == symbol {
                        return Some(chunk[1].1);
                    }
                }
                for &(ch, node) in remainder {
                    if ch == symbol {
                        return Some(node);
                    }
                }
                None
            }
            Transitions::Dense(edges) => edges.get(&symbol).copied(),
        }
    }

    /// Adds an edge. The symbol must not already have one.
    pub(crate) fn insert(&mut self, symbol: C, target: NodeId) {
        debug_assert!(self.get(symbol).is_none(), "insert: symbol already present");
        let edge = (symbol, target);
        match self {
            Transitions::None => *self = Transitions::One(edge),
            Transitions::One((c1, n1)) => *self = Transitions::Two((*c1, *n1, edge.0, edge.1)),
            Transitions::Two((c1, n1, c2, n2)) => {
                *self = Transitions::Many(vec![(*c1, *n1), (*c2, *n2), edge])
            }
            Transitions::Many(edges) if edges.len() + 1 >= DENSE_THRESHOLD => {
                let mut dense: HashMap<C, NodeId> = edges.drain(..).collect();
                dense.insert(edge.0, edge.1);
                *self = Transitions::Dense(dense);
            }
            Transitions::Many(edges) => edges.push(edge),
            Transitions::Dense(edges) => {
                edges.insert(edge.0, edge.1);
            }
        }
    }

    /// Returns an iterator over all edges. Order is unspecified for dense nodes.
    pub(crate) fn iter(&self) -> TransitionIter<'_, C> {
        let inner = match self {
            Transitions::None => Inner::Inline {
                edges: [None, None],
                pos: 0,
            },
            Transitions::One(e) => Inner::Inline {
                edges: [Some(*e), None],
                pos: 0,
            },
            Transitions::Two((c1, n1, c2, n2)) => Inner::Inline {
                edges: [Some((*c1, *n1)), Some((*c2, *n2))],
                pos: 0,
            },
            Transitions::Many(edges) => Inner::Many(edges.iter()),
            Transitions::Dense(edges) => Inner::Dense(edges.iter()),
        };
        TransitionIter { inner }
    }
}

/// An iterator over the edges of a trie node.
pub(crate) struct TransitionIter<'a, C: Symbol> {
    inner: Inner<'a, C>,
}

enum Inner<'a, C: Symbol> {
    Inline {
        edges: [Option<(C, NodeId)>; 2],
        pos: usize,
    },
    Many(slice::Iter<'a, (C, NodeId)>),
    Dense(hash_map::Iter<'a, C, NodeId>),
}

impl<C: Symbol> Iterator for TransitionIter<'_, C> {
    type Item = (C, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Inline { edges, pos } => {
                let edge = edges.get(*pos).copied().flatten()?;
                *pos += 1;
                Some(edge)
            }
            Inner::Many(iter) => iter.next().copied(),
            Inner::Dense(iter) => iter.next().map(|(&c, &n)| (c, n)),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            Inner::Inline { edges, pos } => edges[(*pos).min(2)..].iter().flatten().count(),
            Inner::Many(iter) => iter.len(),
            Inner::Dense(iter) => iter.len(),
        };
        (remaining, Some(remaining))
    }
}

impl<C: Symbol> ExactSizeIterator for TransitionIter<'_, C> {}
