//! Huffman tree construction.
//!
//! The tree lives in an arena: nodes are stored in a flat vector and refer to
//! their children by index. Leaves occupy the first `n` slots in frequency
//! table order; every merge appends one internal node.
//!
//! # Determinism
//!
//! The decoder never receives the tree. It rebuilds it from the header's
//! frequency table, so construction must depend only on that table's counts
//! and order. Each round stable-sorts the working list by weight, which means
//! ties keep their current list position and freshly merged nodes (appended at
//! the end) lose ties against anything already in the list. Swapping this for
//! a priority queue would change which tree is produced for tied weights.

use tracing::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Index of a node in [`HuffmanTree::nodes`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf { symbol: u8 },
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub weight: u64,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

/// A Huffman tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// A one-entry table produces a lone leaf as the root, with no merges.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if the table has no entries.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(2 * table.len() - 1);
        for entry in table.iter() {
            nodes.push(Node {
                weight: entry.count,
                kind: NodeKind::Leaf {
                    symbol: entry.symbol,
                },
            });
        }

        let mut working: Vec<NodeId> = (0..nodes.len()).collect();
        while working.len() > 1 {
            // Stable: equal weights keep their current relative position
            working.sort_by_key(|&id| nodes[id].weight);

            let left = working.remove(0);
            let right = working.remove(0);
            let weight = nodes[left].weight + nodes[right].weight;

            let merged = nodes.len();
            nodes.push(Node {
                weight,
                kind: NodeKind::Internal { left, right },
            });
            working.push(merged);

            trace!(left, right, merged, weight, "merged nodes");
        }

        let root = working[0];
        debug!(
            leaves = table.len(),
            nodes = nodes.len(),
            weight = nodes[root].weight,
            "built huffman tree"
        );

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of leaves, equal to the number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Whether the root itself is a leaf (single-symbol table).
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Follow one edge from `id`: `false` goes left, `true` goes right.
    ///
    /// Returns `None` when `id` is a leaf.
    pub fn step(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id].kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { left, right } => Some(if bit { right } else { left }),
        }
    }

    /// Symbol stored at `id`, if it is a leaf.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes[id].kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }
}
