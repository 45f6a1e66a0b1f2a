//! Traversal iterators over a [`SpanningTree`].

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use super::{ParentId, SpanningTree, TreeNodeId};

// --- Ancestors Iterator ---

/// An iterator that traverses parent links upwards from a starting node.
///
/// Parent links produced by an arbitrary rule may form cycles, so every node is
/// yielded at most once: the walk stops at a self-parented node or when it would
/// revisit a node.
#[derive(Clone)]
pub struct AncestorsIter<'a> {
    tree: &'a SpanningTree,
    /// The next node ID to yield. `None` once the walk is over.
    current: Option<TreeNodeId>,
    seen: BitVec,
}

impl<'a> AncestorsIter<'a> {
    pub fn new(tree: &'a SpanningTree, start_node: TreeNodeId) -> Self {
        AncestorsIter {
            tree,
            current: Some(start_node),
            seen: BitVec::repeat(false, tree.len()),
        }
    }
}

impl Iterator for AncestorsIter<'_> {
    type Item = TreeNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node_to_return = self.current?;
        self.seen.set(node_to_return.0, true);
        self.current = match self.tree.parent_id(node_to_return) {
            ParentId::Root => None,
            ParentId::Node(parent_id) if self.seen[parent_id.0] => None,
            ParentId::Node(parent_id) => Some(parent_id),
        };
        Some(node_to_return)
    }
}

// --- BFS Iterator ---

/// A Breadth-First Search (BFS) iterator, yielding each node with its distance from `start`.
///
/// Nodes are yielded at most once, so starting inside a parent cycle terminates.
#[derive(Clone)]
pub struct BfsIter<'a> {
    tree: &'a SpanningTree,
    queue: VecDeque<(TreeNodeId, u32)>,
    seen: BitVec,
}

impl<'a> BfsIter<'a> {
    /// Create a new BFS iterator starting at `start`, which gets level 0.
    pub fn new(tree: &'a SpanningTree, start: TreeNodeId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((start, 0));
        let mut seen = BitVec::repeat(false, tree.len());
        seen.set(start.0, true);
        BfsIter { tree, queue, seen }
    }
}

impl Iterator for BfsIter<'_> {
    type Item = (TreeNodeId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, level) = self.queue.pop_front()?;
        for &child in self.tree.children(node) {
            if !self.seen.replace(child.0, true) {
                self.queue.push_back((child, level + 1));
            }
        }
        Some((node, level))
    }
}
