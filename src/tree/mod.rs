//! Spanning trees of the bubble-sort network built from a [`ParentRule`].
//!
//! A [`SpanningTree`] is assembled in three passes over the [`Universe`]:
//!
//! *   every vertex is given its parent by the rule, and the parent is looked up by
//!     ordinal. Self-parented vertices are roots; the identity must be one of them.
//! *   children are grouped under their parent, in universe order.
//! *   levels are assigned by BFS from the identity. Vertices the BFS never reaches
//!     keep no level, and the tree reports itself as [`Integrity::Incomplete`].
//!
//! Nodes are addressed by [`TreeNodeId`], which is the vertex's ordinal in the universe.
//! An incomplete tree is still a usable value: it can be queried and exported, the
//! unreached nodes simply have no level.

use std::fmt;

use bitvec::vec::BitVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ist::{ParentRule, TreeIndex},
    permutation::Permutation,
    universe::Universe,
};

pub mod iterato;

use iterato::{AncestorsIter, BfsIter};

/// A type-safe identifier for a node within a `SpanningTree`.
/// Wraps the ordinal of the vertex in its [`Universe`].
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNodeId(pub(crate) usize);

impl TreeNodeId {
    pub fn ordinal(self) -> usize {
        self.0
    }
}

impl fmt::Display for TreeNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node's parent link points.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentId {
    /// The rule made the node its own parent.
    Root,
    Node(TreeNodeId),
}

impl ParentId {
    pub fn is_root(&self) -> bool {
        match self {
            ParentId::Root => true,
            ParentId::Node(_) => false,
        }
    }

    pub fn is_node(&self) -> bool {
        !self.is_root()
    }
}

/// A node: its parent link, its ordered children and its BFS level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub(crate) parent: ParentId,
    pub(crate) children: Vec<TreeNodeId>,
    pub(crate) level: Option<u32>,
}

/// Outcome of the reachability check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Integrity {
    /// Every vertex reaches the root along parent links.
    Spanning,
    /// Some vertices are not reachable from the root.
    Incomplete {
        /// Number of vertices without a level.
        unreached: usize,
        /// Self-parented vertices other than the root.
        orphans: Vec<TreeNodeId>,
        /// The first unreached vertex in universe order.
        first: TreeNodeId,
    },
}

impl Integrity {
    pub fn is_spanning(&self) -> bool {
        matches!(self, Integrity::Spanning)
    }
}

/// Errors that stop a tree from being assembled at all.
///
/// These only arise from a rule that does not respect the network; an unreachable
/// vertex is not an error, see [`Integrity`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Tree {0}: the identity is not its own parent")]
    MissingRoot(TreeIndex),
    #[error("Tree {tree}: parent {parent} of {vertex} is not a vertex of the network")]
    ForeignParent {
        tree: TreeIndex,
        vertex: String,
        parent: String,
    },
}

/// One row of a tree, borrowed from the universe: node, parent, level and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord<'a> {
    pub node: &'a Permutation,
    /// The node itself for self-parented nodes.
    pub parent: &'a Permutation,
    /// `None` if the node is unreachable from the root.
    pub level: Option<u32>,
    pub children: Vec<&'a Permutation>,
}

/// The tree with index `t`, one node per vertex of the universe it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanningTree {
    index: TreeIndex,
    root: TreeNodeId,
    nodes: Vec<TreeNode>,
}

impl SpanningTree {
    /// Applies `rule` to every vertex of `universe` and assembles tree `index`.
    pub fn build<R: ParentRule + ?Sized>(
        universe: &Universe,
        rule: &R,
        index: TreeIndex,
    ) -> Result<Self, TreeError> {
        let root = universe
            .ordinal(universe.identity())
            .map(TreeNodeId)
            .ok_or(TreeError::MissingRoot(index))?;

        debug!(tree = %index, vertices = universe.len(), "assigning parents");
        let mut nodes = Vec::with_capacity(universe.len());
        for vertex in universe {
            let parent = rule.parent(vertex, index);
            let parent = if parent == *vertex {
                ParentId::Root
            } else {
                let ordinal = universe.ordinal(&parent).ok_or_else(|| TreeError::ForeignParent {
                    tree: index,
                    vertex: vertex.to_string(),
                    parent: parent.to_string(),
                })?;
                ParentId::Node(TreeNodeId(ordinal))
            };
            trace!(tree = %index, %vertex, ?parent);
            nodes.push(TreeNode {
                parent,
                children: Vec::new(),
                level: None,
            });
        }

        if nodes[root.0].parent.is_node() {
            return Err(TreeError::MissingRoot(index));
        }

        for i in 0..nodes.len() {
            if let ParentId::Node(p) = nodes[i].parent {
                nodes[p.0].children.push(TreeNodeId(i));
            }
        }

        let mut tree = SpanningTree { index, root, nodes };
        tree.assign_levels();
        debug!(tree = %index, depth = ?tree.depth(), "levels assigned");
        Ok(tree)
    }

    fn assign_levels(&mut self) {
        let order: Vec<_> = self.iter_bfs(self.root).collect();
        for (id, level) in order {
            self.nodes[id.0].level = Some(level);
        }
    }

    pub fn index(&self) -> TreeIndex {
        self.index
    }

    pub fn root(&self) -> TreeNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter_node_ids(&self) -> impl ExactSizeIterator<Item = TreeNodeId> {
        (0..self.nodes.len()).map(TreeNodeId)
    }

    pub fn parent_id(&self, node: TreeNodeId) -> ParentId {
        self.nodes[node.0].parent
    }

    /// The parent of `node`, or `node` itself if it is self-parented.
    pub fn parent(&self, node: TreeNodeId) -> TreeNodeId {
        match self.nodes[node.0].parent {
            ParentId::Root => node,
            ParentId::Node(p) => p,
        }
    }

    /// The children of `node`, in universe order.
    pub fn children(&self, node: TreeNodeId) -> &[TreeNodeId] {
        &self.nodes[node.0].children
    }

    /// BFS distance from the root, `None` if `node` is unreachable.
    pub fn level(&self, node: TreeNodeId) -> Option<u32> {
        self.nodes[node.0].level
    }

    /// The largest level in the tree.
    pub fn depth(&self) -> Option<u32> {
        self.nodes.iter().filter_map(|n| n.level).max()
    }

    /// BFS from `start`, yielding `(node, distance from start)`.
    pub fn iter_bfs(&self, start: TreeNodeId) -> BfsIter<'_> {
        BfsIter::new(self, start)
    }

    /// Walks parent links from `start`, `start` included.
    pub fn iter_ancestors(&self, start: TreeNodeId) -> AncestorsIter<'_> {
        AncestorsIter::new(self, start)
    }

    /// The parent chain from `node` to the root, both included, or `None` if the
    /// chain ends somewhere else.
    pub fn path_to_root(&self, node: TreeNodeId) -> Option<Vec<TreeNodeId>> {
        let path: Vec<_> = self.iter_ancestors(node).collect();
        (path.last() == Some(&self.root)).then_some(path)
    }

    /// The set of nodes the BFS from the root never reached.
    pub fn unreached(&self) -> BitVec {
        self.nodes.iter().map(|n| n.level.is_none()).collect()
    }

    /// Self-parented nodes other than the root.
    pub fn orphans(&self) -> impl Iterator<Item = TreeNodeId> + '_ {
        self.iter_node_ids()
            .filter(move |&id| id != self.root && self.nodes[id.0].parent.is_root())
    }

    /// Checks that every vertex reaches the root.
    pub fn integrity(&self) -> Integrity {
        let unreached = self.unreached();
        match unreached.first_one() {
            None => Integrity::Spanning,
            Some(first) => Integrity::Incomplete {
                unreached: unreached.count_ones(),
                orphans: self.orphans().collect(),
                first: TreeNodeId(first),
            },
        }
    }

    /// The rows of the tree in universe order.
    ///
    /// # Panics
    ///
    /// If `universe` is not the one the tree was built from.
    pub fn records<'a>(
        &'a self,
        universe: &'a Universe,
    ) -> impl ExactSizeIterator<Item = NodeRecord<'a>> + 'a {
        assert_eq!(universe.len(), self.len(), "tree built over another universe");
        self.iter_node_ids().map(move |id| NodeRecord {
            node: &universe[id.0],
            parent: &universe[self.parent(id).0],
            level: self.level(id),
            children: self
                .children(id)
                .iter()
                .map(|c| &universe[c.0])
                .collect(),
        })
    }
}

#[cfg(test)]
mod test;
