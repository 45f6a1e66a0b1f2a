//! # Independent spanning trees of the bubble-sort network
//!
//! Every non-root vertex of `B_n` gets exactly one parent in each of the `n - 1`
//! trees. The assignment is local: it only looks at the vertex, the tree index and
//! `n`, so any single vertex can be resolved without building the rest of the tree.
//!
//! *   [`ParentRule`]: the seam the tree builder is generic over.
//! *   [`BubbleSortRule`]: the published `Parent1` / `FindPosition` rule.
//! *   [`RuleCase`]: which branch of the rule produced a given parent.

use crate::{permutation::Permutation, universe::Dimension};

/// The index `t` of a tree, in `1..=n-1`.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeIndex(pub(crate) u8);

impl TreeIndex {
    /// Returns `None` unless `1 <= t <= n - 1`.
    pub fn new(t: u8, dimension: Dimension) -> Option<Self> {
        (1..=dimension.num_trees())
            .contains(&t)
            .then_some(TreeIndex(t))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Assigns every vertex its parent in a given tree.
///
/// Implementations must return the vertex itself for the root and must be pure:
/// the same arguments always give the same parent.
pub trait ParentRule {
    fn parent(&self, vertex: &Permutation, tree: TreeIndex) -> Permutation;
}

impl<R: ParentRule + ?Sized> ParentRule for &R {
    fn parent(&self, vertex: &Permutation, tree: TreeIndex) -> Permutation {
        (**self).parent(vertex, tree)
    }
}

/// Branch taken by [`BubbleSortRule::resolve`].
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum RuleCase {
    /// The identity is its own parent.
    Root,
    /// `v_n = n`, `t != n - 1`: delegate to `FindPosition`.
    Rule1(FindPositionCase),
    /// `v_n = n`, `t = n - 1`: swap `v_{n-1}`.
    Rule2,
    /// `v_n = n - 1`, `v_{n-1} = n`, `t = 1`: swap `n`.
    Rule3,
    /// `v_n = n - 1`, `v_{n-1} = n`, `t > 1`: swap `t - 1`.
    Rule4,
    /// `v_n = t`: swap `n`.
    Rule5,
    /// Everything else: swap `t`.
    Rule6,
}

/// Branch taken inside `FindPosition`.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum FindPositionCase {
    /// `t = 2` and swapping `2` would land on the identity: swap `1` instead.
    Collision,
    /// `v_{n-1}` is `t` or `n - 1` and `v` has a descent: swap the first descent.
    FirstDescent,
    /// Swap `t`.
    Default,
}

/// The parent rule for the `n - 1` independent spanning trees of `B_n`, rooted at the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BubbleSortRule {
    n: u8,
    identity: Permutation,
}

impl BubbleSortRule {
    pub fn new(dimension: Dimension) -> Self {
        BubbleSortRule {
            n: dimension.get(),
            identity: Permutation::id(dimension.get()),
        }
    }

    pub fn identity(&self) -> &Permutation {
        &self.identity
    }

    /// `FindPosition(v, t)`, used by rule 1 when the last symbol is `n`.
    ///
    /// # Panics
    ///
    /// If `vertex` is shorter than `n`.
    pub fn find_position(
        &self,
        vertex: &Permutation,
        tree: TreeIndex,
    ) -> (FindPositionCase, Permutation) {
        let t = tree.0;
        let second_to_last = vertex[self.n as usize - 2];

        if t == 2 && vertex.swap_symbol(2) == self.identity {
            return (FindPositionCase::Collision, vertex.swap_symbol(1));
        }

        if second_to_last == t || second_to_last == self.n - 1 {
            if let Some(j) = vertex.first_descent() {
                return (FindPositionCase::FirstDescent, vertex.swap_symbol(j));
            }
        }

        (FindPositionCase::Default, vertex.swap_symbol(t))
    }

    /// `Parent1(v, t)`: the parent of `vertex` in tree `tree`, together with the branch that chose it.
    ///
    /// # Panics
    ///
    /// If `vertex` is shorter than `n`.
    pub fn resolve(&self, vertex: &Permutation, tree: TreeIndex) -> (RuleCase, Permutation) {
        if *vertex == self.identity {
            return (RuleCase::Root, vertex.clone());
        }

        let (n, t) = (self.n, tree.0);
        let last = vertex[n as usize - 1];
        let second_to_last = vertex[n as usize - 2];

        if last == n {
            if t != n - 1 {
                let (case, parent) = self.find_position(vertex, tree);
                (RuleCase::Rule1(case), parent)
            } else {
                (RuleCase::Rule2, vertex.swap_symbol(second_to_last))
            }
        } else if last == n - 1 && second_to_last == n && vertex.swap_symbol(n) != self.identity {
            if t == 1 {
                (RuleCase::Rule3, vertex.swap_symbol(n))
            } else {
                (RuleCase::Rule4, vertex.swap_symbol(t - 1))
            }
        } else if last == t {
            (RuleCase::Rule5, vertex.swap_symbol(n))
        } else {
            (RuleCase::Rule6, vertex.swap_symbol(t))
        }
    }
}

impl ParentRule for BubbleSortRule {
    fn parent(&self, vertex: &Permutation, tree: TreeIndex) -> Permutation {
        self.resolve(vertex, tree).1
    }
}
