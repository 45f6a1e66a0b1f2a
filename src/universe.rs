//! The vertex set of the bubble-sort network `B_n`.
//!
//! A [`Universe`] holds every permutation of `1..=n` in lexicographic order and an
//! index from vertex to ordinal. It is built once per run and shared read-only by
//! every tree construction.

use std::ops::Index;

use ahash::RandomState;
use indexmap::IndexSet;
use thiserror::Error;

use crate::{ist::TreeIndex, permutation::Permutation};

/// The dimension `n` of the network, restricted to `MIN..=MAX`.
///
/// The upper bound only keeps the `n!` vertex set within a single-machine budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension(u8);

impl Dimension {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 8;

    pub fn new(n: i64) -> Result<Self, DimensionError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&n) {
            Ok(Dimension(n as u8))
        } else {
            Err(DimensionError::OutOfRange(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of vertices, `n!`.
    pub fn order(self) -> usize {
        (1..=self.0 as usize).product()
    }

    /// Number of independent spanning trees, `n - 1`.
    pub fn num_trees(self) -> u8 {
        self.0 - 1
    }

    /// The tree indices `1..=n-1`, in increasing order.
    pub fn tree_indices(self) -> impl DoubleEndedIterator<Item = TreeIndex> + ExactSizeIterator {
        (1..=self.num_trees()).map(TreeIndex)
    }
}

impl TryFrom<i64> for Dimension {
    type Error = DimensionError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Dimension::new(n)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error(
        "Please enter a value between {min} and {max}. (Note: n > {max} will generate too many permutations), got {0}",
        min = Dimension::MIN,
        max = Dimension::MAX
    )]
    OutOfRange(i64),
}

/// Every vertex of `B_n`, in lexicographic order, with O(1) vertex → ordinal lookup.
#[derive(Debug, Clone)]
pub struct Universe {
    dimension: Dimension,
    vertices: IndexSet<Permutation, RandomState>,
    identity: Permutation,
}

impl Universe {
    /// Enumerates all `n!` permutations, identity first.
    pub fn new(dimension: Dimension) -> Self {
        let mut vertices =
            IndexSet::with_capacity_and_hasher(dimension.order(), RandomState::new());
        vertices.extend(Permutation::lexicographic(dimension.get()));
        Universe {
            dimension,
            vertices,
            identity: Permutation::id(dimension.get()),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn identity(&self) -> &Permutation {
        &self.identity
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The ordinal of `vertex` in generation order, `None` if it is not a vertex of this network.
    pub fn ordinal(&self, vertex: &Permutation) -> Option<usize> {
        self.vertices.get_index_of(vertex)
    }

    pub fn get(&self, ordinal: usize) -> Option<&Permutation> {
        self.vertices.get_index(ordinal)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Permutation> + '_ {
        self.vertices.iter()
    }

    /// Ordinals of the neighbours of the vertex at `ordinal` in `B_n`.
    pub fn neighbour_ordinals(&self, ordinal: usize) -> impl Iterator<Item = usize> + '_ {
        self.get(ordinal)
            .into_iter()
            .flat_map(|v| v.neighbours())
            .filter_map(|q| self.ordinal(&q))
    }
}

impl Index<usize> for Universe {
    type Output = Permutation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vertices[index]
    }
}

impl<'a> IntoIterator for &'a Universe {
    type Item = &'a Permutation;
    type IntoIter = indexmap::set::Iter<'a, Permutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
