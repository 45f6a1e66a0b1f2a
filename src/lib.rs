//! # bubble-ist
//!
//! Independent spanning trees of the bubble-sort network `B_n`.
//!
//! The vertices of `B_n` are the `n!` permutations of `1..=n`; two permutations are
//! joined when they differ by exchanging the symbols at two adjacent positions. This
//! crate assigns every vertex a parent in each of the `n - 1` trees rooted at the
//! identity, assembles the trees, checks that each one actually spans the network and
//! writes them out as flat files.
//!
//! ```
//! use bubble_ist::{
//!     ist::BubbleSortRule,
//!     tree::SpanningTree,
//!     universe::{Dimension, Universe},
//! };
//!
//! let n = Dimension::new(4).unwrap();
//! let universe = Universe::new(n);
//! let rule = BubbleSortRule::new(n);
//! for t in n.tree_indices() {
//!     let tree = SpanningTree::build(&universe, &rule, t).unwrap();
//!     assert!(tree.integrity().is_spanning());
//! }
//! ```

pub mod config;
pub mod driver;
pub mod export;
pub mod ist;
pub mod permutation;
pub mod tree;
pub mod universe;
