//! # Permutations
//!
//! This module provides the `Permutation` value type used as the vertex of the
//! bubble-sort network: a one-line arrangement of the symbols `1..=n`.
//!
//! ## Key Features:
//!
//! - **Representation**: a `Permutation` stores its one-line notation, `symbols[i]`
//!   is the symbol sitting at position `i`. Equality, hashing and ordering are
//!   structural, so permutations can be used directly as map keys and compare
//!   lexicographically.
//! - **Construction**:
//!   - Identity permutation: `Permutation::id(n)`.
//!   - From one-line notation: `Permutation::from_one_line(vec![...])`.
//! - **Network moves**:
//!   - Inverse lookup of a symbol: `p.position(x)`.
//!   - Swap a symbol with its right neighbour: `p.swap_symbol(x)`.
//!   - First descent scan: `p.first_descent()`.
//!   - All adjacent-position neighbours: `p.neighbours()`, and `p.is_adjacent(&q)`.
//! - **Enumeration**:
//!   - Next permutation in lexicographic order: `p.next_lexicographic()`.
//!   - Every permutation of `1..=n` in lexicographic order: `Permutation::lexicographic(n)`.

use std::{fmt, iter::FusedIterator, ops::Index};

use thiserror::Error;

/// A permutation of the symbols `1..=n` in one-line notation.
///
/// # Examples
///
/// ```
/// use bubble_ist::permutation::Permutation;
///
/// let p = Permutation::from_one_line(vec![2, 1, 3]).unwrap();
/// assert_eq!(p.to_string(), "213");
/// assert_eq!(p.swap_symbol(2), Permutation::id(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    symbols: Vec<u8>,
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Basic Constructors and Accessors
    // --------------------------------------------------------------------------------------------

    /// Creates the identity permutation `12…n`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// assert_eq!(Permutation::id(4).symbols(), &[1, 2, 3, 4]);
    /// ```
    pub fn id(n: u8) -> Self {
        Permutation {
            symbols: (1..=n).collect(),
        }
    }

    /// Creates a permutation from its one-line notation.
    ///
    /// The sequence must be non-empty and contain every symbol of `1..=len` exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// assert!(Permutation::from_one_line(vec![3, 1, 2]).is_ok());
    /// assert!(Permutation::from_one_line(vec![3, 1, 1]).is_err());
    /// assert!(Permutation::from_one_line(vec![0, 1]).is_err());
    /// ```
    pub fn from_one_line(symbols: Vec<u8>) -> Result<Self, PermutationError> {
        let n = symbols.len();
        if n == 0 {
            return Err(PermutationError::Empty);
        }
        if n > u8::MAX as usize {
            return Err(PermutationError::TooLong(n));
        }
        let mut seen = vec![false; n];
        for &s in &symbols {
            if s == 0 || s as usize > n {
                return Err(PermutationError::SymbolOutOfRange { symbol: s, n });
            }
            if std::mem::replace(&mut seen[s as usize - 1], true) {
                return Err(PermutationError::RepeatedSymbol(s));
            }
        }
        Ok(Permutation { symbols })
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols, the `n` of `B_n`.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.symbols
            .iter()
            .enumerate()
            .all(|(i, &s)| s as usize == i + 1)
    }

    /// The last symbol `v_n`.
    pub fn last(&self) -> Option<u8> {
        self.symbols.last().copied()
    }

    /// The second-to-last symbol `v_{n-1}`.
    pub fn second_to_last(&self) -> Option<u8> {
        let n = self.symbols.len();
        n.checked_sub(2).map(|i| self.symbols[i])
    }

    // --------------------------------------------------------------------------------------------
    // Network moves
    // --------------------------------------------------------------------------------------------

    /// Returns the position of `symbol`, scanning left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// let p = Permutation::from_one_line(vec![3, 1, 2]).unwrap();
    /// assert_eq!(p.position(1), Some(1));
    /// assert_eq!(p.position(7), None);
    /// ```
    pub fn position(&self, symbol: u8) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Exchanges `symbol` with the element to its right.
    ///
    /// If the symbol is absent or already in the last position the permutation is
    /// returned unchanged; callers detect the invalid move by comparing with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// let p = Permutation::from_one_line(vec![1, 3, 2]).unwrap();
    /// assert_eq!(p.swap_symbol(1).to_string(), "312");
    /// assert_eq!(p.swap_symbol(2), p);
    /// ```
    pub fn swap_symbol(&self, symbol: u8) -> Self {
        match self.position(symbol) {
            Some(i) if i + 1 < self.symbols.len() => {
                let mut symbols = self.symbols.clone();
                symbols.swap(i, i + 1);
                Permutation { symbols }
            }
            _ => self.clone(),
        }
    }

    /// Returns the symbol at the first position `i` with `p[i] > p[i + 1]`.
    ///
    /// The scan runs left to right and stops at the first hit, so this is the
    /// leftmost descent. `None` means the permutation is sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// let p = Permutation::from_one_line(vec![2, 1, 4, 3]).unwrap();
    /// assert_eq!(p.first_descent(), Some(2));
    /// assert_eq!(Permutation::id(4).first_descent(), None);
    /// ```
    pub fn first_descent(&self) -> Option<u8> {
        self.symbols
            .windows(2)
            .find(|w| w[0] > w[1])
            .map(|w| w[0])
    }

    /// Iterates over the `n - 1` neighbours of `self` in the bubble-sort network,
    /// ordered by the position of the exchanged pair.
    pub fn neighbours(&self) -> impl Iterator<Item = Permutation> + '_ {
        (0..self.symbols.len().saturating_sub(1)).map(move |i| {
            let mut symbols = self.symbols.clone();
            symbols.swap(i, i + 1);
            Permutation { symbols }
        })
    }

    /// Whether `other` is obtained from `self` by exchanging exactly one pair of
    /// adjacent positions, i.e. whether the two share an edge of `B_n`.
    pub fn is_adjacent(&self, other: &Permutation) -> bool {
        if self.symbols.len() != other.symbols.len() {
            return false;
        }
        let mut diffs = self
            .symbols
            .iter()
            .zip(&other.symbols)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i);

        match (diffs.next(), diffs.next(), diffs.next()) {
            (Some(i), Some(j), None) => {
                j == i + 1
                    && self.symbols[i] == other.symbols[j]
                    && self.symbols[j] == other.symbols[i]
            }
            _ => false,
        }
    }

    // --------------------------------------------------------------------------------------------
    // Enumeration
    // --------------------------------------------------------------------------------------------

    /// The next permutation in lexicographic order, or `None` for the last one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// let p = Permutation::from_one_line(vec![1, 3, 2]).unwrap();
    /// assert_eq!(p.next_lexicographic().unwrap().to_string(), "213");
    /// assert!(Permutation::from_one_line(vec![3, 2, 1]).unwrap().next_lexicographic().is_none());
    /// ```
    pub fn next_lexicographic(&self) -> Option<Self> {
        let mut symbols = self.symbols.clone();
        next_permutation(&mut symbols).then_some(Permutation { symbols })
    }

    /// Every permutation of `1..=n`, starting at the identity, in strictly increasing
    /// lexicographic order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bubble_ist::permutation::Permutation;
    /// let all: Vec<String> = Permutation::lexicographic(3).map(|p| p.to_string()).collect();
    /// assert_eq!(all, ["123", "132", "213", "231", "312", "321"]);
    /// ```
    pub fn lexicographic(n: u8) -> Lexicographic {
        Lexicographic {
            next: Some(Permutation::id(n)),
        }
    }
}

/// In-place `next_permutation` over a slice; returns false when `a` is the last arrangement.
fn next_permutation(a: &mut [u8]) -> bool {
    // Find longest non-increasing suffix
    if a.len() < 2 {
        return false;
    }
    let mut i = a.len() - 2;
    while a[i] >= a[i + 1] {
        if i == 0 {
            return false;
        }
        i -= 1;
    }
    // Find rightmost successor to pivot
    let mut j = a.len() - 1;
    while a[j] <= a[i] {
        j -= 1;
    }
    a.swap(i, j);
    a[i + 1..].reverse();
    true
}

/// Iterator returned by [`Permutation::lexicographic`].
#[derive(Debug, Clone)]
pub struct Lexicographic {
    next: Option<Permutation>,
}

impl Iterator for Lexicographic {
    type Item = Permutation;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_lexicographic();
        Some(current)
    }
}

impl FusedIterator for Lexicographic {}

/// Digit-concatenated one-line notation, e.g. `2143`.
///
/// Injective only while every symbol is a single decimal digit (`n <= 9`).
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.symbols {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl Index<usize> for Permutation {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("Empty permutation")]
    Empty,

    #[error("Permutation of length {0} exceeds the symbol range")]
    TooLong(usize),

    #[error("Symbol {symbol} is outside 1..={n}")]
    SymbolOutOfRange { symbol: u8, n: usize },

    #[error("Symbol {0} appears more than once")]
    RepeatedSymbol(u8),
}
