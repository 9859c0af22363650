//! Coordinate-list accumulation of generated edges.

use std::slice;
use std::vec;

use crate::error::{KroneckerError, Result};
use crate::sparse::SparseView;

/// A `(row, col)` pair, 1-based.
pub type Coord = (u64, u64);

/// A growable list of edge coordinates over a `side x side` vertex space.
///
/// Duplicates are kept: a repeated coordinate is a parallel edge. The list
/// only grows, and insertion order is preserved so that a fixed seed yields
/// a fixed sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeCoordinateSet {
    side: u64,
    pairs: Vec<Coord>,
}

impl EdgeCoordinateSet {
    pub fn new(side: u64) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Pre-sizes the buffer for `capacity` pairs so that appends in a hot
    /// loop do not reallocate.
    pub fn with_capacity(side: u64, capacity: usize) -> Self {
        Self {
            side,
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub fn side(&self) -> u64 {
        self.side
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[Coord] {
        &self.pairs
    }

    pub fn iter(&self) -> slice::Iter<'_, Coord> {
        self.pairs.iter()
    }

    /// Appends one coordinate, rejecting anything outside `[1, side]^2`.
    pub fn append(&mut self, (row, col): Coord) -> Result<()> {
        if row == 0 || col == 0 || row > self.side || col > self.side {
            return Err(KroneckerError::OutOfRange {
                row,
                col,
                side: self.side,
            });
        }
        self.pairs.push((row, col));
        Ok(())
    }

    /// Moves all of `other`'s pairs onto the end of this set, in order.
    pub fn merge(&mut self, mut other: EdgeCoordinateSet) -> Result<()> {
        if other.side != self.side {
            return Err(KroneckerError::SizeMismatch {
                left: self.side,
                right: other.side,
            });
        }
        self.pairs.append(&mut other.pairs);
        Ok(())
    }

    /// Builds the compressed, queryable form. Duplicate coordinates are
    /// summed into multiplicities.
    pub fn to_sparse_view(&self) -> SparseView {
        SparseView::from_pairs(self.side, self.pairs.clone())
    }

    /// Like [`EdgeCoordinateSet::to_sparse_view`] but reuses this set's
    /// buffer.
    pub fn into_sparse_view(self) -> SparseView {
        SparseView::from_pairs(self.side, self.pairs)
    }

    pub fn into_pairs(self) -> Vec<Coord> {
        self.pairs
    }
}

impl IntoIterator for EdgeCoordinateSet {
    type Item = Coord;
    type IntoIter = vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeCoordinateSet {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
