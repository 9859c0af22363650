//! One-hot square matrices and their Kronecker product.
//!
//! A [`QuadrantMatrix`] never stores its entries: a square matrix with a
//! single unit entry is fully described by its side and the position of that
//! entry. The Kronecker product of two such matrices is again one-hot, which
//! lets us combine them in constant time instead of materializing
//! `side * side` cells.

use crate::error::{KroneckerError, Result};

/// A `side x side` matrix whose only nonzero entry is a 1 at `(row, col)`.
///
/// Indices are 1-based, `1 <= row, col <= side`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuadrantMatrix {
    side: u64,
    row: u64,
    col: u64,
}

impl QuadrantMatrix {
    /// Creates the one-hot matrix with its unit entry at `(row, col)`.
    pub fn new(side: u64, row: u64, col: u64) -> Result<Self> {
        if side == 0 || row == 0 || col == 0 || row > side || col > side {
            return Err(KroneckerError::OutOfRange { row, col, side });
        }
        Ok(Self { side, row, col })
    }

    /// The 1x1 matrix `[1]`, the identity of [`QuadrantMatrix::kron`].
    pub const fn unit() -> Self {
        Self {
            side: 1,
            row: 1,
            col: 1,
        }
    }

    /// Side-2 constructor for the four quadrant cells; callers guarantee
    /// `row, col` are 1 or 2.
    pub(crate) const fn cell(row: u64, col: u64) -> Self {
        Self { side: 2, row, col }
    }

    pub fn side(&self) -> u64 {
        self.side
    }

    pub fn row(&self) -> u64 {
        self.row
    }

    pub fn col(&self) -> u64 {
        self.col
    }

    /// The `(row, col)` position of the unit entry.
    pub fn coords(&self) -> (u64, u64) {
        (self.row, self.col)
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// The unit entry of the product lands in block `(self.row, self.col)`
    /// of `other`-sized blocks, offset inside that block by `other`'s own
    /// unit entry. Associative but not commutative: the left operand
    /// supplies the most significant digits of the result.
    ///
    /// Panics on `u64` overflow of the product side in debug builds; use
    /// [`QuadrantMatrix::checked_kron`] when sides are not known to be small.
    pub fn kron(&self, other: &Self) -> Self {
        Self {
            side: self.side * other.side,
            row: (self.row - 1) * other.side + other.row,
            col: (self.col - 1) * other.side + other.col,
        }
    }

    /// Kronecker product returning `None` if the product side overflows.
    pub fn checked_kron(&self, other: &Self) -> Option<Self> {
        let side = self.side.checked_mul(other.side)?;
        Some(Self {
            side,
            row: (self.row - 1) * other.side + other.row,
            col: (self.col - 1) * other.side + other.col,
        })
    }

    /// Reads the (implicit) entry at `(row, col)`: 1 at the unit position,
    /// 0 elsewhere inside the matrix, `None` outside it.
    pub fn get(&self, row: u64, col: u64) -> Option<u8> {
        if row == 0 || col == 0 || row > self.side || col > self.side {
            None
        } else if (row, col) == (self.row, self.col) {
            Some(1)
        } else {
            Some(0)
        }
    }
}

impl Default for QuadrantMatrix {
    fn default() -> Self {
        Self::unit()
    }
}

/// Left fold of `matrices` under [`QuadrantMatrix::kron`], starting from
/// [`QuadrantMatrix::unit`]. The first matrix supplies the most significant
/// digits of the result.
pub fn kron_all<I>(matrices: I) -> QuadrantMatrix
where
    I: IntoIterator<Item = QuadrantMatrix>,
{
    matrices
        .into_iter()
        .fold(QuadrantMatrix::unit(), |acc, m| acc.kron(&m))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense Kronecker product, for checking the index rule on small inputs.
    fn dense_kron(a: &[Vec<u8>], b: &[Vec<u8>]) -> Vec<Vec<u8>> {
        let (na, nb) = (a.len(), b.len());
        let mut out = vec![vec![0u8; na * nb]; na * nb];
        for i in 0..na {
            for j in 0..na {
                for k in 0..nb {
                    for l in 0..nb {
                        out[i * nb + k][j * nb + l] = a[i][j] * b[k][l];
                    }
                }
            }
        }
        out
    }

    fn densify(m: &QuadrantMatrix) -> Vec<Vec<u8>> {
        (1..=m.side())
            .map(|r| (1..=m.side()).map(|c| m.get(r, c).unwrap()).collect())
            .collect()
    }

    #[test]
    fn kron_matches_dense_product() {
        for side_a in 1..=3 {
            for side_b in 1..=3 {
                for ra in 1..=side_a {
                    for ca in 1..=side_a {
                        for rb in 1..=side_b {
                            for cb in 1..=side_b {
                                let a = QuadrantMatrix::new(side_a, ra, ca).unwrap();
                                let b = QuadrantMatrix::new(side_b, rb, cb).unwrap();
                                assert_eq!(
                                    densify(&a.kron(&b)),
                                    dense_kron(&densify(&a), &densify(&b)),
                                    "{:?} x {:?}",
                                    a,
                                    b
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn kron_is_not_commutative() {
        let a = QuadrantMatrix::cell(1, 2);
        let b = QuadrantMatrix::cell(2, 1);
        assert_eq!(a.kron(&b).coords(), (2, 3));
        assert_eq!(b.kron(&a).coords(), (3, 2));
    }

    #[test]
    fn unit_is_identity() {
        let a = QuadrantMatrix::new(4, 3, 2).unwrap();
        assert_eq!(QuadrantMatrix::unit().kron(&a), a);
        assert_eq!(a.kron(&QuadrantMatrix::unit()), a);
        assert_eq!(kron_all(std::iter::empty()), QuadrantMatrix::unit());
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(QuadrantMatrix::new(0, 1, 1).is_err());
        assert!(QuadrantMatrix::new(2, 0, 1).is_err());
        assert!(QuadrantMatrix::new(2, 1, 3).is_err());
        assert_eq!(
            QuadrantMatrix::new(2, 3, 1),
            Err(KroneckerError::OutOfRange {
                row: 3,
                col: 1,
                side: 2
            })
        );
    }

    #[test]
    fn checked_kron_detects_overflow() {
        let big = QuadrantMatrix::new(1 << 40, 1, 1 << 40).unwrap();
        assert!(big.checked_kron(&big).is_none());
        let small = QuadrantMatrix::cell(2, 2);
        assert_eq!(big.checked_kron(&small), Some(big.kron(&small)));
    }

    #[test]
    fn get_outside_is_none() {
        let m = QuadrantMatrix::cell(2, 1);
        assert_eq!(m.get(2, 1), Some(1));
        assert_eq!(m.get(1, 1), Some(0));
        assert_eq!(m.get(3, 1), None);
        assert_eq!(m.get(0, 1), None);
    }
}
