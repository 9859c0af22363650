//! Compact, queryable sparse form of a generated edge multiset.

use itertools::Itertools;
use rayon::slice::ParallelSliceMut;

use crate::coords::Coord;
use crate::error::{KroneckerError, Result};
use crate::SummaryStats;

/// A compressed-sparse-row view over the rows that actually hold edges.
///
/// The `side`-sized row space is never allocated, so the view stays
/// proportional to the number of distinct coordinates even when `side` is
/// `2^40`. `rows` lists the nonempty rows in increasing order and
/// `cols[offsets[i]..offsets[i+1]]` are the sorted distinct columns of
/// `rows[i]`, with `counts` holding each cell's multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseView {
    side: u64,
    rows: Vec<u64>,
    offsets: Vec<usize>,
    cols: Vec<u64>,
    counts: Vec<u64>,
}

impl SparseView {
    /// Sorts `pairs` and sums repeated coordinates.
    pub(crate) fn from_pairs(side: u64, mut pairs: Vec<Coord>) -> Self {
        pairs.par_sort_unstable();

        let mut rows = Vec::new();
        let mut offsets = vec![0];
        let mut cols = Vec::new();
        let mut counts = Vec::new();
        for (coord, group) in &pairs.iter().group_by(|&&c| c) {
            let (row, col) = coord;
            if rows.last() != Some(&row) {
                if !rows.is_empty() {
                    offsets.push(cols.len());
                }
                rows.push(row);
            }
            cols.push(col);
            counts.push(group.count() as u64);
        }
        if !rows.is_empty() {
            offsets.push(cols.len());
        }

        tracing::debug!(
            side,
            nrows = rows.len(),
            nnz = cols.len(),
            total = pairs.len(),
            "built sparse view"
        );
        debug_assert_eq!(offsets.len(), rows.len() + 1);
        Self {
            side,
            rows,
            offsets,
            cols,
            counts,
        }
    }

    pub fn side(&self) -> u64 {
        self.side
    }

    /// Number of distinct coordinates.
    pub fn nnz(&self) -> usize {
        self.cols.len()
    }

    /// Total multiplicity, i.e., the number of edges the view was built from.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of rows with at least one edge.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    fn row_range(&self, row: u64) -> Option<(usize, usize)> {
        let i = self.rows.binary_search(&row).ok()?;
        Some((self.offsets[i], self.offsets[i + 1]))
    }

    /// Multiplicity of the exact coordinate `(row, col)`; zero if absent or
    /// outside the matrix.
    pub fn count_at(&self, row: u64, col: u64) -> u64 {
        self.row_range(row)
            .and_then(|(lo, hi)| {
                self.cols[lo..hi]
                    .binary_search(&col)
                    .ok()
                    .map(|j| self.counts[lo + j])
            })
            .unwrap_or(0)
    }

    /// `(col, count)` for each distinct column in `row`, increasing by column.
    pub fn row(&self, row: u64) -> impl Iterator<Item = (u64, u64)> + '_ {
        let (lo, hi) = self.row_range(row).unwrap_or((0, 0));
        self.cols[lo..hi]
            .iter()
            .copied()
            .zip(self.counts[lo..hi].iter().copied())
    }

    /// Edges leaving `row`, counting multiplicity.
    pub fn out_degree(&self, row: u64) -> u64 {
        self.row(row).map(|(_, count)| count).sum()
    }

    /// Every stored cell as `(row, col, count)`, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64, u64)> + '_ {
        self.rows
            .iter()
            .copied()
            .zip(self.offsets.windows(2))
            .flat_map(move |(row, s)| {
                self.cols[s[0]..s[1]]
                    .iter()
                    .copied()
                    .zip(self.counts[s[0]..s[1]].iter().copied())
                    .map(move |(col, count)| (row, col, count))
            })
    }

    /// Summary of out-degrees over the nonempty rows; `None` for an empty
    /// view.
    pub fn out_degree_stats(&self) -> Option<SummaryStats> {
        SummaryStats::from(
            self.offsets
                .windows(2)
                .map(|s| self.counts[s[0]..s[1]].iter().sum::<u64>() as f64),
        )
    }

    /// Edge counts per coarsened region on a `grid x grid` partition of the
    /// matrix, row-major. Cell `(r, c)` of the matrix lands in region
    /// `((r-1) * grid / side, (c-1) * grid / side)`.
    ///
    /// This is what a density plot of the sparsity pattern consumes.
    pub fn coarsen(&self, grid: u64) -> Result<Vec<u64>> {
        if grid == 0 || grid > self.side {
            return Err(KroneckerError::invalid(
                "grid",
                format!("must lie in [1, {}], got {}", self.side, grid),
            ));
        }
        let ncells = grid
            .checked_mul(grid)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| KroneckerError::invalid("grid", "grid x grid does not fit in memory"))?;
        let region = |x: u64| ((u128::from(x - 1) * u128::from(grid)) / u128::from(self.side)) as u64;

        let mut density = vec![0u64; ncells];
        for (row, col, count) in self.iter() {
            let ix = region(row) * grid + region(col);
            density[ix as usize] += count;
        }
        Ok(density)
    }
}
