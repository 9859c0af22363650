//! # `kronecker` - crate for Kronecker graph generation
//!
//! Samples edge multisets from the Kronecker (R-MAT) model used by graph
//! benchmarks: an edge over a `2^n x 2^n` adjacency matrix is the Kronecker
//! product of `n` randomly chosen 2x2 one-hot matrices. Edges are
//! accumulated as coordinate lists and can be compressed into a queryable
//! [`SparseView`].

use std::collections::HashMap;

use ordered_float::NotNan;

pub mod coords;
pub mod error;
pub mod generator;
pub mod quadrant;
pub mod sampler;
pub mod sparse;

pub use coords::{Coord, EdgeCoordinateSet};
pub use error::{KroneckerError, Result};
pub use generator::{CancelToken, GeneratorConfig, KroneckerGenerator, MAX_LEVELS};
pub use quadrant::QuadrantMatrix;
pub use sampler::{Probabilities, QuadrantSampler};
pub use sparse::SparseView;

const NSTAT_PERCENTILES: usize = 11;
const STAT_PERCENTILES: [f64; NSTAT_PERCENTILES] = [
    0.0, 0.001, 0.01, 0.05, 0.10, 0.50, 0.90, 0.95, 0.99, 0.999, 1.0,
];

/// Mean and fixed percentiles of a sample, e.g. of vertex degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStats {
    mean: f64,
    percentiles: [f64; NSTAT_PERCENTILES],
}

impl SummaryStats {
    /// NaNs are skipped. Returns `None` if nothing is left.
    pub fn from(it: impl Iterator<Item = f64>) -> Option<Self> {
        let mut v: Vec<NotNan<f64>> = it.filter_map(|f| NotNan::new(f).ok()).collect();
        if v.is_empty() {
            return None;
        }
        v.sort_unstable();
        let mut stats = SummaryStats {
            mean: v.iter().map(|f| f.into_inner()).sum::<f64>() / v.len() as f64,
            percentiles: Default::default(),
        };
        STAT_PERCENTILES
            .iter()
            .copied()
            .map(|f| v[((v.len() - 1) as f64 * f) as usize].into_inner())
            .zip(stats.percentiles.iter_mut())
            .for_each(|(val, p)| *p = val);
        Some(stats)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn min(&self) -> f64 {
        self.percentiles[0]
    }

    pub fn max(&self) -> f64 {
        self.percentiles[NSTAT_PERCENTILES - 1]
    }

    pub fn median(&self) -> f64 {
        self.percentiles[5]
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        let mut map: HashMap<_, _> = STAT_PERCENTILES
            .iter()
            .map(|f| format!("p{:.3}", f))
            .zip(self.percentiles.iter().copied())
            .collect();
        map.insert("mean".to_string(), self.mean);
        map
    }
}
