//! Kronecker (R-MAT) edge generation.
//!
//! Each edge is the Kronecker product of `levels` independently sampled 2x2
//! one-hot matrices. Since one-hot matrices combine in constant time, an edge
//! costs `O(levels)` work and the `2^levels`-sided adjacency matrix is never
//! touched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::coords::EdgeCoordinateSet;
use crate::error::{KroneckerError, Result};
use crate::quadrant::{kron_all, QuadrantMatrix};
use crate::sampler::{Probabilities, QuadrantSampler};

/// Deepest supported recursion; `2^63` is the largest side whose 1-based
/// coordinates fit in a `u64`.
pub const MAX_LEVELS: u32 = 63;

/// Master seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0xcafef00dd15ea5e5;

/// A cooperative cancellation flag, checked by generation between edges.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Parameters of a generation run. Validated by [`GeneratorConfig::build`].
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Recursion depth `n`; the vertex space has side `2^n`.
    pub levels: u32,
    /// Number of edges `m` to draw.
    pub edge_count: usize,
    pub probabilities: Probabilities,
    /// Master seed for [`KroneckerGenerator::generate_par`].
    pub seed: u64,
    /// Number of logical workers the edges are split across. Fixing this
    /// (rather than the thread count) is what makes parallel output
    /// reproducible.
    pub workers: usize,
}

impl GeneratorConfig {
    pub fn new(levels: u32, edge_count: usize) -> Self {
        Self {
            levels,
            edge_count,
            probabilities: Probabilities::GRAPH500,
            seed: DEFAULT_SEED,
            workers: rayon::current_num_threads(),
        }
    }

    pub fn probabilities(mut self, probabilities: Probabilities) -> Self {
        self.probabilities = probabilities;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn build(self) -> Result<KroneckerGenerator> {
        if self.levels > MAX_LEVELS {
            return Err(KroneckerError::invalid(
                "levels",
                format!("must be at most {}, got {}", MAX_LEVELS, self.levels),
            ));
        }
        if self.workers == 0 {
            return Err(KroneckerError::invalid("workers", "must be positive"));
        }
        let sampler = QuadrantSampler::new(self.probabilities)?;
        Ok(KroneckerGenerator {
            levels: self.levels,
            edge_count: self.edge_count,
            sampler,
            seed: self.seed,
            workers: self.workers,
        })
    }
}

/// Draws edge multisets from the Kronecker graph model.
///
/// Holds no mutable state: all randomness comes from the generator handed
/// to each call, so one instance can be shared across threads.
#[derive(Clone, Debug)]
pub struct KroneckerGenerator {
    levels: u32,
    edge_count: usize,
    sampler: QuadrantSampler,
    seed: u64,
    workers: usize,
}

impl KroneckerGenerator {
    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn sampler(&self) -> &QuadrantSampler {
        &self.sampler
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Side of the generated adjacency matrix, `2^levels`.
    pub fn side(&self) -> u64 {
        1u64 << self.levels
    }

    /// Draws one edge: `levels` quadrant samples, folded left to right, so the
    /// first sample picks the most significant bit of both coordinates.
    pub fn sample_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> QuadrantMatrix {
        kron_all((0..self.levels).map(|_| self.sampler.sample(rng)))
    }

    /// Generates `edge_count` edges sequentially from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EdgeCoordinateSet> {
        self.generate_with_cancel(rng, &CancelToken::new())
    }

    /// As [`KroneckerGenerator::generate`], giving up with
    /// [`KroneckerError::Cancelled`] once `cancel` is set.
    pub fn generate_with_cancel<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<EdgeCoordinateSet> {
        self.generate_edges(rng, self.edge_count, cancel)
    }

    fn generate_edges<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        nedges: usize,
        cancel: &CancelToken,
    ) -> Result<EdgeCoordinateSet> {
        let mut edges = EdgeCoordinateSet::with_capacity(self.side(), nedges);
        for _ in 0..nedges {
            if cancel.is_cancelled() {
                return Err(KroneckerError::Cancelled {
                    generated: edges.len(),
                });
            }
            let edge = self.sample_edge(rng);
            edges.append(edge.coords())?;
        }
        Ok(edges)
    }

    /// The random stream owned by logical worker `worker`.
    pub fn worker_rng(&self, worker: usize) -> Lcg64Xsh32 {
        Lcg64Xsh32::new(self.seed, worker as u64)
    }

    /// Generates `edge_count` edges across `workers` independent workers on
    /// the rayon pool.
    ///
    /// Worker `i` draws the contiguous share `[i*m/w, (i+1)*m/w)` of the
    /// edges from [`KroneckerGenerator::worker_rng`]`(i)`; shares are
    /// concatenated in worker order. With one worker this is exactly
    /// `generate(&mut worker_rng(0))`.
    pub fn generate_par(&self) -> Result<EdgeCoordinateSet> {
        self.generate_par_with_cancel(&CancelToken::new())
    }

    pub fn generate_par_with_cancel(&self, cancel: &CancelToken) -> Result<EdgeCoordinateSet> {
        let m = self.edge_count;
        let nworkers = self.workers;
        tracing::info!(
            levels = self.levels,
            edges = m,
            workers = nworkers,
            seed = self.seed,
            "generating kronecker graph"
        );

        let start = Instant::now();
        let shares = (0..nworkers)
            .into_par_iter()
            .map(|i| {
                let lo = share_bound(i, m, nworkers);
                let hi = share_bound(i + 1, m, nworkers);
                let mut rng = self.worker_rng(i);
                let share = self.generate_edges(&mut rng, hi - lo, cancel)?;
                tracing::debug!(worker = i, edges = share.len(), "worker finished");
                Ok(share)
            })
            .collect::<Result<Vec<_>>>()?;
        let sample_time = start.elapsed();

        let mut edges = EdgeCoordinateSet::with_capacity(self.side(), m);
        for share in shares {
            edges.merge(share)?;
        }
        tracing::info!(
            edges = edges.len(),
            sample_time = ?sample_time,
            total_time = ?start.elapsed(),
            "generated kronecker graph"
        );
        Ok(edges)
    }
}

fn share_bound(worker: usize, m: usize, nworkers: usize) -> usize {
    (worker as u128 * m as u128 / nworkers as u128) as usize
}
