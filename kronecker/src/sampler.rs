//! Weighted sampling of one of the four 2x2 one-hot quadrants.

use rand::Rng;

use crate::error::{KroneckerError, Result};
use crate::quadrant::QuadrantMatrix;

/// Largest tolerated distance between the probability total and 1.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Probability masses of the four quadrant regions, in sampling order.
///
/// `a` places the unit entry at `(1, 2)`, `b` at `(2, 1)`, `c` at `(2, 2)`
/// and `d` at `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probabilities {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Probabilities {
    /// Initiator probabilities used by the Graph500 generator.
    pub const GRAPH500: Self = Self {
        a: 0.57,
        b: 0.19,
        c: 0.19,
        d: 0.05,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    fn validate(&self) -> Result<()> {
        for (name, p) in ["a", "b", "c", "d"].iter().zip(self.as_array()) {
            if !p.is_finite() || p < 0.0 {
                return Err(KroneckerError::invalid(
                    "probabilities",
                    format!("{} = {} is not a finite non-negative number", name, p),
                ));
            }
        }
        let total: f64 = self.as_array().iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(KroneckerError::invalid(
                "probabilities",
                format!("sum to {} instead of 1", total),
            ));
        }
        Ok(())
    }
}

impl Default for Probabilities {
    fn default() -> Self {
        Self::GRAPH500
    }
}

/// Draws 2x2 one-hot matrices according to fixed quadrant probabilities.
///
/// One uniform draw `u` in `[0, 1)` is compared against the cumulative
/// thresholds `t1 <= t2 <= t3`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadrantSampler {
    probabilities: Probabilities,
    thresholds: [f64; 3],
}

impl QuadrantSampler {
    /// Fails with [`KroneckerError::InvalidParameter`] if any probability is
    /// negative or non-finite, or if they do not sum to 1 within
    /// [`SUM_TOLERANCE`].
    pub fn new(probabilities: Probabilities) -> Result<Self> {
        probabilities.validate()?;
        let Probabilities { a, b, c, .. } = probabilities;
        // within tolerance the total may exceed 1 by a hair
        let thresholds = [a.min(1.0), (a + b).min(1.0), (a + b + c).min(1.0)];
        Ok(Self {
            probabilities,
            thresholds,
        })
    }

    pub fn probabilities(&self) -> Probabilities {
        self.probabilities
    }

    /// Maps a uniform value in `[0, 1)` to its quadrant cell.
    pub fn quadrant(&self, u: f64) -> QuadrantMatrix {
        let [t1, t2, t3] = self.thresholds;
        if u < t1 {
            QuadrantMatrix::cell(1, 2)
        } else if u < t2 {
            QuadrantMatrix::cell(2, 1)
        } else if u < t3 {
            QuadrantMatrix::cell(2, 2)
        } else {
            QuadrantMatrix::cell(1, 1)
        }
    }

    /// Samples a side-2 one-hot matrix with a single draw from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QuadrantMatrix {
        self.quadrant(rng.gen::<f64>())
    }
}

impl Default for QuadrantSampler {
    fn default() -> Self {
        let Probabilities { a, b, c, .. } = Probabilities::GRAPH500;
        Self {
            probabilities: Probabilities::GRAPH500,
            thresholds: [a, a + b, a + b + c],
        }
    }
}
