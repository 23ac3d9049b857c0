//! Validated mining thresholds
//!
//! Both miners decide frequency through [`MinSupport::min_count`], so a
//! single rounding convention applies everywhere: an itemset is frequent
//! when its transaction count reaches `max(1, ceil(min_support * n - ε))`.
//! That is the smallest count whose ratio is at least `min_support`, with
//! `ε` absorbing representation error such as `0.3 * 10 = 3.0000000000000004`.

use crate::error::MiningError;

/// Slack applied before rounding a fractional threshold up to a count
pub const COUNT_EPSILON: f64 = 1e-9;

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Minimum support as a fraction of transactions, in `(0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinSupport(f64);

impl MinSupport {
    pub fn new(value: f64) -> Result<Self, MiningError> {
        if in_unit_interval(value) {
            Ok(Self(value))
        } else {
            Err(MiningError::InvalidSupport { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Smallest transaction count that makes an itemset frequent in a corpus of `n`
    pub fn min_count(self, n: usize) -> usize {
        let scaled = (self.0 * n as f64 - COUNT_EPSILON).ceil();
        (scaled as usize).max(1)
    }
}

impl TryFrom<f64> for MinSupport {
    type Error = MiningError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum rule confidence, in `(0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinConfidence(f64);

impl MinConfidence {
    pub fn new(value: f64) -> Result<Self, MiningError> {
        if in_unit_interval(value) {
            Ok(Self(value))
        } else {
            Err(MiningError::InvalidConfidence { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MinConfidence {
    type Error = MiningError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
