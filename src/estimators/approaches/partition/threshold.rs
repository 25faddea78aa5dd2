// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::errors::PartitionError;

/// Critical value `delta(k)` of the independence test run on a `k × k` grid.
///
/// A region is split when its test statistic reaches the critical value.
/// Any `Fn(usize) -> f64` closure is a threshold.
pub trait Threshold {
    fn critical_value(&self, k: usize) -> f64;
}

impl<F> Threshold for F
where
    F: Fn(usize) -> f64,
{
    fn critical_value(&self, k: usize) -> f64 {
        self(k)
    }
}

/// Quantile of the χ² distribution with `k² − 1` degrees of freedom.
///
/// For `k = 1` there are no degrees of freedom and the critical value is
/// infinite, so a 1×1 test never rejects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquaredThreshold {
    confidence: f64,
}

impl ChiSquaredThreshold {
    pub fn new(confidence: f64) -> Result<Self, PartitionError> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(PartitionError::InvalidConfidence(confidence));
        }
        Ok(Self { confidence })
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Threshold for ChiSquaredThreshold {
    fn critical_value(&self, k: usize) -> f64 {
        let freedom = (k * k).saturating_sub(1) as f64;
        match ChiSquared::new(freedom) {
            Ok(dist) => dist.inverse_cdf(self.confidence),
            Err(_) => f64::INFINITY,
        }
    }
}
