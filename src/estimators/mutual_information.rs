// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;

use crate::estimators::approaches::gaussian::GaussianMutualInformation;
use crate::estimators::approaches::partition::{
    AdaptiveConfig, ChiSquaredThreshold, PartitionError, PartitionMutualInformation, Threshold,
};

/// Mutual information estimation methods for two continuous variables
///
/// This struct provides static methods for creating mutual information
/// estimators from an `(N, 2)` sample, one column per variable.
pub struct MutualInformation;

impl MutualInformation {
    /// Creates an adaptive-partition estimator with a χ² independence test
    ///
    /// # Arguments
    ///
    /// * `data` - Sample of shape `(N, 2)`
    /// * `r` - Granularity a rejected region is split into (`>= 2`)
    /// * `s` - Granularity of the first test grid, the second uses `s²` (`>= 2`)
    /// * `confidence` - Confidence level of the χ² critical values, in `(0, 1)`
    ///
    /// # Returns
    ///
    /// The estimator over the finalized adaptive partition, in nats
    pub fn new_adaptive_partition(
        data: Array2<f64>,
        r: usize,
        s: usize,
        confidence: f64,
    ) -> Result<PartitionMutualInformation, PartitionError> {
        let threshold = ChiSquaredThreshold::new(confidence)?;
        PartitionMutualInformation::adaptive(data, &AdaptiveConfig::new(r, s), threshold)
    }

    /// Creates an adaptive-partition estimator with a caller-supplied critical value `delta(k)`
    ///
    /// # Arguments
    ///
    /// * `data` - Sample of shape `(N, 2)`
    /// * `config` - Granularities, leaf size and quantile rules
    /// * `threshold` - Critical value per test granularity, e.g. a closure `|k| ...`
    pub fn new_adaptive_partition_with<T: Threshold>(
        data: Array2<f64>,
        config: &AdaptiveConfig,
        threshold: T,
    ) -> Result<PartitionMutualInformation, PartitionError> {
        PartitionMutualInformation::adaptive(data, config, threshold)
    }

    /// Creates an estimator over a fixed `bins[0] × bins[1]` equal-frequency grid
    pub fn new_non_adaptive_partition(
        data: Array2<f64>,
        bins: [usize; 2],
    ) -> Result<PartitionMutualInformation, PartitionError> {
        PartitionMutualInformation::non_adaptive(data, bins)
    }

    /// Creates the Gaussian (Pearson correlation) maximum-likelihood estimator
    pub fn new_gaussian(data: &Array2<f64>) -> Result<GaussianMutualInformation, PartitionError> {
        GaussianMutualInformation::new(data)
    }
}
