// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Partition-based mutual information
//!
//! Mutual information of two continuous variables estimated from a data-driven
//! partition of the sample plane. The plane is cut into axis-aligned regions and
//! the plug-in statistic
//!
//! Î(X;Y) = (1/N) Σ_R n_R ln(N n_R / (n_x(R) n_y(R)))
//!
//! is evaluated, where `n_R` counts the points inside region `R` and `n_x(R)`,
//! `n_y(R)` count the points in its horizontal and vertical marginal strips.
//!
//! Two partitions are provided:
//!
//! - [`AdaptivePartitioner`]: recursive refinement that only splits regions whose
//!   points are distinguishable from independence (Darbellay–Vajda).
//! - [`NonAdaptivePartition`]: a fixed equal-frequency grid, useful as a baseline.
//!
//! All range tests use half-open intervals `[lo, hi)`; the plane's upper bounds
//! are padded by [`plane::BOUND_EPSILON`] so the largest sample is included.

pub mod adaptive;
pub mod builder;
pub mod errors;
pub mod kl_estimate;
pub mod non_adaptive;
pub mod plane;
pub mod region;
pub mod statistic;
pub mod threshold;

pub use adaptive::{AdaptiveConfig, AdaptivePartitioner, PartitionerState, RunStats};
pub use builder::{PartitionBuilder, QuantileInterpolation, equiprobable_cuts};
pub use errors::PartitionError;
pub use kl_estimate::kl_estimate;
pub use non_adaptive::NonAdaptivePartition;
pub use plane::{Interval, Plane};
pub use region::{Partition, Region, RegionSummary};
pub use statistic::{ChiSquaredStatistic, GStatistic, IndependenceStatistic};
pub use threshold::{ChiSquaredThreshold, Threshold};

use ndarray::{Array1, Array2};

use crate::estimators::traits::{
    GlobalValue, LocalValues, MutualInformationEstimator, OptionalLocalValues,
};
use kl_estimate::{log_scale, region_log_ratio, weighted_log_ratio_sum};

/// Mutual information estimator over a finalized partition of a plane.
///
/// Local values assign every sample the log-ratio of the region containing it;
/// their mean is the global value.
///
/// # Examples
///
/// ```
/// use infopartition::estimators::approaches::partition::{
///     AdaptiveConfig, ChiSquaredThreshold, PartitionMutualInformation,
/// };
/// use infopartition::estimators::traits::GlobalValue;
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
/// let threshold = ChiSquaredThreshold::new(0.97).unwrap();
/// let mi = PartitionMutualInformation::adaptive(data, &AdaptiveConfig::default(), threshold)
///     .unwrap()
///     .global_value();
/// assert!(mi.abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionMutualInformation {
    plane: Plane,
    partition: Partition,
    log_base: f64,
    scale: f64,
}

impl PartitionMutualInformation {
    /// Wrap an existing partition of `plane`, in nats.
    pub fn new(plane: Plane, partition: Partition) -> Self {
        Self {
            plane,
            partition,
            log_base: std::f64::consts::E,
            scale: 1.0,
        }
    }

    /// Build the adaptive partition of `data` and wrap it.
    pub fn adaptive<T: Threshold>(
        data: Array2<f64>,
        config: &AdaptiveConfig,
        threshold: T,
    ) -> Result<Self, PartitionError> {
        let plane = Plane::new(data)?;
        let partition = AdaptivePartitioner::new(&plane, *config, threshold)?.run()?;
        Ok(Self::new(plane, partition))
    }

    /// Build a fixed `bins[0] × bins[1]` equal-frequency grid over `data` and wrap it.
    pub fn non_adaptive(data: Array2<f64>, bins: [usize; 2]) -> Result<Self, PartitionError> {
        let plane = Plane::new(data)?;
        let partition = NonAdaptivePartition::new(bins)?.build(&plane)?;
        Ok(Self::new(plane, partition))
    }

    /// Express results in units of `log_base` (2 for bits).
    pub fn with_base(mut self, log_base: f64) -> Result<Self, PartitionError> {
        self.scale = log_scale(log_base)?;
        self.log_base = log_base;
        Ok(self)
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn log_base(&self) -> f64 {
        self.log_base
    }
}

impl GlobalValue for PartitionMutualInformation {
    fn global_value(&self) -> f64 {
        let n = self.plane.len() as f64;
        weighted_log_ratio_sum(&self.plane, self.partition.regions()) / (n * self.scale)
    }
}

impl LocalValues for PartitionMutualInformation {
    fn local_values(&self) -> Array1<f64> {
        let mut local = Array1::zeros(self.plane.len());
        for region in &self.partition {
            if let Some(log_ratio) = region_log_ratio(&self.plane, region) {
                let value = log_ratio / self.scale;
                for &i in region.samples_inside() {
                    local[i] = value;
                }
            }
        }
        local
    }
}

impl OptionalLocalValues for PartitionMutualInformation {
    fn supports_local(&self) -> bool {
        true
    }

    fn local_values_opt(&self) -> Result<Array1<f64>, &'static str> {
        Ok(self.local_values())
    }
}

impl MutualInformationEstimator for PartitionMutualInformation {}
