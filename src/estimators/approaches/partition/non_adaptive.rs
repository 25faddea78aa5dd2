// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::builder::{PartitionBuilder, QuantileInterpolation};
use super::errors::PartitionError;
use super::plane::Plane;
use super::region::Partition;

/// Fixed equal-frequency grid, the comparison baseline for the adaptive scheme.
///
/// One `bins[0] × bins[1]` grid from the marginal quantiles of the whole sample,
/// no testing and no recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonAdaptivePartition {
    bins: [usize; 2],
    interpolation: QuantileInterpolation,
}

impl NonAdaptivePartition {
    pub fn new(bins: [usize; 2]) -> Result<Self, PartitionError> {
        for (name, value) in [("bins[0]", bins[0]), ("bins[1]", bins[1])] {
            if value == 0 {
                return Err(PartitionError::InvalidGranularity { name, value, min: 1 });
            }
        }
        Ok(Self {
            bins,
            interpolation: QuantileInterpolation::Linear,
        })
    }

    pub fn with_interpolation(mut self, interpolation: QuantileInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn bins(&self) -> [usize; 2] {
        self.bins
    }

    pub fn build(&self, plane: &Plane) -> Result<Partition, PartitionError> {
        PartitionBuilder::new(plane)
            .equiprobable_grid(self.bins, self.interpolation)
            .map(Partition::new)
    }
}
