// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use super::errors::PartitionError;
use super::plane::{Interval, Plane};
use super::region::Region;

/// Rule used to pick a quantile between observed values.
///
/// The rule decides on which side of a cut tied or neighbouring points fall, so
/// it changes partitions and estimates observably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileInterpolation {
    /// Round down to the nearest observed value: index `floor((n-1)·j/k)`.
    ///
    /// The index is computed in integer arithmetic. numpy's `'lower'` method
    /// floors the float product `(n-1)·(j/k)` instead, which lands one index
    /// lower whenever that product rounds just below an integer (for example
    /// `100·0.57 = 56.99999999999999`). The two agree whenever `k` is a power of two.
    #[default]
    Lower,
    /// Linear interpolation at virtual index `(n-1)·j/k` (numpy's default).
    Linear,
}

/// Interior cut points splitting `values` into `k` equiprobable parts.
///
/// Returns the `j/k`-quantiles for `j = 1..k-1`; `k = 1` yields no cuts.
pub fn equiprobable_cuts(
    values: &[f64],
    k: usize,
    interpolation: QuantileInterpolation,
) -> Result<Vec<f64>, PartitionError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    equiprobable_cuts_sorted(&sorted, k, interpolation)
}

/// Same as [`equiprobable_cuts`] for input already sorted in ascending order.
pub fn equiprobable_cuts_sorted(
    sorted: &[f64],
    k: usize,
    interpolation: QuantileInterpolation,
) -> Result<Vec<f64>, PartitionError> {
    if k == 0 {
        return Err(PartitionError::InvalidGranularity {
            name: "k",
            value: k,
            min: 1,
        });
    }
    if sorted.is_empty() {
        return Err(PartitionError::EmptyMarginal);
    }
    Ok((1..k)
        .map(|j| quantile_at(sorted, j, k, interpolation))
        .collect())
}

// The virtual index (n-1)·j/k is split into integer part and remainder so the
// lower rule never suffers from floating point rounding.
fn quantile_at(sorted: &[f64], j: usize, k: usize, interpolation: QuantileInterpolation) -> f64 {
    let scaled = j * (sorted.len() - 1);
    let (index, rem) = (scaled / k, scaled % k);
    match interpolation {
        QuantileInterpolation::Lower => sorted[index],
        QuantileInterpolation::Linear if rem == 0 => sorted[index],
        QuantileInterpolation::Linear => {
            let g = rem as f64 / k as f64;
            let (a, b) = (sorted[index], sorted[index + 1]);
            a + g * (b - a)
        }
    }
}

/// Consecutive `[cuts[i], cuts[i+1])` intervals of a full cut sequence.
pub fn cut_intervals(cuts: &[f64]) -> Result<Vec<Interval>, PartitionError> {
    if cuts.len() < 2 {
        return Err(PartitionError::InvalidGranularity {
            name: "cuts",
            value: cuts.len(),
            min: 2,
        });
    }
    cuts.windows(2)
        .map(|w| Interval::new(w[0], w[1]))
        .collect()
}

fn with_bounds(lim: Interval, interior: Vec<f64>) -> Vec<f64> {
    let mut cuts = Vec::with_capacity(interior.len() + 2);
    cuts.push(lim.lo);
    cuts.extend(interior);
    cuts.push(lim.hi);
    cuts
}

/// Turns cut points into grids of [`Region`]s over one [`Plane`].
#[derive(Debug, Clone, Copy)]
pub struct PartitionBuilder<'p> {
    plane: &'p Plane,
}

impl<'p> PartitionBuilder<'p> {
    pub fn new(plane: &'p Plane) -> Self {
        Self { plane }
    }

    pub fn plane(&self) -> &'p Plane {
        self.plane
    }

    /// Cross product of consecutive intervals, x-major.
    ///
    /// `xcuts` and `ycuts` are the full ordered cut sequences including the
    /// outer bounds. Repeated cuts produce zero-extent (empty) regions.
    pub fn grid(&self, xcuts: &[f64], ycuts: &[f64]) -> Result<Vec<Region>, PartitionError> {
        let xs = cut_intervals(xcuts)?;
        let ys = cut_intervals(ycuts)?;
        let plane = self.plane;
        Ok(xs
            .iter()
            .flat_map(|&x| ys.iter().map(move |&y| Region::new(x, y, plane)))
            .collect())
    }

    /// `bins[0] × bins[1]` grid over the whole plane from the marginal quantiles
    /// of all x-values and all y-values.
    pub fn equiprobable_grid(
        &self,
        bins: [usize; 2],
        interpolation: QuantileInterpolation,
    ) -> Result<Vec<Region>, PartitionError> {
        let (xlim, ylim) = (self.plane.xlim(), self.plane.ylim());
        let xcuts = equiprobable_cuts_sorted(self.plane.x_marginal(&xlim), bins[0], interpolation)?;
        let ycuts = equiprobable_cuts_sorted(self.plane.y_marginal(&ylim), bins[1], interpolation)?;
        self.grid(&with_bounds(xlim, xcuts), &with_bounds(ylim, ycuts))
    }

    /// Conditional `k × k` subdivision of `region`.
    ///
    /// x cuts are quantiles of the region's horizontal strip, y cuts quantiles of
    /// its vertical strip, so the grid follows each axis' local density rather
    /// than the region's own joint sample.
    pub fn subdivide(
        &self,
        region: &Region,
        k: usize,
        interpolation: QuantileInterpolation,
    ) -> Result<Vec<Region>, PartitionError> {
        let (xlim, ylim) = (region.xlim(), region.ylim());
        let condx = self.plane.x_marginal(&xlim);
        let condy = self.plane.y_marginal(&ylim);
        if condx.is_empty() || condy.is_empty() {
            return Err(PartitionError::EmptyMarginal);
        }

        let xs = cut_intervals(&with_bounds(xlim, equiprobable_cuts_sorted(condx, k, interpolation)?))?;
        let ys = cut_intervals(&with_bounds(ylim, equiprobable_cuts_sorted(condy, k, interpolation)?))?;
        let plane = self.plane;
        Ok(xs
            .iter()
            .flat_map(|&x| ys.iter().map(move |&y| Region::within(region, x, y, plane)))
            .collect())
    }
}
