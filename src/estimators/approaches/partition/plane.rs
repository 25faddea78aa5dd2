// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::errors::PartitionError;

/// Padding added to the maximum of each axis so that the largest sample
/// still falls inside the half-open plane bounds.
pub const BOUND_EPSILON: f64 = 1e-6;

/// Half-open interval `[lo, hi)` on one axis.
///
/// All containment tests of the partition engine go through [`Interval::contains`],
/// so the boundary convention is the same everywhere. Zero-width intervals are
/// valid and contain nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Result<Self, PartitionError> {
        // Negated comparison also rejects NaN bounds.
        if !(lo <= hi) {
            return Err(PartitionError::InvalidBounds { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value < self.hi
    }

    /// Whether `other` lies completely inside this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }
}

/// The sample plane: an immutable 2-D sample together with its global bounds.
///
/// Besides the points themselves the plane keeps each coordinate sorted once.
/// The x-values of every point inside a vertical band `xlim × ylim_plane` are then a
/// contiguous slice of the sorted x axis, which makes marginal strip queries and
/// conditional quantiles cheap.
#[derive(Debug, Clone)]
pub struct Plane {
    points: Vec<[f64; 2]>,
    sorted_x: Vec<f64>,
    sorted_y: Vec<f64>,
    xlim: Interval,
    ylim: Interval,
}

impl Plane {
    /// Build a plane from an `(N, 2)` array.
    pub fn new(sample: Array2<f64>) -> Result<Self, PartitionError> {
        Self::from_view(sample.view())
    }

    pub fn from_view(sample: ArrayView2<'_, f64>) -> Result<Self, PartitionError> {
        if sample.ncols() != 2 {
            return Err(PartitionError::DimensionMismatch {
                ncols: sample.ncols(),
            });
        }
        let points = sample.rows().into_iter().map(|row| [row[0], row[1]]).collect();
        Self::from_points(points)
    }

    pub fn from_points(points: Vec<[f64; 2]>) -> Result<Self, PartitionError> {
        if points.len() < 2 {
            return Err(PartitionError::DegenerateSample("fewer than 2 points"));
        }
        for (row, p) in points.iter().enumerate() {
            if let Some(&value) = p.iter().find(|v| !v.is_finite()) {
                return Err(PartitionError::NonFiniteSample { row, value });
            }
        }

        let sorted_x = sorted_axis(&points, 0);
        let sorted_y = sorted_axis(&points, 1);
        let xlim = axis_bounds(&sorted_x).ok_or(PartitionError::DegenerateSample(
            "zero spread on the x axis",
        ))?;
        let ylim = axis_bounds(&sorted_y).ok_or(PartitionError::DegenerateSample(
            "zero spread on the y axis",
        ))?;

        Ok(Self {
            points,
            sorted_x,
            sorted_y,
            xlim,
            ylim,
        })
    }

    /// Number of sample points; construction guarantees at least two.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    #[inline]
    pub fn point(&self, index: usize) -> [f64; 2] {
        self.points[index]
    }

    pub fn xlim(&self) -> Interval {
        self.xlim
    }

    pub fn ylim(&self) -> Interval {
        self.ylim
    }

    /// Indices of all points with `x ∈ xlim` and `y ∈ ylim`, in sample order.
    pub fn samples_in(&self, xlim: &Interval, ylim: &Interval) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| xlim.contains(p[0]) && ylim.contains(p[1]))
            .map(|(i, _)| i)
            .collect()
    }

    /// Same query as [`Plane::samples_in`], returning the points themselves.
    pub fn points_in(&self, xlim: &Interval, ylim: &Interval) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .filter(|p| xlim.contains(p[0]) && ylim.contains(p[1]))
            .copied()
            .collect()
    }

    /// Sorted x-values of the horizontal strip `xlim × ylim_plane`.
    pub fn x_marginal(&self, xlim: &Interval) -> &[f64] {
        strip(&self.sorted_x, xlim)
    }

    /// Sorted y-values of the vertical strip `xlim_plane × ylim`.
    pub fn y_marginal(&self, ylim: &Interval) -> &[f64] {
        strip(&self.sorted_y, ylim)
    }
}

fn sorted_axis(points: &[[f64; 2]], axis: usize) -> Vec<f64> {
    let mut values: Vec<f64> = points.iter().map(|p| p[axis]).collect();
    values.sort_by(f64::total_cmp);
    values
}

fn axis_bounds(sorted: &[f64]) -> Option<Interval> {
    let (&min, &max) = (sorted.first()?, sorted.last()?);
    if min == max {
        return None;
    }
    let padded = max + BOUND_EPSILON;
    // For large magnitudes the padding may vanish in rounding.
    let hi = if padded > max { padded } else { max.next_up() };
    Some(Interval { lo: min, hi })
}

fn strip<'a>(sorted: &'a [f64], lim: &Interval) -> &'a [f64] {
    let start = sorted.partition_point(|&v| v < lim.lo);
    let end = sorted.partition_point(|&v| v < lim.hi).max(start);
    &sorted[start..end]
}
