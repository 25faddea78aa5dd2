// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use super::errors::PartitionError;
use super::plane::{Interval, Plane};

/// Axis-aligned rectangle over a [`Plane`] with cached point membership.
///
/// A region stores the indices of the plane points it contains. It never changes
/// after construction: refinement produces new child regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    xlim: Interval,
    ylim: Interval,
    samples_inside: Vec<usize>,
}

impl Region {
    pub fn new(xlim: Interval, ylim: Interval, plane: &Plane) -> Self {
        let samples_inside = plane.samples_in(&xlim, &ylim);
        Self {
            xlim,
            ylim,
            samples_inside,
        }
    }

    /// Build a region from raw `[lo, hi)` pairs, validating both axes.
    pub fn from_bounds(
        xlim: [f64; 2],
        ylim: [f64; 2],
        plane: &Plane,
    ) -> Result<Self, PartitionError> {
        let xlim = Interval::new(xlim[0], xlim[1])?;
        let ylim = Interval::new(ylim[0], ylim[1])?;
        Ok(Self::new(xlim, ylim, plane))
    }

    /// The region covering the whole plane.
    pub fn whole(plane: &Plane) -> Self {
        Self {
            xlim: plane.xlim(),
            ylim: plane.ylim(),
            samples_inside: (0..plane.len()).collect(),
        }
    }

    /// Child region whose membership is filtered from `parent` instead of the full plane.
    /// The child bounds must lie inside the parent bounds.
    pub(crate) fn within(parent: &Region, xlim: Interval, ylim: Interval, plane: &Plane) -> Self {
        debug_assert!(parent.xlim.encloses(&xlim) && parent.ylim.encloses(&ylim));
        let samples_inside = parent
            .samples_inside
            .iter()
            .copied()
            .filter(|&i| {
                let [x, y] = plane.point(i);
                xlim.contains(x) && ylim.contains(y)
            })
            .collect();
        Self {
            xlim,
            ylim,
            samples_inside,
        }
    }

    /// Horizontal marginal strip: this region's x-range over the plane's full y-range.
    pub fn x_strip(&self, plane: &Plane) -> Region {
        Region::new(self.xlim, plane.ylim(), plane)
    }

    /// Vertical marginal strip: the plane's full x-range over this region's y-range.
    pub fn y_strip(&self, plane: &Plane) -> Region {
        Region::new(plane.xlim(), self.ylim, plane)
    }

    pub fn xlim(&self) -> Interval {
        self.xlim
    }

    pub fn ylim(&self) -> Interval {
        self.ylim
    }

    pub fn samples_inside(&self) -> &[usize] {
        &self.samples_inside
    }

    pub fn count(&self) -> usize {
        self.samples_inside.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_inside.is_empty()
    }

    pub fn contains_point(&self, point: [f64; 2]) -> bool {
        self.xlim.contains(point[0]) && self.ylim.contains(point[1])
    }

    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            xlim: [self.xlim.lo, self.xlim.hi],
            ylim: [self.ylim.lo, self.ylim.hi],
            count: self.count(),
        }
    }
}

/// Plain descriptor of a region, as handed to plotting and reporting collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub xlim: [f64; 2],
    pub ylim: [f64; 2],
    pub count: usize,
}

/// A set of disjoint regions tiling the plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    regions: Vec<Region>,
}

impl Partition {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sum of point counts over all regions; equals `N` for a proper tiling.
    pub fn total_count(&self) -> usize {
        self.regions.iter().map(Region::count).sum()
    }

    pub fn summaries(&self) -> Vec<RegionSummary> {
        self.regions.iter().map(Region::summary).collect()
    }
}

impl From<Vec<Region>> for Partition {
    fn from(regions: Vec<Region>) -> Self {
        Self::new(regions)
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
