// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Adaptive (Darbellay–Vajda) partitioning
//!
//! The partitioner starts from an `r × r` equiprobable grid over the plane and
//! refines it one depth level per pass. For every region on the frontier:
//!
//! 1. Regions holding at most `trivial_leaf_size` points (2 by default) are final.
//! 2. The region is subdivided conditionally into `k × k` cells for
//!    `k = s` and then `k = s²`. With `e = n / k²` the statistic
//!    `Σ (o − e)² / e` is compared against `delta(k)`; the first `k` whose
//!    statistic reaches the critical value rejects independence.
//! 3. A rejected region is replaced by its conditional `r × r` subdivision.
//!    Children with more than `trivial_leaf_size` points form the next frontier,
//!    the others are final. A region no test rejects is final as it is.
//!
//! The run ends when a pass produces no children. A split whose child equals
//! the region itself (possible with tied values) finalizes the region instead,
//! so every split strictly shrinks a bounding box drawn from a finite set of
//! cut values and the loop terminates.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::builder::{PartitionBuilder, QuantileInterpolation};
use super::errors::PartitionError;
use super::plane::Plane;
use super::region::{Partition, Region};
use super::statistic::{ChiSquaredStatistic, IndependenceStatistic};
use super::threshold::Threshold;

/// Parameters of the adaptive partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Granularity of the grid a rejected region is split into.
    pub r: usize,
    /// Granularity of the first test grid; the second test uses `s²`.
    pub s: usize,
    /// Regions with at most this many points are never tested.
    pub trivial_leaf_size: usize,
    /// Quantile rule of the initial grid over the whole plane.
    pub seed_interpolation: QuantileInterpolation,
    /// Quantile rule of conditional region subdivisions (tests and splits).
    pub split_interpolation: QuantileInterpolation,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            r: 2,
            s: 2,
            trivial_leaf_size: 2,
            seed_interpolation: QuantileInterpolation::Linear,
            split_interpolation: QuantileInterpolation::Lower,
        }
    }
}

impl AdaptiveConfig {
    pub fn new(r: usize, s: usize) -> Self {
        Self {
            r,
            s,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.r < 2 {
            return Err(PartitionError::InvalidGranularity {
                name: "r",
                value: self.r,
                min: 2,
            });
        }
        if self.s < 2 {
            return Err(PartitionError::InvalidGranularity {
                name: "s",
                value: self.s,
                min: 2,
            });
        }
        Ok(())
    }

    /// Test granularities in the order they are tried.
    pub fn test_granularities(&self) -> [usize; 2] {
        [self.s, self.s * self.s]
    }
}

/// Index of a region in the partitioner's arena.
pub type RegionId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// Too few points to test.
    Trivial,
    /// No test granularity rejected independence.
    Flat,
    /// Independence was rejected but the split reproduced the region itself,
    /// which happens when tied values pin every cut to the region's bounds.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFate {
    /// Still waiting on the frontier.
    Frontier,
    /// Part of the final partition.
    Leaf(LeafKind),
    /// Replaced by its children; `k` is the test granularity that rejected.
    Split { k: usize },
}

/// Arena record of one region ever created during a run.
#[derive(Debug, Clone)]
pub struct Node {
    pub region: Region,
    pub parent: Option<RegionId>,
    pub depth: usize,
    pub fate: NodeFate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionerState {
    Initializing,
    Iterating { depth: usize },
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub passes: usize,
    pub splits: usize,
    pub trivial_leaves: usize,
    pub flat_leaves: usize,
    pub stalled_leaves: usize,
}

/// Recursive adaptive partitioner over one [`Plane`].
///
/// The frontier and the final partition are index lists into an arena of
/// [`Node`]s; a region id is in at most one of them and a finalized id is never
/// revisited.
pub struct AdaptivePartitioner<'p, T, S = ChiSquaredStatistic> {
    plane: &'p Plane,
    config: AdaptiveConfig,
    threshold: T,
    statistic: S,
    nodes: Vec<Node>,
    frontier: Vec<RegionId>,
    finalized: Vec<RegionId>,
    state: PartitionerState,
    stats: RunStats,
}

impl<'p, T: Threshold> AdaptivePartitioner<'p, T> {
    pub fn new(plane: &'p Plane, config: AdaptiveConfig, threshold: T) -> Result<Self, PartitionError> {
        config.validate()?;
        Ok(Self {
            plane,
            config,
            threshold,
            statistic: ChiSquaredStatistic,
            nodes: Vec::new(),
            frontier: Vec::new(),
            finalized: Vec::new(),
            state: PartitionerState::Initializing,
            stats: RunStats::default(),
        })
    }
}

impl<'p, T: Threshold, S: IndependenceStatistic> AdaptivePartitioner<'p, T, S> {
    /// Replace the independence statistic. Intended to be called before the first step.
    pub fn with_statistic<S2: IndependenceStatistic>(self, statistic: S2) -> AdaptivePartitioner<'p, T, S2> {
        AdaptivePartitioner {
            plane: self.plane,
            config: self.config,
            threshold: self.threshold,
            statistic,
            nodes: self.nodes,
            frontier: self.frontier,
            finalized: self.finalized,
            state: self.state,
            stats: self.stats,
        }
    }

    pub fn plane(&self) -> &'p Plane {
        self.plane
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    pub fn state(&self) -> PartitionerState {
        self.state
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn frontier_ids(&self) -> &[RegionId] {
        &self.frontier
    }

    pub fn finalized_ids(&self) -> &[RegionId] {
        &self.finalized
    }

    pub fn children_of(&self, id: RegionId) -> impl Iterator<Item = (RegionId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == Some(id))
    }

    /// Advance the state machine by one transition and return the new state.
    ///
    /// `Initializing` builds the seed grid, `Iterating` runs one refinement pass,
    /// `Done` is left unchanged.
    pub fn step(&mut self) -> Result<PartitionerState, PartitionError> {
        match self.state {
            PartitionerState::Initializing => self.initialize()?,
            PartitionerState::Iterating { depth } => self.refine(depth)?,
            PartitionerState::Done => {}
        }
        Ok(self.state)
    }

    /// Step until the frontier is exhausted.
    pub fn run_to_completion(&mut self) -> Result<(), PartitionError> {
        while self.state != PartitionerState::Done {
            self.step()?;
        }
        Ok(())
    }

    /// Copy of the regions finalized so far.
    pub fn final_partition(&self) -> Partition {
        Partition::new(
            self.finalized
                .iter()
                .map(|&id| self.nodes[id].region.clone())
                .collect(),
        )
    }

    /// Run the whole algorithm and return the final partition.
    pub fn run(mut self) -> Result<Partition, PartitionError> {
        self.run_to_completion()?;
        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        Ok(Partition::new(
            self.finalized
                .iter()
                .filter_map(|&id| slots[id].take())
                .map(|node| node.region)
                .collect(),
        ))
    }

    fn initialize(&mut self) -> Result<(), PartitionError> {
        let r = self.config.r;
        let seed = PartitionBuilder::new(self.plane).equiprobable_grid([r, r], self.config.seed_interpolation)?;
        let frontier: Vec<RegionId> = seed
            .into_iter()
            .map(|region| self.push_node(region, None, 0))
            .collect();
        debug!(
            "adaptive partition seeded with {} regions over {} points (r = {}, s = {})",
            frontier.len(),
            self.plane.len(),
            self.config.r,
            self.config.s
        );
        self.frontier = frontier;
        self.state = PartitionerState::Iterating { depth: 0 };
        Ok(())
    }

    fn refine(&mut self, depth: usize) -> Result<(), PartitionError> {
        let builder = PartitionBuilder::new(self.plane);
        let current = std::mem::take(&mut self.frontier);
        let mut next = Vec::new();

        for id in current {
            if self.nodes[id].region.count() <= self.config.trivial_leaf_size {
                self.finalize(id, LeafKind::Trivial);
                continue;
            }
            match self.rejecting_granularity(&builder, id)? {
                Some(k) => {
                    let region = &self.nodes[id].region;
                    let children = builder.subdivide(region, self.config.r, self.config.split_interpolation)?;
                    if children
                        .iter()
                        .any(|c| c.xlim() == region.xlim() && c.ylim() == region.ylim())
                    {
                        debug!("region {id} ({} points) cannot be split further", region.count());
                        self.finalize(id, LeafKind::Stalled);
                        continue;
                    }
                    self.nodes[id].fate = NodeFate::Split { k };
                    self.stats.splits += 1;
                    for child in children {
                        let testable = child.count() > self.config.trivial_leaf_size;
                        let child_id = self.push_node(child, Some(id), depth + 1);
                        if testable {
                            next.push(child_id);
                        } else {
                            self.finalize(child_id, LeafKind::Trivial);
                        }
                    }
                }
                None => self.finalize(id, LeafKind::Flat),
            }
        }

        self.stats.passes += 1;
        debug!(
            "adaptive pass {depth}: {} regions on next frontier, {} final so far",
            next.len(),
            self.finalized.len()
        );

        self.frontier = next;
        self.state = if self.frontier.is_empty() {
            debug!(
                "adaptive partition done after {} passes: {} regions ({} splits, {} trivial, {} flat)",
                self.stats.passes,
                self.finalized.len(),
                self.stats.splits,
                self.stats.trivial_leaves,
                self.stats.flat_leaves
            );
            PartitionerState::Done
        } else {
            PartitionerState::Iterating { depth: depth + 1 }
        };
        Ok(())
    }

    /// First test granularity whose statistic reaches the threshold, if any.
    fn rejecting_granularity(
        &self,
        builder: &PartitionBuilder<'_>,
        id: RegionId,
    ) -> Result<Option<usize>, PartitionError> {
        let region = &self.nodes[id].region;
        for k in self.config.test_granularities() {
            let cells = builder.subdivide(region, k, self.config.split_interpolation)?;
            let observed: Vec<usize> = cells.iter().map(Region::count).collect();
            let expected = region.count() as f64 / (k * k) as f64;
            if !(expected > 0.0) {
                return Err(PartitionError::EmptyMarginal);
            }
            let statistic = self.statistic.statistic(&observed, expected);
            let critical = self.threshold.critical_value(k);
            trace!(
                "region {id} ({} points), k = {k}: statistic {statistic:.4} vs critical {critical:.4}",
                region.count()
            );
            if statistic >= critical {
                return Ok(Some(k));
            }
        }
        Ok(None)
    }

    fn push_node(&mut self, region: Region, parent: Option<RegionId>, depth: usize) -> RegionId {
        self.nodes.push(Node {
            region,
            parent,
            depth,
            fate: NodeFate::Frontier,
        });
        self.nodes.len() - 1
    }

    fn finalize(&mut self, id: RegionId, kind: LeafKind) {
        match kind {
            LeafKind::Trivial => self.stats.trivial_leaves += 1,
            LeafKind::Flat => self.stats.flat_leaves += 1,
            LeafKind::Stalled => self.stats.stalled_leaves += 1,
        }
        self.nodes[id].fate = NodeFate::Leaf(kind);
        self.finalized.push(id);
    }
}
