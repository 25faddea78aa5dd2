// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Experiment sweeps
//!
//! Repeated estimation on bivariate normal samples over a grid of correlations
//! and sample sizes. For every `(ρ, N)` cell the sweep draws `repetitions`
//! independent samples and records the adaptive-partition, non-adaptive and
//! Gaussian estimates together with wall-clock timings.
//!
//! Repetitions run in parallel with `rayon`. Each one owns its RNG (seeded from
//! the sweep seed, the cell and the repetition index), its sample and its plane,
//! so results do not depend on the number of worker threads.

pub mod report;

use std::time::Instant;

use log::{info, warn};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::estimators::approaches::gaussian::GaussianMutualInformation;
use crate::estimators::approaches::partition::{
    AdaptiveConfig, AdaptivePartitioner, ChiSquaredThreshold, NonAdaptivePartition,
    PartitionError, PartitionMutualInformation, Plane, Threshold,
};
use crate::estimators::traits::GlobalValue;
use crate::sampling::{BivariateNormal, JointSampler, SamplingError};

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error("invalid sweep configuration: {0}")]
    Config(&'static str),
}

/// Parameters of a correlation × sample-size sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub sample_sizes: Vec<usize>,
    pub correlations: Vec<f64>,
    pub repetitions: usize,
    pub adaptive: AdaptiveConfig,
    /// Confidence level of the χ² critical values.
    pub confidence: f64,
    /// Grid of the non-adaptive baseline.
    pub bins: [usize; 2],
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sample_sizes: vec![250, 500, 1000, 2000, 10000],
            correlations: vec![0.0, 0.3, 0.6, 0.9],
            repetitions: 50,
            adaptive: AdaptiveConfig::default(),
            confidence: 0.97,
            bins: [50, 50],
            seed: 42,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.sample_sizes.is_empty() || self.correlations.is_empty() {
            return Err(ExperimentError::Config("no sample sizes or correlations"));
        }
        if self.sample_sizes.iter().any(|&n| n < 2) {
            return Err(ExperimentError::Config("sample sizes must be at least 2"));
        }
        if self.repetitions == 0 {
            return Err(ExperimentError::Config("repetitions must be at least 1"));
        }
        for &rho in &self.correlations {
            BivariateNormal::with_correlation(rho)?;
        }
        self.adaptive.validate()?;
        ChiSquaredThreshold::new(self.confidence)?;
        NonAdaptivePartition::new(self.bins)?;
        Ok(())
    }
}

/// Mean and population standard deviation of repeated estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: f64::NAN,
                std: f64::NAN,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        Self {
            mean,
            std: var.sqrt(),
        }
    }
}

/// Mean wall-clock seconds per estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub adaptive: f64,
    pub non_adaptive: f64,
    pub gaussian: f64,
}

/// Result of one `(ρ, N)` cell of [`run_gaussian_sweep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    pub correlation: f64,
    pub sample_size: usize,
    /// Analytic mutual information of the generating distribution.
    pub true_mi: f64,
    pub adaptive: Summary,
    pub non_adaptive: Summary,
    pub gaussian: Summary,
    pub timing: Timing,
}

/// Adaptive estimates for one `r = s` setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityEstimate {
    pub granularity: usize,
    pub summary: Summary,
}

/// Result of one `(ρ, N)` cell of [`run_granularity_sweep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranularityCell {
    pub correlation: f64,
    pub sample_size: usize,
    pub true_mi: f64,
    pub estimates: Vec<GranularityEstimate>,
}

struct Trial {
    estimates: [f64; 3],
    seconds: [f64; 3],
}

/// Compare adaptive, non-adaptive and Gaussian estimates over the configured sweep.
pub fn run_gaussian_sweep(config: &SweepConfig) -> Result<Vec<SweepCell>, ExperimentError> {
    config.validate()?;
    let threshold = ChiSquaredThreshold::new(config.confidence)?;
    let baseline = NonAdaptivePartition::new(config.bins)?;

    let mut cells = Vec::with_capacity(config.correlations.len() * config.sample_sizes.len());
    for (ci, &rho) in config.correlations.iter().enumerate() {
        let dist = BivariateNormal::with_correlation(rho)?;
        for (si, &n) in config.sample_sizes.iter().enumerate() {
            let trials = (0..config.repetitions)
                .into_par_iter()
                .map(|rep| {
                    let mut rng = StdRng::seed_from_u64(trial_seed(config.seed, ci, si, rep));
                    let sample = dist.sample_joint(n, &mut rng);
                    run_trial(sample, &config.adaptive, threshold, &baseline)
                })
                .collect::<Result<Vec<_>, _>>()?;

            let column = |i: usize| -> Vec<f64> { trials.iter().map(|t| t.estimates[i]).collect() };
            let mean_seconds = |i: usize| -> f64 {
                trials.iter().map(|t| t.seconds[i]).sum::<f64>() / trials.len() as f64
            };
            let cell = SweepCell {
                correlation: rho,
                sample_size: n,
                true_mi: dist.mutual_information(),
                adaptive: Summary::from_values(&column(0)),
                non_adaptive: Summary::from_values(&column(1)),
                gaussian: Summary::from_values(&column(2)),
                timing: Timing {
                    adaptive: mean_seconds(0),
                    non_adaptive: mean_seconds(1),
                    gaussian: mean_seconds(2),
                },
            };
            log_cell(&cell);
            cells.push(cell);
        }
    }
    Ok(cells)
}

/// Adaptive estimates for each `r = s = g` in `granularities` over the configured sweep.
pub fn run_granularity_sweep(
    config: &SweepConfig,
    granularities: &[usize],
) -> Result<Vec<GranularityCell>, ExperimentError> {
    config.validate()?;
    if granularities.is_empty() {
        return Err(ExperimentError::Config("no granularities"));
    }
    let configs: Vec<AdaptiveConfig> = granularities
        .iter()
        .map(|&g| {
            let adaptive = AdaptiveConfig {
                r: g,
                s: g,
                ..config.adaptive
            };
            adaptive.validate().map(|_| adaptive)
        })
        .collect::<Result<_, _>>()?;
    let threshold = ChiSquaredThreshold::new(config.confidence)?;

    let mut cells = Vec::with_capacity(config.correlations.len() * config.sample_sizes.len());
    for (ci, &rho) in config.correlations.iter().enumerate() {
        let dist = BivariateNormal::with_correlation(rho)?;
        for (si, &n) in config.sample_sizes.iter().enumerate() {
            let per_rep = (0..config.repetitions)
                .into_par_iter()
                .map(|rep| {
                    let mut rng = StdRng::seed_from_u64(trial_seed(config.seed, ci, si, rep));
                    let sample = dist.sample_joint(n, &mut rng);
                    configs
                        .iter()
                        .map(|adaptive| {
                            PartitionMutualInformation::adaptive(sample.clone(), adaptive, threshold)
                                .map(|est| est.global_value())
                        })
                        .collect::<Result<Vec<f64>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;

            let estimates = granularities
                .iter()
                .enumerate()
                .map(|(gi, &granularity)| {
                    let values: Vec<f64> = per_rep.iter().map(|row| row[gi]).collect();
                    GranularityEstimate {
                        granularity,
                        summary: Summary::from_values(&values),
                    }
                })
                .collect();
            info!("granularity sweep: rho = {rho:.2}, N = {n} done");
            cells.push(GranularityCell {
                correlation: rho,
                sample_size: n,
                true_mi: dist.mutual_information(),
                estimates,
            });
        }
    }
    Ok(cells)
}

fn run_trial<T: Threshold>(
    sample: Array2<f64>,
    adaptive: &AdaptiveConfig,
    threshold: T,
    baseline: &NonAdaptivePartition,
) -> Result<Trial, ExperimentError> {
    let gaussian_start = Instant::now();
    let gaussian = GaussianMutualInformation::new(&sample)?.global_value();
    let gaussian_secs = gaussian_start.elapsed().as_secs_f64();

    let plane = Plane::new(sample)?;

    let adaptive_start = Instant::now();
    let adaptive_partition = AdaptivePartitioner::new(&plane, *adaptive, threshold)?.run()?;
    let adaptive_secs = adaptive_start.elapsed().as_secs_f64();

    let baseline_start = Instant::now();
    let baseline_partition = baseline.build(&plane)?;
    let baseline_secs = baseline_start.elapsed().as_secs_f64();

    let adaptive_mi = PartitionMutualInformation::new(plane.clone(), adaptive_partition).global_value();
    let baseline_mi = PartitionMutualInformation::new(plane, baseline_partition).global_value();

    Ok(Trial {
        estimates: [adaptive_mi, baseline_mi, gaussian],
        seconds: [adaptive_secs, baseline_secs, gaussian_secs],
    })
}

// Distinct, reproducible stream per (cell, repetition).
fn trial_seed(seed: u64, correlation_idx: usize, size_idx: usize, rep: usize) -> u64 {
    seed ^ ((correlation_idx as u64) << 48) ^ ((size_idx as u64) << 32) ^ rep as u64
}

fn log_cell(cell: &SweepCell) {
    info!(
        "rho = {:.2}, N = {}, true MI = {:.4}: adaptive {:.4}, non-adaptive {:.4}, gaussian {:.4}",
        cell.correlation,
        cell.sample_size,
        cell.true_mi,
        cell.adaptive.mean,
        cell.non_adaptive.mean,
        cell.gaussian.mean
    );
    for (name, summary) in [
        ("adaptive", cell.adaptive),
        ("non-adaptive", cell.non_adaptive),
        ("gaussian", cell.gaussian),
    ] {
        if !summary.mean.is_finite() {
            warn!(
                "rho = {:.2}, N = {}: {name} estimate is not finite",
                cell.correlation, cell.sample_size
            );
        }
    }
}
