// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infopartition
//!
//! Mutual information between two continuous variables estimated from adaptive
//! partitions of the sample plane (Darbellay–Vajda), with non-adaptive and
//! Gaussian baselines.
//!
//! ## Quick Start
//!
//! ```rust
//! use infopartition::estimators::mutual_information::MutualInformation;
//! use infopartition::estimators::traits::GlobalValue;
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
//!
//! // Adaptive partition with r = s = 2 and a 97% χ² test
//! let adaptive = MutualInformation::new_adaptive_partition(data.clone(), 2, 2, 0.97).unwrap();
//! assert!(adaptive.global_value().abs() < 1e-12);
//!
//! // Fixed 2×2 equal-frequency grid
//! let grid = MutualInformation::new_non_adaptive_partition(data, [2, 2]).unwrap();
//! assert!(grid.global_value().abs() < 1e-12);
//! ```
//!
//! ## Estimators
//!
//! | Estimator | Global | Local | Notes |
//! |-----------|--------|-------|-------|
//! | Adaptive partition | ✅ | ✅ | χ² or G statistic, pluggable critical values |
//! | Non-adaptive partition | ✅ | ✅ | Equal-frequency `kx × ky` grid |
//! | Gaussian | ✅ | ❌ | `-½ ln(1 − ρ²)` from the sample correlation |
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: the `MutualInformation` factory
//! 2. **Estimation Approaches**: partition estimators and the Gaussian model
//! 3. **Core Infrastructure**: plane, regions, quantile grids and the shared traits
//! 4. **Experiments**: samplers, parameter sweeps, LaTeX tables and SVG plots
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: partitioner passes at `debug`,
//! individual independence tests at `trace` and sweep progress at `info`.
//! Install any logger (e.g. `env_logger`) to see them.

pub mod estimators;
pub mod experiment;
pub mod plotting;
pub mod sampling;
