// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Goodness-of-fit statistic comparing observed cell counts of a test grid with
/// the count `expected` in every cell under independence.
pub trait IndependenceStatistic {
    fn statistic(&self, observed: &[usize], expected: f64) -> f64;
}

/// Pearson's χ²: `Σ (o − e)² / e`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChiSquaredStatistic;

impl IndependenceStatistic for ChiSquaredStatistic {
    fn statistic(&self, observed: &[usize], expected: f64) -> f64 {
        let sq: f64 = observed
            .iter()
            .map(|&o| {
                let d = o as f64 - expected;
                d * d
            })
            .sum();
        sq / expected
    }
}

/// Likelihood-ratio (G) statistic: `2 Σ o ln(o / e)`, empty cells contribute 0.
///
/// Asymptotically χ² distributed like Pearson's statistic, so it can be used with
/// the same thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GStatistic;

impl IndependenceStatistic for GStatistic {
    fn statistic(&self, observed: &[usize], expected: f64) -> f64 {
        2.0 * observed
            .iter()
            .filter(|&&o| o > 0)
            .map(|&o| {
                let o = o as f64;
                o * (o / expected).ln()
            })
            .sum::<f64>()
    }
}
