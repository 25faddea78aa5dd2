// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::errors::PartitionError;
use super::plane::Plane;
use super::region::Region;

/// Plug-in mutual information of a partition (natural log unless `log_base` says otherwise).
///
/// For every non-empty region with `n_xy` points, `n_x` points in its horizontal
/// strip and `n_y` points in its vertical strip the contribution is
/// `n_xy · ln(N · n_xy / (n_x · n_y))`. The sum is divided by `N · ln(log_base)`.
/// Empty regions are skipped.
pub fn kl_estimate(plane: &Plane, regions: &[Region], log_base: f64) -> Result<f64, PartitionError> {
    let scale = log_scale(log_base)?;
    Ok(weighted_log_ratio_sum(plane, regions) / (plane.len() as f64 * scale))
}

/// `ln(N · n_xy / (n_x · n_y))` of a region, `None` for an empty region.
pub fn region_log_ratio(plane: &Plane, region: &Region) -> Option<f64> {
    let joint_n = region.count();
    if joint_n == 0 {
        return None;
    }
    let x_marg_n = plane.x_marginal(&region.xlim()).len() as f64;
    let y_marg_n = plane.y_marginal(&region.ylim()).len() as f64;
    let n = plane.len() as f64;
    Some((n * joint_n as f64 / (x_marg_n * y_marg_n)).ln())
}

pub(crate) fn weighted_log_ratio_sum(plane: &Plane, regions: &[Region]) -> f64 {
    regions
        .iter()
        .filter_map(|region| region_log_ratio(plane, region).map(|lr| region.count() as f64 * lr))
        .sum()
}

/// `ln(base)`, validating that the base defines a logarithm.
pub(crate) fn log_scale(base: f64) -> Result<f64, PartitionError> {
    if !(base.is_finite() && base > 0.0) || base == 1.0 {
        return Err(PartitionError::InvalidLogBase(base));
    }
    Ok(base.ln())
}
