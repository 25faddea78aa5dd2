// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1};

use crate::estimators::approaches::partition::PartitionError;
use crate::estimators::traits::{GlobalValue, MutualInformationEstimator, OptionalLocalValues};

/// Mutual information of a bivariate normal with correlation `rho`: `-½ ln(1 − ρ²)`.
pub fn gaussian_mutual_information(rho: f64) -> f64 {
    -0.5 * (1.0 - rho * rho).ln()
}

/// Sample Pearson correlation; `None` for mismatched lengths, fewer than 2
/// points or a variable with zero variance.
pub fn pearson_correlation(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (x.mean()?, y.mean()?);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y.iter()) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Maximum-likelihood mutual information under a bivariate Gaussian model.
///
/// Plugs the sample Pearson correlation into [`gaussian_mutual_information`].
/// Exact for Gaussian data and a common reference for the partition estimators.
#[derive(Debug, Clone, Copy)]
pub struct GaussianMutualInformation {
    rho: f64,
}

impl GaussianMutualInformation {
    pub fn new(data: &Array2<f64>) -> Result<Self, PartitionError> {
        if data.ncols() != 2 {
            return Err(PartitionError::DimensionMismatch {
                ncols: data.ncols(),
            });
        }
        if data.nrows() < 2 {
            return Err(PartitionError::DegenerateSample("fewer than 2 points"));
        }
        let rho = pearson_correlation(data.column(0), data.column(1))
            .ok_or(PartitionError::DegenerateSample("zero variance on an axis"))?;
        Ok(Self { rho })
    }

    pub fn from_columns(x: &Array1<f64>, y: &Array1<f64>) -> Result<Self, PartitionError> {
        let rho = pearson_correlation(x.view(), y.view()).ok_or(
            PartitionError::DegenerateSample("mismatched lengths, fewer than 2 points or zero variance"),
        )?;
        Ok(Self { rho })
    }

    pub fn correlation(&self) -> f64 {
        self.rho
    }
}

impl GlobalValue for GaussianMutualInformation {
    fn global_value(&self) -> f64 {
        gaussian_mutual_information(self.rho)
    }
}

impl OptionalLocalValues for GaussianMutualInformation {
    fn supports_local(&self) -> bool {
        false
    }

    fn local_values_opt(&self) -> Result<Array1<f64>, &'static str> {
        Err("Local values are not available for the Gaussian model estimator.")
    }
}

impl MutualInformationEstimator for GaussianMutualInformation {}
