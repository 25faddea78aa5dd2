// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Failures raised while building a plane, a region grid or an adaptive partition.
///
/// Every variant is a precondition failure detected before (or instead of) any
/// numerical work. The algorithm is deterministic, so none of them are retryable
/// with the same inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    #[error("invalid bounds [{lo}, {hi}): lower bound must not exceed upper bound")]
    InvalidBounds { lo: f64, hi: f64 },

    #[error("marginal strip contains no samples")]
    EmptyMarginal,

    #[error("invalid granularity {name} = {value} (must be >= {min})")]
    InvalidGranularity {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("degenerate sample: {0}")]
    DegenerateSample(&'static str),

    #[error("sample must have shape (N, 2), got {ncols} column(s)")]
    DimensionMismatch { ncols: usize },

    #[error("non-finite sample value at row {row}: {value}")]
    NonFiniteSample { row: usize, value: f64 },

    #[error("invalid log base {0} (must be finite, positive and != 1)")]
    InvalidLogBase(f64),

    #[error("invalid confidence level {0} (must lie in (0, 1))")]
    InvalidConfidence(f64),
}
