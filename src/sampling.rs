// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Sampling layer
//!
//! Random variables and joint samplers producing the `(N, 2)` sample arrays
//! consumed by the partition estimators.
//!
//! Variables are small expression trees: leaves are [`RandomVar::uniform`] and
//! [`RandomVar::normal`], inner nodes apply a function ([`RandomVar::map`]) or
//! combine several variables pointwise ([`RandomVar::sum`],
//! [`RandomVar::product`]). Cloning a variable shares the underlying node.
//!
//! A [`Joint`] of two variables draws both coordinates in one pass with a
//! [`SampleCache`]: every node shared by `x` and `y` is sampled once, so
//! `x = cos(U)` and `y = sin(U)` see the same draw of `U`. Outside a joint draw
//! each call to [`RandomVar::sample`] is independent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal, Uniform};
use thiserror::Error;

use crate::estimators::approaches::gaussian::gaussian_mutual_information;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("invalid uniform bounds [{a}, {b}): need finite a < b")]
    InvalidUniform { a: f64, b: f64 },

    #[error("invalid normal parameters: mean {mean}, std {std}")]
    InvalidNormal { mean: f64, std: f64 },

    #[error("covariance matrix is not positive definite")]
    NotPositiveDefinite,

    #[error("correlation {0} outside (-1, 1)")]
    InvalidCorrelation(f64),

    #[error("a combination needs at least one variable")]
    EmptyCombination,
}

type MapFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

enum Node {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
    Map(RandomVar, MapFn),
    Sum(Vec<RandomVar>),
    Product(Vec<RandomVar>),
}

/// A scalar random variable.
#[derive(Clone)]
pub struct RandomVar {
    node: Arc<Node>,
}

impl fmt::Debug for RandomVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            Node::Uniform(_) => f.write_str("RandomVar::Uniform"),
            Node::Normal(d) => write!(f, "RandomVar::Normal({}, {})", d.mean(), d.std_dev()),
            Node::Map(inner, _) => f.debug_tuple("RandomVar::Map").field(inner).finish(),
            Node::Sum(vars) => f.debug_tuple("RandomVar::Sum").field(vars).finish(),
            Node::Product(vars) => f.debug_tuple("RandomVar::Product").field(vars).finish(),
        }
    }
}

impl RandomVar {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Uniform on `[a, b)`.
    pub fn uniform(a: f64, b: f64) -> Result<Self, SamplingError> {
        if !(a.is_finite() && b.is_finite() && a < b) {
            return Err(SamplingError::InvalidUniform { a, b });
        }
        Ok(Self::from_node(Node::Uniform(Uniform::new(a, b))))
    }

    pub fn normal(mean: f64, std: f64) -> Result<Self, SamplingError> {
        if !mean.is_finite() {
            return Err(SamplingError::InvalidNormal { mean, std });
        }
        let dist = Normal::new(mean, std).map_err(|_| SamplingError::InvalidNormal { mean, std })?;
        Ok(Self::from_node(Node::Normal(dist)))
    }

    /// `f(self)`, applied to every draw.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::from_node(Node::Map(self.clone(), Arc::new(f)))
    }

    /// Pointwise sum of the variables.
    pub fn sum(vars: &[RandomVar]) -> Result<Self, SamplingError> {
        if vars.is_empty() {
            return Err(SamplingError::EmptyCombination);
        }
        Ok(Self::from_node(Node::Sum(vars.to_vec())))
    }

    /// Pointwise product of the variables.
    pub fn product(vars: &[RandomVar]) -> Result<Self, SamplingError> {
        if vars.is_empty() {
            return Err(SamplingError::EmptyCombination);
        }
        Ok(Self::from_node(Node::Product(vars.to_vec())))
    }

    /// `n` independent draws.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        self.draw(n, rng, None)
    }

    /// `n` draws, reusing (and recording) draws of nodes already in `cache`.
    pub fn sample_cached<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
        cache: &mut SampleCache,
    ) -> Array1<f64> {
        self.draw(n, rng, Some(cache))
    }

    fn key(&self) -> usize {
        Arc::as_ptr(&self.node) as *const () as usize
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
        mut cache: Option<&mut SampleCache>,
    ) -> Array1<f64> {
        if let Some(hit) = cache.as_deref().and_then(|c| c.get(self.key(), n)) {
            return hit.clone();
        }

        let values = match self.node.as_ref() {
            Node::Uniform(dist) => (0..n).map(|_| dist.sample(rng)).collect(),
            Node::Normal(dist) => (0..n).map(|_| dist.sample(rng)).collect(),
            Node::Map(inner, f) => inner.draw(n, rng, cache.as_deref_mut()).mapv(f.as_ref()),
            Node::Sum(vars) => {
                let mut acc = Array1::zeros(n);
                for var in vars {
                    acc += &var.draw(n, rng, cache.as_deref_mut());
                }
                acc
            }
            Node::Product(vars) => {
                let mut acc = Array1::ones(n);
                for var in vars {
                    acc *= &var.draw(n, rng, cache.as_deref_mut());
                }
                acc
            }
        };

        if let Some(cache) = cache {
            cache.draws.insert(self.key(), values.clone());
        }
        values
    }
}

/// Draws recorded during one joint sampling pass, keyed by variable node.
///
/// Passing the cache explicitly replaces a global "keep last sample" switch:
/// sharing only happens where the caller asks for it.
#[derive(Debug, Default)]
pub struct SampleCache {
    draws: HashMap<usize, Array1<f64>>,
}

impl SampleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    fn get(&self, key: usize, n: usize) -> Option<&Array1<f64>> {
        self.draws.get(&key).filter(|values| values.len() == n)
    }
}

/// Source of `(N, 2)` samples of a pair of random variables.
pub trait JointSampler {
    fn sample_joint<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64>;
}

/// Pair of random variables sampled together; shared sub-variables share draws.
#[derive(Debug, Clone)]
pub struct Joint {
    x: RandomVar,
    y: RandomVar,
}

impl Joint {
    pub fn new(x: RandomVar, y: RandomVar) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &RandomVar {
        &self.x
    }

    pub fn y(&self) -> &RandomVar {
        &self.y
    }
}

impl JointSampler for Joint {
    fn sample_joint<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64> {
        let mut cache = SampleCache::new();
        let xs = self.x.sample_cached(n, rng, &mut cache);
        let ys = self.y.sample_cached(n, rng, &mut cache);
        columns(&xs, &ys)
    }
}

/// Bivariate normal distribution, sampled through the Cholesky factor of its covariance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariateNormal {
    mean: [f64; 2],
    cov: [[f64; 2]; 2],
    chol: [f64; 3],
}

impl BivariateNormal {
    /// `cov` must be symmetric positive definite; only its lower triangle is read.
    pub fn new(mean: [f64; 2], cov: [[f64; 2]; 2]) -> Result<Self, SamplingError> {
        let (a, b, c) = (cov[0][0], cov[1][0], cov[1][1]);
        if !(a > 0.0) {
            return Err(SamplingError::NotPositiveDefinite);
        }
        let l11 = a.sqrt();
        let l21 = b / l11;
        let d = c - l21 * l21;
        if !(d > 0.0) {
            return Err(SamplingError::NotPositiveDefinite);
        }
        Ok(Self {
            mean,
            cov: [[a, b], [b, c]],
            chol: [l11, l21, d.sqrt()],
        })
    }

    /// Standard bivariate normal with correlation `rho`.
    pub fn with_correlation(rho: f64) -> Result<Self, SamplingError> {
        if !(rho > -1.0 && rho < 1.0) {
            return Err(SamplingError::InvalidCorrelation(rho));
        }
        Self::new([0.0, 0.0], [[1.0, rho], [rho, 1.0]])
    }

    pub fn mean(&self) -> [f64; 2] {
        self.mean
    }

    pub fn covariance(&self) -> [[f64; 2]; 2] {
        self.cov
    }

    pub fn correlation(&self) -> f64 {
        self.cov[1][0] / (self.cov[0][0] * self.cov[1][1]).sqrt()
    }

    /// Analytic mutual information of the two coordinates, in nats.
    pub fn mutual_information(&self) -> f64 {
        gaussian_mutual_information(self.correlation())
    }
}

impl JointSampler for BivariateNormal {
    fn sample_joint<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64> {
        let [l11, l21, l22] = self.chol;
        let mut out = Array2::zeros((n, 2));
        for mut row in out.rows_mut() {
            let z1: f64 = StandardNormal.sample(rng);
            let z2: f64 = StandardNormal.sample(rng);
            row[0] = self.mean[0] + l11 * z1;
            row[1] = self.mean[1] + l21 * z1 + l22 * z2;
        }
        out
    }
}

fn columns(xs: &Array1<f64>, ys: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((xs.len(), 2), |(i, j)| if j == 0 { xs[i] } else { ys[i] })
}
