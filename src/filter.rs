//! # Channel Filters
//!
//! Gaussian smoothing and derivative-of-Gaussian filters applied to channel
//! data before display or export.
//!
//! | Filter        | 1-D label | 2-D label         | Axis   | Edge mode |
//! |---------------|-----------|-------------------|--------|-----------|
//! | `None`        | No filter | No filter         |        |           |
//! | `DerivativeY` | dy/dx     | dz/dy             | 0      | reflect   |
//! | `DerivativeX` |           | dz/dx             | 1      | reflect   |
//! | `Gaussian`    |           | Gaussian filter   | all    | nearest   |
//!
//! Filters see the array exactly as returned by
//! [`SweepDescriptor::channel_data`](crate::sweep::SweepDescriptor::channel_data),
//! so the axis numbering follows the requested orientation.

use std::fmt;

use log::debug;
use ndarray::{Array1, ArrayD, ArrayView1, ArrayViewMut1, Axis, Zip};
use serde::{Deserialize, Serialize};

use crate::sweep::SweepError;

/// Truncation of the Gaussian kernel, in standard deviations
pub const TRUNCATE: f64 = 4.0;

/// Largest kernel radius, in samples
pub const MAX_KERNEL_RADIUS: usize = 1 << 16;

/// Kind of filter applied to channel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Data is returned unchanged
    None,
    /// Derivative of Gaussian along axis 1
    DerivativeX,
    /// Derivative of Gaussian along axis 0
    DerivativeY,
    /// Gaussian filter of the given order on every axis
    Gaussian,
}

impl FilterKind {
    /// Filters defined for 1-D data
    pub const ONE_D: [FilterKind; 2] = [FilterKind::None, FilterKind::DerivativeY];

    /// Filters defined for 2-D data
    pub const TWO_D: [FilterKind; 4] = [
        FilterKind::None,
        FilterKind::DerivativeX,
        FilterKind::DerivativeY,
        FilterKind::Gaussian,
    ];

    /// Filters available for data of the given rank
    pub fn available(dim: usize) -> &'static [FilterKind] {
        match dim {
            1 => &Self::ONE_D,
            2 => &Self::TWO_D,
            _ => &[],
        }
    }

    /// Whether the filter is defined for data of the given rank
    pub fn supports(self, dim: usize) -> bool {
        Self::available(dim).contains(&self)
    }

    /// Display label for data of the given rank
    pub fn label(self, dim: usize) -> &'static str {
        match (self, dim) {
            (FilterKind::None, _) => "No filter",
            (FilterKind::DerivativeY, 1) => "dy/dx",
            (FilterKind::DerivativeY, _) => "dz/dy",
            (FilterKind::DerivativeX, _) => "dz/dx",
            (FilterKind::Gaussian, _) => "Gaussian filter",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(2))
    }
}

/// Parameters shared by all filters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Standard deviation of the kernel, in samples (at least 1)
    pub sigma: f64,
    /// Derivative order (0 smooths only)
    pub order: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            order: 1,
        }
    }
}

impl FilterParams {
    fn validate(&self) -> Result<(), SweepError> {
        if !self.sigma.is_finite() || self.sigma < 1.0 {
            return Err(SweepError::InvalidParameter(format!(
                "sigma must be at least 1, got {}",
                self.sigma
            )));
        }
        if TRUNCATE * self.sigma + 0.5 >= (MAX_KERNEL_RADIUS + 1) as f64 {
            return Err(SweepError::InvalidParameter(format!(
                "sigma {} needs a kernel radius above {} samples",
                self.sigma, MAX_KERNEL_RADIUS
            )));
        }
        Ok(())
    }
}

/// How samples beyond the array bounds are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Mirror about the edge, repeating the edge sample (`d c b a | a b c d`)
    Reflect,
    /// Repeat the edge sample (`a a a | a b c d`)
    Nearest,
}

type FilterFn = fn(&ArrayD<f64>, FilterParams) -> ArrayD<f64>;

const DISPATCH: [(FilterKind, FilterFn); 4] = [
    (FilterKind::None, identity),
    (FilterKind::DerivativeX, derivative_x),
    (FilterKind::DerivativeY, derivative_y),
    (FilterKind::Gaussian, smooth),
];

fn identity(data: &ArrayD<f64>, _: FilterParams) -> ArrayD<f64> {
    data.clone()
}

fn derivative_x(data: &ArrayD<f64>, p: FilterParams) -> ArrayD<f64> {
    gaussian_filter1d(data, p.sigma, p.order, Axis(1), EdgeMode::Reflect)
}

fn derivative_y(data: &ArrayD<f64>, p: FilterParams) -> ArrayD<f64> {
    gaussian_filter1d(data, p.sigma, p.order, Axis(0), EdgeMode::Reflect)
}

fn smooth(data: &ArrayD<f64>, p: FilterParams) -> ArrayD<f64> {
    gaussian_filter(data, p.sigma, p.order, EdgeMode::Nearest)
}

/// Apply a filter to channel data
///
/// Fails with [`SweepError::UnsupportedDimension`] when the filter is not
/// defined for the rank of `data`, and with [`SweepError::InvalidParameter`]
/// for a sigma below 1 or one whose kernel exceeds [`MAX_KERNEL_RADIUS`].
pub fn apply_filter(
    kind: FilterKind,
    data: &ArrayD<f64>,
    params: FilterParams,
) -> Result<ArrayD<f64>, SweepError> {
    if !kind.supports(data.ndim()) {
        return Err(SweepError::UnsupportedDimension {
            operation: kind.label(data.ndim()).to_string(),
            dim: data.ndim(),
        });
    }
    params.validate()?;

    debug!(
        "Applying {} (sigma {}, order {}) to {:?} array",
        kind.label(data.ndim()),
        params.sigma,
        params.order,
        data.shape()
    );

    let apply = DISPATCH
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(identity as FilterFn, |(_, f)| *f);
    Ok(apply(data, params))
}

/// Sampled Gaussian kernel of the given derivative order
///
/// Returns `2 * radius + 1` weights for offsets `-radius..=radius`. The
/// zero-order kernel is normalized to sum to 1; higher orders multiply it by
/// the Hermite-like polynomial obtained by differentiating `order` times.
pub fn gaussian_kernel1d(sigma: f64, order: usize, radius: usize) -> Vec<f64> {
    let sigma2 = sigma * sigma;
    let offsets: Vec<f64> = (0..=2 * radius).map(|i| i as f64 - radius as f64).collect();

    let mut phi: Vec<f64> = offsets.iter().map(|x| (-0.5 / sigma2 * x * x).exp()).collect();
    let total: f64 = phi.iter().sum();
    phi.iter_mut().for_each(|v| *v /= total);

    if order == 0 {
        return phi;
    }

    // q holds polynomial coefficients; each pass maps q(x) to q'(x) - x q(x) / sigma^2
    let mut q = vec![0.0; order + 1];
    q[0] = 1.0;
    for _ in 0..order {
        let next: Vec<f64> = (0..=order)
            .map(|k| {
                let derivative = if k < order { (k + 1) as f64 * q[k + 1] } else { 0.0 };
                let product = if k > 0 { -q[k - 1] / sigma2 } else { 0.0 };
                derivative + product
            })
            .collect();
        q = next;
    }

    offsets
        .iter()
        .zip(phi)
        .map(|(&x, p)| {
            let poly: f64 = q.iter().rev().fold(0.0, |acc, &c| acc * x + c);
            poly * p
        })
        .collect()
}

/// Kernel radius `⌊4σ + 0.5⌋`, capped at [`MAX_KERNEL_RADIUS`]
pub fn kernel_radius(sigma: f64) -> usize {
    ((TRUNCATE * sigma + 0.5) as usize).min(MAX_KERNEL_RADIUS)
}

/// One-dimensional Gaussian filter along `axis`
pub fn gaussian_filter1d(
    data: &ArrayD<f64>,
    sigma: f64,
    order: usize,
    axis: Axis,
    mode: EdgeMode,
) -> ArrayD<f64> {
    let radius = kernel_radius(sigma);
    let mut weights = Array1::from(gaussian_kernel1d(sigma, order, radius));
    weights.invert_axis(Axis(0));

    let mut output = ArrayD::zeros(data.raw_dim());
    Zip::from(data.lanes(axis))
        .and(output.lanes_mut(axis))
        .for_each(|src, dst| correlate1d(src, weights.view(), radius, mode, dst));
    output
}

/// Gaussian filter applied successively along every axis
pub fn gaussian_filter(data: &ArrayD<f64>, sigma: f64, order: usize, mode: EdgeMode) -> ArrayD<f64> {
    (0..data.ndim()).fold(data.clone(), |acc, axis| {
        gaussian_filter1d(&acc, sigma, order, Axis(axis), mode)
    })
}

fn correlate1d(
    src: ArrayView1<'_, f64>,
    weights: ArrayView1<'_, f64>,
    radius: usize,
    mode: EdgeMode,
    mut dst: ArrayViewMut1<'_, f64>,
) {
    let n = src.len();
    for (i, out) in dst.iter_mut().enumerate() {
        *out = weights
            .iter()
            .enumerate()
            .map(|(k, w)| {
                let j = i as isize + k as isize - radius as isize;
                w * src[extend_index(j, n, mode)]
            })
            .sum();
    }
}

fn extend_index(i: isize, n: usize, mode: EdgeMode) -> usize {
    let last = n as isize - 1;
    match mode {
        EdgeMode::Nearest => i.clamp(0, last) as usize,
        EdgeMode::Reflect => {
            let period = 2 * n as isize;
            let m = i.rem_euclid(period);
            if m < n as isize {
                m as usize
            } else {
                (period - 1 - m) as usize
            }
        }
    }
}
