//! Transforms: pure functions from a buffer window to the series that gets drawn.
//!
//! A transform receives the buffer oldest-first and must return at most as many
//! values as the buffer capacity. Transforms declare the minimum number of
//! samples they need; channels render raw data until that many have arrived.

use crate::error::BoxError;

pub trait Transform {
    /// Minimum buffer length this transform accepts.
    fn min_len(&self) -> usize {
        1
    }

    fn apply(&self, window: &[f64]) -> Result<Vec<f64>, BoxError>;
}

/// Closure adapter with an explicit minimum window length.
pub struct FnTransform<F> {
    min_len: usize,
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, BoxError>,
{
    pub fn new(min_len: usize, f: F) -> Self {
        Self {
            min_len: min_len.max(1),
            f,
        }
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, BoxError>,
{
    fn min_len(&self) -> usize {
        self.min_len
    }

    fn apply(&self, window: &[f64]) -> Result<Vec<f64>, BoxError> {
        (self.f)(window)
    }
}

/// One-dimensional Gaussian smoothing.
///
/// Boundaries are extended by half-sample symmetric reflection
/// (`d c b a | a b c d | d c b a`). The kernel radius is
/// `round(truncate * sigma)`.
#[derive(Debug, Clone)]
pub struct GaussianSmoother {
    sigma: f64,
    weights: Vec<f64>,
}

impl GaussianSmoother {
    pub const DEFAULT_TRUNCATE: f64 = 4.0;
    /// Largest accepted kernel radius, in samples.
    pub const MAX_RADIUS: usize = 1 << 20;

    pub fn new(sigma: f64) -> Result<Self, String> {
        Self::with_truncate(sigma, Self::DEFAULT_TRUNCATE)
    }

    pub fn with_truncate(sigma: f64, truncate: f64) -> Result<Self, String> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(format!("gaussian sigma must be positive, got {sigma}"));
        }
        if !truncate.is_finite() || truncate <= 0.0 {
            return Err(format!("gaussian truncate must be positive, got {truncate}"));
        }
        let reach = truncate * sigma;
        if reach > Self::MAX_RADIUS as f64 {
            return Err(format!(
                "gaussian kernel radius {reach:.0} exceeds {} samples",
                Self::MAX_RADIUS
            ));
        }
        let radius = (reach + 0.5) as usize;
        let mut weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (-0.5 * x * x / (sigma * sigma)).exp()
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        for w in weights.iter_mut() {
            *w /= sum;
        }
        Ok(Self { sigma, weights })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

fn reflect_index(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period) as usize;
    if m < n {
        m
    } else {
        2 * n - 1 - m
    }
}

impl Transform for GaussianSmoother {
    fn min_len(&self) -> usize {
        self.radius() + 1
    }

    fn apply(&self, window: &[f64]) -> Result<Vec<f64>, BoxError> {
        let n = window.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if let Some(bad) = window.iter().find(|v| !v.is_finite()) {
            return Err(format!("non-finite sample {bad} in smoothing window").into());
        }
        let r = self.radius() as isize;
        let out = (0..n as isize)
            .map(|i| {
                self.weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * window[reflect_index(i + k as isize - r, n)])
                    .sum()
            })
            .collect();
        Ok(out)
    }
}

/// Trailing mean over the last `window` samples.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self, String> {
        if window == 0 {
            return Err("moving average window must be at least 1".to_string());
        }
        Ok(Self { window })
    }
}

impl Transform for MovingAverage {
    fn min_len(&self) -> usize {
        self.window
    }

    fn apply(&self, window: &[f64]) -> Result<Vec<f64>, BoxError> {
        let mut out = Vec::with_capacity(window.len());
        let mut acc = 0.0;
        for (i, v) in window.iter().enumerate() {
            acc += v;
            if i >= self.window {
                acc -= window[i - self.window];
            }
            out.push(acc / (i + 1).min(self.window) as f64);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_index_mirrors_edges() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
    }

    #[test]
    fn gaussian_radius_follows_truncate() {
        let g = GaussianSmoother::new(3.0).unwrap();
        assert_eq!(g.radius(), 12);
        assert_eq!(g.min_len(), 13);
    }
}
