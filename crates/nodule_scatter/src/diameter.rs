//! Lognormal nodule size model.
//!
//! Diameters follow `d ~ LogNormal(mu, sigma)`, i.e. `ln(d) ~ Normal(mu, sigma)`.
//! The usual way to build one is [`LogNormalDiameter::from_mean_p90`], which fits
//! `(mu, sigma)` to a target mean and 90th percentile in closed form.
use std::f64::consts::PI;

use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sampling::standard_normal;

/// 90th-percentile quantile of the standard normal distribution.
pub const Z90: f64 = 1.281551566;

/// Fallback sigma used when `(mean, p90)` admit no real solution.
const FALLBACK_SIGMA: f64 = 0.3;

const MIN_INPUT: f64 = 1e-9;
const SIGMA_RANGE: (f64, f64) = (1e-6, 3.0);

/// Standard-normal quantiles for the percentiles the generator asks about.
const QUANTILE_TABLE: [(f64, f64); 5] = [
    (0.90, Z90),
    (0.95, 1.644853627),
    (0.99, 2.326347874),
    (0.995, 2.575829304),
    (0.999, 3.090232306),
];

/// Lognormal diameter distribution in meters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalDiameter {
    /// Mean of `ln(d)`.
    pub mu: f64,
    /// Standard deviation of `ln(d)`; always > 0.
    pub sigma: f64,
}

impl Default for LogNormalDiameter {
    fn default() -> Self {
        Self::from_mean_p90(0.018, 0.025)
    }
}

impl LogNormalDiameter {
    /// Fit from the mean and 90th percentile of the diameter.
    ///
    /// Solves `0.5·σ² − z90·σ + ln(p90/mean) = 0`. When both roots are
    /// positive the smaller one is used, otherwise the larger; the result is
    /// clamped to `[1e-6, 3.0]`. Inconsistent inputs (no real root) fall back to
    /// `mu = ln(mean)`, `sigma = 0.3`. Inputs are floored at `1e-9`.
    pub fn from_mean_p90(mean: f64, p90: f64) -> Self {
        let mean = mean.max(MIN_INPUT);
        let p90 = p90.max(MIN_INPUT);

        let a = 0.5;
        let b = -Z90;
        let c = (p90 / mean).ln();

        let disc = b * b - 4.0 * a * c;
        if disc <= 0.0 {
            return Self {
                mu: mean.ln(),
                sigma: FALLBACK_SIGMA,
            };
        }

        let sqrt_disc = disc.sqrt();
        let s1 = (-b - sqrt_disc) / (2.0 * a);
        let s2 = (-b + sqrt_disc) / (2.0 * a);

        let sigma = if s1 > 0.0 && s2 > 0.0 {
            s1.min(s2)
        } else {
            s1.max(s2)
        }
        .clamp(SIGMA_RANGE.0, SIGMA_RANGE.1);

        Self {
            mu: mean.ln() - 0.5 * sigma * sigma,
            sigma,
        }
    }

    /// Build from the median diameter and the log-space standard deviation.
    pub fn from_median_sigma(median: f64, sigma: f64) -> Self {
        Self {
            mu: median.max(MIN_INPUT).ln(),
            sigma: sigma.max(MIN_INPUT),
        }
    }

    /// Draw one diameter. Always strictly positive.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        (self.mu + self.sigma * standard_normal(rng)).exp()
    }

    /// Expected projected disk area `π/4 · E[d²]`, with `E[d²] = exp(2mu + 2sigma²)`.
    pub fn expected_projected_area(&self) -> f64 {
        let ed2 = (2.0 * self.mu + 2.0 * self.sigma * self.sigma).exp();
        PI * 0.25 * ed2
    }

    /// Approximate quantile `exp(mu + z(p)·sigma)`.
    ///
    /// Only p ∈ {0.90, 0.95, 0.99, 0.995, 0.999} are tabulated; any other p
    /// uses `z = 0` (the median).
    pub fn approx_quantile(&self, p: f64) -> f64 {
        let z = QUANTILE_TABLE
            .iter()
            .find(|(q, _)| (q - p).abs() < 1e-12)
            .map_or(0.0, |&(_, z)| z);
        (self.mu + self.sigma * z).exp()
    }

    /// Mean diameter `exp(mu + sigma²/2)`.
    pub fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    /// Median diameter `exp(mu)`.
    pub fn median(&self) -> f64 {
        self.mu.exp()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn closed_form_fit_reproduces_targets() {
        let dist = LogNormalDiameter::from_mean_p90(0.018, 0.025);
        let mean = (dist.mu + 0.5 * dist.sigma * dist.sigma).exp();
        let p90 = (dist.mu + Z90 * dist.sigma).exp();
        assert!((mean - 0.018).abs() < 1e-6, "mean = {mean}");
        assert!((p90 - 0.025).abs() < 1e-6, "p90 = {p90}");
        assert!(dist.sigma > 0.0);
    }

    #[test]
    fn smaller_positive_root_is_chosen() {
        let dist = LogNormalDiameter::from_mean_p90(0.018, 0.025);
        // The other root is 2·z90 − sigma ≈ 2.27, far from this one.
        assert!(dist.sigma < Z90, "sigma = {}", dist.sigma);
        assert!((dist.sigma - 0.2889).abs() < 1e-3);
    }

    #[test]
    fn inconsistent_inputs_fall_back() {
        // ln(p90/mean) > z90²/2 leaves no real root.
        let dist = LogNormalDiameter::from_mean_p90(0.01, 1.0);
        assert_eq!(dist.sigma, FALLBACK_SIGMA);
        assert!((dist.mu - 0.01f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn p90_below_mean_uses_positive_root() {
        // ln(p90/mean) < 0 makes one root negative; the positive one is kept.
        let dist = LogNormalDiameter::from_mean_p90(0.02, 0.015);
        assert!(dist.sigma >= SIGMA_RANGE.0 && dist.sigma <= SIGMA_RANGE.1);
        assert!((dist.mean() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn non_positive_inputs_are_floored() {
        let dist = LogNormalDiameter::from_mean_p90(0.0, -1.0);
        assert!(dist.mu.is_finite());
        assert!(dist.sigma.is_finite() && dist.sigma > 0.0);
    }

    #[test]
    fn moment_recovery_from_samples() {
        let dist = LogNormalDiameter::from_mean_p90(0.018, 0.025);
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 100_000;
        let mut draws: Vec<f64> = (0..n).map(|_| dist.sample(&mut rng)).collect();
        assert!(draws.iter().all(|&d| d > 0.0));

        let mean = draws.iter().sum::<f64>() / n as f64;
        draws.sort_by(|a, b| a.total_cmp(b));
        let p90 = draws[(0.9 * n as f64) as usize];

        assert!((mean / 0.018 - 1.0).abs() < 0.05, "mean = {mean}");
        assert!((p90 / 0.025 - 1.0).abs() < 0.05, "p90 = {p90}");
    }

    #[test]
    fn expected_area_matches_second_moment() {
        let dist = LogNormalDiameter::from_median_sigma(0.02, 0.5);
        let expected = PI / 4.0 * (2.0 * 0.02f64.ln() + 2.0 * 0.25).exp();
        assert!((dist.expected_projected_area() - expected).abs() < 1e-15);
    }

    #[test]
    fn quantile_lookup_is_exact_only() {
        let dist = LogNormalDiameter::from_median_sigma(0.02, 0.4);
        assert!((dist.approx_quantile(0.5) - 0.02).abs() < 1e-12);
        assert!((dist.approx_quantile(0.97) - 0.02).abs() < 1e-12);
        let q99 = dist.approx_quantile(0.99);
        assert!((q99 - (0.02f64.ln() + 0.4 * 2.326347874).exp()).abs() < 1e-12);
        assert!(dist.approx_quantile(0.999) > q99);
    }
}
