//! Poisson-distributed counts.
use rand::RngCore;

use crate::sampling::rand01;

/// Largest mean handled by a single Knuth draw.
///
/// Above this, `exp(-lambda)` loses too much precision; larger means are split
/// into chunks whose counts are summed.
const KNUTH_MAX_MEAN: f64 = 32.0;

/// Draw `N ~ Poisson(lambda)`.
///
/// Returns 0 for non-finite or non-positive means.
pub fn poisson(lambda: f64, rng: &mut dyn RngCore) -> u64 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return 0;
    }

    let mut remaining = lambda;
    let mut total = 0;
    while remaining > KNUTH_MAX_MEAN {
        total += poisson_knuth(KNUTH_MAX_MEAN, rng);
        remaining -= KNUTH_MAX_MEAN;
    }
    total + poisson_knuth(remaining, rng)
}

fn poisson_knuth(lambda: f64, rng: &mut dyn RngCore) -> u64 {
    let l = (-lambda).exp();
    let mut k: u64 = 0;
    let mut p: f64 = 1.0;

    loop {
        k += 1;
        p *= rand01(rng);
        if p <= l {
            return k - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn sample_mean_and_variance(lambda: f64, n: usize, seed: u64) -> (f64, f64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let draws: Vec<f64> = (0..n).map(|_| poisson(lambda, &mut rng) as f64).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, var)
    }

    #[test]
    fn degenerate_means_yield_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(poisson(0.0, &mut rng), 0);
        assert_eq!(poisson(-3.0, &mut rng), 0);
        assert_eq!(poisson(f64::NAN, &mut rng), 0);
        assert_eq!(poisson(f64::INFINITY, &mut rng), 0);
    }

    #[test]
    fn small_mean_matches_moments() {
        let (mean, var) = sample_mean_and_variance(3.5, 40_000, 11);
        assert!((mean - 3.5).abs() < 0.05, "mean = {mean}");
        assert!((var - 3.5).abs() < 0.15, "var = {var}");
    }

    #[test]
    fn large_mean_does_not_underflow() {
        // exp(-1000) is 0 in f64; a single Knuth loop would be wrong here.
        let (mean, var) = sample_mean_and_variance(1000.0, 2_000, 5);
        assert!((mean - 1000.0).abs() < 3.0, "mean = {mean}");
        assert!((var / 1000.0 - 1.0).abs() < 0.15, "var = {var}");
    }

    #[test]
    fn same_seed_same_counts() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let xs: Vec<u64> = (0..32).map(|_| poisson(57.0, &mut a)).collect();
        let ys: Vec<u64> = (0..32).map(|_| poisson(57.0, &mut b)).collect();
        assert_eq!(xs, ys);
    }
}
