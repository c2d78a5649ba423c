//! Spatially-correlated intensity multipliers.
//!
//! A patchy field is white Gaussian noise, smoothed by repeated 3×3 box blurs,
//! exponentiated and renormalised to mean 1. Its log is therefore
//! Gaussian-smoothed noise with standard deviation controlled by `sigma`.
use rand::RngCore;

use crate::sampling::fill_standard_normal;

/// Floor applied to the field mean before normalising.
const MEAN_FLOOR: f64 = 1e-12;

/// Row-major grid of non-negative intensity multipliers.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl IntensityField {
    /// Field with every multiplier equal to 1.
    pub fn uniform(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![1.0; width * height],
        }
    }

    /// Build the multiplier field for a `width × height` grid.
    ///
    /// Without patchiness (or with `sigma <= 0`) the field is uniform and no
    /// random numbers are consumed. Otherwise exactly one standard-normal value
    /// is drawn per cell, in row-major order.
    pub fn build(
        width: usize,
        height: usize,
        patchy: bool,
        sigma: f64,
        smooth_iters: u32,
        rng: &mut dyn RngCore,
    ) -> Self {
        if !patchy || sigma <= 0.0 {
            return Self::uniform(width, height);
        }

        let mut values = vec![0.0; width * height];
        fill_standard_normal(&mut values, rng);
        for _ in 0..smooth_iters {
            box_blur(&mut values, width, height);
        }

        for v in values.iter_mut() {
            *v = (sigma * *v).exp();
        }
        let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
        let norm = mean.max(MEAN_FLOOR);
        for v in values.iter_mut() {
            *v /= norm;
        }

        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Multiplier of cell `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.width + i]
    }

    /// Arithmetic mean of all multipliers.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len().max(1) as f64
    }
}

/// One pass of an edge-clamped 3×3 mean filter over a row-major grid.
///
/// Neighbours outside the grid are left out of the average rather than wrapped
/// or mirrored, so border cells average over 4 or 6 values instead of 9.
pub fn box_blur(values: &mut [f64], width: usize, height: usize) {
    debug_assert_eq!(values.len(), width * height);
    let mut out = vec![0.0; values.len()];

    for y in 0..height {
        let y_lo = y.saturating_sub(1);
        let y_hi = (y + 1).min(height - 1);
        for x in 0..width {
            let x_lo = x.saturating_sub(1);
            let x_hi = (x + 1).min(width - 1);

            let mut sum = 0.0;
            let mut count = 0usize;
            for yy in y_lo..=y_hi {
                for xx in x_lo..=x_hi {
                    sum += values[yy * width + xx];
                    count += 1;
                }
            }
            out[y * width + x] = sum / count.max(1) as f64;
        }
    }

    values.copy_from_slice(&out);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn non_patchy_field_is_exactly_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = IntensityField::build(7, 5, false, 0.8, 3, &mut rng);
        assert_eq!(field.values().len(), 35);
        assert!(field.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn zero_sigma_is_uniform_and_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut untouched = StdRng::seed_from_u64(9);
        let field = IntensityField::build(4, 4, true, 0.0, 3, &mut rng);
        assert!(field.values().iter().all(|&v| v == 1.0));
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn patchy_field_is_normalised_to_mean_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = IntensityField::build(10, 10, true, 0.8, 3, &mut rng);
        assert!((field.mean() - 1.0).abs() < 1e-6, "mean = {}", field.mean());
        assert!(field.values().iter().all(|&v| v > 0.0));
        let distinct = field.values().iter().any(|&v| (v - 1.0).abs() > 1e-3);
        assert!(distinct);
    }

    #[test]
    fn blur_excludes_out_of_grid_neighbours() {
        // Corner averages its 2×2 block, edge its 3×2 block, interior all 9.
        let mut values: Vec<f64> = (0..9).map(f64::from).collect();
        box_blur(&mut values, 3, 3);
        assert!((values[0] - (0.0 + 1.0 + 3.0 + 4.0) / 4.0).abs() < 1e-12);
        assert!((values[1] - (0.0 + 1.0 + 2.0 + 3.0 + 4.0 + 5.0) / 6.0).abs() < 1e-12);
        assert!((values[4] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn blur_preserves_constant_fields() {
        let mut values = vec![2.5; 12];
        box_blur(&mut values, 4, 3);
        assert!(values.iter().all(|&v| (v - 2.5).abs() < 1e-12));
    }

    #[test]
    fn single_cell_patchy_field_is_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = IntensityField::build(1, 1, true, 0.8, 3, &mut rng);
        assert!((field.get(0, 0) - 1.0).abs() < 1e-12);
    }
}
