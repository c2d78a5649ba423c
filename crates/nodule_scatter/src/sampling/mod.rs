//! Random variates used by the generator.
//!
//! Every draw goes through a `&mut dyn RngCore` so the whole run consumes a
//! single stream in a fixed order. Each variate consumes a fixed number of raw
//! draws, so a seed maps to the same output on every platform.
use rand::RngCore;

pub mod poisson;

pub use poisson::poisson;

/// Scale mapping the top 53 bits of a `u64` onto `[0, 1)`.
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * F64_UNIT
}

/// Draw a pair of independent standard-normal values (Box–Muller).
///
/// Consumes exactly two uniform draws.
pub fn standard_normal_pair(rng: &mut dyn RngCore) -> (f64, f64) {
    // 1 - U lies in (0, 1], so the logarithm stays finite.
    let u1 = 1.0 - rand01(rng);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = std::f64::consts::TAU * u2;

    (r * theta.cos(), r * theta.sin())
}

/// Draw a single standard-normal value, discarding the Box–Muller partner.
#[inline]
pub fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    standard_normal_pair(rng).0
}

/// Fill `out` with standard-normal values, two per Box–Muller transform.
pub fn fill_standard_normal(out: &mut [f64], rng: &mut dyn RngCore) {
    for pair in out.chunks_mut(2) {
        let (a, b) = standard_normal_pair(rng);
        pair[0] = a;
        if let Some(second) = pair.get_mut(1) {
            *second = b;
        }
    }
}
