//! Generator configuration.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diameter::LogNormalDiameter;
use crate::domain::Domain;
use crate::error::{Error, Result};

/// How the base placement intensity λ (disks per m²) is chosen.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntensityMode {
    /// Back-solve λ from a desired fraction of the domain covered by disks.
    TargetCover(
        /// Covered area fraction, e.g. `0.064` for 6.4 %.
        f64,
    ),
    /// Use λ directly, in disks per m².
    Density(
        /// Disks per square meter.
        f64,
    ),
}

/// Spatial variability of the intensity.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchParams {
    /// Enables the log-Gaussian multiplier field.
    pub patchy: bool,
    /// Grid cell size for both the intensity field and Poisson sampling (m).
    pub cell: f64,
    /// Log-space standard deviation; larger is patchier, 0 is homogeneous.
    pub sigma: f64,
    /// Number of 3×3 box-blur passes applied to the noise.
    pub smooth_iters: u32,
}

impl Default for PatchParams {
    fn default() -> Self {
        Self {
            patchy: true,
            cell: 1.0,
            sigma: 0.8,
            smooth_iters: 3,
        }
    }
}

/// Full configuration of one generation run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterParams {
    /// Placement rectangle.
    pub domain: Domain,
    /// Cover-fraction or density mode.
    pub intensity: IntensityMode,
    /// Extra hard-core spacing beyond touching (m).
    pub gap: f64,
    /// Placement attempts before a candidate is dropped.
    pub max_attempts_per_candidate: u32,
    /// Patchiness of the intensity field.
    pub patch: PatchParams,
    /// Target mean diameter (m).
    pub diameter_mean: f64,
    /// Target 90th-percentile diameter (m).
    pub diameter_p90: f64,
    /// Seed of the run's random stream.
    pub seed: u64,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            intensity: IntensityMode::TargetCover(0.064),
            gap: 0.0,
            max_attempts_per_candidate: 50,
            patch: PatchParams::default(),
            diameter_mean: 0.018,
            diameter_p90: 0.025,
            seed: 12345,
        }
    }
}

impl ScatterParams {
    /// Creates a [`ScatterParams`] for a `length × width` domain with defaults otherwise.
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            domain: Domain::new(length, width),
            ..Default::default()
        }
    }

    /// Homogeneous variant: same lognormal sizes, no patchiness.
    pub fn uniform(length: f64, width: f64) -> Self {
        Self::new(length, width).with_patchy(false)
    }

    /// Sets the domain extent.
    pub fn with_domain(mut self, length: f64, width: f64) -> Self {
        self.domain = Domain::new(length, width);
        self
    }

    /// Selects cover-fraction mode.
    pub fn with_target_cover(mut self, cover: f64) -> Self {
        self.intensity = IntensityMode::TargetCover(cover);
        self
    }

    /// Selects density mode.
    pub fn with_density(mut self, per_m2: f64) -> Self {
        self.intensity = IntensityMode::Density(per_m2);
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts_per_candidate = attempts;
        self
    }

    pub fn with_patchy(mut self, patchy: bool) -> Self {
        self.patch.patchy = patchy;
        self
    }

    pub fn with_patch_cell(mut self, cell: f64) -> Self {
        self.patch.cell = cell;
        self
    }

    pub fn with_patch_sigma(mut self, sigma: f64) -> Self {
        self.patch.sigma = sigma;
        self
    }

    pub fn with_patch_smooth_iters(mut self, iters: u32) -> Self {
        self.patch.smooth_iters = iters;
        self
    }

    /// Sets the mean and 90th-percentile diameters the size model is fitted to.
    pub fn with_diameter(mut self, mean: f64, p90: f64) -> Self {
        self.diameter_mean = mean;
        self.diameter_p90 = p90;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn extent(&self) -> DVec2 {
        self.domain.extent()
    }

    /// Lognormal size model fitted to the configured moments.
    pub fn diameter_distribution(&self) -> LogNormalDiameter {
        LogNormalDiameter::from_mean_p90(self.diameter_mean, self.diameter_p90)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.domain.length) || !positive(self.domain.width) {
            return Err(Error::invalid("domain length and width must be > 0"));
        }
        if !positive(self.patch.cell) {
            return Err(Error::invalid("patch_cell must be > 0"));
        }
        if !positive(self.diameter_mean) || !positive(self.diameter_p90) {
            return Err(Error::invalid("diameter_mean and diameter_p90 must be > 0"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(Error::invalid("gap must be >= 0"));
        }
        if self.max_attempts_per_candidate == 0 {
            return Err(Error::invalid("max_attempts_per_candidate must be >= 1"));
        }
        if !self.patch.sigma.is_finite() {
            return Err(Error::invalid("patch_sigma must be finite"));
        }
        let rate = match self.intensity {
            IntensityMode::TargetCover(c) => c,
            IntensityMode::Density(d) => d,
        };
        if rate.is_nan() {
            return Err(Error::invalid("target cover / density must not be NaN"));
        }

        Ok(())
    }
}
