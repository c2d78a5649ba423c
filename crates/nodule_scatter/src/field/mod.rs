//! Patch grid and the intensity multiplier field defined over it.
//!
//! The domain is partitioned into square `patch_cell` cells (clipped at the
//! far edges). The same partition drives both the intensity field and the
//! per-cell Poisson sampling in [`crate::scatter::engine`].
pub mod grid;
pub mod intensity;

pub use grid::{CellRect, PatchGrid};
pub use intensity::{box_blur, IntensityField};
