//! Spatial indexing of accepted disks for hard-core overlap checks.
pub mod hash;

pub use hash::{CellKey, SpatialHash};
