#![forbid(unsafe_code)]
//! nodule_scatter: seeded placement of variable-sized, non-overlapping disks.
//!
//! Modules:
//! - diameter: lognormal size model fitted from a mean and 90th percentile
//! - field: patch grid and log-Gaussian intensity multipliers
//! - spatial: spatial hash for hard-core overlap queries
//! - scatter: parameters, placement engine, run events
//! - sampling: the hand-rolled variates every run draws from
//!
//! The output is a list of pure geometric [`disk::Disk`] records; turning them
//! into simulated bodies is left to the caller.
pub mod diameter;
pub mod disk;
pub mod domain;
pub mod error;
pub mod field;
pub mod sampling;
pub mod scatter;
pub mod spatial;

/// Convenient re-exports for common types. Import with `use nodule_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::diameter::LogNormalDiameter;
    pub use crate::disk::Disk;
    pub use crate::domain::Domain;
    pub use crate::error::{Error, Result};
    pub use crate::field::{IntensityField, PatchGrid};
    pub use crate::scatter::events::{
        EventSink, FnSink, MultiSink, RejectReason, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::{
        generate, IntensityMode, NoduleGenerator, PatchParams, PlacementEngine, RunResult,
        RunStats, ScatterParams,
    };
    pub use crate::spatial::SpatialHash;
}
