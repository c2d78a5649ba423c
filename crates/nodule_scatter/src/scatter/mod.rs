//! Generation pipeline: configuration, the placement engine, and run events.
pub mod engine;
pub mod events;
pub mod params;

pub use engine::{generate, NoduleGenerator, PlacementEngine, RunResult, RunStats};
pub use params::{IntensityMode, PatchParams, ScatterParams};
