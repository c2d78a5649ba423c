//! Placement engine: per-cell Poisson counts and hard-core rejection sampling.
//!
//! One run is a single linear pass:
//! 1. base intensity λ from the cover target or density,
//! 2. intensity field over the patch grid,
//! 3. spatial hash sized from the 99th-percentile diameter,
//! 4. for each cell in row-major order, `N ~ Poisson(λ · m · area)` candidates,
//!    each placed by up to `max_attempts_per_candidate` uniform draws.
//!
//! All randomness comes from one `StdRng` seeded per run, consumed in that order.
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::diameter::LogNormalDiameter;
use crate::disk::Disk;
use crate::domain::Domain;
use crate::error::Result;
use crate::field::{CellRect, IntensityField, PatchGrid};
use crate::sampling::{poisson, rand01};
use crate::scatter::events::{EventSink, RejectReason, ScatterEvent, ScatterEventKind};
use crate::scatter::params::{IntensityMode, ScatterParams};
use crate::spatial::SpatialHash;

/// Floor for the expected projected area when back-solving λ.
const AREA_FLOOR: f64 = 1e-12;

/// Smallest spatial hash cell (5 mm).
const MIN_INDEX_CELL: f64 = 0.005;

/// Upper bound on the up-front reservation of the output list.
const MAX_RESERVE: f64 = 1_000_000.0;

/// Strategy interface for anything that turns a seed into placed disks.
pub trait NoduleGenerator: Send + Sync {
    fn generate(&self, seed: u64) -> Vec<Disk>;
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// Base intensity λ in disks per m².
    pub base_intensity: f64,
    /// Cells with positive clipped area.
    pub cells_visited: usize,
    /// Cells skipped for zero clipped area.
    pub cells_skipped: usize,
    /// Candidates drawn across all cells.
    pub candidates: u64,
    /// Candidates whose diameter did not fit their cell.
    pub rejected_oversize: u64,
    /// Candidates dropped after exhausting their attempts.
    pub dropped_after_attempts: u64,
    /// Disks accepted.
    pub placed: usize,
}

/// Result of one generation run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Accepted disks in acceptance order.
    pub disks: Vec<Disk>,
    /// Counters for the run.
    pub stats: RunStats,
    /// Patch grid the candidates were drawn on.
    pub grid: PatchGrid,
    /// Intensity multipliers used for the run, one per grid cell.
    pub field: IntensityField,
}

impl RunResult {
    /// Domain the disks were placed in.
    pub fn domain(&self) -> Domain {
        self.grid.domain
    }

    /// Sum of the projected disk areas.
    pub fn covered_area(&self) -> f64 {
        self.disks.iter().map(Disk::projected_area).sum()
    }

    /// Realized fraction of the domain covered by disks.
    pub fn cover_fraction(&self) -> f64 {
        self.covered_area() / self.grid.domain.area()
    }
}

/// Patchy-lognormal disk generator.
///
/// Holds only validated configuration and the fitted size model; every run
/// owns its RNG, so one engine can serve concurrent runs with distinct seeds.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    params: ScatterParams,
    diameter: LogNormalDiameter,
}

impl PlacementEngine {
    /// Validates `params` and fits the size model.
    pub fn try_new(params: ScatterParams) -> Result<Self> {
        params.validate()?;
        let diameter = params.diameter_distribution();
        Ok(Self { params, diameter })
    }

    pub fn params(&self) -> &ScatterParams {
        &self.params
    }

    pub fn diameter(&self) -> &LogNormalDiameter {
        &self.diameter
    }

    /// Base intensity λ in disks per m².
    pub fn base_intensity(&self) -> f64 {
        match self.params.intensity {
            IntensityMode::TargetCover(cover) => {
                (cover / self.diameter.expected_projected_area().max(AREA_FLOOR)).max(0.0)
            }
            IntensityMode::Density(density) => density.max(0.0),
        }
    }

    /// Spatial hash cell size: the 99th-percentile diameter, at least 5 mm.
    pub fn index_cell_size(&self) -> f64 {
        self.diameter.approx_quantile(0.99).max(MIN_INDEX_CELL)
    }

    pub fn patch_grid(&self) -> PatchGrid {
        PatchGrid::for_domain(self.params.domain, self.params.patch.cell)
    }

    /// Runs with the seed from the parameters.
    pub fn run_default(&self) -> RunResult {
        self.run(self.params.seed)
    }

    /// Runs with `seed`, returning disks and statistics.
    pub fn run(&self, seed: u64) -> RunResult {
        self.run_with_events(seed, &mut ())
    }

    /// Runs with `seed`, reporting progress to `sink`.
    pub fn run_with_events(&self, seed: u64, sink: &mut dyn EventSink) -> RunResult {
        let mut rng = StdRng::seed_from_u64(seed);
        let patch = self.params.patch;

        let lambda = self.base_intensity();
        let grid = self.patch_grid();
        let field = IntensityField::build(
            grid.width,
            grid.height,
            patch.patchy,
            patch.sigma,
            patch.smooth_iters,
            &mut rng,
        );

        let cell_size = self.index_cell_size();
        let mut index = SpatialHash::new(cell_size);
        let reserve = (lambda * self.params.domain.area()).clamp(0.0, MAX_RESERVE);
        let mut disks: Vec<Disk> = Vec::with_capacity(reserve as usize);
        let mut stats = RunStats {
            base_intensity: lambda,
            ..Default::default()
        };

        info!(
            "Generating nodules: seed {}, λ = {:.3}/m², grid {}x{}, index cell {:.4} m.",
            seed, lambda, grid.width, grid.height, cell_size
        );
        if lambda <= 0.0 {
            warn!("Base intensity is {lambda}; no nodules will be placed.");
        }
        if sink.wants(ScatterEventKind::RunStarted) {
            sink.send(ScatterEvent::RunStarted {
                seed,
                base_intensity: lambda,
                grid_size: (grid.width, grid.height),
                index_cell_size: cell_size,
            });
        }

        for (i, j) in grid.cells() {
            let rect = grid.cell_rect(i, j);
            let area = rect.area();
            if area <= 0.0 {
                stats.cells_skipped += 1;
                continue;
            }
            stats.cells_visited += 1;

            let multiplier = field.get(i, j);
            let expected = lambda * multiplier * area;
            let count = poisson(expected, &mut rng);
            debug!(
                "Cell ({}, {}): multiplier {:.3}, expected {:.2}, drew {}.",
                i, j, multiplier, expected, count
            );
            if sink.wants(ScatterEventKind::CellSampled) {
                sink.send(ScatterEvent::CellSampled {
                    cell: (i, j),
                    multiplier,
                    expected,
                    count,
                });
            }

            for _ in 0..count {
                let d = self.diameter.sample(&mut rng);
                stats.candidates += 1;

                if d >= rect.size.x || d >= rect.size.y {
                    stats.rejected_oversize += 1;
                    if sink.wants(ScatterEventKind::CandidateRejected) {
                        sink.send(ScatterEvent::CandidateRejected {
                            cell: (i, j),
                            diameter: d,
                            reason: RejectReason::Oversize,
                        });
                    }
                    continue;
                }

                match self.place_candidate(&rect, d, &index, &disks, &mut rng) {
                    Some((center, attempts)) => {
                        let disk = Disk::new(center.x, center.y, d);
                        let idx = disks.len();
                        index.insert(idx, &disk);
                        disks.push(disk);
                        if sink.wants(ScatterEventKind::DiskPlaced) {
                            sink.send(ScatterEvent::DiskPlaced {
                                index: idx,
                                disk,
                                attempts,
                            });
                        }
                    }
                    None => {
                        stats.dropped_after_attempts += 1;
                        if sink.wants(ScatterEventKind::CandidateRejected) {
                            sink.send(ScatterEvent::CandidateRejected {
                                cell: (i, j),
                                diameter: d,
                                reason: RejectReason::AttemptsExhausted,
                            });
                        }
                    }
                }
            }
        }

        stats.placed = disks.len();
        info!(
            "Placed {} of {} candidates ({} oversize, {} dropped after {} attempts).",
            stats.placed,
            stats.candidates,
            stats.rejected_oversize,
            stats.dropped_after_attempts,
            self.params.max_attempts_per_candidate,
        );
        if stats.candidates > 0 && stats.rejected_oversize == stats.candidates {
            warn!(
                "Every candidate was larger than its cell; patch_cell {} m may be too small.",
                patch.cell
            );
        }
        if sink.wants(ScatterEventKind::RunFinished) {
            sink.send(ScatterEvent::RunFinished { stats });
        }

        RunResult {
            disks,
            stats,
            grid,
            field,
        }
    }

    /// Tries up to `max_attempts_per_candidate` uniform positions inside `rect`
    /// inset by the radius. Returns the accepted center and attempts used.
    fn place_candidate(
        &self,
        rect: &CellRect,
        diameter: f64,
        index: &SpatialHash,
        disks: &[Disk],
        rng: &mut dyn RngCore,
    ) -> Option<(DVec2, u32)> {
        let r = 0.5 * diameter;
        let span = rect.size - DVec2::splat(diameter);

        for attempt in 1..=self.params.max_attempts_per_candidate {
            let x = rect.min.x + r + span.x * rand01(rng);
            let y = rect.min.y + r + span.y * rand01(rng);
            let p = DVec2::new(x, y);

            if index.is_clear(p, r, self.params.gap, disks) {
                return Some((p, attempt));
            }
        }

        None
    }
}

impl NoduleGenerator for PlacementEngine {
    fn generate(&self, seed: u64) -> Vec<Disk> {
        self.run(seed).disks
    }
}

/// Validates `params` and runs one generation with `params.seed`.
pub fn generate(params: &ScatterParams) -> Result<Vec<Disk>> {
    let engine = PlacementEngine::try_new(params.clone())?;
    Ok(engine.generate(params.seed))
}
