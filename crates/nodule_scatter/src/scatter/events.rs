//! Event types and sinks for observing generation runs.
//!
//! This module defines [`ScatterEvent`] and a set of sinks to emit, collect, or
//! forward events while a [`crate::scatter::engine::PlacementEngine`] runs via
//! [`crate::scatter::engine::PlacementEngine::run_with_events`].
use crate::disk::Disk;
use crate::scatter::engine::RunStats;

/// Why a sampled candidate did not become a disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Diameter does not fit inside the clipped cell; no attempt was made.
    Oversize,
    /// Every placement attempt collided with an accepted disk.
    AttemptsExhausted,
}

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted once the field and index are set up, before any cell is sampled.
    RunStarted {
        /// Seed of the run.
        seed: u64,
        /// Base intensity λ in disks per m².
        base_intensity: f64,
        /// Patch grid dimensions (nx, ny).
        grid_size: (usize, usize),
        /// Spatial hash cell size in meters.
        index_cell_size: f64,
    },

    /// Emitted after the Poisson count of a cell was drawn.
    CellSampled {
        /// Cell coordinates (i, j).
        cell: (usize, usize),
        /// Intensity multiplier of the cell.
        multiplier: f64,
        /// Expected count `λ · multiplier · area`.
        expected: f64,
        /// Drawn candidate count.
        count: u64,
    },

    /// Emitted when a candidate is accepted.
    DiskPlaced {
        /// Position of the disk in the output list.
        index: usize,
        /// The accepted disk.
        disk: Disk,
        /// Attempts used, starting at 1.
        attempts: u32,
    },

    /// Emitted when a candidate is discarded.
    CandidateRejected {
        /// Cell coordinates (i, j).
        cell: (usize, usize),
        /// Sampled diameter of the candidate.
        diameter: f64,
        /// Why it was discarded.
        reason: RejectReason,
    },

    /// Emitted when the run finishes.
    RunFinished {
        /// Aggregated statistics for the run.
        stats: RunStats,
    },
}

/// Discriminant of [`ScatterEvent`], used by sinks to opt out of noisy events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    RunStarted,
    CellSampled,
    DiskPlaced,
    CandidateRejected,
    RunFinished,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::CellSampled { .. } => ScatterEventKind::CellSampled,
            ScatterEvent::DiskPlaced { .. } => ScatterEventKind::DiskPlaced,
            ScatterEvent::CandidateRejected { .. } => ScatterEventKind::CandidateRejected,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ScatterEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
    only: Option<Vec<ScatterEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events of the listed kinds.
    pub fn only(kinds: &[ScatterEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ScatterEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> ScatterEvent {
        ScatterEvent::CandidateRejected {
            cell: (0, 0),
            diameter: 0.02,
            reason: RejectReason::Oversize,
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(rejected());
        sink.send(rejected());
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_vec_sink_only_wants_listed_kinds() {
        let sink = VecSink::only(&[ScatterEventKind::DiskPlaced]);
        assert!(sink.wants(ScatterEventKind::DiskPlaced));
        assert!(!sink.wants(ScatterEventKind::CellSampled));
    }

    #[test]
    fn multi_sink_fans_out_to_interested_sinks() {
        let all = VecSink::new();
        let placed_only = VecSink::only(&[ScatterEventKind::DiskPlaced]);
        let mut multi = MultiSink::with_sinks(vec![all, placed_only]);
        multi.send(rejected());
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 0);
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            ScatterEvent::CandidateRejected { .. }
        ));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(rejected());
        assert_eq!(count, 1);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(ScatterEventKind::RunFinished));
    }
}
