use nodule_scatter::prelude::*;
use nodule_scatter_examples::{init_tracing, summarize};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Dense target: the hard-core constraint starts dropping candidates.
    let base = ScatterParams::new(2.0, 2.0)
        .with_target_cover(0.4)
        .with_patch_cell(0.5)
        .with_seed(3);

    for gap in [0.0, 0.002, 0.005] {
        for attempts in [1, 10, 100] {
            let params = base.clone().with_gap(gap).with_max_attempts(attempts);
            let result = PlacementEngine::try_new(params)?.run_default();
            info!(
                "gap {:.3} m, {:>3} attempts: {}",
                gap,
                attempts,
                summarize(&result)
            );
        }
    }

    // Dropped candidates are reported as events rather than errors.
    let engine = PlacementEngine::try_new(base.with_max_attempts(1))?;
    let mut dropped = 0usize;
    let mut sink = FnSink::new(|event| {
        if let ScatterEvent::CandidateRejected {
            reason: RejectReason::AttemptsExhausted,
            ..
        } = event
        {
            dropped += 1;
        }
    });
    engine.run_with_events(engine.params().seed, &mut sink);
    info!("Single-attempt run dropped {dropped} candidates.");

    Ok(())
}
