use nodule_scatter::prelude::*;
use nodule_scatter_examples::{init_tracing, render_run_result_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Same size model and cover target; only the intensity field differs.
    let patchy = ScatterParams::new(10.0, 10.0)
        .with_target_cover(0.064)
        .with_diameter(0.018, 0.025)
        .with_patch_cell(1.0)
        .with_patch_sigma(0.8)
        .with_patch_smooth_iters(3)
        .with_max_attempts(60)
        .with_seed(42);
    let uniform = patchy.clone().with_patchy(false);

    for (params, out) in [
        (patchy, "nodules-patchy.png"),
        (uniform, "nodules-uniform.png"),
    ] {
        let engine = PlacementEngine::try_new(params)?;
        let result = engine.run_default();

        let config = RenderConfig::new((1000, 1000), result.domain()).with_field_shading(true);
        render_run_result_to_png(&result, &config, out)?;
    }

    Ok(())
}
