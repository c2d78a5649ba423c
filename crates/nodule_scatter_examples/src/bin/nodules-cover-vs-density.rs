use nodule_scatter::prelude::*;
use nodule_scatter_examples::{init_tracing, render_run_result_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let base = ScatterParams::uniform(4.0, 4.0).with_seed(7);

    // Cover mode back-solves λ from E[area]; density mode uses λ directly.
    let cover = base.clone().with_target_cover(0.15);
    let density = base.with_density(250.0);

    for (params, color, out) in [
        (cover, [120, 190, 90], "nodules-cover.png"),
        (density, [90, 140, 200], "nodules-density.png"),
    ] {
        let engine = PlacementEngine::try_new(params)?;
        let result = engine.run_default();

        let config = RenderConfig::new((800, 800), result.domain()).with_disk_color(color);
        render_run_result_to_png(&result, &config, out)?;
    }

    Ok(())
}
