//! PNG previews of generation runs.
use std::path::Path;

use anyhow::Context;
use glam::DVec2;
use image::{Rgb, RgbImage};
use nodule_scatter::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// How a run is drawn: image size, colors and an optional field underlay.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels (width, height).
    pub image_size: (u32, u32),
    /// Domain being drawn; mapped onto the full image.
    pub domain: Domain,
    pub background: [u8; 3],
    pub disk_color: [u8; 3],
    /// Shade the background by the run's intensity field, darker for lower intensity.
    pub shade_field: bool,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain: Domain) -> Self {
        Self {
            image_size,
            domain,
            background: [24, 28, 34],
            disk_color: [190, 120, 70],
            shade_field: false,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_disk_color(mut self, color: [u8; 3]) -> Self {
        self.disk_color = color;
        self
    }

    pub fn with_field_shading(mut self, shade: bool) -> Self {
        self.shade_field = shade;
        self
    }

    fn pixels_per_meter(&self) -> DVec2 {
        DVec2::new(
            self.image_size.0 as f64 / self.domain.length,
            self.image_size.1 as f64 / self.domain.width,
        )
    }
}

/// Draw every disk of `result` as a filled circle and save a PNG to `out_path`.
pub fn render_run_result_to_png(
    result: &RunResult,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let scale = config.pixels_per_meter();

    if config.shade_field {
        let field = &result.field;
        let cell_size = result.grid.cell_size;
        let max = field.values().iter().copied().fold(f64::MIN_POSITIVE, f64::max);
        for (px, py, pixel) in img.enumerate_pixels_mut() {
            // Image rows grow downwards; domain y grows upwards.
            let x = (px as f64 + 0.5) / scale.x;
            let y = (h - 1 - py) as f64 / scale.y;
            let i = ((x / cell_size) as usize).min(field.width() - 1);
            let j = ((y / cell_size) as usize).min(field.height() - 1);
            let t = (field.get(i, j) / max).clamp(0.0, 1.0);
            *pixel = Rgb(config.background.map(|c| c.saturating_add((t * 60.0) as u8)));
        }
    }

    for disk in &result.disks {
        fill_disk(&mut img, disk, scale, config.disk_color);
    }

    let path = out_path.as_ref();
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}: {}", path.display(), summarize(result));
    Ok(())
}

/// One-line summary of a run's statistics.
pub fn summarize(result: &RunResult) -> String {
    let s = &result.stats;
    format!(
        "{} disks from {} candidates (λ = {:.1}/m², {} oversize, {} dropped), cover {:.2}%",
        s.placed,
        s.candidates,
        s.base_intensity,
        s.rejected_oversize,
        s.dropped_after_attempts,
        100.0 * result.cover_fraction(),
    )
}

fn fill_disk(img: &mut RgbImage, disk: &Disk, scale: DVec2, color: [u8; 3]) {
    let (w, h) = img.dimensions();
    let center = DVec2::new(disk.x * scale.x, h as f64 - disk.y * scale.y);
    let r = (disk.radius() * scale.x).max(0.5);

    let x0 = (center.x - r).floor().max(0.0) as u32;
    let y0 = (center.y - r).floor().max(0.0) as u32;
    let x1 = ((center.x + r).ceil() as u32).min(w);
    let y1 = ((center.y + r).ceil() as u32).min(h);

    for py in y0..y1 {
        for px in x0..x1 {
            let p = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
            if p.distance_squared(center) <= r * r {
                img.put_pixel(px, py, Rgb(color));
            }
        }
    }
}
