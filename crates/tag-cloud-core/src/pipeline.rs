use crate::config::CloudConfig;
use crate::error::Result;
use crate::generator::SpiralGenerator;
use crate::layouter::CircularCloudLayouter;
use crate::model::{Rect, Size};
use std::time::Instant;
use tracing::{info, instrument};

/// Lay out `sizes` in order around the configured center using a spiral generator.
///
/// The configured limits apply to every placement; the first placement that hits a limit
/// aborts the whole run.
pub fn layout_cloud<I>(sizes: I, cfg: &CloudConfig) -> Result<CircularCloudLayouter<SpiralGenerator>>
where
    I: IntoIterator<Item = Size>,
{
    layout_cloud_with(sizes, cfg, |_, _| {})
}

/// Same as [`layout_cloud`], calling `on_placed(index, &rect)` after each accepted rectangle.
#[instrument(skip_all, fields(step = cfg.step, center_x = cfg.center_x, center_y = cfg.center_y))]
pub fn layout_cloud_with<I, F>(
    sizes: I,
    cfg: &CloudConfig,
    mut on_placed: F,
) -> Result<CircularCloudLayouter<SpiralGenerator>>
where
    I: IntoIterator<Item = Size>,
    F: FnMut(usize, &Rect),
{
    cfg.validate()?;
    let start = Instant::now();
    let center = cfg.center();
    let generator = SpiralGenerator::try_new(center, cfg.step)?;
    let mut layouter = CircularCloudLayouter::new(center, generator).with_limits(cfg.limits());
    for (i, size) in sizes.into_iter().enumerate() {
        let rect = layouter.try_put_next_rectangle(size)?;
        on_placed(i, &rect);
    }
    let stats = layouter.stats();
    info!(
        count = stats.count,
        density = stats.density,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "cloud laid out"
    );
    Ok(layouter)
}

/// Lay out `sizes` and write the rendered cloud as PNG to `path`.
#[cfg(feature = "image")]
#[instrument(skip_all)]
pub fn render_cloud<I, P>(sizes: I, cfg: &CloudConfig, path: P) -> Result<CircularCloudLayouter<SpiralGenerator>>
where
    I: IntoIterator<Item = Size>,
    P: AsRef<std::path::Path>,
{
    let layouter = layout_cloud(sizes, cfg)?;
    crate::render::CloudDrawer::new(layouter.rectangles())
        .with_config(cfg)
        .draw_to_file(path)?;
    Ok(layouter)
}
