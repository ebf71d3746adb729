use crate::config::CloudConfig;
use crate::error::{Result, TagCloudError};
use crate::model::{CloudBounds, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::path::Path;
use tracing::info;

/// Rasterizes placed rectangles: each one gets a random fill and an optional outline,
/// shifted so the cloud's bounding box sits `margin` pixels inside the canvas.
pub struct CloudDrawer<'a, R = ThreadRng> {
    rectangles: &'a [Rect],
    margin: u32,
    empty_canvas_size: u32,
    outlines: bool,
    background: Rgba<u8>,
    outline_color: Rgba<u8>,
    rng: R,
}

impl<'a> CloudDrawer<'a, ThreadRng> {
    pub fn new(rectangles: &'a [Rect]) -> Self {
        Self::with_rng(rectangles, rand::thread_rng())
    }
}

impl<'a, R: Rng> CloudDrawer<'a, R> {
    /// Drawer taking fill colors from `rng` (seed it for reproducible images).
    pub fn with_rng(rectangles: &'a [Rect], rng: R) -> Self {
        let d = CloudConfig::default();
        Self {
            rectangles,
            margin: d.margin,
            empty_canvas_size: d.empty_canvas_size,
            outlines: d.outlines,
            background: Rgba(d.background),
            outline_color: Rgba(d.outline_color),
            rng,
        }
    }

    /// Copies the rendering fields of `cfg`.
    pub fn with_config(mut self, cfg: &CloudConfig) -> Self {
        self.margin = cfg.margin;
        self.empty_canvas_size = cfg.empty_canvas_size;
        self.outlines = cfg.outlines;
        self.background = Rgba(cfg.background);
        self.outline_color = Rgba(cfg.outline_color);
        self
    }

    pub fn margin(mut self, v: u32) -> Self {
        self.margin = v;
        self
    }

    pub fn outlines(mut self, v: bool) -> Self {
        self.outlines = v;
        self
    }

    /// Canvas dimensions: bounding box plus margin on every side, or a fixed square when
    /// there is nothing to draw.
    pub fn canvas_size(&self) -> (u32, u32) {
        match CloudBounds::of(self.rectangles) {
            None => (self.empty_canvas_size, self.empty_canvas_size),
            Some(b) => {
                let m2 = self.margin.saturating_mul(2);
                (
                    b.width().saturating_add(m2).max(1),
                    b.height().saturating_add(m2).max(1),
                )
            }
        }
    }

    pub fn render(&mut self) -> RgbaImage {
        let (cw, ch) = self.canvas_size();
        let mut canvas = RgbaImage::from_pixel(cw, ch, self.background);
        let Some(bounds) = CloudBounds::of(self.rectangles) else {
            return canvas;
        };
        for r in self.rectangles {
            let dx = canvas_offset(r.x, bounds.min_x, self.margin);
            let dy = canvas_offset(r.y, bounds.min_y, self.margin);
            let fill = Rgba([self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen(), 255]);
            fill_rect(&mut canvas, dx, dy, r.width, r.height, fill);
            if self.outlines {
                outline_rect(&mut canvas, dx, dy, r.width, r.height, self.outline_color);
            }
        }
        canvas
    }

    /// Render and save as PNG. An empty path is rejected before anything is drawn.
    pub fn draw_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(TagCloudError::InvalidInput(
                "output path must not be empty".into(),
            ));
        }
        let canvas = self.render();
        canvas.save_with_format(path, ImageFormat::Png)?;
        info!(
            path = %path.display(),
            width = canvas.width(),
            height = canvas.height(),
            rectangles = self.rectangles.len(),
            "cloud image written"
        );
        Ok(())
    }
}

/// Canvas coordinate of `v` when the canvas origin sits `margin` pixels before `min`.
fn canvas_offset(v: i32, min: i32, margin: u32) -> u32 {
    ((v as i64 - min as i64) as u32).saturating_add(margin)
}

fn fill_rect(canvas: &mut RgbaImage, dx: u32, dy: u32, w: u32, h: u32, color: Rgba<u8>) {
    let (cw, ch) = canvas.dimensions();
    for yy in dy..dy.saturating_add(h).min(ch) {
        for xx in dx..dx.saturating_add(w).min(cw) {
            canvas.put_pixel(xx, yy, color);
        }
    }
}

/// 1px outline on the rectangle's own border pixels.
fn outline_rect(canvas: &mut RgbaImage, dx: u32, dy: u32, w: u32, h: u32, color: Rgba<u8>) {
    if w == 0 || h == 0 {
        return;
    }
    let (cw, ch) = canvas.dimensions();
    let rx = dx + w - 1;
    let by = dy + h - 1;
    for xx in dx..=rx {
        if xx < cw && dy < ch {
            canvas.put_pixel(xx, dy, color);
        }
        if xx < cw && by < ch {
            canvas.put_pixel(xx, by, color);
        }
    }
    for yy in dy..=by {
        if dx < cw && yy < ch {
            canvas.put_pixel(dx, yy, color);
        }
        if rx < cw && yy < ch {
            canvas.put_pixel(rx, yy, color);
        }
    }
}
