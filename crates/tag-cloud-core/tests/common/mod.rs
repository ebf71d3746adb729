#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tag_cloud_core::prelude::*;

pub const CENTER: Point = Point::new(100, 100);
pub const STEP: f64 = 0.1;

/// Layouter wrapper that saves a picture of the cloud when the owning test panics.
pub struct CloudFixture {
    pub layouter: CircularCloudLayouter<SpiralGenerator>,
    name: &'static str,
}

impl CloudFixture {
    pub fn new(name: &'static str) -> Self {
        Self {
            layouter: CircularCloudLayouter::new(CENTER, SpiralGenerator::new(CENTER, STEP)),
            name,
        }
    }

    fn snapshot_path(&self) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
            .join("failed-tests")
            .join(format!("{}_{}.png", self.name, ts))
    }
}

impl Drop for CloudFixture {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        #[cfg(feature = "image")]
        {
            let path = self.snapshot_path();
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            match CloudDrawer::new(self.layouter.rectangles()).draw_to_file(&path) {
                Ok(()) => eprintln!("Tag cloud visualization saved to file {}", path.display()),
                Err(e) => eprintln!("failed to save tag cloud visualization: {e}"),
            }
        }
    }
}

pub fn assert_disjoint(rects: &[Rect]) {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            assert!(
                !rects[i].intersects(&rects[j]),
                "rectangles {i} {:?} and {j} {:?} overlap",
                rects[i],
                rects[j]
            );
        }
    }
}
