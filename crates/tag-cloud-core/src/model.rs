use crate::error::TagCloudError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer point (pixels). Used for cloud centers and candidate positions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = (self.x as f64) - (other.x as f64);
        let dy = (self.y as f64) - (other.y as f64);
        dx.hypot(dy)
    }
}

/// Requested tag size (pixels).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Largest side a placed rectangle may have; edges must stay representable as `i32`.
    pub const MAX_SIDE: u32 = i32::MAX as u32;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if both sides are at most [`Size::MAX_SIDE`].
    pub fn fits_coordinates(&self) -> bool {
        self.width <= Self::MAX_SIDE && self.height <= Self::MAX_SIDE
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WxH` (also `W,H`), surrounding whitespace ignored.
impl FromStr for Size {
    type Err = TagCloudError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let (w, h) = t
            .split_once(['x', 'X', ','])
            .ok_or_else(|| TagCloudError::InvalidInput(format!("expected WxH, got '{t}'")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| TagCloudError::InvalidInput(format!("bad dimension '{v}' in '{t}': {e}")))
        };
        let size = Size::new(parse(w)?, parse(h)?);
        if !size.fits_coordinates() {
            return Err(TagCloudError::InvalidInput(format!(
                "'{t}' exceeds the maximum side of {}",
                Size::MAX_SIDE
            )));
        }
        Ok(size)
    }
}

/// Axis-aligned rectangle (pixels). `x,y` is the top-left corner; edges are exclusive
/// on the right/bottom (`right = x + width`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` whose origin is `center - size / 2` (integer division).
    pub fn centered_at(center: Point, size: Size) -> Self {
        let half_w = (size.width / 2) as i32;
        let half_h = (size.height / 2) as i32;
        Self::new(
            center.x.saturating_sub(half_w),
            center.y.saturating_sub(half_h),
            size.width,
            size.height,
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }
    pub fn top(&self) -> i32 {
        self.y
    }
    /// Clamped to `i32::MAX` when the edge is not representable.
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }
    /// Clamped to `i32::MAX` when the edge is not representable.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.size().area()
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add_unsigned(self.width / 2),
            self.y.saturating_add_unsigned(self.height / 2),
        )
    }

    /// True if the two rectangles share a region of positive area on both axes.
    /// Rectangles that only touch along an edge or corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (l1, t1, r1, b1) = self.edges_i64();
        let (l2, t2, r2, b2) = other.edges_i64();
        !(r1 <= l2 || l1 >= r2 || b1 <= t2 || t1 >= b2)
    }

    // exact edges, no clamping
    fn edges_i64(&self) -> (i64, i64, i64, i64) {
        let (x, y) = (self.x as i64, self.y as i64);
        (x, y, x + self.width as i64, y + self.height as i64)
    }

    /// True if `self` intersects any rectangle yielded by `others`.
    pub fn intersects_any<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        others.into_iter().any(|r| r.intersects(self))
    }
}

/// Minimal bounding box over a set of rectangles (exclusive max edges).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CloudBounds {
    /// Returns `None` when `rects` is empty.
    pub fn of(rects: &[Rect]) -> Option<Self> {
        let first = rects.first()?;
        let init = CloudBounds {
            min_x: first.left(),
            min_y: first.top(),
            max_x: first.right(),
            max_y: first.bottom(),
        };
        Some(rects[1..].iter().fold(init, |b, r| CloudBounds {
            min_x: b.min_x.min(r.left()),
            min_y: b.min_y.min(r.top()),
            max_x: b.max_x.max(r.right()),
            max_y: b.max_y.max(r.bottom()),
        }))
    }

    pub fn width(&self) -> u32 {
        (self.max_x as i64 - self.min_x as i64) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y as i64 - self.min_y as i64) as u32
    }

    pub fn area(&self) -> u64 {
        (self.width() as u64) * (self.height() as u64)
    }
}

/// Statistics about how densely a cloud is packed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CloudStats {
    /// Number of placed rectangles.
    pub count: usize,
    /// Sum of rectangle areas.
    pub used_area: u64,
    /// Area of the bounding box (0 when empty).
    pub bounding_area: u64,
    /// used_area / bounding_area (0.0 to 1.0). Higher is tighter.
    pub density: f64,
    /// Bounding box, if any rectangle was placed.
    pub bounds: Option<CloudBounds>,
    /// Largest distance from the cloud center to a rectangle center.
    pub max_center_distance: f64,
}

impl CloudStats {
    pub fn from_rects(center: Point, rects: &[Rect]) -> Self {
        let bounds = CloudBounds::of(rects);
        let used_area: u64 = rects.iter().map(Rect::area).sum();
        let bounding_area = bounds.map(|b| b.area()).unwrap_or(0);
        let density = if bounding_area > 0 {
            used_area as f64 / bounding_area as f64
        } else {
            0.0
        };
        let max_center_distance = rects
            .iter()
            .map(|r| r.center().distance_to(center))
            .fold(0.0, f64::max);
        CloudStats {
            count: rects.len(),
            used_area,
            bounding_area,
            density,
            bounds,
            max_center_distance,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        let (w, h) = self
            .bounds
            .map(|b| (b.width(), b.height()))
            .unwrap_or((0, 0));
        format!(
            "Rectangles: {}, Bounds: {}x{}, Density: {:.2}%, Used Area: {} px², Max Radius: {:.1}",
            self.count,
            w,
            h,
            self.density * 100.0,
            self.used_area,
            self.max_center_distance,
        )
    }

    /// Returns bounding-box area not covered by rectangles.
    pub fn wasted_area(&self) -> u64 {
        self.bounding_area.saturating_sub(self.used_area)
    }
}
