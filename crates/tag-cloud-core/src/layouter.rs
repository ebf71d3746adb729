use crate::error::{Result, TagCloudError};
use crate::generator::{CoordinateGenerator, SpiralGenerator};
use crate::model::{CloudBounds, CloudStats, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Optional ceilings for [`CircularCloudLayouter::try_put_next_rectangle`].
///
/// Both unset (the default) means a placement may try candidates forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementLimits {
    /// Maximum candidate points tried for a single rectangle.
    pub max_attempts: Option<u64>,
    /// Give up once a candidate lies farther than this from the layouter center.
    pub max_radius: Option<f64>,
}

impl PlacementLimits {
    pub const UNBOUNDED: PlacementLimits = PlacementLimits {
        max_attempts: None,
        max_radius: None,
    };

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.max_radius.is_none()
    }
}

/// Places rectangles around a center so that none of them overlap.
///
/// Every request pulls candidate points from the generator until a rectangle centered on
/// the candidate clears all previously accepted rectangles. Accepted rectangles are never
/// moved or removed; [`rectangles`](Self::rectangles) returns them in request order.
#[derive(Debug, Clone)]
pub struct CircularCloudLayouter<G = SpiralGenerator> {
    center: Point,
    generator: G,
    rectangles: Vec<Rect>,
    limits: PlacementLimits,
}

impl CircularCloudLayouter<SpiralGenerator> {
    /// Layouter driven by a [`SpiralGenerator`] centered on `center`.
    pub fn spiral(center: Point, step: f64) -> Result<Self> {
        Ok(Self::new(center, SpiralGenerator::try_new(center, step)?))
    }
}

impl<G: CoordinateGenerator> CircularCloudLayouter<G> {
    pub fn new(center: Point, generator: G) -> Self {
        Self {
            center,
            generator,
            rectangles: Vec::new(),
            limits: PlacementLimits::UNBOUNDED,
        }
    }

    /// Sets the ceilings used by [`try_put_next_rectangle`](Self::try_put_next_rectangle).
    pub fn with_limits(mut self, limits: PlacementLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Places a rectangle of `size` and returns it.
    ///
    /// Never gives up: if no candidate the generator produces can ever fit, this does not
    /// return. Limits set with [`with_limits`](Self::with_limits) are ignored here.
    ///
    /// Both sides of `size` should be at most [`Size::MAX_SIDE`]; larger sides are placed with
    /// correct overlap tests, but their reported right/bottom edges clamp at `i32::MAX`.
    pub fn put_next_rectangle(&mut self, size: Size) -> Rect {
        let mut attempts: u64 = 0;
        loop {
            let rect = Rect::centered_at(self.generator.next_position(), size);
            attempts += 1;
            if !rect.intersects_any(&self.rectangles) {
                return self.accept(rect, attempts);
            }
        }
    }

    /// Places a rectangle of `size`, honoring the configured [`PlacementLimits`].
    ///
    /// On failure nothing is appended, although the generator has advanced past the
    /// rejected candidates. Sizes with a side above [`Size::MAX_SIDE`] are rejected up front.
    pub fn try_put_next_rectangle(&mut self, size: Size) -> Result<Rect> {
        if !size.fits_coordinates() {
            return Err(TagCloudError::InvalidInput(format!(
                "size {size} exceeds the maximum side of {}",
                Size::MAX_SIDE
            )));
        }
        let limits = self.limits;
        let mut attempts: u64 = 0;
        loop {
            if limits.max_attempts.is_some_and(|max| attempts >= max) {
                warn!(%size, attempts, "placement attempts exhausted");
                return Err(TagCloudError::AttemptsExhausted { attempts, size });
            }
            let candidate = self.generator.next_position();
            attempts += 1;

            if let Some(max_radius) = limits.max_radius {
                let radius = candidate.distance_to(self.center);
                if radius > max_radius {
                    warn!(%size, attempts, radius, max_radius, "candidate left the allowed radius");
                    return Err(TagCloudError::RadiusExceeded {
                        radius: max_radius,
                        size,
                    });
                }
            }

            let rect = Rect::centered_at(candidate, size);
            if !rect.intersects_any(&self.rectangles) {
                return Ok(self.accept(rect, attempts));
            }
        }
    }

    fn accept(&mut self, rect: Rect, attempts: u64) -> Rect {
        debug!(
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            attempts,
            "placed rectangle"
        );
        self.rectangles.push(rect);
        rect
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn limits(&self) -> PlacementLimits {
        self.limits
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Accepted rectangles in placement order.
    pub fn rectangles(&self) -> &[Rect] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn bounds(&self) -> Option<CloudBounds> {
        CloudBounds::of(&self.rectangles)
    }

    pub fn stats(&self) -> CloudStats {
        CloudStats::from_rects(self.center, &self.rectangles)
    }

    pub fn into_rectangles(self) -> Vec<Rect> {
        self.rectangles
    }
}
