use super::CoordinateGenerator;
use crate::error::{Result, TagCloudError};
use crate::model::Point;

/// Archimedean spiral around `center`: at angle `a` the radius is `step * a`,
/// and each call advances `a` by `step`.
///
/// The first position is always `center` itself (angle 0). Coordinates are
/// truncated toward zero, not floored, so candidates left of or above the
/// origin round up.
#[derive(Debug, Clone)]
pub struct SpiralGenerator {
    center: Point,
    step: f64,
    angle: f64,
}

impl SpiralGenerator {
    pub fn new(center: Point, step: f64) -> Self {
        Self {
            center,
            step,
            angle: 0.0,
        }
    }

    /// Like [`SpiralGenerator::new`], but rejects non-finite or non-positive steps.
    pub fn try_new(center: Point, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TagCloudError::InvalidStep { step });
        }
        Ok(Self::new(center, step))
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Angle that the next call will use.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Radius that the next call will use.
    pub fn radius(&self) -> f64 {
        self.step * self.angle
    }
}

impl CoordinateGenerator for SpiralGenerator {
    fn next_position(&mut self) -> Point {
        let radius = self.radius();
        let x = self.center.x as f64 + radius * self.angle.cos();
        let y = self.center.y as f64 + radius * self.angle.sin();

        self.angle += self.step;

        // `as` truncates toward zero
        Point::new(x as i32, y as i32)
    }
}

impl Iterator for SpiralGenerator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        Some(self.next_position())
    }
}
