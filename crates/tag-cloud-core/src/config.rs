use crate::error::{Result, TagCloudError};
use crate::layouter::PlacementLimits;
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Layout and rendering configuration for a cloud.
/// Key notes:
///   - `step` drives both angular and radial growth of the spiral; smaller is tighter but slower
///   - `max_attempts` / `max_radius` turn a hopeless placement into an error instead of a hang
///   - `margin`, `empty_canvas_size` and the colors only affect rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Cloud center, x.
    #[serde(default)]
    pub center_x: i32,
    /// Cloud center, y.
    #[serde(default)]
    pub center_y: i32,
    /// Spiral step (radians per candidate; radius = step * angle).
    #[serde(default = "default_step")]
    pub step: f64,

    /// Candidate ceiling per rectangle. None => unbounded.
    #[serde(default)]
    pub max_attempts: Option<u64>,
    /// Radius ceiling measured from the center. None => unbounded.
    #[serde(default)]
    pub max_radius: Option<f64>,

    /// Pixels around the cloud's bounding box in the rendered image.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Side of the square canvas produced for an empty cloud.
    #[serde(default = "default_empty_canvas_size")]
    pub empty_canvas_size: u32,
    /// Draw a 1px outline around each rectangle.
    #[serde(default = "default_outlines")]
    pub outlines: bool,
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    #[serde(default = "default_outline_color")]
    pub outline_color: [u8; 4],
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            center_x: 0,
            center_y: 0,
            step: default_step(),
            max_attempts: None,
            max_radius: None,
            margin: default_margin(),
            empty_canvas_size: default_empty_canvas_size(),
            outlines: default_outlines(),
            background: default_background(),
            outline_color: default_outline_color(),
        }
    }
}

impl CloudConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `step` is not finite or not positive
    /// - a limit is set to a value that can never admit a placement
    /// - the empty canvas has no pixels
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(TagCloudError::InvalidStep { step: self.step });
        }
        if self.max_attempts == Some(0) {
            return Err(TagCloudError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        if let Some(r) = self.max_radius {
            if !r.is_finite() || r <= 0.0 {
                return Err(TagCloudError::InvalidConfig(format!(
                    "max_radius ({r}) must be a finite positive number"
                )));
            }
        }
        if self.empty_canvas_size == 0 {
            return Err(TagCloudError::InvalidConfig(
                "empty_canvas_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn limits(&self) -> PlacementLimits {
        PlacementLimits {
            max_attempts: self.max_attempts,
            max_radius: self.max_radius,
        }
    }
}

fn default_step() -> f64 {
    0.1
}
fn default_margin() -> u32 {
    64
}
fn default_empty_canvas_size() -> u32 {
    100
}
fn default_outlines() -> bool {
    true
}
fn default_background() -> [u8; 4] {
    [255, 255, 255, 255]
}
fn default_outline_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

/// Builder for `CloudConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct CloudConfigBuilder {
    cfg: CloudConfig,
}

impl CloudConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: CloudConfig::default(),
        }
    }
    pub fn center(mut self, x: i32, y: i32) -> Self {
        self.cfg.center_x = x;
        self.cfg.center_y = y;
        self
    }
    pub fn step(mut self, v: f64) -> Self {
        self.cfg.step = v;
        self
    }
    pub fn max_attempts(mut self, v: Option<u64>) -> Self {
        self.cfg.max_attempts = v;
        self
    }
    pub fn max_radius(mut self, v: Option<f64>) -> Self {
        self.cfg.max_radius = v;
        self
    }
    pub fn margin(mut self, v: u32) -> Self {
        self.cfg.margin = v;
        self
    }
    pub fn empty_canvas_size(mut self, v: u32) -> Self {
        self.cfg.empty_canvas_size = v;
        self
    }
    pub fn outlines(mut self, v: bool) -> Self {
        self.cfg.outlines = v;
        self
    }
    pub fn background(mut self, v: [u8; 4]) -> Self {
        self.cfg.background = v;
        self
    }
    pub fn outline_color(mut self, v: [u8; 4]) -> Self {
        self.cfg.outline_color = v;
        self
    }
    pub fn build(self) -> CloudConfig {
        self.cfg
    }
}

impl CloudConfig {
    /// Create a fluent builder for `CloudConfig`.
    pub fn builder() -> CloudConfigBuilder {
        CloudConfigBuilder::new()
    }
}
