//! Core library for laying out rectangular tags in a circular cloud.
//!
//! - Generator: [`SpiralGenerator`] proposes candidate centers along an Archimedean spiral
//! - Layouter: [`CircularCloudLayouter`] accepts the first candidate that overlaps nothing placed so far
//! - Limits: [`PlacementLimits`] optionally turn an endless search into an error
//! - Rendering (feature `image`): [`render::CloudDrawer`] writes the cloud to PNG with random fills
//!
//! Quick example:
//! ```
//! use tag_cloud_core::{CircularCloudLayouter, Point, Size, SpiralGenerator};
//! let center = Point::new(100, 100);
//! let mut layouter = CircularCloudLayouter::new(center, SpiralGenerator::new(center, 0.1));
//! let first = layouter.put_next_rectangle(Size::new(50, 30));
//! let second = layouter.put_next_rectangle(Size::new(40, 40));
//! assert_eq!((first.x, first.y), (75, 85));
//! assert!(!first.intersects(&second));
//! assert_eq!(layouter.rectangles().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod layouter;
pub mod model;
pub mod pipeline;
#[cfg(feature = "image")]
pub mod render;

pub use config::*;
pub use error::*;
pub use export::*;
pub use generator::*;
pub use layouter::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `tag_cloud_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{CloudConfig, CloudConfigBuilder};
    pub use crate::generator::{CoordinateGenerator, SpiralGenerator};
    pub use crate::layouter::{CircularCloudLayouter, PlacementLimits};
    pub use crate::model::{CloudBounds, CloudStats, Point, Rect, Size};
    #[cfg(feature = "image")]
    pub use crate::render::CloudDrawer;
    #[cfg(feature = "image")]
    pub use crate::render_cloud;
    pub use crate::{TagCloudError, layout_cloud, layout_cloud_with, to_json};
}
