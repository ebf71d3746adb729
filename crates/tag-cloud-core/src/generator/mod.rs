use crate::model::Point;

pub mod spiral;

pub use spiral::SpiralGenerator;

/// A source of candidate positions for the layouter.
///
/// Each call returns the next point and advances internal state; there is no peek or rewind.
/// Implementations should eventually move arbitrarily far from any fixed region,
/// otherwise an unbounded placement may never find a free spot.
pub trait CoordinateGenerator {
    fn next_position(&mut self) -> Point;
}

impl<G: CoordinateGenerator + ?Sized> CoordinateGenerator for &mut G {
    fn next_position(&mut self) -> Point {
        (**self).next_position()
    }
}

impl<G: CoordinateGenerator + ?Sized> CoordinateGenerator for Box<G> {
    fn next_position(&mut self) -> Point {
        (**self).next_position()
    }
}
