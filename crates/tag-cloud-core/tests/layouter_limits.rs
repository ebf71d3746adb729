mod common;

use common::assert_disjoint;
use tag_cloud_core::prelude::*;

/// Proposes the same point forever.
struct Stuck(Point);

impl CoordinateGenerator for Stuck {
    fn next_position(&mut self) -> Point {
        self.0
    }
}

/// Walks right along the x axis in fixed strides.
struct Row {
    x: i32,
    stride: i32,
}

impl CoordinateGenerator for Row {
    fn next_position(&mut self) -> Point {
        let p = Point::new(self.x, 0);
        self.x += self.stride;
        p
    }
}

#[test]
fn attempts_limit_reports_failure_instead_of_hanging() {
    let c = Point::new(0, 0);
    let mut l = CircularCloudLayouter::new(c, Stuck(c)).with_limits(PlacementLimits {
        max_attempts: Some(5),
        max_radius: None,
    });
    l.try_put_next_rectangle(Size::new(10, 10)).expect("first fits");
    match l.try_put_next_rectangle(Size::new(10, 10)) {
        Err(TagCloudError::AttemptsExhausted { attempts, size }) => {
            assert_eq!(attempts, 5);
            assert_eq!(size, Size::new(10, 10));
        }
        other => panic!("expected AttemptsExhausted, got {other:?}"),
    }
    assert_eq!(l.len(), 1);
}

#[test]
fn radius_limit_reports_failure() {
    let c = Point::new(0, 0);
    let mut l = CircularCloudLayouter::spiral(c, 0.1)
        .expect("valid step")
        .with_limits(PlacementLimits {
            max_attempts: None,
            max_radius: Some(5.0),
        });
    l.try_put_next_rectangle(Size::new(20, 20)).expect("center is free");
    let err = l.try_put_next_rectangle(Size::new(20, 20)).unwrap_err();
    assert!(matches!(err, TagCloudError::RadiusExceeded { radius, .. } if radius == 5.0));
    assert_eq!(l.rectangles().len(), 1);
}

#[test]
fn generous_limits_do_not_change_placement() {
    let c = Point::new(50, -20);
    let sizes = [Size::new(30, 10), Size::new(12, 40), Size::new(25, 25), Size::new(8, 8)];

    let mut plain = CircularCloudLayouter::new(c, SpiralGenerator::new(c, 0.1));
    let mut bounded = CircularCloudLayouter::new(c, SpiralGenerator::new(c, 0.1)).with_limits(
        PlacementLimits {
            max_attempts: Some(1_000_000),
            max_radius: Some(10_000.0),
        },
    );
    for s in sizes {
        let a = plain.put_next_rectangle(s);
        let b = bounded.try_put_next_rectangle(s).expect("fits");
        assert_eq!(a, b);
    }
}

#[test]
fn put_next_rectangle_ignores_limits() {
    let c = Point::new(0, 0);
    let mut l = CircularCloudLayouter::spiral(c, 0.1)
        .expect("valid step")
        .with_limits(PlacementLimits {
            max_attempts: Some(1),
            max_radius: Some(0.0),
        });
    l.put_next_rectangle(Size::new(10, 10));
    l.put_next_rectangle(Size::new(10, 10));
    assert_eq!(l.len(), 2);
    assert_disjoint(l.rectangles());
}

#[test]
fn custom_generator_places_touching_neighbours() {
    let c = Point::new(0, 0);
    let mut l = CircularCloudLayouter::new(c, Row { x: 0, stride: 5 });
    let a = l.put_next_rectangle(Size::new(10, 10));
    let b = l.put_next_rectangle(Size::new(10, 10));
    // candidate x=5 overlaps, x=10 only touches
    assert_eq!(a, Rect::new(-5, -5, 10, 10));
    assert_eq!(b, Rect::new(5, -5, 10, 10));
}

#[test]
fn boxed_generator_works_through_trait_object() {
    let c = Point::new(10, 10);
    let g: Box<dyn CoordinateGenerator> = Box::new(SpiralGenerator::new(c, 0.2));
    let mut l = CircularCloudLayouter::new(c, g);
    for _ in 0..20 {
        l.put_next_rectangle(Size::new(15, 9));
    }
    assert_eq!(l.len(), 20);
    assert_disjoint(l.rectangles());
}

#[test]
fn borrowed_generator_keeps_advancing() {
    let c = Point::new(0, 0);
    let mut g = SpiralGenerator::new(c, 0.1);
    {
        let mut l = CircularCloudLayouter::new(c, &mut g);
        l.put_next_rectangle(Size::new(4, 4));
    }
    assert!(g.angle() > 0.0);
}

#[test]
fn spiral_constructor_rejects_bad_step() {
    let err = CircularCloudLayouter::spiral(Point::new(0, 0), 0.0).unwrap_err();
    assert!(matches!(err, TagCloudError::InvalidStep { .. }));
}

#[test]
fn oversized_side_is_rejected_without_placing() {
    let c = Point::new(100, 100);
    let mut l = CircularCloudLayouter::new(c, SpiralGenerator::new(c, 0.1));
    let err = l.try_put_next_rectangle(Size::new(3_000_000_000, 10)).unwrap_err();
    assert!(matches!(err, TagCloudError::InvalidInput(_)));
    assert!(l.is_empty());
    assert_eq!(l.generator().angle(), 0.0);
}

#[test]
fn oversized_side_still_places_without_overflow() {
    let c = Point::new(100, 100);
    let mut l = CircularCloudLayouter::new(c, SpiralGenerator::new(c, 0.1));
    let r = l.put_next_rectangle(Size::new(3_000_000_000, 10));
    assert_eq!(r.size(), Size::new(3_000_000_000, 10));
    assert!(r.intersects(&Rect::new(100, 100, 10, 10)));
    assert!(r.right() >= r.left());
}
