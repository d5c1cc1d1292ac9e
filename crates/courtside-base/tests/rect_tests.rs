use courtside_base::{Rect, Vec2};

#[test]
fn test_from_min_max() {
    let r = Rect::<f32>::from_min_max(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
    assert_eq!(r.origin, Vec2::new(1.0, 2.0));
    assert_eq!(r.size, Vec2::new(3.0, 4.0));
}

#[test]
fn test_zero() {
    let r = Rect::<f32>::zero();
    assert_eq!(r.area(), 0.0);
}

#[test]
fn test_from_center() {
    let r = Rect::from_center(Vec2::new(320.0, 320.0), Vec2::new(100.0, 50.0));
    assert_eq!(r.origin, Vec2::new(270.0, 295.0));
    assert_eq!(r.max(), Vec2::new(370.0, 345.0));
    assert_eq!(r.center(), Vec2::new(320.0, 320.0));
}

#[test]
fn test_from_corners_any_direction() {
    let forward = Rect::from_corners(Vec2::new(10.0, 20.0), Vec2::new(30.0, 50.0));
    let backward = Rect::from_corners(Vec2::new(30.0, 50.0), Vec2::new(10.0, 20.0));
    assert_eq!(forward, backward);
    assert_eq!(forward.origin, Vec2::new(10.0, 20.0));
    assert_eq!(forward.size, Vec2::new(20.0, 30.0));
}

#[test]
fn test_contains_point_edges_inclusive() {
    let r = Rect::new(Vec2::new(0.0_f32, 0.0), Vec2::new(10.0, 10.0));
    assert!(r.contains_point(Vec2::new(0.0, 0.0)));
    assert!(r.contains_point(Vec2::new(10.0, 10.0)));
    assert!(r.contains_point(Vec2::new(5.0, 5.0)));
    assert!(!r.contains_point(Vec2::new(10.01, 5.0)));
    assert!(!r.contains_point(Vec2::new(5.0, -0.01)));
}

#[test]
fn test_area() {
    let r = Rect::new(Vec2::new(0.0_f32, 0.0), Vec2::new(5.0, 3.0));
    assert_eq!(r.area(), 15.0);
}
