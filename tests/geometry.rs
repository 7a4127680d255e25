use glam::Vec2;
use tilehop::geometry::*;

#[test]
fn test_from_center_round_trips_center() {
    let r = Rect::from_center(Vec2::new(100.0, 50.0), 32.0, 48.0);
    assert_eq!(r.left, 84.0);
    assert_eq!(r.bottom, 26.0);
    assert_eq!(r.center(), Vec2::new(100.0, 50.0));
}

#[test]
fn test_overlapping_rects_intersect() {
    let a = Rect::new(0.0, 0.0, 32.0, 32.0);
    let b = Rect::new(16.0, 16.0, 32.0, 32.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_rects_sharing_an_edge_do_not_intersect() {
    let floor = Rect::new(0.0, 0.0, 32.0, 32.0);
    let standing = Rect::new(0.0, 32.0, 32.0, 32.0);
    let beside = Rect::new(32.0, 0.0, 32.0, 32.0);
    assert!(!floor.intersects(&standing));
    assert!(!floor.intersects(&beside));
}

#[test]
fn test_sub_epsilon_overlap_counts_as_touching() {
    let floor = Rect::new(0.0, 0.0, 32.0, 32.0);
    let resting = Rect::new(0.0, 32.0 - OVERLAP_EPSILON * 0.5, 32.0, 32.0);
    assert!(!floor.intersects(&resting));
}

#[test]
fn test_contains_point_is_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains_point(Vec2::new(0.0, 0.0)));
    assert!(r.contains_point(Vec2::new(9.9, 9.9)));
    assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
    assert!(!r.contains_point(Vec2::new(5.0, 10.0)));
}

#[test]
fn test_translated_keeps_size() {
    let r = Rect::new(1.0, 2.0, 3.0, 4.0).translated(10.0, -5.0);
    assert_eq!(r, Rect::new(11.0, -3.0, 3.0, 4.0));
}

#[test]
fn test_cells_span_every_touched_cell() {
    let r = Rect::new(100.0, 100.0, 100.0, 100.0);
    assert_eq!(r.cells(128.0), ((0, 0), (1, 1)));
}
