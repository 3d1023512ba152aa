use scrim_core::{Point, Rect};

#[test]
fn test_rect_contains_edges() {
    let r = Rect::new(10, 10, 30, 4);

    assert!(r.contains(Point::new(10, 10)));
    assert!(r.contains(Point::new(39, 13)));

    // Right and bottom edges are exclusive
    assert!(!r.contains(Point::new(40, 10)));
    assert!(!r.contains(Point::new(10, 14)));
    assert!(!r.contains(Point::new(9, 10)));
}

#[test]
fn test_rect_empty() {
    assert!(Rect::new(0, 0, 0, 5).is_empty());
    assert!(Rect::new(0, 0, 5, 0).is_empty());
    assert!(!Rect::new(0, 0, 1, 1).is_empty());
}

#[test]
fn test_rect_center() {
    let r = Rect::new(0, 0, 100, 20);
    assert_eq!(r.center(), Point::new(50, 10));
}
