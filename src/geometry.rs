use serde::{Deserialize, Serialize};

/// A point in a bottom-left-origin coordinate space (Y grows upward),
/// except where a function explicitly says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Convert a window-manager rect (top-left origin, Y grows downward)
    /// into this crate's bottom-left-origin convention. `screen_height` is
    /// the primary screen's height, which defines the global space.
    pub fn from_top_left(top_left: Point, size: Size, screen_height: f64) -> Self {
        Self::new(
            top_left.x,
            screen_height - top_left.y - size.height,
            size.width,
            size.height,
        )
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// True when the rect has no area.
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Intersection of two rects, or `None` when they share no area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min_x().max(other.min_x());
        let min_y = self.min_y().max(other.min_y());
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());

        let clipped = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }

    /// The same rect translated by `(dx, dy)`. Used to move a global-space
    /// rect into a surface's local space.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.origin.x + dx,
            self.origin.y + dy,
            self.size.width,
            self.size.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_top_left_fixture() {
        // 1080p screen, window at (100, 200) of size 300x400 in
        // top-left-origin coordinates lands at y = 1080 - 200 - 400 = 480.
        let rect = Rect::from_top_left(Point::new(100.0, 200.0), Size::new(300.0, 400.0), 1080.0);
        assert_eq!(rect, Rect::new(100.0, 480.0, 300.0, 400.0));
    }

    #[test]
    fn test_from_top_left_zero_screen_height() {
        // Degenerate "no screens enumerable" case: still produces a rect.
        let rect = Rect::from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0), 0.0);
        assert_eq!(rect, Rect::new(10.0, -60.0, 30.0, 40.0));
    }

    #[test]
    fn test_intersection_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn test_intersection_contained() {
        let outer = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let inner = Rect::new(100.0, 100.0, 300.0, 200.0);
        assert_eq!(outer.intersection(&inner), Some(inner));
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(200.0, 200.0, 50.0, 50.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_intersection_touching_edge_is_degenerate() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 50.0, 100.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 100.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 100.0, -1.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_offset_by() {
        let rect = Rect::new(2020.0, 100.0, 300.0, 200.0);
        assert_eq!(
            rect.offset_by(-1920.0, 0.0),
            Rect::new(100.0, 100.0, 300.0, 200.0)
        );
    }
}
