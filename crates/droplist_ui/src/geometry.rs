//! Viewport-relative geometry primitives.

/// A 2D point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by position and size, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The part of the anchor rectangle the placement engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub top: f32,
    pub bottom: f32,
    pub height: f32,
}

impl From<Rect> for AnchorRect {
    fn from(rect: Rect) -> Self {
        Self {
            top: rect.top(),
            bottom: rect.bottom(),
            height: rect.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 60.0)));
        assert!(!rect.contains(Point::new(9.0, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 61.0)));
    }

    #[test]
    fn test_anchor_rect_from_rect() {
        let anchor = AnchorRect::from(Rect::new(0.0, 500.0, 120.0, 40.0));
        assert_eq!(anchor.top, 500.0);
        assert_eq!(anchor.bottom, 540.0);
        assert_eq!(anchor.height, 40.0);
    }
}
