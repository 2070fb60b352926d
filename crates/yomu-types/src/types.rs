use serde::{Deserialize, Serialize};

/// Events flowing from the hotkey watcher to the app event loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// F8: capture, detect, translate, then show or refresh the overlay
    RefreshOverlay,
    /// F9: hide the overlay
    HideOverlay,
}

/// Pixel rectangle of one display, screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    /// Inclusive on all edges, matching how monitor bounds are reported
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Four-point text boundary as reported by the detector.
///
/// Not necessarily axis-aligned; hit-testing and drawing always go through
/// [`Quad::bounding_rect`], which is derived on every use and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Axis-aligned quad from a plain rectangle
    pub fn from_rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self([
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    }

    /// Axis-aligned bounding rectangle via min/max over the four points
    pub fn bounding_rect(&self) -> Rect {
        let xs = self.0.map(|p| p.x);
        let ys = self.0.map(|p| p.y);
        let min_x = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        Rect {
            x: min_x as i32,
            y: min_y as i32,
            w: (max_x - min_x) as i32,
            h: (max_y - min_y) as i32,
        }
    }
}

/// Axis-aligned rectangle in window-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Left/top inclusive, right/bottom exclusive.
    ///
    /// A zero-area rectangle contains nothing, including its nominal corner.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn is_degenerate(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// One detected text occurrence: geometry, source text, confidence, and
/// (once the translator has run) the translation
#[derive(Debug, Clone)]
pub struct TextRegion {
    pub quad: Quad,
    pub text: String,
    pub confidence: f32,
    pub translation: Option<String>,
}

impl TextRegion {
    pub fn new(quad: Quad, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            quad,
            text: text.into(),
            confidence,
            translation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_interior_points() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(r.contains(10, 20));
        assert!(r.contains(25, 40));
        assert!(r.contains(39, 59));
    }

    #[test]
    fn rect_rejects_points_outside() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(!r.contains(9, 20));
        assert!(!r.contains(10, 19));
        assert!(!r.contains(40, 20));
        assert!(!r.contains(10, 60));
    }

    #[test]
    fn degenerate_rect_contains_nothing() {
        let zero_w = Rect::new(5, 5, 0, 10);
        let zero_h = Rect::new(5, 5, 10, 0);
        assert!(!zero_w.contains(5, 5));
        assert!(!zero_h.contains(5, 5));
        assert!(zero_w.is_degenerate());
        assert!(zero_h.is_degenerate());
    }

    #[test]
    fn quad_bounding_rect_uses_min_max() {
        // Rotated quad: bounding rect must cover all four points
        let q = Quad([
            Point::new(10.0, 5.0),
            Point::new(30.0, 12.0),
            Point::new(26.0, 40.0),
            Point::new(6.0, 33.0),
        ]);
        let r = q.bounding_rect();
        assert_eq!(r, Rect::new(6, 5, 24, 35));
    }

    #[test]
    fn axis_aligned_quad_round_trips() {
        let q = Quad::from_rect(100.0, 200.0, 50.0, 25.0);
        assert_eq!(q.bounding_rect(), Rect::new(100, 200, 50, 25));
    }

    #[test]
    fn geometry_contains_is_inclusive() {
        let g = Geometry {
            left: 1920,
            top: 0,
            width: 1920,
            height: 1080,
        };
        assert!(g.contains(1920, 0));
        assert!(g.contains(3840, 1080));
        assert!(!g.contains(1919, 500));
        assert!(!g.contains(3841, 500));
    }
}
