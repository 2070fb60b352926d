pub mod types;

pub use types::{AppEvent, Geometry, Point, Quad, Rect, TextRegion};
