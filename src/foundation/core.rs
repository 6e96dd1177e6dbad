pub use kurbo::{Affine, BezPath, Line, Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Returns `rect` with non-negative width and height.
///
/// Normalizing twice yields the same rectangle.
pub fn normalize_rect(rect: Rect) -> Rect {
    rect.abs()
}

/// Open-interval containment: points on the boundary are outside.
pub fn contains_open(rect: Rect, point: Point) -> bool {
    let r = normalize_rect(rect);
    point.x > r.x0 && point.x < r.x1 && point.y > r.y0 && point.y < r.y1
}

/// Distance from `point` to the segment `line`.
pub fn distance_to_segment(line: Line, point: Point) -> f64 {
    let d = line.p1 - line.p0;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return (point - line.p0).hypot();
    }
    let t = ((point - line.p0).dot(d) / len_sq).clamp(0.0, 1.0);
    (point - (line.p0 + d * t)).hypot()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
