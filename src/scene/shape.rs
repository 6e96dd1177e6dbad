use kurbo::Shape as _;

use crate::{
    foundation::{
        core::{
            BezPath, Line, Point, Rect, Rgba, contains_open, distance_to_segment, normalize_rect,
        },
        error::MarqueeResult,
    },
    render::surface::Surface,
    scene::sprite::{Sprite, SpriteState, Visual},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Closed polygon in its own coordinate frame.
///
/// When drawn as a shape the polygon is fitted into the sprite box, so only
/// its proportions matter.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest axis-aligned rectangle containing every vertex.
    pub fn bounding_box(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| {
                acc.union_pt(*p)
            })
    }

    /// Scale and move the vertices so that the bounding box becomes `rect`.
    ///
    /// A degenerate axis (all vertices share one coordinate) collapses onto
    /// the middle of the target span.
    pub fn set_box(&mut self, rect: Rect) {
        let target = normalize_rect(rect);
        let current = self.bounding_box();
        let sx = scale_factor(current.width(), target.width());
        let sy = scale_factor(current.height(), target.height());
        for p in &mut self.points {
            p.x = match sx {
                Some(s) => target.x0 + (p.x - current.x0) * s,
                None => target.center().x,
            };
            p.y = match sy {
                Some(s) => target.y0 + (p.y - current.y0) * s,
                None => target.center().y,
            };
        }
    }

    /// Copy of this polygon with its bounding box set to `rect`.
    pub fn fitted(&self, rect: Rect) -> Self {
        let mut out = self.clone();
        out.set_box(rect);
        out
    }

    /// Even-odd containment test.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for p in points {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }
}

fn scale_factor(from: f64, to: f64) -> Option<f64> {
    (from > 0.0).then(|| to / from)
}

/// Fill and stroke colors of a shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paint {
    #[serde(default)]
    pub fill: Option<Rgba>,
    #[serde(default)]
    pub stroke: Option<Rgba>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke_width() -> f64 {
    1.0
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: default_stroke_width(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// The sprite box itself.
    Rect,
    /// Circle inscribed in the sprite box.
    Circle,
    /// Diagonal of the sprite box from its origin to the opposite corner.
    /// Picks within `tolerance` of the segment.
    Line { tolerance: f64 },
    Polygon(Polygon),
}

/// Vector visual whose geometry follows the sprite box.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    paint: Paint,
}

/// Sprite drawing a [`Shape`].
pub type ShapeSprite = Sprite<Shape>;

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            paint: Paint::default(),
        }
    }

    pub fn rect() -> Self {
        Self::new(ShapeKind::Rect)
    }

    pub fn circle() -> Self {
        Self::new(ShapeKind::Circle)
    }

    pub fn line(tolerance: f64) -> Self {
        Self::new(ShapeKind::Line {
            tolerance: tolerance.max(0.0),
        })
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(ShapeKind::Polygon(Polygon::new(points)))
    }

    pub fn with_fill(mut self, color: Rgba) -> Self {
        self.paint.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Rgba, width: f64) -> Self {
        self.paint.stroke = Some(color);
        self.paint.stroke_width = width;
        self
    }

    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut Paint {
        &mut self.paint
    }

    /// Canvas-space outline for the given box.
    pub fn path(&self, rect: Rect) -> BezPath {
        match &self.kind {
            ShapeKind::Rect => rect.to_path(PATH_TOLERANCE),
            ShapeKind::Circle => inscribed_circle(rect).to_path(PATH_TOLERANCE),
            ShapeKind::Line { .. } => {
                let line = diagonal(rect);
                let mut path = BezPath::new();
                path.move_to(line.p0);
                path.line_to(line.p1);
                path
            }
            ShapeKind::Polygon(polygon) => polygon.fitted(rect).to_path(),
        }
    }
}

fn inscribed_circle(rect: Rect) -> kurbo::Circle {
    kurbo::Circle::new(rect.center(), rect.width().min(rect.height()) / 2.0)
}

fn diagonal(rect: Rect) -> Line {
    Line::new(rect.origin(), Point::new(rect.x1, rect.y1))
}

impl Visual for Shape {
    fn draw(&self, state: &SpriteState, surface: &mut dyn Surface) -> MarqueeResult<()> {
        let path = self.path(state.rect());
        let closed = !matches!(self.kind, ShapeKind::Line { .. });
        if let Some(fill) = self.paint.fill.filter(|c| closed && !c.is_transparent()) {
            surface.fill_path(&path, fill)?;
        }
        if let Some(stroke) = self.paint.stroke.filter(|c| !c.is_transparent()) {
            surface.stroke_path(&path, stroke, self.paint.stroke_width)?;
        }
        Ok(())
    }

    fn pick_test(&self, state: &SpriteState, point: Point) -> bool {
        let rect = state.rect();
        match &self.kind {
            ShapeKind::Rect => contains_open(rect, point),
            ShapeKind::Circle => {
                let circle = inscribed_circle(rect);
                (point - circle.center).hypot() < circle.radius
            }
            ShapeKind::Line { tolerance } => {
                distance_to_segment(diagonal(rect), point) <= *tolerance
            }
            ShapeKind::Polygon(polygon) => polygon.fitted(rect).contains(point),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shape.rs"]
mod tests;
