use kurbo::Shape as _;

use crate::{
    foundation::core::{BezPath, Rect, Rgba, Vec2},
    foundation::error::{MarqueeError, MarqueeResult},
    render::surface::Surface,
};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Rotate { radians: f64 },
    GlobalAlpha { alpha: f64 },
    Fill { bounds: Rect, color: Rgba },
    Stroke { bounds: Rect, color: Rgba, width: f64 },
    Blit { image: String, src: Rect, dst: Rect },
}

/// Headless surface that records every call in order.
///
/// Used by tests and by the `marquee` binary to inspect what a frame drew.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    depth: usize,
    fail_draws: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every drawing primitive fail with a render error.
    pub fn failing() -> Self {
        Self {
            fail_draws: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Current save-stack depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn draw(&mut self, call: DrawCall) -> MarqueeResult<()> {
        if self.fail_draws {
            return Err(MarqueeError::render("recording surface set to fail"));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.calls.push(DrawCall::Translate {
            dx: offset.x,
            dy: offset.y,
        });
    }

    fn rotate(&mut self, radians: f64) {
        self.calls.push(DrawCall::Rotate { radians });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::GlobalAlpha { alpha });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) -> MarqueeResult<()> {
        self.draw(DrawCall::Fill {
            bounds: path.bounding_box(),
            color,
        })
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) -> MarqueeResult<()> {
        self.draw(DrawCall::Stroke {
            bounds: path.bounding_box(),
            color,
            width,
        })
    }

    fn blit(&mut self, image: &str, src: Rect, dst: Rect) -> MarqueeResult<()> {
        self.draw(DrawCall::Blit {
            image: image.to_string(),
            src,
            dst,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
