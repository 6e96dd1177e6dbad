use crate::foundation::{
    core::{Point, Size, Vec2},
    error::{MarqueeError, MarqueeResult},
};

/// Engine settings supplied by the host at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Maximum ticks per second. Host callbacks arriving faster are skipped.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Logical canvas size in scene units.
    #[serde(default = "default_canvas")]
    pub canvas: Size,
    /// Client-space position of the canvas origin.
    #[serde(default)]
    pub viewport_origin: Vec2,
    /// Client pixels per scene unit.
    #[serde(default = "default_scale")]
    pub viewport_scale: f64,
}

fn default_frame_rate() -> f64 {
    60.0
}

fn default_canvas() -> Size {
    Size::new(800.0, 600.0)
}

fn default_scale() -> f64 {
    1.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            canvas: default_canvas(),
            viewport_origin: Vec2::ZERO,
            viewport_scale: default_scale(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> MarqueeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_viewport(mut self, origin: Vec2, scale: f64) -> Self {
        self.viewport_origin = origin;
        self.viewport_scale = scale;
        self
    }

    pub fn validate(&self) -> MarqueeResult<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(MarqueeError::config("frame_rate must be finite and > 0"));
        }
        if !(self.canvas.width.is_finite()
            && self.canvas.height.is_finite()
            && self.canvas.width > 0.0
            && self.canvas.height > 0.0)
        {
            return Err(MarqueeError::config("canvas width/height must be > 0"));
        }
        if !(self.viewport_origin.x.is_finite() && self.viewport_origin.y.is_finite()) {
            return Err(MarqueeError::config("viewport_origin must be finite"));
        }
        if !(self.viewport_scale.is_finite() && self.viewport_scale > 0.0) {
            return Err(MarqueeError::config("viewport_scale must be finite and > 0"));
        }
        Ok(())
    }

    /// Minimum milliseconds between two ticks.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }

    /// Map a client-space point into scene coordinates.
    pub fn normalize(&self, client: Point) -> Point {
        ((client - self.viewport_origin).to_vec2() / self.viewport_scale).to_point()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
