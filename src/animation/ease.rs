/// Easing curve shaping how an [`crate::Animation`] moves through its window.
///
/// `Linear` gives plain `start + distance * elapsed / duration`. The other
/// curves are power curves of degree 2 (`Quad`) or 3 (`Cubic`) that
/// accelerate (`In`), decelerate (`Out`), or do both around the window's
/// midpoint (`InOut`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

#[derive(Clone, Copy)]
enum Bend {
    In,
    Out,
    InOut,
}

impl Ease {
    /// Eased fraction of a window of `duration` ms after `elapsed` ms.
    ///
    /// An empty or NaN window is already complete.
    pub fn progress(self, elapsed: f64, duration: f64) -> f64 {
        if !(duration > 0.0) {
            return 1.0;
        }
        self.apply(elapsed / duration)
    }

    /// Map a linear fraction in `[0, 1]` onto the curve. Input outside the
    /// range is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let Some((bend, degree)) = self.shape() else {
            return t;
        };
        match bend {
            Bend::In => t.powi(degree),
            Bend::Out => 1.0 - (1.0 - t).powi(degree),
            Bend::InOut if t < 0.5 => (2.0 * t).powi(degree) / 2.0,
            Bend::InOut => 1.0 - (2.0 * (1.0 - t)).powi(degree) / 2.0,
        }
    }

    fn shape(self) -> Option<(Bend, i32)> {
        match self {
            Self::Linear => None,
            Self::InQuad => Some((Bend::In, 2)),
            Self::OutQuad => Some((Bend::Out, 2)),
            Self::InOutQuad => Some((Bend::InOut, 2)),
            Self::InCubic => Some((Bend::In, 3)),
            Self::OutCubic => Some((Bend::Out, 3)),
            Self::InOutCubic => Some((Bend::InOut, 3)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
