/// Convenience result type used across marquee.
pub type MarqueeResult<T> = Result<T, MarqueeError>;

/// Top-level error taxonomy used by engine and scene APIs.
#[derive(thiserror::Error, Debug)]
pub enum MarqueeError {
    /// Invalid engine configuration, a second live engine, or an illegal state transition.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid animation parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Structural scene errors such as an unknown node or layer id.
    #[error("scene error: {0}")]
    Scene(String),

    /// Resource database or loader failures.
    #[error("resource error: {0}")]
    Resource(String),

    /// Failures reported by a drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarqueeError {
    /// Build a [`MarqueeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MarqueeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MarqueeError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`MarqueeError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`MarqueeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MarqueeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MarqueeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
