/// Convenience result type used across the motion engine.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Missing target elements are deliberately absent: primitives mounted against an element that is
/// not attached turn into inert bindings instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid caller-provided configuration or form data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling tweens and keyframes.
    #[error("animation error: {0}")]
    Animation(String),

    /// A path that does not resolve against the route table.
    #[error("route error: {0}")]
    Route(String),

    /// Durable storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing scenes and stored values.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Route`] value.
    pub fn route(msg: impl Into<String>) -> Self {
        Self::Route(msg.into())
    }

    /// Build a [`MotionError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
