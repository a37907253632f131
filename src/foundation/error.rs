/// Convenience result type used across videogen.
pub type VideoGenResult<T> = Result<T, VideoGenError>;

/// Top-level error taxonomy used by the public APIs.
#[derive(thiserror::Error, Debug)]
pub enum VideoGenError {
    /// No template is registered under the requested id.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// A parameter failed the template's schema check.
    #[error("validation error: {field}: {reason}")]
    Validation {
        /// Path of the failing field, e.g. `dataPoints[1].value`.
        field: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Malformed animation curve.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating a frame or a frame batch.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while converting a render tree into SVG or pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VideoGenError {
    /// Build a [`VideoGenError::TemplateNotFound`] value.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound(id.into())
    }

    /// Build a [`VideoGenError::Validation`] value.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`VideoGenError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`VideoGenError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`VideoGenError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`VideoGenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Failing field path, when this is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VideoGenError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
