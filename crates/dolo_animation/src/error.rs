//! Animation error types

use thiserror::Error;

/// Errors raised when building an effect
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A configuration value is out of range
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AnimationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AnimationError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
