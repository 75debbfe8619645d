/// Convenience result type used across the crate.
pub type DissolveResult<T> = Result<T, DissolveError>;

/// Top-level error taxonomy used by transition APIs.
#[derive(thiserror::Error, Debug)]
pub enum DissolveError {
    /// Width or height is zero, or the padded domain exceeds the widest register.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Bound buffers disagree on dimensions or pixel format.
    #[error("buffer mismatch: {0}")]
    BufferMismatch(String),

    /// The reveal sequence ran out before every pixel was revealed.
    #[error("generator exhausted after {revealed} of {total} reveals")]
    GeneratorExhausted {
        /// Pixels revealed when the sequence ran out.
        revealed: u64,
        /// Pixels in the domain.
        total: u64,
    },

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DissolveError {
    /// Build a [`DissolveError::InvalidDomain`] value.
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Build a [`DissolveError::BufferMismatch`] value.
    pub fn buffer_mismatch(msg: impl Into<String>) -> Self {
        Self::BufferMismatch(msg.into())
    }

    /// Build a [`DissolveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DissolveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
