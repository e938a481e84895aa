//! Error types for generation operations.

/// The main error type for generation operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// A model name did not resolve to a registered backend
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Errors raised by a model backend, passed through untouched
    #[error("Provider error: {0}")]
    Provider(String),

    /// Structured output or tool input/output did not satisfy its schema
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors
    #[error("Error: {0}")]
    Other(String),
}

impl AiError {
    /// Create a model not found error
    pub fn model_not_found(msg: impl Into<String>) -> Self {
        Self::ModelNotFound(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this error came from validating structured output
    pub fn is_validation(&self) -> bool {
        matches!(self, AiError::Validation(_))
    }
}

impl From<String> for AiError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for AiError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
