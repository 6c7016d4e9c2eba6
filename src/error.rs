use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthesisError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A route or lookup referenced a label that was never created.
    #[error("node '{label}' is not present in the registry")]
    NotFound { label: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("malformed route expression '{expression}': {reason}")]
    MalformedRoute { expression: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SynthesisError {
    pub fn not_found(label: impl Into<String>) -> Self {
        SynthesisError::NotFound {
            label: label.into(),
        }
    }

    pub fn malformed(expression: &str, reason: impl Into<String>) -> Self {
        SynthesisError::MalformedRoute {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
