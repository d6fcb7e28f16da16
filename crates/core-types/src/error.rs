use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Insufficient data for {operation}: need at least {required} points, got {actual}")]
    InsufficientData {
        operation: String,
        required: usize,
        actual: usize,
    },

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    /// Shorthand for the length guard every indicator runs before computing.
    pub fn insufficient(operation: &str, required: usize, actual: usize) -> Self {
        CoreError::InsufficientData {
            operation: operation.to_string(),
            required,
            actual,
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), reason.into())
    }
}

/// Fails with `InsufficientData` when `actual < required`.
pub fn ensure_len(operation: &str, required: usize, actual: usize) -> Result<(), CoreError> {
    if actual < required {
        return Err(CoreError::insufficient(operation, required, actual));
    }
    Ok(())
}
