use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("An error occurred during indicator calculation: {0}")]
    Calculation(String),
}

impl IndicatorError {
    /// True when the error is a length guard rather than a bad value.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, IndicatorError::Core(CoreError::InsufficientData { .. }))
    }
}

impl From<ta::errors::TaError> for IndicatorError {
    fn from(error: ta::errors::TaError) -> Self {
        IndicatorError::Calculation(format!("{:?}", error))
    }
}
