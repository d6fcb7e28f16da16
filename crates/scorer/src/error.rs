use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Scorer received invalid weights: {0}")]
    InvalidWeights(String),

    #[error("A calculation error occurred: {0}")]
    Calculation(String),
}
