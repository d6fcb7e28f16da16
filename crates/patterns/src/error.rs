use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("An error occurred during indicator calculation: {0}")]
    Indicator(#[from] indicators::IndicatorError),
}
