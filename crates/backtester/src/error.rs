use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error(transparent)]
    Core(#[from] core_types::CoreError),

    #[error("Analytics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),
}
