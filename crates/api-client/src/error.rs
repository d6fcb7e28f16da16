use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Market data provider is unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("The API request returned an error: {0}")]
    Upstream(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Core(#[from] core_types::CoreError),
}
