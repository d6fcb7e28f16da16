use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    BacktestStrategy, Config, IndicatorSettings, LoggingSettings, MarketDataSettings,
    MonthlyMomentumParams, RateLimitSettings, ScoringWeights, SyntheticWalkParams,
};

/// Environment variables with this prefix override file values,
/// e.g. `MERIDIAN_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "MERIDIAN";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional; missing keys keep their defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the configuration from an explicit path, layered with environment overrides.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Parses configuration from an in-memory TOML document.
pub fn parse_toml(contents: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
