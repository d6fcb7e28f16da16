use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an absent `config.toml`
/// yields the documented behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indicators: IndicatorSettings,
    pub scoring: ScoringWeights,
    pub backtest: MonthlyMomentumParams,
    pub market_data: MarketDataSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.scoring.validate()?;
        self.backtest.validate()?;
        self.market_data.validate()?;
        Ok(())
    }
}

/// Look-back periods for the indicator suite.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_short_period: usize,
    pub sma_medium_period: usize,
    /// Capped at the series length when fewer points are available.
    pub sma_long_period: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr_period: usize,
    pub volume_period: usize,
    /// The minimum number of prices `compute_indicators` accepts.
    pub min_history: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_short_period: 20,
            sma_medium_period: 50,
            sma_long_period: 200,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr_period: 14,
            volume_period: 20,
            min_history: 50,
        }
    }
}

impl IndicatorSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("sma_short_period", self.sma_short_period),
            ("sma_medium_period", self.sma_medium_period),
            ("sma_long_period", self.sma_long_period),
            ("rsi_period", self.rsi_period),
            ("bollinger_period", self.bollinger_period),
            ("volume_period", self.volume_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::ValidationError(format!("indicators.{} cannot be zero", name)));
        }
        if self.atr_period < 2 {
            return Err(ConfigError::ValidationError(
                "indicators.atr_period must be at least 2".to_string(),
            ));
        }
        if self.sma_short_period >= self.sma_medium_period {
            return Err(ConfigError::ValidationError(
                "Short SMA period must be less than the medium SMA period".to_string(),
            ));
        }
        let required = self
            .sma_medium_period
            .max(self.rsi_period + 1)
            .max(self.bollinger_period)
            .max(self.atr_period)
            .max(self.volume_period)
            .max(26);
        if self.min_history < required {
            return Err(ConfigError::ValidationError(format!(
                "indicators.min_history ({}) must cover the longest fixed window ({})",
                self.min_history, required
            )));
        }
        if !self.bollinger_std_dev.is_finite() || self.bollinger_std_dev <= 0.0 {
            return Err(ConfigError::ValidationError(
                "indicators.bollinger_std_dev must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weights for the composite scorer.
///
/// Only `rsi_weight`, `sma_weight`, `momentum_weight` and `volatility_weight`
/// enter the composite. `macd_weight` and `volume_weight` are carried for
/// parity with the published weight table but are not applied; MACD and
/// volume already feed the momentum sub-score. The defaults intentionally do
/// not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub rsi_weight: f64,
    pub macd_weight: f64,
    pub sma_weight: f64,
    pub volume_weight: f64,
    pub volatility_weight: f64,
    pub momentum_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rsi_weight: 0.15,
            macd_weight: 0.18,
            sma_weight: 0.20,
            volume_weight: 0.12,
            volatility_weight: 0.10,
            momentum_weight: 0.25,
        }
    }
}

impl ScoringWeights {
    /// Sum of the weights that actually enter the composite score.
    pub fn applied_sum(&self) -> f64 {
        self.rsi_weight + self.sma_weight + self.momentum_weight + self.volatility_weight
    }

    /// The same weights rescaled so the applied ones sum to 1.
    pub fn normalized(&self) -> Self {
        let sum = self.applied_sum();
        if sum <= 0.0 {
            return *self;
        }
        Self {
            rsi_weight: self.rsi_weight / sum,
            sma_weight: self.sma_weight / sum,
            momentum_weight: self.momentum_weight / sum,
            volatility_weight: self.volatility_weight / sum,
            ..*self
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            self.rsi_weight,
            self.macd_weight,
            self.sma_weight,
            self.volume_weight,
            self.volatility_weight,
            self.momentum_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::ValidationError(
                "scoring weights must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Calendar rules for the monthly momentum strategy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthlyMomentumParams {
    /// Days of the month on which a short is opened.
    pub short_entry_days: Vec<u32>,
    /// Trading days (series indices) a short is held before it is covered.
    pub short_holding_days: usize,
    /// Calendar days before month-end on which a long is opened.
    pub long_entry_days_before_month_end: u32,
    /// Calendar days before month-end on which a long is closed.
    pub long_exit_days_before_month_end: u32,
    /// Used to annualise the Sharpe ratio.
    pub trading_days_per_year: f64,
}

impl Default for MonthlyMomentumParams {
    fn default() -> Self {
        Self {
            short_entry_days: vec![1, 5],
            short_holding_days: 5,
            long_entry_days_before_month_end: 7,
            long_exit_days_before_month_end: 1,
            trading_days_per_year: 252.0,
        }
    }
}

impl MonthlyMomentumParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.short_entry_days.iter().any(|d| *d == 0 || *d > 31) {
            return Err(ConfigError::ValidationError(
                "backtest.short_entry_days must be days of the month (1-31)".to_string(),
            ));
        }
        if self.short_holding_days == 0 {
            return Err(ConfigError::ValidationError(
                "backtest.short_holding_days cannot be zero".to_string(),
            ));
        }
        if self.long_entry_days_before_month_end <= self.long_exit_days_before_month_end {
            return Err(ConfigError::ValidationError(
                "Long entry must come before the long exit within the month".to_string(),
            ));
        }
        if !self.trading_days_per_year.is_finite() || self.trading_days_per_year <= 0.0 {
            return Err(ConfigError::ValidationError(
                "backtest.trading_days_per_year must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Market-data collaborator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    pub finnhub_base_url: String,
    pub lookback_years: u32,
    pub request_timeout_secs: u64,
    pub rate_limit: RateLimitSettings,
    pub synthetic: SyntheticWalkParams,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            finnhub_base_url: "https://finnhub.io/api/v1".to_string(),
            lookback_years: 2,
            request_timeout_secs: 10,
            rate_limit: RateLimitSettings::default(),
            synthetic: SyntheticWalkParams::default(),
        }
    }
}

impl MarketDataSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_years == 0 {
            return Err(ConfigError::ValidationError(
                "market_data.lookback_years cannot be zero".to_string(),
            ));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return Err(ConfigError::ValidationError(
                "market_data.rate_limit needs a positive request budget and window".to_string(),
            ));
        }
        self.synthetic.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub max_requests: usize,
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        // Finnhub's free tier allows 60 calls per minute.
        Self { max_requests: 60, window_secs: 60 }
    }
}

/// Constants for the random-walk generator used when no provider answers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyntheticWalkParams {
    pub start_price: f64,
    /// Mean daily return.
    pub daily_drift: f64,
    /// Standard deviation of the daily return.
    pub daily_volatility: f64,
    /// Number of weekday observations to generate.
    pub trading_days: usize,
}

impl Default for SyntheticWalkParams {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            daily_drift: 0.0002,
            daily_volatility: 0.01,
            trading_days: 504,
        }
    }
}

impl SyntheticWalkParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(ConfigError::ValidationError(
                "market_data.synthetic.start_price must be positive".to_string(),
            ));
        }
        if !self.daily_volatility.is_finite() || self.daily_volatility < 0.0 || self.daily_volatility >= 0.5 {
            return Err(ConfigError::ValidationError(
                "market_data.synthetic.daily_volatility must be in [0, 0.5)".to_string(),
            ));
        }
        if !self.daily_drift.is_finite() {
            return Err(ConfigError::ValidationError(
                "market_data.synthetic.daily_drift must be finite".to_string(),
            ));
        }
        if self.trading_days < 2 {
            return Err(ConfigError::ValidationError(
                "market_data.synthetic.trading_days must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub file_dir: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_dir: None,
        }
    }
}

/// The strategies the backtester can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BacktestStrategy {
    #[default]
    MonthlyMomentum,
}
