//! # Market Data Client
//!
//! Fetches daily price history for the backtester and scorer, falling back to a
//! seeded random walk when no provider answers.
//!
//! ## Public API
//!
//! - `MarketDataProvider`: The async contract every data source implements.
//! - `FinnhubClient`: Daily candles from Finnhub, behind a `RateLimiter`.
//! - `SyntheticMarketData`: The random-walk generator.
//! - `load_history_or_synthetic`: Fetch with fallback; flags synthetic results.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use configuration::SyntheticWalkParams;
use core_types::PriceSeries;
use serde::Serialize;

pub mod error;
pub mod finnhub;
pub mod rate_limiter;
pub mod synthetic;

// --- Public API ---
pub use error::ApiError;
pub use finnhub::{CandleResponse, FinnhubClient};
pub use rate_limiter::RateLimiter;
pub use synthetic::SyntheticMarketData;

/// Daily closes with their calendar dates and, when the source has them, volumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistory {
    pub prices: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    /// Empty when the source does not report volume.
    pub volumes: Vec<f64>,
}

impl PriceHistory {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Validates the history into a `PriceSeries`.
    pub fn to_series(&self) -> Result<PriceSeries, ApiError> {
        Ok(PriceSeries::new(self.dates.clone(), self.prices.clone())?)
    }
}

/// The generic, abstract interface for a source of daily price history.
/// Implementations can be swapped (live, synthetic or a test stub).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_daily_closes(&self, symbol: &str) -> Result<PriceHistory, ApiError>;
}

/// A fetched history and whether it was generated rather than observed.
#[derive(Debug, Clone)]
pub struct SourcedHistory {
    pub history: PriceHistory,
    pub synthetic: bool,
}

/// Fetches from `provider`, or generates a random walk when there is no
/// provider, the fetch fails, or the provider's history has fewer than two
/// points or does not validate as a `PriceSeries`.
///
/// The fallback is logged at `warn` and flagged in the returned value.
pub async fn load_history_or_synthetic(
    provider: Option<&dyn MarketDataProvider>,
    symbol: &str,
    synthetic: &SyntheticWalkParams,
    seed: Option<u64>,
) -> SourcedHistory {
    let reason = match provider {
        None => "no market data provider is configured".to_string(),
        Some(provider) => match provider.fetch_daily_closes(symbol).await {
            Ok(history) if history.len() < 2 => format!("provider returned only {} prices", history.len()),
            Ok(history) => match history.to_series() {
                Ok(_) => {
                    return SourcedHistory {
                        history,
                        synthetic: false,
                    };
                }
                Err(e) => format!("provider returned an unusable history: {}", e),
            },
            Err(e) => e.to_string(),
        },
    };

    tracing::warn!(
        symbol,
        "Using SYNTHETIC random-walk prices ({}); results do not reflect real market data",
        reason
    );
    SourcedHistory {
        history: SyntheticMarketData::new(*synthetic, seed).generate(Utc::now().date_naive()),
        synthetic: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl MarketDataProvider for FailingProvider {
        async fn fetch_daily_closes(&self, _symbol: &str) -> Result<PriceHistory, ApiError> {
            Err(ApiError::UpstreamUnavailable("connection refused".to_string()))
        }
    }

    struct FixedProvider(PriceHistory);

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        async fn fetch_daily_closes(&self, _symbol: &str) -> Result<PriceHistory, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn small_walk() -> SyntheticWalkParams {
        SyntheticWalkParams {
            trading_days: 30,
            ..SyntheticWalkParams::default()
        }
    }

    #[tokio::test]
    async fn test_falls_back_when_provider_fails() {
        let loaded = load_history_or_synthetic(Some(&FailingProvider as &dyn MarketDataProvider), "TLT", &small_walk(), Some(3)).await;
        assert!(loaded.synthetic);
        assert_eq!(loaded.history.len(), 30);
        assert!(loaded.history.to_series().is_ok());
    }

    #[tokio::test]
    async fn test_falls_back_without_provider() {
        let loaded = load_history_or_synthetic(None, "TLT", &small_walk(), None).await;
        assert!(loaded.synthetic);
    }

    #[tokio::test]
    async fn test_uses_provider_data_when_available() {
        let history = PriceHistory {
            prices: vec![10.0, 11.0, 12.0],
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            ],
            volumes: vec![],
        };
        let provider = FixedProvider(history.clone());
        let loaded = load_history_or_synthetic(Some(&provider as &dyn MarketDataProvider), "TLT", &small_walk(), None).await;
        assert!(!loaded.synthetic);
        assert_eq!(loaded.history, history);
    }

    #[tokio::test]
    async fn test_invalid_provider_history_falls_back() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let duplicate_dates = FixedProvider(PriceHistory {
            prices: vec![10.0, 11.0],
            dates: vec![day, day],
            volumes: vec![],
        });
        let loaded = load_history_or_synthetic(Some(&duplicate_dates as &dyn MarketDataProvider), "TLT", &small_walk(), Some(5)).await;
        assert!(loaded.synthetic);
        assert_eq!(loaded.history.len(), 30);
        assert!(loaded.history.to_series().is_ok());

        let zero_close = FixedProvider(PriceHistory {
            prices: vec![10.0, 0.0],
            dates: vec![day, day.succ_opt().unwrap()],
            volumes: vec![],
        });
        let loaded = load_history_or_synthetic(Some(&zero_close as &dyn MarketDataProvider), "TLT", &small_walk(), Some(5)).await;
        assert!(loaded.synthetic);
    }

    #[tokio::test]
    async fn test_too_short_provider_history_falls_back() {
        let provider = FixedProvider(PriceHistory {
            prices: vec![10.0],
            dates: vec![NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()],
            volumes: vec![],
        });
        let loaded = load_history_or_synthetic(Some(&provider as &dyn MarketDataProvider), "TLT", &small_walk(), Some(9)).await;
        assert!(loaded.synthetic);
    }
}
