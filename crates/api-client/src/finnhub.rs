use crate::error::ApiError;
use crate::rate_limiter::RateLimiter;
use crate::{MarketDataProvider, PriceHistory};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use configuration::MarketDataSettings;
use serde::Deserialize;
use std::time::Duration;

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// The body of `GET /stock/candle`.
///
/// Finnhub omits the arrays entirely when `s` is `"no_data"`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleResponse {
    pub s: String,
    #[serde(default)]
    pub c: Vec<f64>,
    #[serde(default)]
    pub v: Vec<f64>,
    #[serde(default)]
    pub t: Vec<i64>,
}

impl CandleResponse {
    pub fn into_history(self) -> Result<PriceHistory, ApiError> {
        if self.s != "ok" {
            return Err(ApiError::Upstream(format!("Finnhub candle status '{}'", self.s)));
        }
        if self.c.len() != self.t.len() {
            return Err(ApiError::InvalidData(format!(
                "{} closes but {} timestamps",
                self.c.len(),
                self.t.len()
            )));
        }
        // Volumes are optional; drop them rather than misalign them.
        let volumes = if self.v.len() == self.c.len() { self.v } else { Vec::new() };

        let dates = self
            .t
            .iter()
            .map(|ts| {
                DateTime::from_timestamp(*ts, 0)
                    .map(|dt| dt.date_naive())
                    .ok_or_else(|| ApiError::InvalidData(format!("timestamp {} out of range", ts)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceHistory {
            prices: self.c,
            dates,
            volumes,
        })
    }
}

/// A daily-candle client for the Finnhub REST API.
#[derive(Debug)]
pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    lookback_years: u32,
    rate_limiter: RateLimiter,
}

impl FinnhubClient {
    pub fn new(api_key: impl Into<String>, settings: &MarketDataSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.finnhub_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            lookback_years: settings.lookback_years,
            rate_limiter: RateLimiter::from_settings(&settings.rate_limit),
        })
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn fetch_daily_closes(&self, symbol: &str) -> Result<PriceHistory, ApiError> {
        self.rate_limiter.acquire().await;

        let to = Utc::now().timestamp();
        let from = to - i64::from(self.lookback_years) * SECONDS_PER_YEAR;
        let url = format!("{}/stock/candle", self.base_url);
        tracing::info!("Fetching daily candles for {} from Finnhub", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("resolution", "D".to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("token", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::UpstreamUnavailable(format!("HTTP {}: {}", status, text)));
        }

        let candles: CandleResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let history = candles.into_history()?;
        tracing::debug!("Received {} candles for {}", history.len(), symbol);
        Ok(history)
    }
}
