use crate::enums::{PatternType, PositionState, SignalKind, TradeAction};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered sequence of daily closing prices.
///
/// Construction validates the series once so that every consumer can rely on
/// strictly ascending dates and finite, positive prices. Deserialization goes
/// through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

/// The unvalidated wire shape of a `PriceSeries`.
#[derive(Deserialize)]
struct RawPriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = CoreError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        PriceSeries::new(raw.dates, raw.prices)
    }
}

impl PriceSeries {
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self, CoreError> {
        if dates.len() != prices.len() {
            return Err(CoreError::invalid(
                "price series",
                format!("{} dates but {} prices", dates.len(), prices.len()),
            ));
        }
        if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(CoreError::invalid(
                "price series",
                format!("dates must be strictly ascending ({} followed by {})", w[0], w[1]),
            ));
        }
        if let Some((i, p)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(CoreError::invalid(
                "price series",
                format!("price at index {} is not a positive number: {}", i, p),
            ));
        }
        Ok(Self { dates, prices })
    }

    /// Parses ISO 8601 calendar dates (`YYYY-MM-DD`) and validates the pairs.
    pub fn from_iso_dates<S: AsRef<str>>(dates: &[S], prices: Vec<f64>) -> Result<Self, CoreError> {
        let parsed = dates
            .iter()
            .map(|d| {
                let raw = d.as_ref();
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| CoreError::invalid("date", format!("'{}': {}", raw, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed, prices)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

/// MACD line, its signal line and their difference at the latest point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macd {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// A snapshot of every indicator the composite scorer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TechnicalIndicatorSet {
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger: BollingerBands,
    /// Mean absolute close-to-close move, not a true-range ATR.
    pub atr: f64,
    pub volume_ratio: f64,
}

/// The scorer's verdict for the latest price.
///
/// Percent fields are whole numbers in `0..=100`; prices are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub signal: SignalKind,
    pub composite_score: f64,
    pub confidence: u8,
    pub risk_score: u8,
    pub target_price: Decimal,
    pub stop_loss: Decimal,
    pub probability_profit: u8,
    pub momentum_score: u8,
    pub volatility_score: u8,
    pub trend_strength: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub pattern_type: PatternType,
    /// Fixed per pattern type, in `0..=1`.
    pub confidence: f64,
    pub prediction: String,
    /// Fixed per pattern type, in `0..=100`.
    pub historical_accuracy: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub position: PositionState,
}

/// The immutable outcome of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub run_id: Uuid,
    pub total_return: f64,
    /// Buy-and-hold compounded return over the same dates.
    pub market_total_return: f64,
    /// `None` when the strategy returns have zero variance.
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: f64,
    /// Fraction of days with a positive strategy return (per day, not per trade).
    pub win_rate: f64,
    pub total_trades: usize,
    pub strategy_returns: Vec<f64>,
    pub market_returns: Vec<f64>,
    /// The date each return was realised on; `dates[i]` pairs with `strategy_returns[i]`.
    pub dates: Vec<NaiveDate>,
    pub signals: Vec<TradingSignal>,
    /// Set when the prices came from the random-walk generator instead of a provider.
    pub synthetic_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_price_series_accepts_ascending_dates() {
        let series = PriceSeries::from_iso_dates(&["2024-01-02", "2024-01-03"], vec![10.0, 11.0]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.dates()[0], d("2024-01-02"));
        assert_eq!(series.last_price(), Some(11.0));
    }

    #[test]
    fn test_price_series_rejects_mismatched_lengths() {
        let err = PriceSeries::new(vec![d("2024-01-02")], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_, _)));
    }

    #[test]
    fn test_price_series_rejects_duplicate_dates() {
        let err = PriceSeries::from_iso_dates(&["2024-01-02", "2024-01-02"], vec![1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn test_price_series_rejects_non_positive_price() {
        let err = PriceSeries::from_iso_dates(&["2024-01-02", "2024-01-03"], vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_, _)));
    }

    #[test]
    fn test_price_series_rejects_bad_date_format() {
        let err = PriceSeries::from_iso_dates(&["01/02/2024"], vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("01/02/2024"));
    }

    #[test]
    fn test_price_series_deserialization_is_validated() {
        let ok: PriceSeries =
            serde_json::from_str(r#"{"dates":["2024-01-02","2024-01-03"],"prices":[10.0,11.0]}"#).unwrap();
        assert_eq!(ok.len(), 2);

        let unordered = serde_json::from_str::<PriceSeries>(
            r#"{"dates":["2024-01-03","2024-01-02"],"prices":[10.0,11.0]}"#,
        );
        assert!(unordered.unwrap_err().to_string().contains("strictly ascending"));

        let zero = serde_json::from_str::<PriceSeries>(r#"{"dates":["2024-01-02"],"prices":[0.0]}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn test_enums_serialize_like_the_wire_format() {
        assert_eq!(serde_json::to_string(&SignalKind::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&TradeAction::Cover).unwrap(), "\"cover\"");
        assert_eq!(serde_json::to_string(&PositionState::Neutral).unwrap(), "\"neutral\"");
    }
}
