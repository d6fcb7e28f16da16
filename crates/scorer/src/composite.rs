use crate::error::ScoringError;
use crate::factors::{
    momentum_score, profit_probability, risk_score, rsi_score, trend_score, volatility_score,
    RSI_OVERBOUGHT, RSI_OVERSOLD,
};
use configuration::ScoringWeights;
use core_types::{CoreError, SignalDecision, SignalKind, TechnicalIndicatorSet};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

pub const BUY_THRESHOLD: f64 = 0.7;
pub const SELL_THRESHOLD: f64 = 0.3;

const TARGET_ATR_MULTIPLE: f64 = 2.0;
const STOP_ATR_MULTIPLE: f64 = 1.5;

/// A weighted multi-factor scorer.
///
/// The weights are applied as given. With the defaults they sum to 0.70, which
/// caps the composite at 0.65 and makes BUY unreachable; this is the
/// established behaviour and is not normalised away. Use
/// `ScoringWeights::normalized` for a scorer whose composite spans `[0, 1]`.
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weights: ScoringWeights,
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl CompositeScorer {
    pub fn new(weights: ScoringWeights) -> Result<Self, ScoringError> {
        let applied = [
            weights.rsi_weight,
            weights.sma_weight,
            weights.momentum_weight,
            weights.volatility_weight,
        ];
        if applied.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoringError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.applied_sum() <= 0.0 {
            return Err(ScoringError::InvalidWeights(
                "at least one applied weight must be positive".to_string(),
            ));
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scores the latest price against a snapshot of indicators.
    pub fn score(&self, price: f64, set: &TechnicalIndicatorSet) -> Result<SignalDecision, ScoringError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::invalid("price", format!("must be a positive number, got {}", price)).into());
        }

        let rsi = rsi_score(set.rsi);
        let trend = trend_score(price, set);
        let momentum = momentum_score(set.macd.value, set.volume_ratio);
        let volatility = volatility_score(set.atr, price);

        let composite = rsi * self.weights.rsi_weight
            + trend * self.weights.sma_weight
            + momentum * self.weights.momentum_weight
            + volatility * self.weights.volatility_weight;

        let signal = classify(composite);
        let risk = risk_score(price, set);
        let (target, stop) = price_levels(price, set.atr, signal);
        let probability = profit_probability(composite, risk);
        let reasoning = reasoning(price, set, composite, signal);

        tracing::debug!(
            rsi, trend, momentum, volatility, composite, risk,
            "Scored price {} as {}", price, signal
        );

        Ok(SignalDecision {
            signal,
            composite_score: composite,
            confidence: percent(composite),
            risk_score: percent(risk),
            target_price: to_cents(target)?,
            stop_loss: to_cents(stop)?,
            probability_profit: percent(probability),
            momentum_score: percent(momentum),
            volatility_score: percent(volatility),
            trend_strength: percent(trend),
            reasoning,
        })
    }
}

/// Scores with explicit weights; see `CompositeScorer`.
pub fn score(
    price: f64,
    set: &TechnicalIndicatorSet,
    weights: &ScoringWeights,
) -> Result<SignalDecision, ScoringError> {
    CompositeScorer::new(*weights)?.score(price, set)
}

pub fn classify(composite: f64) -> SignalKind {
    if composite > BUY_THRESHOLD {
        SignalKind::Buy
    } else if composite < SELL_THRESHOLD {
        SignalKind::Sell
    } else {
        SignalKind::Hold
    }
}

/// Target and stop for the chosen direction. HOLD keeps both at the price.
pub fn price_levels(price: f64, atr: f64, signal: SignalKind) -> (f64, f64) {
    match signal {
        SignalKind::Buy => (price + atr * TARGET_ATR_MULTIPLE, price - atr * STOP_ATR_MULTIPLE),
        SignalKind::Sell => (price - atr * TARGET_ATR_MULTIPLE, price + atr * STOP_ATR_MULTIPLE),
        SignalKind::Hold => (price, price),
    }
}

pub fn confidence_label(composite: f64) -> &'static str {
    if composite > 0.7 {
        "high"
    } else if composite > 0.4 {
        "moderate"
    } else {
        "low"
    }
}

fn reasoning(price: f64, set: &TechnicalIndicatorSet, composite: f64, signal: SignalKind) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if price > set.sma200 {
        reasons.push("Price is in a long-term uptrend above the 200-day MA");
    }
    if set.rsi < RSI_OVERSOLD {
        reasons.push("RSI indicates oversold conditions - potential reversal");
    } else if set.rsi > RSI_OVERBOUGHT {
        reasons.push("RSI shows overbought conditions - caution advised");
    }
    if set.macd.value > 0.0 {
        reasons.push("MACD shows positive momentum");
    }
    if set.volume_ratio > 1.5 {
        reasons.push("Above-average volume confirms price action");
    }

    let head = format!("{} signal with {} confidence.", signal, confidence_label(composite));
    if reasons.is_empty() {
        head
    } else {
        format!("{} {}.", head, reasons.join(". "))
    }
}

/// `round(x * 100)` bounded to a percentage.
fn percent(x: f64) -> u8 {
    (x * 100.0).round().clamp(0.0, 100.0) as u8
}

fn to_cents(value: f64) -> Result<Decimal, ScoringError> {
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| ScoringError::Calculation(format!("cannot represent price {} as a decimal", value)))?;
    Ok(decimal
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .max(dec!(0)))
}
