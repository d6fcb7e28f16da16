use serde::{Deserialize, Serialize};
use std::fmt;

/// The discrete recommendation produced by the composite scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// An action emitted by the backtester when its position changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Short,
    Cover,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
            TradeAction::Short => "short",
            TradeAction::Cover => "cover",
        };
        f.write_str(s)
    }
}

/// The backtester's exposure at the close of a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionState {
    Long,
    Short,
    #[default]
    Neutral,
}

impl PositionState {
    /// The signed exposure multiplier applied to the next day's market return.
    pub fn exposure(&self) -> f64 {
        match self {
            PositionState::Long => 1.0,
            PositionState::Short => -1.0,
            PositionState::Neutral => 0.0,
        }
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionState::Long => "long",
            PositionState::Short => "short",
            PositionState::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// The chart patterns the detector knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    GoldenCross,
    DoubleTop,
    DoubleBottom,
    SymmetricalTriangle,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternType::GoldenCross => "Golden Cross",
            PatternType::DoubleTop => "Double Top",
            PatternType::DoubleBottom => "Double Bottom",
            PatternType::SymmetricalTriangle => "Symmetrical Triangle",
        };
        f.write_str(s)
    }
}
