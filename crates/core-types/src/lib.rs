pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{PatternType, PositionState, SignalKind, TradeAction};
pub use error::{ensure_len, CoreError};
pub use structs::{
    BacktestResult, BollingerBands, DetectedPattern, Macd, PriceSeries, SignalDecision,
    TechnicalIndicatorSet, TradingSignal,
};
