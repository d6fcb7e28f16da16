//! # Indicator Library
//!
//! Stateless technical indicators over plain price and volume slices.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O, no shared state. Each function validates its input
//!   length and fails with `InsufficientData` rather than padding with zeros.
//! - **Close-Only Data:** Everything is derived from closing prices, which is why
//!   `atr` is an approximation of Average True Range (see its docs).
//!
//! ## Public API
//!
//! - `sma`, `ema`: aligned moving-average sequences.
//! - `rsi`, `macd`, `bollinger_bands`, `atr`: latest-point values.
//! - `compute_indicators`: the full `TechnicalIndicatorSet` consumed by the scorer.

pub mod error;
pub mod moving_average;
pub mod oscillators;
pub mod suite;
pub mod volatility;

pub use error::IndicatorError;
pub use moving_average::{ema, latest_sma, sma};
pub use oscillators::{macd, rsi, DEFAULT_RSI_PERIOD};
pub use suite::{compute_indicators, compute_indicators_with, volume_ratio};
pub use volatility::{atr, bollinger_bands, DEFAULT_ATR_PERIOD, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV};
