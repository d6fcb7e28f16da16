//! # Analytics Engine
//!
//! Quantitative performance metrics for a series of periodic returns.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No knowledge of strategies, data sources or I/O.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes raw returns as input
//!   and produces a `PerformanceReport` as output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `PerformanceReport`: Compounded return, Sharpe ratio, drawdown and win rate.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{compounded_return, max_drawdown, AnalyticsEngine, TRADING_DAYS_PER_YEAR};
pub use error::AnalyticsError;
pub use report::PerformanceReport;
