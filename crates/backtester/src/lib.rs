//! # Backtester
//!
//! Replays a daily price series through the monthly momentum calendar strategy
//! and reports returns, Sharpe ratio, drawdown and win rate.
//!
//! ## Architectural Principles
//!
//! - **Explicit State Machine:** `MonthlyMomentum` owns the position and emits a
//!   closing signal for every exit, so the signal stream always alternates.
//! - **Pure and Synchronous:** Prices are fetched by the caller; a run never
//!   blocks on I/O.
//! - **Delegated Metrics:** Risk and return statistics come from the `analytics`
//!   crate.
//!
//! ## Public API
//!
//! - `run_monthly_momentum_backtest` / `Backtester`: Runs the strategy.
//! - `summarize`: A deterministic narrative over a `BacktestResult`.

pub mod engine;
pub mod error;
pub mod strategy;
pub mod summary;

pub use engine::{backtest_prices, run_monthly_momentum_backtest, Backtester};
pub use error::BacktestError;
pub use strategy::{days_until_month_end, MonthlyMomentum};
pub use summary::{summarize, BacktestSummary};
