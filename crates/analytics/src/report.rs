use serde::{Deserialize, Serialize};

/// Risk and return statistics for a series of periodic returns.
///
/// This struct is the output of the `AnalyticsEngine` and is folded into the
/// backtester's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Compounded return over all periods, e.g. `0.12` for +12%.
    pub total_return: f64,
    pub mean_return: f64,
    /// Population standard deviation of the periodic returns.
    pub std_dev: f64,
    pub sharpe_ratio: Option<f64>, // Option<> for cases with no stdev
    /// Largest peak-to-trough fall of the compounded curve, as a fraction of the peak.
    pub max_drawdown: f64,
    /// Fraction of periods with a strictly positive return.
    pub win_rate: f64,
    pub winning_periods: usize,
    pub periods: usize,
}

impl PerformanceReport {
    /// Creates a new, zeroed-out PerformanceReport.
    pub fn new() -> Self {
        Self {
            total_return: 0.0,
            mean_return: 0.0,
            std_dev: 0.0,
            sharpe_ratio: None,
            max_drawdown: 0.0,
            win_rate: 0.0,
            winning_periods: 0,
            periods: 0,
        }
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new()
    }
}
