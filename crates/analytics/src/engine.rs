use crate::error::AnalyticsError;
use crate::report::PerformanceReport;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A stateless calculator for deriving performance metrics from periodic returns.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    periods_per_year: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl AnalyticsEngine {
    pub fn new(periods_per_year: f64) -> Result<Self, AnalyticsError> {
        if !periods_per_year.is_finite() || periods_per_year <= 0.0 {
            return Err(AnalyticsError::InvalidParameter(
                "periods_per_year".to_string(),
                format!("must be positive, got {}", periods_per_year),
            ));
        }
        Ok(Self { periods_per_year })
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `returns` - Simple periodic returns, e.g. `0.01` for +1% on a day.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceReport` or an `AnalyticsError`.
    pub fn calculate(&self, returns: &[f64]) -> Result<PerformanceReport, AnalyticsError> {
        if returns.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "at least one periodic return is required".to_string(),
            ));
        }
        if let Some(r) = returns.iter().find(|r| !r.is_finite()) {
            return Err(AnalyticsError::Calculation(format!("non-finite return {}", r)));
        }

        let mut report = PerformanceReport::new();
        report.periods = returns.len();
        report.total_return = compounded_return(returns);

        self.calculate_ratios(returns, &mut report);
        report.max_drawdown = max_drawdown(returns);

        report.winning_periods = returns.iter().filter(|r| **r > 0.0).count();
        report.win_rate = report.winning_periods as f64 / report.periods as f64;

        tracing::debug!(
            periods = report.periods,
            std_dev = report.std_dev,
            "Analytics: total return {:.4}, max drawdown {:.4}",
            report.total_return,
            report.max_drawdown
        );

        Ok(report)
    }

    /// Mean, dispersion and the annualised Sharpe ratio (risk-free rate of zero).
    fn calculate_ratios(&self, returns: &[f64], report: &mut PerformanceReport) {
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        report.mean_return = mean;
        report.std_dev = std_dev;
        report.sharpe_ratio = if std_dev > 0.0 {
            Some((mean * self.periods_per_year) / (std_dev * self.periods_per_year.sqrt()))
        } else {
            None
        };
    }
}

/// The product of `(1 + r)` over all periods, minus one.
pub fn compounded_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Maximum drawdown of the compounded curve, starting from an initial peak of 1.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut peak = 1.0_f64;
    let mut equity = 1.0_f64;
    let mut max_drawdown = 0.0_f64;

    for r in returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        let drawdown = (peak - equity) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }
    max_drawdown
}
