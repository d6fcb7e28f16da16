use crate::error::BacktestError;
use crate::strategy::MonthlyMomentum;
use analytics::{compounded_return, AnalyticsEngine};
use configuration::MonthlyMomentumParams;
use core_types::{ensure_len, BacktestResult, PositionState, PriceSeries};
use uuid::Uuid;

/// The main backtesting engine.
///
/// Replays a validated price series through the monthly momentum state machine
/// and hands the resulting daily returns to the `AnalyticsEngine`.
#[derive(Debug, Clone)]
pub struct Backtester {
    params: MonthlyMomentumParams,
    analytics_engine: AnalyticsEngine,
}

impl Backtester {
    pub fn new(params: MonthlyMomentumParams) -> Result<Self, BacktestError> {
        // Fail on bad calendar rules here rather than on the first run.
        MonthlyMomentum::new(params.clone())?;
        let analytics_engine = AnalyticsEngine::new(params.trading_days_per_year)?;
        Ok(Self {
            params,
            analytics_engine,
        })
    }

    /// Runs the simulation.
    ///
    /// `synthetic_data` is carried into the result unchanged so callers can tell
    /// generated prices from provider data.
    pub fn run(&self, series: &PriceSeries, synthetic_data: bool) -> Result<BacktestResult, BacktestError> {
        ensure_len("monthly momentum backtest", 2, series.len())?;
        let prices = series.prices();
        let dates = series.dates();

        // --- 1. WALK THE CALENDAR ---
        let mut machine = MonthlyMomentum::new(self.params.clone())?;
        let mut signals = Vec::new();
        let positions: Vec<PositionState> = dates
            .iter()
            .zip(prices)
            .enumerate()
            .map(|(i, (date, price))| machine.step(i, *date, *price, &mut signals))
            .collect();

        // --- 2. DAILY RETURNS ---
        // Yesterday's closing position earns today's market move.
        let market_returns: Vec<f64> = prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
        let strategy_returns: Vec<f64> = positions
            .iter()
            .zip(&market_returns)
            .map(|(position, market)| position.exposure() * market)
            .collect();

        // --- 3. REPORT ---
        let report = self.analytics_engine.calculate(&strategy_returns)?;
        let market_total_return = compounded_return(&market_returns);

        let result = BacktestResult {
            run_id: Uuid::new_v4(),
            total_return: report.total_return,
            market_total_return,
            sharpe_ratio: report.sharpe_ratio,
            max_drawdown: report.max_drawdown,
            win_rate: report.win_rate,
            total_trades: signals.len(),
            strategy_returns,
            market_returns,
            dates: dates[1..].to_vec(),
            signals,
            synthetic_data,
        };

        tracing::info!(
            run_id = %result.run_id,
            synthetic = result.synthetic_data,
            "Backtest over {} days: return {:.2}%, max drawdown {:.2}%, {} signals",
            series.len(),
            result.total_return * 100.0,
            result.max_drawdown * 100.0,
            result.total_trades
        );

        Ok(result)
    }
}

/// Runs the monthly momentum strategy over a validated series.
pub fn run_monthly_momentum_backtest(
    series: &PriceSeries,
    params: &MonthlyMomentumParams,
    synthetic_data: bool,
) -> Result<BacktestResult, BacktestError> {
    Backtester::new(params.clone())?.run(series, synthetic_data)
}

/// Convenience entry point over raw prices and ISO 8601 (`YYYY-MM-DD`) dates,
/// using the default calendar rules.
pub fn backtest_prices<S: AsRef<str>>(prices: &[f64], dates: &[S]) -> Result<BacktestResult, BacktestError> {
    let series = PriceSeries::from_iso_dates(dates, prices.to_vec())?;
    run_monthly_momentum_backtest(&series, &MonthlyMomentumParams::default(), false)
}
