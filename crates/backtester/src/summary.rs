//! Plain-language narrative for a finished backtest.
//!
//! The text is assembled deterministically from the result's numbers; nothing
//! here calls out to a language model.

use configuration::BacktestStrategy;
use core_types::BacktestResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSummary {
    pub summary: String,
    pub key_insights: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn strategy_name(strategy: BacktestStrategy) -> &'static str {
    match strategy {
        BacktestStrategy::MonthlyMomentum => "Monthly Momentum",
    }
}

pub fn sharpe_quality(sharpe: Option<f64>) -> &'static str {
    match sharpe {
        Some(s) if s > 1.0 => "strong",
        Some(s) if s > 0.5 => "moderate",
        _ => "weak",
    }
}

/// Qualifies a drawdown given as a fraction (0.12 for 12%).
pub fn drawdown_risk(max_drawdown: f64) -> &'static str {
    let pct = max_drawdown * 100.0;
    if pct < 10.0 {
        "low"
    } else if pct < 20.0 {
        "moderate"
    } else {
        "high"
    }
}

pub fn summarize(result: &BacktestResult, symbol: &str, strategy: BacktestStrategy) -> BacktestSummary {
    let name = strategy_name(strategy);
    let total_pct = result.total_return * 100.0;
    let market_pct = result.market_total_return * 100.0;
    let drawdown_pct = result.max_drawdown * 100.0;
    let win_pct = result.win_rate * 100.0;
    let sharpe = match result.sharpe_ratio {
        Some(s) => format!("{:.2}", s),
        None => "n/a".to_string(),
    };

    let summary = format!(
        "The {} strategy for {} returned {:.2}% with a Sharpe ratio of {} and a maximum drawdown of {:.2}%. \
         {:.2}% of trading days were profitable across {} signals.",
        name, symbol, total_pct, sharpe, drawdown_pct, win_pct, result.total_trades
    );

    let relative = if total_pct >= market_pct { "outperformed" } else { "underperformed" };
    let key_insights = vec![
        format!(
            "Strategy {} buy-and-hold by {:.1} percentage points ({:.2}% vs {:.2}%)",
            relative,
            (total_pct - market_pct).abs(),
            total_pct,
            market_pct
        ),
        format!(
            "Sharpe ratio of {} indicates {} risk-adjusted performance",
            sharpe,
            sharpe_quality(result.sharpe_ratio)
        ),
        format!(
            "Maximum drawdown of {:.2}% shows {} risk",
            drawdown_pct,
            drawdown_risk(result.max_drawdown)
        ),
        format!(
            "{:.2}% of days were winners, measured per day rather than per trade",
            win_pct
        ),
    ];

    let mut risk_factors = vec![
        "Results come from historical prices and may not repeat".to_string(),
        format!("Rate and macro shocks can move {} sharply against an open position", symbol),
        "Calendar effects around month boundaries may fade as markets adapt".to_string(),
        "Transaction costs and slippage are not modelled".to_string(),
    ];
    if result.synthetic_data {
        risk_factors.insert(
            0,
            "Prices were generated by a random walk because market data was unavailable".to_string(),
        );
    }

    let recommendations = vec![
        "Size positions to the portfolio's risk tolerance".to_string(),
        "Place protective stops to cap losses on adverse moves".to_string(),
        "Combine with other asset classes for diversification".to_string(),
        "Re-run the backtest periodically as conditions change".to_string(),
    ];

    BacktestSummary {
        summary,
        key_insights,
        risk_factors,
        recommendations,
    }
}
