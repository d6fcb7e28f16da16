//! Terminal tables for the CLI's non-JSON output.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use core_types::{BacktestResult, DetectedPattern, SignalDecision, TechnicalIndicatorSet, TradeAction};

fn metric_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table
}

fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

pub fn indicator_table(set: &TechnicalIndicatorSet) -> Table {
    let mut table = metric_table();
    table
        .add_row(vec!["SMA 20".to_string(), format!("{:.4}", set.sma20)])
        .add_row(vec!["SMA 50".to_string(), format!("{:.4}", set.sma50)])
        .add_row(vec!["SMA 200".to_string(), format!("{:.4}", set.sma200)])
        .add_row(vec!["RSI".to_string(), format!("{:.2}", set.rsi)])
        .add_row(vec![
            "MACD (value / signal / hist)".to_string(),
            format!("{:.4} / {:.4} / {:.4}", set.macd.value, set.macd.signal, set.macd.histogram),
        ])
        .add_row(vec![
            "Bollinger (upper / middle / lower)".to_string(),
            format!(
                "{:.4} / {:.4} / {:.4}",
                set.bollinger.upper, set.bollinger.middle, set.bollinger.lower
            ),
        ])
        .add_row(vec!["ATR (abs. delta)".to_string(), format!("{:.4}", set.atr)])
        .add_row(vec!["Volume ratio".to_string(), format!("{:.2}", set.volume_ratio)]);
    table
}

pub fn decision_table(price: f64, decision: &SignalDecision) -> Table {
    let mut table = metric_table();
    table
        .add_row(vec!["Price".to_string(), format!("{:.2}", price)])
        .add_row(vec!["Signal".to_string(), decision.signal.to_string()])
        .add_row(vec!["Composite".to_string(), format!("{:.4}", decision.composite_score)])
        .add_row(vec!["Confidence".to_string(), format!("{}%", decision.confidence)])
        .add_row(vec!["Risk".to_string(), format!("{}%", decision.risk_score)])
        .add_row(vec!["Target".to_string(), decision.target_price.to_string()])
        .add_row(vec!["Stop loss".to_string(), decision.stop_loss.to_string()])
        .add_row(vec!["P(profit)".to_string(), format!("{}%", decision.probability_profit)])
        .add_row(vec!["Momentum".to_string(), format!("{}%", decision.momentum_score)])
        .add_row(vec!["Volatility".to_string(), format!("{}%", decision.volatility_score)])
        .add_row(vec!["Trend".to_string(), format!("{}%", decision.trend_strength)])
        .add_row(vec!["Reasoning".to_string(), decision.reasoning.clone()]);
    table
}

pub fn pattern_table(found: &[DetectedPattern]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Pattern", "Confidence", "Accuracy", "Prediction"]);
    for pattern in found {
        table.add_row(vec![
            pattern.pattern_type.to_string(),
            format!("{:.2}", pattern.confidence),
            format!("{}%", pattern.historical_accuracy),
            pattern.prediction.clone(),
        ]);
    }
    table
}

pub fn backtest_table(symbol: &str, result: &BacktestResult) -> Table {
    let count = |action: TradeAction| result.signals.iter().filter(|s| s.action == action).count();
    let sharpe = result
        .sharpe_ratio
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "n/a".to_string());
    let period = match (result.dates.first(), result.dates.last()) {
        (Some(first), Some(last)) => format!("{} to {}", first, last),
        _ => "-".to_string(),
    };

    let mut table = metric_table();
    table
        .add_row(vec!["Symbol".to_string(), symbol.to_string()])
        .add_row(vec!["Run".to_string(), result.run_id.to_string()])
        .add_row(vec!["Period".to_string(), period])
        .add_row(vec!["Data".to_string(), if result.synthetic_data { "SYNTHETIC".to_string() } else { "market".to_string() }])
        .add_row(vec!["Total return".to_string(), pct(result.total_return)])
        .add_row(vec!["Buy & hold".to_string(), pct(result.market_total_return)])
        .add_row(vec!["Sharpe".to_string(), sharpe])
        .add_row(vec!["Max drawdown".to_string(), pct(result.max_drawdown)])
        .add_row(vec!["Win rate (days)".to_string(), pct(result.win_rate)])
        .add_row(vec!["Signals".to_string(), result.total_trades.to_string()])
        .add_row(vec![
            "short / cover / buy / sell".to_string(),
            format!(
                "{} / {} / {} / {}",
                count(TradeAction::Short),
                count(TradeAction::Cover),
                count(TradeAction::Buy),
                count(TradeAction::Sell)
            ),
        ]);
    table
}
