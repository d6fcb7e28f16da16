use crate::error::IndicatorError;
use crate::moving_average::ensure_period;
use core_types::{ensure_len, Macd};
use ta::indicators::MovingAverageConvergenceDivergence as TaMacd;
use ta::Next;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const MACD_FAST_PERIOD: usize = 12;
pub const MACD_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// Relative Strength Index over the last `period` price changes.
///
/// Gains and losses are plain averages over the trailing window (no Wilder
/// smoothing). When the window holds no losses the result is exactly 100,
/// including for a flat window.
pub fn rsi(series: &[f64], period: usize) -> Result<f64, IndicatorError> {
    ensure_period("RSI", period)?;
    ensure_len("RSI", period + 1, series.len())?;

    let window = &series[series.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }
    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}

/// MACD (12/26 EMA difference) with a 9-period EMA signal line, at the latest point.
///
/// Both EMAs and the signal line are seeded with their first input, so the
/// signal line smooths the whole MACD history rather than only the part after
/// the slow EMA has warmed up.
pub fn macd(series: &[f64]) -> Result<Macd, IndicatorError> {
    ensure_len("MACD", MACD_SLOW_PERIOD, series.len())?;

    let mut indicator = TaMacd::new(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD)?;
    let mut latest = Macd::default();
    for &price in series {
        let out = indicator.next(price);
        latest = Macd {
            value: out.macd,
            signal: out.signal,
            histogram: out.histogram,
        };
    }
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moving_average::ema;

    #[test]
    fn test_rsi_all_gains_is_100() {
        let series: Vec<f64> = (1..=15).map(|i| i as f64).collect();
        assert_eq!(rsi(&series, 14).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let series: Vec<f64> = (1..=15).rev().map(|i| i as f64).collect();
        assert!(rsi(&series, 14).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_rsi_balanced_moves_is_50() {
        // Alternating +1 / -1 changes: equal average gain and loss.
        let series: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        assert!((rsi(&series, 14).unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_stays_in_range() {
        let series: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.05).collect();
        let value = rsi(&series, 14).unwrap();
        assert!((0.0..=100.0).contains(&value), "rsi out of range: {}", value);
    }

    #[test]
    fn test_rsi_only_uses_trailing_window() {
        // A crash long before the window must not matter.
        let mut series = vec![100.0, 10.0];
        series.extend((1..=15).map(|i| 10.0 + i as f64));
        assert_eq!(rsi(&series, 14).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_requires_period_plus_one_points() {
        let series: Vec<f64> = (1..=14).map(|i| i as f64).collect();
        assert!(rsi(&series, 14).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_macd_matches_ema_difference() {
        let series: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.2).cos() * 4.0 + i as f64 * 0.1).collect();
        let fast = ema(&series, 12).unwrap();
        let slow = ema(&series, 26).unwrap();
        let history: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(&history, 9).unwrap();

        let result = macd(&series).unwrap();
        assert!((result.value - history[history.len() - 1]).abs() < 1e-9);
        assert!((result.signal - signal[signal.len() - 1]).abs() < 1e-9);
        assert!((result.histogram - (result.value - result.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let series: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        assert!(macd(&series).unwrap().value > 0.0);
    }

    #[test]
    fn test_macd_requires_26_points() {
        let series = vec![1.0; 25];
        assert!(macd(&series).unwrap_err().is_insufficient_data());
    }
}
