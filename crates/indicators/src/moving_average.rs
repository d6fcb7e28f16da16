use crate::error::IndicatorError;
use core_types::{ensure_len, CoreError};
use ta::indicators::{ExponentialMovingAverage as Ema, SimpleMovingAverage as Sma};
use ta::Next;

pub(crate) fn ensure_period(name: &str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(CoreError::invalid(name, "period must be greater than zero").into());
    }
    Ok(())
}

/// Simple moving average over every full trailing window.
///
/// The output has `series.len() - period + 1` values; element `j` is the mean
/// of `series[j..j + period]`.
pub fn sma(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    ensure_period("SMA", period)?;
    ensure_len("SMA", period, series.len())?;

    let mut ma = Sma::new(period)?;
    let values = series
        .iter()
        .enumerate()
        .filter_map(|(i, &price)| {
            // `ta` averages partial windows during warm-up; those are dropped.
            let value = ma.next(price);
            (i + 1 >= period).then_some(value)
        })
        .collect();
    Ok(values)
}

/// The SMA of the trailing window ending at the last element.
pub fn latest_sma(series: &[f64], period: usize) -> Result<f64, IndicatorError> {
    ensure_period("SMA", period)?;
    ensure_len("SMA", period, series.len())?;
    let window = &series[series.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average seeded with the first value.
///
/// One output per input: `ema[0] = series[0]` and
/// `ema[i] = series[i] * k + ema[i - 1] * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    ensure_period("EMA", period)?;
    ensure_len("EMA", 1, series.len())?;

    let mut ma = Ema::new(period)?;
    Ok(series.iter().map(|&price| ma.next(price)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_of_one_full_window() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 5).unwrap();
        assert_eq!(result.len(), 1);
        assert!((result[0] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sma_aligns_to_trailing_windows() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-12);
        assert!((result[1] - 3.0).abs() < 1e-12);
        assert!((result[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_of_constant_series_is_constant() {
        let series = vec![42.5; 60];
        for value in sma(&series, 20).unwrap() {
            assert!((value - 42.5).abs() < 1e-9, "got {}", value);
        }
    }

    #[test]
    fn test_sma_rejects_short_series() {
        let err = sma(&[1.0, 2.0], 3).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        let err = sma(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, IndicatorError::Core(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn test_latest_sma_matches_last_rolling_value() {
        let series: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let rolling = sma(&series, 20).unwrap();
        let latest = latest_sma(&series, 20).unwrap();
        assert!((rolling[rolling.len() - 1] - latest).abs() < 1e-9);
    }

    #[test]
    fn test_ema_is_seeded_with_first_value() {
        let result = ema(&[10.0, 20.0], 3).unwrap();
        assert_eq!(result.len(), 2);
        assert!((result[0] - 10.0).abs() < f64::EPSILON);
        // k = 0.5 for period 3
        assert!((result[1] - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_nondecreasing_on_increasing_series() {
        let series: Vec<f64> = (1..=100).map(|i| i as f64 * 1.5).collect();
        let result = ema(&series, 12).unwrap();
        assert!(result.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_ema_rejects_empty_series() {
        assert!(ema(&[], 12).unwrap_err().is_insufficient_data());
    }
}
