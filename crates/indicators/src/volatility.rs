use crate::error::IndicatorError;
use crate::moving_average::ensure_period;
use core_types::{ensure_len, BollingerBands, CoreError};
use ta::indicators::BollingerBands as TaBollingerBands;
use ta::Next;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;
pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Bollinger Bands for the trailing `period` window at the latest point.
///
/// The middle band is the SMA; the outer bands sit `k` population standard
/// deviations away from it.
pub fn bollinger_bands(series: &[f64], period: usize, k: f64) -> Result<BollingerBands, IndicatorError> {
    ensure_period("Bollinger Bands", period)?;
    ensure_len("Bollinger Bands", period, series.len())?;
    if !k.is_finite() || k <= 0.0 {
        return Err(CoreError::invalid("Bollinger Bands", format!("multiplier must be positive, got {}", k)).into());
    }

    let mut bands = TaBollingerBands::new(period, k)?;
    let mut latest = BollingerBands::default();
    // A fresh indicator over just the last window avoids drift in the running sums.
    for &price in &series[series.len() - period..] {
        let out = bands.next(price);
        latest = BollingerBands {
            upper: out.upper,
            middle: out.average,
            lower: out.lower,
        };
    }
    Ok(latest)
}

/// Average absolute close-to-close move over the trailing `period` prices.
///
/// This is an approximation of Average True Range for close-only data: it
/// ignores intraday high/low and gaps, and uses a plain mean instead of
/// Wilder smoothing. Values will not match a textbook ATR.
pub fn atr(series: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period < 2 {
        return Err(CoreError::invalid("ATR", "period must be at least 2").into());
    }
    ensure_len("ATR", period, series.len())?;

    let window = &series[series.len() - period..];
    let total: f64 = window.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    Ok(total / (period - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_constant_series_has_zero_width() {
        let bands = bollinger_bands(&vec![25.0; 30], 20, 2.0).unwrap();
        assert!((bands.middle - 25.0).abs() < 1e-9);
        assert!((bands.upper - bands.lower).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_straight_line_width_is_constant() {
        let series: Vec<f64> = (0..80).map(|i| 10.0 + 0.5 * i as f64).collect();
        let widths: Vec<f64> = (20..=80)
            .map(|end| {
                let b = bollinger_bands(&series[..end], 20, 2.0).unwrap();
                b.upper - b.lower
            })
            .collect();
        assert!(widths[0] > 0.0);
        for w in &widths {
            assert!((w - widths[0]).abs() < 1e-6, "width drifted: {} vs {}", w, widths[0]);
        }
    }

    #[test]
    fn test_bollinger_matches_population_std_dev() {
        let series = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // mean 5, population std dev 2
        let bands = bollinger_bands(&series, 8, 2.0).unwrap();
        assert!((bands.middle - 5.0).abs() < 1e-9);
        assert!((bands.upper - 9.0).abs() < 1e-9);
        assert!((bands.lower - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_requires_full_window() {
        assert!(bollinger_bands(&[1.0; 19], 20, 2.0).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_atr_is_mean_absolute_delta() {
        // deltas: +2, -1, +3 -> mean 2
        let value = atr(&[10.0, 12.0, 11.0, 14.0], 4).unwrap();
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_uses_trailing_window_only() {
        let value = atr(&[1000.0, 10.0, 11.0, 12.0], 3).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_rejects_degenerate_period() {
        assert!(matches!(
            atr(&[1.0, 2.0], 1).unwrap_err(),
            IndicatorError::Core(CoreError::InvalidInput(_, _))
        ));
    }
}
