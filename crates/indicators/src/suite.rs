use crate::error::IndicatorError;
use crate::moving_average::{ensure_period, latest_sma};
use crate::oscillators::{macd, rsi};
use crate::volatility::{atr, bollinger_bands};
use configuration::IndicatorSettings;
use core_types::{ensure_len, CoreError, TechnicalIndicatorSet};

/// Computes the full indicator suite with the default periods.
///
/// Fails with `InsufficientData` below 50 prices and with `InvalidInput` when
/// `volumes` is not aligned with `prices`.
pub fn compute_indicators(prices: &[f64], volumes: &[f64]) -> Result<TechnicalIndicatorSet, IndicatorError> {
    compute_indicators_with(prices, volumes, &IndicatorSettings::default())
}

/// Computes the full indicator suite with explicit periods.
pub fn compute_indicators_with(
    prices: &[f64],
    volumes: &[f64],
    settings: &IndicatorSettings,
) -> Result<TechnicalIndicatorSet, IndicatorError> {
    ensure_len("technical indicator suite", settings.min_history, prices.len())?;
    if volumes.len() != prices.len() {
        return Err(CoreError::invalid(
            "volumes",
            format!("expected {} volumes aligned with prices, got {}", prices.len(), volumes.len()),
        )
        .into());
    }
    if let Some(p) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(CoreError::invalid("prices", format!("prices must be positive, got {}", p)).into());
    }
    if let Some(v) = volumes.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(CoreError::invalid("volumes", format!("volumes must be non-negative, got {}", v)).into());
    }
    ensure_period("SMA", settings.sma_long_period)?;

    let sma20 = latest_sma(prices, settings.sma_short_period)?;
    let sma50 = latest_sma(prices, settings.sma_medium_period)?;
    // The long average degrades to whatever history exists.
    let sma200 = latest_sma(prices, settings.sma_long_period.min(prices.len()))?;
    let rsi = rsi(prices, settings.rsi_period)?;
    let macd = macd(prices)?;
    let bollinger = bollinger_bands(prices, settings.bollinger_period, settings.bollinger_std_dev)?;
    let atr = atr(prices, settings.atr_period)?;
    let volume_ratio = volume_ratio(volumes, settings.volume_period)?;

    tracing::debug!(
        sma20, sma50, sma200, rsi, macd = macd.value, atr, volume_ratio,
        "Computed technical indicators over {} prices",
        prices.len()
    );

    Ok(TechnicalIndicatorSet {
        sma20,
        sma50,
        sma200,
        rsi,
        macd,
        bollinger,
        atr,
        volume_ratio,
    })
}

/// The latest volume relative to its trailing average; 0 when that average is 0.
pub fn volume_ratio(volumes: &[f64], period: usize) -> Result<f64, IndicatorError> {
    let average = latest_sma(volumes, period)?;
    let last = volumes[volumes.len() - 1];
    if average == 0.0 {
        return Ok(0.0);
    }
    Ok(last / average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_prices(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.9).sin()).collect()
    }

    #[test]
    fn test_compute_indicators_on_uptrend() {
        let prices = trending_prices(120);
        let mut volumes = vec![1_000.0; 120];
        volumes[119] = 1_500.0;

        let set = compute_indicators(&prices, &volumes).unwrap();
        assert!(set.sma20 > set.sma50);
        assert!(set.sma50 > set.sma200);
        assert!(set.macd.value > 0.0);
        assert!(set.bollinger.upper > set.bollinger.middle);
        assert!(set.bollinger.middle > set.bollinger.lower);
        assert!(set.atr > 0.0);
        assert!((0.0..=100.0).contains(&set.rsi));
        // 1500 / ((19 * 1000 + 1500) / 20)
        assert!((set.volume_ratio - 1500.0 / 1025.0).abs() < 1e-9);
    }

    #[test]
    fn test_sma200_falls_back_to_available_history() {
        let prices = trending_prices(60);
        let volumes = vec![10.0; 60];
        let set = compute_indicators(&prices, &volumes).unwrap();
        let full_mean = prices.iter().sum::<f64>() / 60.0;
        assert!((set.sma200 - full_mean).abs() < 1e-9);
    }

    #[test]
    fn test_requires_fifty_prices() {
        let prices = trending_prices(49);
        let volumes = vec![1.0; 49];
        let err = compute_indicators(&prices, &volumes).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_rejects_misaligned_volumes() {
        let prices = trending_prices(60);
        let volumes = vec![1.0; 59];
        let err = compute_indicators(&prices, &volumes).unwrap_err();
        assert!(matches!(err, IndicatorError::Core(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn test_zero_volume_history_gives_zero_ratio() {
        assert_eq!(volume_ratio(&[0.0; 25], 20).unwrap(), 0.0);
    }
}
