//! The individual sub-scores that feed the composite.
//!
//! Each factor maps part of a `TechnicalIndicatorSet` onto `[0, 1]`, where
//! higher values are more bullish (or, for volatility, calmer).

use core_types::TechnicalIndicatorSet;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Oversold reads as bullish, overbought as bearish.
pub fn rsi_score(rsi: f64) -> f64 {
    if rsi < RSI_OVERSOLD {
        0.8
    } else if rsi > RSI_OVERBOUGHT {
        0.2
    } else {
        0.5
    }
}

/// Rewards price above each moving average and a bullish MA stack.
pub fn trend_score(price: f64, set: &TechnicalIndicatorSet) -> f64 {
    let mut score = 0.5_f64;

    if price > set.sma20 {
        score += 0.1;
    }
    if price > set.sma50 {
        score += 0.2;
    }
    if price > set.sma200 {
        score += 0.3;
    }
    if set.sma20 > set.sma50 {
        score += 0.1;
    }
    if set.sma50 > set.sma200 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Positive MACD and above-average volume push momentum up.
pub fn momentum_score(macd: f64, volume_ratio: f64) -> f64 {
    let mut score = 0.5_f64;

    if macd > 0.0 {
        score += 0.3;
    }
    if volume_ratio > 1.2 {
        score += 0.2;
    }
    if volume_ratio > 2.0 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// ATR as a percentage of price.
pub fn atr_percent(atr: f64, price: f64) -> f64 {
    atr / price * 100.0
}

/// Calm markets score high, volatile ones low.
pub fn volatility_score(atr: f64, price: f64) -> f64 {
    let pct = atr_percent(atr, price);
    if pct < 2.0 {
        0.8
    } else if pct > 5.0 {
        0.3
    } else {
        0.6
    }
}

/// Extreme RSI, high volatility and volume spikes each add risk.
pub fn risk_score(price: f64, set: &TechnicalIndicatorSet) -> f64 {
    let mut risk = 0.5_f64;

    if set.rsi > 80.0 {
        risk += 0.2;
    }
    if set.rsi < 20.0 {
        risk += 0.1;
    }
    if atr_percent(set.atr, price) > 5.0 {
        risk += 0.2;
    }
    if set.volume_ratio > 3.0 {
        risk += 0.1;
    }

    risk.clamp(0.0, 1.0)
}

/// The composite adjusted for risk, bounded away from certainty.
pub fn profit_probability(composite: f64, risk: f64) -> f64 {
    (composite + (1.0 - risk) * 0.3).clamp(0.05, 0.95)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> TechnicalIndicatorSet {
        TechnicalIndicatorSet {
            sma20: 95.0,
            sma50: 90.0,
            sma200: 80.0,
            rsi: 50.0,
            atr: 1.0,
            volume_ratio: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_rsi_score_bands() {
        assert_eq!(rsi_score(29.9), 0.8);
        assert_eq!(rsi_score(30.0), 0.5);
        assert_eq!(rsi_score(70.0), 0.5);
        assert_eq!(rsi_score(70.1), 0.2);
    }

    #[test]
    fn test_trend_score_is_clamped_to_one() {
        assert_eq!(trend_score(100.0, &set()), 1.0);
    }

    #[test]
    fn test_trend_score_below_everything_is_neutral() {
        let bearish = TechnicalIndicatorSet {
            sma20: 105.0,
            sma50: 110.0,
            sma200: 120.0,
            ..set()
        };
        assert!((trend_score(100.0, &bearish) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_trend_score_partial() {
        // above sma200 only, with sma50 > sma200
        let mixed = TechnicalIndicatorSet {
            sma20: 104.0,
            sma50: 108.0,
            sma200: 90.0,
            ..set()
        };
        assert!((trend_score(100.0, &mixed) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_score() {
        assert!((momentum_score(-1.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((momentum_score(1.0, 1.5) - 1.0).abs() < 1e-12);
        assert_eq!(momentum_score(1.0, 2.5), 1.0);
        assert!((momentum_score(-1.0, 2.5) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_score_bands() {
        assert_eq!(volatility_score(1.0, 100.0), 0.8);
        assert_eq!(volatility_score(3.0, 100.0), 0.6);
        assert_eq!(volatility_score(6.0, 100.0), 0.3);
    }

    #[test]
    fn test_risk_score_accumulates_and_clamps() {
        let calm = set();
        assert!((risk_score(100.0, &calm) - 0.5).abs() < 1e-12);

        let wild = TechnicalIndicatorSet {
            rsi: 85.0,
            atr: 10.0,
            volume_ratio: 4.0,
            ..set()
        };
        assert!((risk_score(100.0, &wild) - 1.0).abs() < 1e-12);

        let oversold = TechnicalIndicatorSet { rsi: 15.0, ..set() };
        assert!((risk_score(100.0, &oversold) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_profit_probability_bounds() {
        assert_eq!(profit_probability(1.0, 0.0), 0.95);
        assert_eq!(profit_probability(0.0, 1.0), 0.05);
        assert!((profit_probability(0.5, 0.5) - 0.65).abs() < 1e-12);
    }
}
