use crate::error::PatternError;
use crate::extrema::{local_maxima, local_minima, regression_slope};
use core_types::{ensure_len, CoreError, DetectedPattern, PatternType};
use indicators::latest_sma;

pub const MIN_POINTS: usize = 10;
pub const GOLDEN_CROSS_MIN_POINTS: usize = 20;
const GOLDEN_CROSS_FAST: usize = 5;
const GOLDEN_CROSS_SLOW: usize = 20;
const DOUBLE_EXTREMUM_TOLERANCE: f64 = 0.02;
const TRIANGLE_WINDOW: usize = 10;

/// Fixed confidence, accuracy and prediction per pattern type.
///
/// These are not re-estimated from the data.
pub fn profile(pattern_type: PatternType) -> DetectedPattern {
    let (confidence, historical_accuracy, prediction) = match pattern_type {
        PatternType::GoldenCross => (
            0.75,
            68,
            "Bullish - Short-term average crossed above long-term average",
        ),
        PatternType::DoubleTop => (
            0.82,
            73,
            "Bearish - Double top pattern indicates potential reversal",
        ),
        PatternType::DoubleBottom => (
            0.79,
            71,
            "Bullish - Double bottom pattern indicates potential reversal",
        ),
        PatternType::SymmetricalTriangle => (
            0.65,
            64,
            "Neutral - Triangle pattern suggests consolidation before breakout",
        ),
    };
    DetectedPattern {
        pattern_type,
        confidence,
        prediction: prediction.to_string(),
        historical_accuracy,
    }
}

/// Scans a price series for the supported patterns.
///
/// Checks run in a fixed order (golden cross, double top, double bottom,
/// symmetrical triangle) and the result preserves that order.
pub fn detect_patterns(prices: &[f64]) -> Result<Vec<DetectedPattern>, PatternError> {
    ensure_len("pattern detection", MIN_POINTS, prices.len())?;
    if let Some(p) = prices.iter().find(|p| !p.is_finite()) {
        return Err(CoreError::invalid("prices", format!("non-finite price {}", p)).into());
    }

    let mut found = Vec::new();

    if is_golden_cross(prices)? {
        found.push(profile(PatternType::GoldenCross));
    }
    if is_double_extremum(&local_maxima(prices).iter().map(|e| e.value).collect::<Vec<_>>()) {
        found.push(profile(PatternType::DoubleTop));
    }
    if is_double_extremum(&local_minima(prices).iter().map(|e| e.value).collect::<Vec<_>>()) {
        found.push(profile(PatternType::DoubleBottom));
    }
    if is_symmetrical_triangle(prices) {
        found.push(profile(PatternType::SymmetricalTriangle));
    }

    tracing::debug!(
        "Pattern scan over {} prices found {:?}",
        prices.len(),
        found.iter().map(|p| p.pattern_type).collect::<Vec<_>>()
    );

    Ok(found)
}

/// The fast SMA is above the slow SMA now and was at or below it one bar earlier.
///
/// Only a single one-bar lag is compared, so a crossover older than one bar is
/// not reported. With exactly 20 points there is no complete earlier window and
/// the check never fires.
fn is_golden_cross(prices: &[f64]) -> Result<bool, PatternError> {
    if prices.len() < GOLDEN_CROSS_MIN_POINTS {
        return Ok(false);
    }
    let fast_now = latest_sma(prices, GOLDEN_CROSS_FAST)?;
    let slow_now = latest_sma(prices, GOLDEN_CROSS_SLOW)?;
    if fast_now <= slow_now {
        return Ok(false);
    }

    let previous = &prices[..prices.len() - 1];
    if previous.len() < GOLDEN_CROSS_SLOW {
        return Ok(false);
    }
    let fast_prev = latest_sma(previous, GOLDEN_CROSS_FAST)?;
    let slow_prev = latest_sma(previous, GOLDEN_CROSS_SLOW)?;
    Ok(fast_prev <= slow_prev)
}

/// The two most recent extrema are within 2% of each other.
fn is_double_extremum(values: &[f64]) -> bool {
    match values {
        [.., first, second] => {
            first.abs() > 0.0 && ((first - second).abs() / first.abs()) < DOUBLE_EXTREMUM_TOLERANCE
        }
        _ => false,
    }
}

/// Falling highs and rising lows inside the trailing window.
fn is_symmetrical_triangle(prices: &[f64]) -> bool {
    let window = &prices[prices.len().saturating_sub(TRIANGLE_WINDOW)..];
    let highs: Vec<f64> = local_maxima(window).iter().map(|e| e.value).collect();
    let lows: Vec<f64> = local_minima(window).iter().map(|e| e.value).collect();
    if highs.len() < 2 || lows.len() < 2 {
        return false;
    }
    regression_slope(&highs) < 0.0 && regression_slope(&lows) > 0.0
}
