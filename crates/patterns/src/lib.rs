//! # Pattern Detector
//!
//! Heuristic chart-pattern recognition over a closing-price series using
//! strict local extrema, least-squares trend slopes and a short/long SMA
//! comparison. Confidence and historical accuracy are fixed per pattern type.

pub mod detector;
pub mod error;
pub mod extrema;

pub use detector::{detect_patterns, profile, MIN_POINTS};
pub use error::PatternError;
pub use extrema::{local_maxima, local_minima, regression_slope, Extremum};
