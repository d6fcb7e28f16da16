//! # Composite Scorer
//!
//! Turns a `TechnicalIndicatorSet` and the latest price into a `SignalDecision`:
//! a BUY/SELL/HOLD call with confidence, risk, price levels and a short
//! plain-language rationale.
//!
//! The scorer is a pure function of its inputs. Weights are injected as
//! `configuration::ScoringWeights`.

pub mod composite;
pub mod error;
pub mod factors;

pub use composite::{classify, score, CompositeScorer, BUY_THRESHOLD, SELL_THRESHOLD};
pub use error::ScoringError;
