use crate::error::BacktestError;
use chrono::{Datelike, NaiveDate};
use configuration::MonthlyMomentumParams;
use core_types::{PositionState, TradeAction, TradingSignal};

/// The calendar-driven monthly momentum strategy.
///
/// Short near the start of the month, long into month-end. The machine is
/// advanced once per trading day and every transition out of a position emits
/// its closing signal, so the signal stream always alternates (`short` then
/// `cover`, `buy` then `sell`).
///
/// A short is never re-entered while one is open: when the 1st is a trading
/// day, the day-5 entry falls inside that short and emits nothing, and the
/// holding period keeps counting from the 1st.
#[derive(Debug, Clone)]
pub struct MonthlyMomentum {
    params: MonthlyMomentumParams,
    position: PositionState,
    // Series index of the open short, used for the holding-period exit.
    short_entry_index: Option<usize>,
}

impl MonthlyMomentum {
    pub fn new(params: MonthlyMomentumParams) -> Result<Self, BacktestError> {
        if params.short_holding_days == 0 {
            return Err(BacktestError::InvalidParameters(
                "Short holding period must be at least one trading day".to_string(),
            ));
        }
        if params.long_entry_days_before_month_end <= params.long_exit_days_before_month_end {
            return Err(BacktestError::InvalidParameters(
                "Long entry must come before the long exit within the month".to_string(),
            ));
        }

        Ok(Self {
            params,
            position: PositionState::Neutral,
            short_entry_index: None,
        })
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    /// Advances the machine by one trading day, appending any signals to `out`.
    ///
    /// Returns the position held at the close of the day.
    pub fn step(
        &mut self,
        index: usize,
        date: NaiveDate,
        price: f64,
        out: &mut Vec<TradingSignal>,
    ) -> PositionState {
        let to_month_end = days_until_month_end(date);

        // ---===[ Rule 1: short at the start of the month ]===---
        if self.params.short_entry_days.contains(&date.day()) && self.position != PositionState::Short {
            if self.position == PositionState::Long {
                self.transition(TradeAction::Sell, PositionState::Neutral, date, price, out);
            }
            self.transition(TradeAction::Short, PositionState::Short, date, price, out);
            self.short_entry_index = Some(index);
            return self.position;
        }

        // ---===[ Rule 2: cover once the holding period has elapsed ]===---
        if self.position == PositionState::Short
            && self
                .short_entry_index
                .is_some_and(|entry| index.checked_sub(entry) == Some(self.params.short_holding_days))
        {
            self.close_short(date, price, out);
        }

        // ---===[ Rule 3: long into month-end ]===---
        if to_month_end == Some(self.params.long_entry_days_before_month_end)
            && self.position != PositionState::Long
        {
            if self.position == PositionState::Short {
                self.close_short(date, price, out);
            }
            self.transition(TradeAction::Buy, PositionState::Long, date, price, out);
        // ---===[ Rule 4: flatten the long just before month-end ]===---
        } else if to_month_end == Some(self.params.long_exit_days_before_month_end)
            && self.position == PositionState::Long
        {
            self.transition(TradeAction::Sell, PositionState::Neutral, date, price, out);
        }

        self.position
    }

    fn close_short(&mut self, date: NaiveDate, price: f64, out: &mut Vec<TradingSignal>) {
        self.transition(TradeAction::Cover, PositionState::Neutral, date, price, out);
        self.short_entry_index = None;
    }

    fn transition(
        &mut self,
        action: TradeAction,
        position: PositionState,
        date: NaiveDate,
        price: f64,
        out: &mut Vec<TradingSignal>,
    ) {
        tracing::debug!("MonthlyMomentum: {} on {} at {:.4} -> {}", action, date, price, position);
        self.position = position;
        out.push(TradingSignal {
            date,
            action,
            price,
            position,
        });
    }
}

/// Calendar days from `date` to the last day of its month (0 on the last day).
pub fn days_until_month_end(date: NaiveDate) -> Option<u32> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()?;
    Some(last.day() - date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn actions(signals: &[TradingSignal]) -> Vec<(NaiveDate, TradeAction)> {
        signals.iter().map(|s| (s.date, s.action)).collect()
    }

    #[test]
    fn test_days_until_month_end() {
        assert_eq!(days_until_month_end(d(2024, 1, 24)), Some(7));
        assert_eq!(days_until_month_end(d(2024, 2, 28)), Some(1));
        assert_eq!(days_until_month_end(d(2023, 2, 28)), Some(0));
        assert_eq!(days_until_month_end(d(2024, 12, 30)), Some(1));
    }

    #[test]
    fn test_short_is_not_reopened_while_held() {
        let mut machine = MonthlyMomentum::new(MonthlyMomentumParams::default()).unwrap();
        let mut out = Vec::new();
        // Jan 1 and Jan 5 2024 are both trading days and both short-entry days.
        machine.step(0, d(2024, 1, 1), 100.0, &mut out);
        machine.step(4, d(2024, 1, 5), 100.0, &mut out);
        assert_eq!(actions(&out), vec![(d(2024, 1, 1), TradeAction::Short)]);

        // The holding period still runs from the first entry.
        machine.step(5, d(2024, 1, 8), 100.0, &mut out);
        assert_eq!(out[1].action, TradeAction::Cover);
        assert_eq!(machine.position(), PositionState::Neutral);
    }

    #[test]
    fn test_buy_day_closes_an_open_short_first() {
        let params = MonthlyMomentumParams {
            short_entry_days: vec![22],
            ..MonthlyMomentumParams::default()
        };
        let mut machine = MonthlyMomentum::new(params).unwrap();
        let mut out = Vec::new();
        machine.step(0, d(2024, 1, 22), 100.0, &mut out);
        machine.step(1, d(2024, 1, 23), 100.0, &mut out);
        let position = machine.step(2, d(2024, 1, 24), 101.0, &mut out);

        assert_eq!(position, PositionState::Long);
        assert_eq!(
            actions(&out),
            vec![
                (d(2024, 1, 22), TradeAction::Short),
                (d(2024, 1, 24), TradeAction::Cover),
                (d(2024, 1, 24), TradeAction::Buy),
            ]
        );
    }

    #[test]
    fn test_short_day_closes_an_open_long_first() {
        let mut machine = MonthlyMomentum::new(MonthlyMomentumParams::default()).unwrap();
        let mut out = Vec::new();
        // Sep 29 2024 is a Sunday, so the long bought on the 23rd is still open on Oct 1.
        machine.step(0, d(2024, 9, 23), 100.0, &mut out);
        machine.step(1, d(2024, 9, 27), 100.0, &mut out);
        machine.step(2, d(2024, 10, 1), 100.0, &mut out);

        assert_eq!(
            actions(&out),
            vec![
                (d(2024, 9, 23), TradeAction::Buy),
                (d(2024, 10, 1), TradeAction::Sell),
                (d(2024, 10, 1), TradeAction::Short),
            ]
        );
        assert_eq!(out[1].position, PositionState::Neutral);
        assert_eq!(out[2].position, PositionState::Short);
    }

    #[test]
    fn test_rejects_inverted_month_end_window() {
        let params = MonthlyMomentumParams {
            long_entry_days_before_month_end: 1,
            long_exit_days_before_month_end: 7,
            ..MonthlyMomentumParams::default()
        };
        assert!(matches!(
            MonthlyMomentum::new(params),
            Err(BacktestError::InvalidParameters(_))
        ));
    }
}
