use crate::error::ApiError;
use crate::{MarketDataProvider, PriceHistory};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use configuration::SyntheticWalkParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VOLUME_RANGE: std::ops::Range<f64> = 500_000.0..2_000_000.0;

/// A random-walk price generator used when real market data is unavailable.
///
/// Daily returns are `drift + shock`, where the shock is uniform on
/// `±√3·volatility` so its standard deviation equals `volatility`. Only weekdays
/// are emitted. With a seed the output is reproducible.
#[derive(Debug, Clone)]
pub struct SyntheticMarketData {
    params: SyntheticWalkParams,
    seed: Option<u64>,
}

impl SyntheticMarketData {
    pub fn new(params: SyntheticWalkParams, seed: Option<u64>) -> Self {
        Self { params, seed }
    }

    /// Generates `trading_days` weekday observations ending on or before `end`.
    pub fn generate(&self, end: NaiveDate) -> PriceHistory {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let n = self.params.trading_days;

        let mut dates = Vec::with_capacity(n);
        let mut day = end;
        while dates.len() < n {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                dates.push(day);
            }
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        dates.reverse();

        let bound = 3.0_f64.sqrt() * self.params.daily_volatility;
        let mut price = self.params.start_price;
        let mut prices = Vec::with_capacity(dates.len());
        let mut volumes = Vec::with_capacity(dates.len());
        for i in 0..dates.len() {
            if i > 0 {
                let shock = if bound > 0.0 { rng.gen_range(-bound..bound) } else { 0.0 };
                price *= 1.0 + self.params.daily_drift + shock;
            }
            prices.push(price);
            volumes.push(rng.gen_range(VOLUME_RANGE).round());
        }

        PriceHistory {
            prices,
            dates,
            volumes,
        }
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticMarketData {
    async fn fetch_daily_closes(&self, symbol: &str) -> Result<PriceHistory, ApiError> {
        tracing::debug!("Generating synthetic history for {}", symbol);
        Ok(self.generate(Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end() -> NaiveDate {
        // A Sunday.
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_generates_requested_weekdays() {
        let history = SyntheticMarketData::new(SyntheticWalkParams::default(), Some(7)).generate(end());

        assert_eq!(history.len(), 504);
        assert_eq!(history.volumes.len(), 504);
        assert!(history.dates.iter().all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        assert!(history.dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(history.dates.last(), Some(&NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()));
        assert_eq!(history.prices[0], 100.0);
        assert!(history.prices.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn test_same_seed_same_walk() {
        let params = SyntheticWalkParams::default();
        let a = SyntheticMarketData::new(params, Some(42)).generate(end());
        let b = SyntheticMarketData::new(params, Some(42)).generate(end());
        let c = SyntheticMarketData::new(params, Some(43)).generate(end());
        assert_eq!(a, b);
        assert_ne!(a.prices, c.prices);
    }

    #[test]
    fn test_daily_moves_stay_within_the_shock_bound() {
        let params = SyntheticWalkParams::default();
        let history = SyntheticMarketData::new(params, Some(1)).generate(end());
        let bound = 3.0_f64.sqrt() * params.daily_volatility + params.daily_drift.abs() + 1e-12;
        for w in history.prices.windows(2) {
            assert!((w[1] / w[0] - 1.0).abs() <= bound);
        }
    }

    #[test]
    fn test_zero_volatility_is_pure_drift() {
        let params = SyntheticWalkParams {
            daily_volatility: 0.0,
            trading_days: 3,
            ..SyntheticWalkParams::default()
        };
        let history = SyntheticMarketData::new(params, Some(1)).generate(end());
        assert!((history.prices[2] - 100.0 * 1.0002 * 1.0002).abs() < 1e-9);
    }
}
