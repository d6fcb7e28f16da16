use configuration::RateLimitSettings;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A sliding-window request budget: at most `max_requests` in any `window`.
///
/// Each client owns its limiter, so independent clients never share a budget.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    issued: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            issued: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(settings.max_requests, Duration::from_secs(settings.window_secs))
    }

    /// Claims a slot if one is free right now, otherwise returns how long to wait.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let now = Instant::now();
        let mut issued = self.issued.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        while issued
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            issued.pop_front();
        }

        if issued.len() < self.max_requests {
            issued.push_back(now);
            return Ok(());
        }

        let oldest = issued.front().copied().unwrap_or(now);
        Err(self.window.saturating_sub(now.duration_since(oldest)))
    }

    /// Waits until a slot is free, then claims it.
    pub async fn acquire(&self) {
        loop {
            match self.try_acquire() {
                Ok(()) => return,
                Err(wait) => {
                    tracing::debug!("Rate limit reached, sleeping for {:?}", wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}
