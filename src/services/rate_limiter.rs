use std::time::Duration;

use async_trait::async_trait;

/// Pacing between calls to an external service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Blocks the caller until the next call may go out.
    async fn wait(&self);
}

/// Sleeps the same fixed interval every time.
#[derive(Debug, Clone)]
pub struct FixedIntervalLimiter {
    interval: Duration,
}

impl FixedIntervalLimiter {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl RateLimiter for FixedIntervalLimiter {
    async fn wait(&self) {
        log::debug!("Pacing for {:?}", self.interval);
        tokio::time::sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_interval_sleeps_full_interval() {
        let limiter = FixedIntervalLimiter::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        limiter.wait().await;

        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_interval_does_not_shrink_between_calls() {
        let limiter = FixedIntervalLimiter::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        limiter.wait().await;
        limiter.wait().await;

        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn interval_is_exposed() {
        let limiter = FixedIntervalLimiter::new(Duration::from_millis(250));
        assert_eq!(limiter.interval(), Duration::from_millis(250));
    }
}
