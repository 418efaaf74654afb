//! Minimum-interval rate limiting for outbound NCBI requests
//!
//! The limiter keeps the time of the last request and sleeps whatever remains
//! of the minimum interval before allowing the next one. Cloned client
//! handles share the clock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::trace;

/// Enforces a maximum request rate by spacing consecutive acquisitions
#[derive(Clone, Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` acquisitions per second
    pub fn new(requests_per_second: f64) -> Self {
        // Guard against zero/negative rates so the interval stays finite.
        let rate = requests_per_second.max(0.001);
        Self {
            min_interval: Duration::from_secs_f64(1.0 / rate),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until the minimum interval since the previous acquisition has
    /// elapsed, then record the new request time
    pub async fn acquire(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(wait_millis = wait.as_millis() as u64, "rate limit sleep");
                tokio::time::sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }

    /// The enforced minimum spacing between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
