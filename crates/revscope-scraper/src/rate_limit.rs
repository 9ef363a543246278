//! Retry policy for review-site page requests.
//!
//! 429s, network errors and 5xx responses are retried. A 429 waits at least
//! as long as the site's `Retry-After` asks for; everything else backs off
//! exponentially. No single wait exceeds [`MAX_RETRY_DELAY_SECS`].

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on any single wait between attempts.
pub const MAX_RETRY_DELAY_SECS: u64 = 120;

/// How many times a page request is retried and how long to wait between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_base_secs: u64) -> Self {
        Self {
            max_retries,
            backoff_base_secs,
        }
    }

    /// The wait before retry number `retry` (0-based) after `err`, or `None`
    /// when `err` should be surfaced instead.
    #[must_use]
    pub fn delay_for(&self, retry: u32, err: &ScraperError) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let backoff = self.backoff_base_secs.saturating_mul(1u64 << retry.min(62));
        let floor = match err {
            ScraperError::RateLimited {
                retry_after_secs, ..
            } => *retry_after_secs,
            ScraperError::Http(_) => 0,
            ScraperError::UnexpectedStatus { status, .. } if *status >= 500 => 0,
            ScraperError::UnexpectedStatus { .. }
            | ScraperError::NotFound { .. }
            | ScraperError::Extraction { .. }
            | ScraperError::InvalidBaseUrl { .. } => return None,
        };
        Some(Duration::from_secs(
            backoff.max(floor).min(MAX_RETRY_DELAY_SECS),
        ))
    }

    /// Runs `request` until it succeeds or [`Self::delay_for`] gives up.
    pub(crate) async fn run<T, F, Fut>(&self, url: &str, mut request: F) -> Result<T, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScraperError>>,
    {
        let mut retry = 0u32;
        loop {
            let err = match request().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.delay_for(retry, &err) else {
                return Err(err);
            };
            tracing::warn!(
                url,
                retry = retry + 1,
                max_retries = self.max_retries,
                delay_secs = delay.as_secs(),
                error = %err,
                "page request failed, waiting before retry"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn throttled(retry_after_secs: u64) -> ScraperError {
        ScraperError::RateLimited {
            domain: "reviews.test".to_owned(),
            retry_after_secs,
        }
    }

    fn status(status: u16) -> ScraperError {
        ScraperError::UnexpectedStatus {
            status,
            url: "https://reviews.test/user_details_reviews_self".to_owned(),
        }
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryPolicy::new(4, 2);
        let waits: Vec<u64> = (0..4)
            .filter_map(|n| policy.delay_for(n, &status(502)))
            .map(|d| d.as_secs())
            .collect();
        assert_eq!(waits, vec![2, 4, 8, 16]);
    }

    #[test]
    fn retry_after_wins_over_shorter_backoff() {
        let policy = RetryPolicy::new(3, 1);
        assert_eq!(policy.delay_for(0, &throttled(9)), Some(Duration::from_secs(9)));
        assert_eq!(policy.delay_for(2, &throttled(0)), Some(Duration::from_secs(4)));
    }

    #[test]
    fn waits_are_capped() {
        let policy = RetryPolicy::new(3, 1);
        assert_eq!(
            policy.delay_for(0, &throttled(3600)),
            Some(Duration::from_secs(MAX_RETRY_DELAY_SECS))
        );
        assert_eq!(
            RetryPolicy::new(80, u64::MAX).delay_for(70, &status(500)),
            Some(Duration::from_secs(MAX_RETRY_DELAY_SECS))
        );
    }

    #[test]
    fn permanent_errors_and_exhausted_budget_give_up() {
        let policy = RetryPolicy::new(2, 0);
        assert_eq!(policy.delay_for(0, &status(403)), None);
        assert_eq!(
            policy.delay_for(
                0,
                &ScraperError::NotFound {
                    url: "https://reviews.test/x".to_owned()
                }
            ),
            None
        );
        assert!(policy.delay_for(1, &status(503)).is_some());
        assert_eq!(policy.delay_for(2, &status(503)), None);
    }

    #[tokio::test]
    async fn run_surfaces_last_error_after_budget() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = RetryPolicy::new(2, 0)
            .run("https://reviews.test/", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(throttled(0)) }
            })
            .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ScraperError::RateLimited { .. })));
    }
}
