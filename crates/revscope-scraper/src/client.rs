//! HTTP client for public review-site profile pages.

use std::time::Duration;

use reqwest::{Client, Url};
use revscope_core::{AppConfig, RawReview, UserBasics};

use crate::error::ScraperError;
use crate::fetcher::PageFetcher;
use crate::pagination::page_start_offset;
use crate::parse;
use crate::rate_limit::RetryPolicy;

const REVIEWS_PATH: &str = "user_details_reviews_self";
const FRIENDS_PATH: &str = "user_details_friends";

/// HTTP client for a user's profile, review and friend pages.
///
/// Handles rate limiting (429), not-found (404) and other non-2xx responses
/// as typed errors. Transient failures are retried per [`RetryPolicy`], which
/// honours the site's `Retry-After` on 429s.
pub struct ReviewSiteClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
    inter_request_delay_ms: u64,
}

impl ReviewSiteClient {
    /// Creates a client rooted at `base_url` (e.g. `https://www.yelp.com`).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            retry: RetryPolicy::new(max_retries, backoff_base_secs),
            inter_request_delay_ms: 0,
        })
    }

    /// Builds a client from the scraper settings of [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            &config.site_base_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )?
        .with_inter_request_delay_ms(config.scraper_inter_request_delay_ms))
    }

    /// Delay applied before every review page after the first.
    #[must_use]
    pub fn with_inter_request_delay_ms(mut self, delay_ms: u64) -> Self {
        self.inter_request_delay_ms = delay_ms;
        self
    }

    fn reviews_url(&self, user_id: &str, page: usize) -> Result<Url, ScraperError> {
        let mut url = self.join(REVIEWS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("userid", user_id);
            if let Some(offset) = page_start_offset(page) {
                pairs.append_pair("rec_pagestart", &offset.to_string());
            }
        }
        Ok(url)
    }

    fn friends_url(&self, user_id: &str) -> Result<Url, ScraperError> {
        let mut url = self.join(FRIENDS_PATH)?;
        url.query_pairs_mut().append_pair("userid", user_id);
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, ScraperError> {
        self.base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// GETs `url` and returns the body, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries.
    async fn fetch_html(&self, url: &Url) -> Result<String, ScraperError> {
        self.retry.run(url.as_str(), || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        domain: url.host_str().unwrap_or_default().to_owned(),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

impl PageFetcher for ReviewSiteClient {
    async fn fetch_basics(&self, user_id: &str) -> Result<UserBasics, ScraperError> {
        let url = self.reviews_url(user_id, 0)?;
        let html = self.fetch_html(&url).await?;

        // The site answers unknown ids with a generic page rather than a 404.
        let name = parse::extract_name(&html).ok_or_else(|| ScraperError::NotFound {
            url: url.to_string(),
        })?;
        let hometown = parse::extract_hometown(&html).unwrap_or_default();
        let total_review_count =
            parse::extract_review_count(&html).ok_or_else(|| ScraperError::Extraction {
                field: "review count",
                url: url.to_string(),
            })?;
        let total_friend_count =
            parse::extract_friend_count(&html).ok_or_else(|| ScraperError::Extraction {
                field: "friend count",
                url: url.to_string(),
            })?;
        let profile_picture_url = parse::extract_profile_picture(&html).unwrap_or_default();
        tracing::info!(user_id, total_review_count, total_friend_count, "fetched basic user information");

        let friend_ids = if total_friend_count > 0 {
            let friends_url = self.friends_url(user_id)?;
            let friends_html = self.fetch_html(&friends_url).await?;
            parse::extract_friend_ids(&friends_html)
        } else {
            Vec::new()
        };
        tracing::info!(user_id, friends = friend_ids.len(), "fetched friend ids");

        Ok(UserBasics {
            name,
            hometown,
            total_review_count,
            total_friend_count,
            profile_picture_url,
            friend_ids,
        })
    }

    async fn fetch_reviews(
        &self,
        user_id: &str,
        page: usize,
    ) -> Result<Vec<RawReview>, ScraperError> {
        if page > 0 && self.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
        }
        let url = self.reviews_url(user_id, page)?;
        let html = self.fetch_html(&url).await?;
        let reviews = parse::extract_reviews(&html);
        tracing::debug!(user_id, page, reviews = reviews.len(), "fetched review page");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ReviewSiteClient {
        ReviewSiteClient::new(base_url, 5, "revscope-test/0.1", 0, 0)
            .expect("client construction should not fail")
    }

    #[test]
    fn reviews_url_first_page_has_no_offset() {
        let client = test_client("https://www.example.com");
        let url = client.reviews_url("AbC-123", 0).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.example.com/user_details_reviews_self?userid=AbC-123"
        );
    }

    #[test]
    fn reviews_url_later_pages_carry_offset() {
        let client = test_client("https://www.example.com/");
        let url = client.reviews_url("AbC-123", 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.example.com/user_details_reviews_self?userid=AbC-123&rec_pagestart=20"
        );
    }

    #[test]
    fn friends_url_encodes_user_id() {
        let client = test_client("https://www.example.com");
        let url = client.friends_url("a b&c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.example.com/user_details_friends?userid=a+b%26c"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ReviewSiteClient::new("not a url", 5, "ua", 0, 0);
        assert!(matches!(result, Err(ScraperError::InvalidBaseUrl { .. })));
    }
}
