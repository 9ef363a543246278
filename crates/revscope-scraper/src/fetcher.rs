//! The page-fetching contract consumed by the profile engine.

use std::future::Future;

use revscope_core::{RawReview, UserBasics};

use crate::error::ScraperError;

/// Source of profile facts and raw reviews for a user id.
///
/// Implementations own transport concerns (retries, pacing); callers own the
/// paging decision and derive the page count from
/// [`UserBasics::total_review_count`].
pub trait PageFetcher: Send + Sync {
    /// Fetches name, hometown, counts, picture and friend ids.
    ///
    /// # Errors
    ///
    /// [`ScraperError::NotFound`] when `user_id` does not resolve to a profile;
    /// other variants on transport failure.
    fn fetch_basics(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<UserBasics, ScraperError>> + Send;

    /// Fetches one 0-indexed page (up to ten reviews), most recent first.
    ///
    /// # Errors
    ///
    /// Any [`ScraperError`] from the transport.
    fn fetch_reviews(
        &self,
        user_id: &str,
        page: usize,
    ) -> impl Future<Output = Result<Vec<RawReview>, ScraperError>> + Send;

    /// The user's most recent review, if they have written any.
    ///
    /// # Errors
    ///
    /// Any [`ScraperError`] from [`Self::fetch_reviews`].
    fn fetch_latest_review(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<RawReview>, ScraperError>> + Send {
        async move { Ok(self.fetch_reviews(user_id, 0).await?.into_iter().next()) }
    }
}
