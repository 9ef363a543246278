//! Review-site page fetching for revscope.
//!
//! [`PageFetcher`] is the seam the profile engine consumes; [`ReviewSiteClient`]
//! is the HTTP implementation that fetches public profile, review and friend
//! pages and extracts raw fields from their markup.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod pagination;
pub mod parse;

mod rate_limit;

pub use client::ReviewSiteClient;
pub use error::ScraperError;
pub use fetcher::PageFetcher;
pub use pagination::page_count;
pub use rate_limit::{RetryPolicy, MAX_RETRY_DELAY_SECS};
