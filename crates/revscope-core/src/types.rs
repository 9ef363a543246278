//! Shared shapes passed between the fetch layer and the profile engine.

use serde::{Deserialize, Serialize};

/// Maximum number of friends whose latest review joins the friend cohort.
pub const FRIEND_SAMPLE_CAP: usize = 30;

/// Reviews the site renders per results page.
pub const REVIEWS_PER_PAGE: usize = 10;

/// Profile facts read from a user's landing page and friend list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBasics {
    pub name: String,
    pub hometown: String,
    pub total_review_count: usize,
    pub total_friend_count: usize,
    pub profile_picture_url: String,
    /// Friend user ids in the order the site lists them.
    pub friend_ids: Vec<String>,
}

impl UserBasics {
    /// The friend ids that make up the friend cohort: the first
    /// `min(cap, total_friend_count)` entries, in listed order.
    #[must_use]
    pub fn sampled_friend_ids(&self, cap: usize) -> &[String] {
        let take = cap.min(self.total_friend_count).min(self.friend_ids.len());
        &self.friend_ids[..take]
    }
}

/// One review exactly as extracted from markup, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub text: String,
    /// Comma separated category tags, e.g. `"Coffee & Tea, Bakeries"`.
    pub raw_places: String,
    /// Text lines of the location block; the last line ends with a postal code.
    pub raw_location: Vec<String>,
    /// Star rating label, e.g. `"4.0 star rating"`.
    pub raw_rating: String,
}
