//! Progress of a single profile build.

use std::fmt;

/// Stages of [`crate::ProfileService::build_profile`], in the only order they
/// can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileStage {
    Init,
    BasicsFetched,
    PrimaryReviewsScored,
    FriendsSampled,
    FriendReviewsScored,
    Aggregated,
    Done,
}

impl ProfileStage {
    /// The stage that follows `self`, or `None` once the build is done.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::BasicsFetched),
            Self::BasicsFetched => Some(Self::PrimaryReviewsScored),
            Self::PrimaryReviewsScored => Some(Self::FriendsSampled),
            Self::FriendsSampled => Some(Self::FriendReviewsScored),
            Self::FriendReviewsScored => Some(Self::Aggregated),
            Self::Aggregated => Some(Self::Done),
            Self::Done => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::BasicsFetched => "basics_fetched",
            Self::PrimaryReviewsScored => "primary_reviews_scored",
            Self::FriendsSampled => "friends_sampled",
            Self::FriendReviewsScored => "friend_reviews_scored",
            Self::Aggregated => "aggregated",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ProfileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
