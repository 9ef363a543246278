use revscope_scraper::ScraperError;
use revscope_sentiment::SentimentError;
use thiserror::Error;

use crate::stage::ProfileStage;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("user id must not be empty")]
    InvalidUserId,

    #[error("no profile found for user {user_id}")]
    UserNotFound { user_id: String },

    /// A single review field did not have the expected shape. Raised by the
    /// field parsers; record-set construction logs it and drops the review.
    #[error("malformed {field}: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("service unavailable while reaching {stage}: {source}")]
    ServiceUnavailable {
        stage: ProfileStage,
        #[source]
        source: ServiceFailure,
    },
}

/// The collaborator failure behind [`ProfileError::ServiceUnavailable`].
#[derive(Debug, Error)]
pub enum ServiceFailure {
    #[error("page fetch failed: {0}")]
    Fetch(#[from] ScraperError),

    #[error("sentiment scoring failed: {0}")]
    Sentiment(#[from] SentimentError),
}

impl ProfileError {
    pub(crate) fn unavailable(stage: ProfileStage, source: impl Into<ServiceFailure>) -> Self {
        Self::ServiceUnavailable {
            stage,
            source: source.into(),
        }
    }

    pub(crate) fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            value: value.into(),
        }
    }

    /// The stage a `ServiceUnavailable` failure occurred in.
    #[must_use]
    pub fn stage(&self) -> Option<ProfileStage> {
        match self {
            Self::ServiceUnavailable { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_unavailable_names_stage_and_source() {
        let err = ProfileError::unavailable(
            ProfileStage::PrimaryReviewsScored,
            SentimentError::QuotaExceeded("daily limit".to_owned()),
        );
        let msg = err.to_string();
        assert!(msg.contains("primary_reviews_scored"), "got {msg}");
        assert!(msg.contains("daily limit"), "got {msg}");
        assert_eq!(err.stage(), Some(ProfileStage::PrimaryReviewsScored));
    }

    #[test]
    fn user_not_found_has_no_stage() {
        let err = ProfileError::UserNotFound {
            user_id: "abc".to_owned(),
        };
        assert_eq!(err.stage(), None);
        assert_eq!(err.to_string(), "no profile found for user abc");
    }
}
