//! Orchestrates one profile build: fetch, score, sample friends, aggregate.

use futures::stream::{self, StreamExt, TryStreamExt};
use revscope_core::{AppConfig, UserBasics, FRIEND_SAMPLE_CAP};
use revscope_scraper::{page_count, PageFetcher, ScraperError};
use revscope_sentiment::SentimentScorer;

use crate::cohort::{Cohort, ProfileAggregator};
use crate::error::ProfileError;
use crate::records::{score_review, Review, ReviewRecordSet};
use crate::result::ProfileResult;
use crate::stage::ProfileStage;

/// Tunables for [`ProfileService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Maximum number of friends sampled into the friend cohort.
    pub friend_sample_cap: usize,
    /// Friend fetch+score tasks in flight at once.
    pub friend_concurrency: usize,
    /// Scoring requests in flight at once for the primary history.
    pub scoring_concurrency: usize,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            friend_sample_cap: FRIEND_SAMPLE_CAP,
            friend_concurrency: 8,
            scoring_concurrency: 4,
        }
    }
}

impl ProfileSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            friend_concurrency: config.friend_concurrency,
            ..Self::default()
        }
    }
}

/// Builds profiles from an injected page fetcher and sentiment scorer.
pub struct ProfileService<F, S> {
    fetcher: F,
    scorer: S,
    settings: ProfileSettings,
}

impl<F: PageFetcher, S: SentimentScorer> ProfileService<F, S> {
    #[must_use]
    pub fn new(fetcher: F, scorer: S, settings: ProfileSettings) -> Self {
        Self {
            fetcher,
            scorer,
            settings,
        }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    #[must_use]
    pub fn settings(&self) -> ProfileSettings {
        self.settings
    }

    /// Builds the full profile for `user_id`.
    ///
    /// Either a complete [`ProfileResult`] is returned or an error; nothing
    /// partial. Dropping the returned future cancels every in-flight request.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::InvalidUserId`] for a blank id, before any fetch.
    /// - [`ProfileError::UserNotFound`] when the profile does not exist.
    /// - [`ProfileError::ServiceUnavailable`] when a fetch or scoring call
    ///   fails after retries, tagged with the stage it happened in.
    pub async fn build_profile(&self, user_id: &str) -> Result<ProfileResult, ProfileError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ProfileError::InvalidUserId);
        }

        let mut stage = ProfileStage::Init;

        let basics = self
            .fetcher
            .fetch_basics(user_id)
            .await
            .map_err(|e| match e {
                ScraperError::NotFound { .. } => ProfileError::UserNotFound {
                    user_id: user_id.to_owned(),
                },
                other => ProfileError::unavailable(ProfileStage::BasicsFetched, other),
            })?;
        advance(&mut stage, user_id);

        let primary = self.primary_records(user_id, &basics).await?;
        advance(&mut stage, user_id);

        let sampled = basics.sampled_friend_ids(self.settings.friend_sample_cap);
        tracing::debug!(user_id, sampled = sampled.len(), "friends sampled");
        advance(&mut stage, user_id);

        let friend_cohort = self.friend_records(sampled).await?;
        advance(&mut stage, user_id);

        let aggregator = ProfileAggregator::new(primary, friend_cohort);
        advance(&mut stage, user_id);

        let result = ProfileResult {
            user_id: user_id.to_owned(),
            name: basics.name,
            hometown: basics.hometown,
            total_reviews: basics.total_review_count,
            total_friends: basics.total_friend_count,
            profile_picture: basics.profile_picture_url,
            primary: aggregator.summary(Cohort::Primary),
            friend_cohort: aggregator.summary(Cohort::FriendCohort),
        };
        advance(&mut stage, user_id);

        tracing::info!(
            user_id,
            primary_reviews = result.primary.review_count,
            friend_reviews = result.friend_cohort.review_count,
            "profile built"
        );
        Ok(result)
    }

    /// Fetches every page of the user's history in order and scores it.
    async fn primary_records(
        &self,
        user_id: &str,
        basics: &UserBasics,
    ) -> Result<ReviewRecordSet, ProfileError> {
        // The advertised count is scraped, so it only bounds the page loop.
        let pages = page_count(basics.total_review_count);
        let mut raw = Vec::new();

        for page in 0..pages {
            let batch = self
                .fetcher
                .fetch_reviews(user_id, page)
                .await
                .map_err(|e| ProfileError::unavailable(ProfileStage::PrimaryReviewsScored, e))?;
            tracing::debug!(user_id, page, reviews = batch.len(), "review page fetched");
            if batch.is_empty() {
                break;
            }
            raw.extend(batch);
        }

        ReviewRecordSet::build(raw, &self.scorer, self.settings.scoring_concurrency)
            .await
            .map_err(|e| ProfileError::unavailable(ProfileStage::PrimaryReviewsScored, e))
    }

    /// One task per sampled friend, bounded by `friend_concurrency`. Results
    /// are merged once all tasks finish; the first failure cancels the rest.
    async fn friend_records(&self, friend_ids: &[String]) -> Result<ReviewRecordSet, ProfileError> {
        if friend_ids.is_empty() {
            return Ok(ReviewRecordSet::default());
        }

        let reviews: Vec<Option<Review>> = stream::iter(friend_ids.iter().cloned())
            .map(|friend_id| async move { self.friend_review(&friend_id).await })
            .buffer_unordered(self.settings.friend_concurrency.max(1))
            .try_collect()
            .await?;

        Ok(ReviewRecordSet::from_reviews(
            reviews.into_iter().flatten().collect(),
        ))
    }

    /// The friend's most recent review, scored. Friends without reviews and
    /// friend profiles that no longer exist contribute nothing.
    async fn friend_review(&self, friend_id: &str) -> Result<Option<Review>, ProfileError> {
        let raw = match self.fetcher.fetch_latest_review(friend_id).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(friend_id, "friend has no reviews");
                return Ok(None);
            }
            Err(ScraperError::NotFound { url }) => {
                tracing::warn!(friend_id, %url, "friend profile not found, skipping");
                return Ok(None);
            }
            Err(e) => return Err(ProfileError::unavailable(ProfileStage::FriendReviewsScored, e)),
        };

        score_review(raw, &self.scorer)
            .await
            .map_err(|e| ProfileError::unavailable(ProfileStage::FriendReviewsScored, e))
    }
}

fn advance(stage: &mut ProfileStage, user_id: &str) {
    if let Some(next) = stage.next() {
        tracing::debug!(user_id, from = %stage, to = %next, "profile stage advanced");
        *stage = next;
    }
}
