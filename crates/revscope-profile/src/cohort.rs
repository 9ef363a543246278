//! Primary user and friend cohort aggregates behind one query surface.

use serde::Serialize;

use crate::places::{PlaceAggregator, PlaceStat};
use crate::records::{CityCount, ReviewRecordSet};
use crate::result::CohortSummary;
use crate::TOP_N;

/// Which review population a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    /// The profiled user's own review history.
    Primary,
    /// The most recent review of each sampled friend.
    FriendCohort,
}

/// A review set together with its place statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortAggregate {
    records: ReviewRecordSet,
    places: PlaceAggregator,
}

impl CohortAggregate {
    #[must_use]
    pub fn new(records: ReviewRecordSet) -> Self {
        let places = PlaceAggregator::from_records(&records);
        Self { records, places }
    }

    #[must_use]
    pub fn records(&self) -> &ReviewRecordSet {
        &self.records
    }

    #[must_use]
    pub fn places(&self) -> &PlaceAggregator {
        &self.places
    }
}

/// Owns the two cohort aggregates of a profile build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileAggregator {
    primary: CohortAggregate,
    friend_cohort: CohortAggregate,
}

impl ProfileAggregator {
    #[must_use]
    pub fn new(primary: ReviewRecordSet, friend_cohort: ReviewRecordSet) -> Self {
        Self {
            primary: CohortAggregate::new(primary),
            friend_cohort: CohortAggregate::new(friend_cohort),
        }
    }

    #[must_use]
    pub fn cohort(&self, which: Cohort) -> &CohortAggregate {
        match which {
            Cohort::Primary => &self.primary,
            Cohort::FriendCohort => &self.friend_cohort,
        }
    }

    #[must_use]
    pub fn top_visited_places(&self, which: Cohort, n: usize) -> Vec<&PlaceStat> {
        self.cohort(which).places.top_visited(n)
    }

    #[must_use]
    pub fn top_enthusiastic_places(&self, which: Cohort, n: usize) -> Vec<&PlaceStat> {
        self.cohort(which).places.top_enthusiastic(n)
    }

    #[must_use]
    pub fn top_visited_cities(&self, which: Cohort, n: usize) -> Vec<CityCount> {
        self.cohort(which).records.top_cities(n)
    }

    #[must_use]
    pub fn average_rating(&self, which: Cohort) -> Option<f64> {
        self.cohort(which).records.average_rating()
    }

    #[must_use]
    pub fn enthusiasm_score(&self, which: Cohort) -> Option<f64> {
        self.cohort(which).records.average_sentiment()
    }

    /// Review texts are only reported for the primary user.
    #[must_use]
    pub fn recent_reviews(&self, which: Cohort, n: usize) -> Option<Vec<&str>> {
        match which {
            Cohort::Primary => Some(self.primary.records.recent_reviews(n)),
            Cohort::FriendCohort => None,
        }
    }

    /// Every ranked list truncated to [`TOP_N`].
    #[must_use]
    pub fn summary(&self, which: Cohort) -> CohortSummary {
        CohortSummary {
            review_count: self.cohort(which).records.len(),
            top_visited_places: self
                .top_visited_places(which, TOP_N)
                .into_iter()
                .map(Into::into)
                .collect(),
            top_visited_cities: self.top_visited_cities(which, TOP_N),
            average_rating: self.average_rating(which),
            recent_reviews: self
                .recent_reviews(which, TOP_N)
                .map(|texts| texts.into_iter().map(str::to_owned).collect()),
            enthusiasm_score: self.enthusiasm_score(which),
            top_enthusiastic_places: self
                .top_enthusiastic_places(which, TOP_N)
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
