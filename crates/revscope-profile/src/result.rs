//! The payload returned for a finished profile build.

use serde::Serialize;

use crate::places::PlaceStat;
use crate::records::CityCount;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    pub user_id: String,
    pub name: String,
    pub hometown: String,
    pub total_reviews: usize,
    pub total_friends: usize,
    pub profile_picture: String,
    pub primary: CohortSummary,
    pub friend_cohort: CohortSummary,
}

/// Statistics for one cohort. Averages are `null` when the cohort has no
/// reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub review_count: usize,
    pub top_visited_places: Vec<PlaceVisits>,
    pub top_visited_cities: Vec<CityCount>,
    pub average_rating: Option<f64>,
    /// Only the primary user's summary carries review texts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_reviews: Option<Vec<String>>,
    pub enthusiasm_score: Option<f64>,
    pub top_enthusiastic_places: Vec<PlaceEnthusiasm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceVisits {
    pub place: String,
    pub visits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceEnthusiasm {
    pub place: String,
    pub sentiment: f64,
}

impl From<&PlaceStat> for PlaceVisits {
    fn from(stat: &PlaceStat) -> Self {
        Self {
            place: stat.place.clone(),
            visits: stat.frequency,
        }
    }
}

impl From<&PlaceStat> for PlaceEnthusiasm {
    fn from(stat: &PlaceStat) -> Self {
        Self {
            place: stat.place.clone(),
            sentiment: stat.mean_sentiment,
        }
    }
}
