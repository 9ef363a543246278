//! Review-history profiling: builds per-user and friend-cohort statistics
//! from raw reviews and their sentiment scores.

pub mod cohort;
pub mod error;
pub mod places;
pub mod records;
pub mod result;
pub mod service;
pub mod stage;

pub use cohort::{Cohort, CohortAggregate, ProfileAggregator};
pub use error::{ProfileError, ServiceFailure};
pub use places::{PlaceAggregator, PlaceStat};
pub use records::{
    parse_city, parse_places, parse_rating, sentiment_from_polarity, CityCount, Review, ReviewFields,
    ReviewRecordSet,
};
pub use result::{CohortSummary, PlaceEnthusiasm, PlaceVisits, ProfileResult};
pub use service::{ProfileService, ProfileSettings};
pub use stage::ProfileStage;

/// Default length of every ranked list in a profile.
pub const TOP_N: usize = 3;
