//! Per-place grouping of a review set.

use std::collections::BTreeMap;

use crate::records::{round2, ReviewRecordSet};

/// Visit count and mean sentiment for one place tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceStat {
    pub place: String,
    /// Mean sentiment of the reviews mentioning this place, two decimals.
    pub mean_sentiment: f64,
    /// Number of reviews mentioning this place.
    pub frequency: usize,
}

/// Place statistics for one [`ReviewRecordSet`], ordered by place name.
///
/// Each review contributes one mention to every place it is tagged with;
/// untagged reviews contribute nothing. Because groups are keyed by name the
/// result does not depend on the order of the reviews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceAggregator {
    stats: Vec<PlaceStat>,
}

impl PlaceAggregator {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records(records: &ReviewRecordSet) -> Self {
        let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for review in records.reviews() {
            for place in review.places() {
                let entry = groups.entry(place.as_str()).or_insert((0.0, 0));
                entry.0 += review.sentiment();
                entry.1 += 1;
            }
        }

        let stats = groups
            .into_iter()
            .map(|(place, (sum, frequency))| PlaceStat {
                place: place.to_owned(),
                mean_sentiment: round2(sum / frequency as f64),
                frequency,
            })
            .collect();
        Self { stats }
    }

    #[must_use]
    pub fn stats(&self) -> &[PlaceStat] {
        &self.stats
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Total (review, place) pairs seen.
    #[must_use]
    pub fn total_mentions(&self) -> usize {
        self.stats.iter().map(|s| s.frequency).sum()
    }

    /// The `n` most frequently reviewed places. Ties stay in name order.
    #[must_use]
    pub fn top_visited(&self, n: usize) -> Vec<&PlaceStat> {
        let mut ranked: Vec<&PlaceStat> = self.stats.iter().collect();
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(n);
        ranked
    }

    /// The `n` places with the highest mean sentiment. Ties stay in name
    /// order.
    #[must_use]
    pub fn top_enthusiastic(&self, n: usize) -> Vec<&PlaceStat> {
        let mut ranked: Vec<&PlaceStat> = self.stats.iter().collect();
        ranked.sort_by(|a, b| b.mean_sentiment.total_cmp(&a.mean_sentiment));
        ranked.truncate(n);
        ranked
    }
}
