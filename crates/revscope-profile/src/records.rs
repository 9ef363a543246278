//! Parsed, scored reviews and the per-set statistics over them.

use std::collections::HashMap;

use futures::stream::{self, StreamExt, TryStreamExt};
use revscope_core::RawReview;
use revscope_sentiment::{SentimentError, SentimentScorer};
use serde::Serialize;

use crate::error::ProfileError;

/// Trailing characters of a location line that hold the postal code
/// (`" 94612"`).
const POSTAL_SUFFIX_LEN: usize = 6;

/// Maps a raw polarity in `[-1.0, 1.0]` onto the `[0.0, 10.0]` sentiment
/// scale. Out-of-range input is clamped first; `NaN` is treated as neutral.
#[must_use]
pub fn sentiment_from_polarity(polarity: f64) -> f64 {
    let p = if polarity.is_nan() {
        0.0
    } else {
        polarity.clamp(-1.0, 1.0)
    };
    5.0 * (p + 1.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| round2(sum / count as f64))
}

/// Star rating from a label such as `"4.0 star rating"`: the first three
/// characters as a number in `[1.0, 5.0]`.
///
/// # Errors
///
/// [`ProfileError::MalformedField`] when the prefix is not a number or falls
/// outside the star range.
pub fn parse_rating(raw: &str) -> Result<f64, ProfileError> {
    let head: String = raw.trim().chars().take(3).collect();
    match head.parse::<f64>() {
        Ok(rating) if (1.0..=5.0).contains(&rating) => Ok(rating),
        _ => Err(ProfileError::malformed("rating", raw)),
    }
}

/// City from the lines of a location block. A two-line block is
/// `street / city`; anything else carries the city on its first line. The
/// trailing postal code is dropped.
///
/// # Errors
///
/// [`ProfileError::MalformedField`] when the block is empty or the chosen
/// line is too short to hold a city before the postal code.
pub fn parse_city(lines: &[String]) -> Result<String, ProfileError> {
    let line = match lines {
        [] => return Err(ProfileError::malformed("location", "")),
        [_, second] => second,
        [first, ..] => first,
    };
    let line = line.trim();
    let len = line.chars().count();
    if len <= POSTAL_SUFFIX_LEN {
        return Err(ProfileError::malformed("location", line));
    }
    let city: String = line.chars().take(len - POSTAL_SUFFIX_LEN).collect();
    Ok(city.trim_end().to_owned())
}

/// Place tags from a comma separated list. Blank pieces are dropped, so an
/// empty string yields no places.
#[must_use]
pub fn parse_places(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The structured fields of a review, parsed before it is scored.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFields {
    pub places: Vec<String>,
    pub city: String,
    pub rating: f64,
}

impl ReviewFields {
    /// # Errors
    ///
    /// [`ProfileError::MalformedField`] from [`parse_rating`] or [`parse_city`].
    pub fn parse(raw: &RawReview) -> Result<Self, ProfileError> {
        Ok(Self {
            rating: parse_rating(&raw.raw_rating)?,
            city: parse_city(&raw.raw_location)?,
            places: parse_places(&raw.raw_places),
        })
    }
}

/// One scored review. Sentiment is always derived from a polarity.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    text: String,
    places: Vec<String>,
    city: String,
    rating: f64,
    sentiment: f64,
}

impl Review {
    #[must_use]
    pub fn new(text: impl Into<String>, fields: ReviewFields, polarity: f64) -> Self {
        Self {
            text: text.into(),
            places: fields.places,
            city: fields.city,
            rating: fields.rating,
            sentiment: sentiment_from_polarity(polarity),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn places(&self) -> &[String] {
        &self.places
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Sentiment on the `[0.0, 10.0]` scale.
    #[must_use]
    pub fn sentiment(&self) -> f64 {
        self.sentiment
    }
}

/// Parses and scores one raw review.
///
/// Returns `Ok(None)` when a field is malformed; the review is logged and
/// dropped without spending a scoring request.
pub(crate) async fn score_review<S: SentimentScorer>(
    raw: RawReview,
    scorer: &S,
) -> Result<Option<Review>, SentimentError> {
    let fields = match ReviewFields::parse(&raw) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed review");
            return Ok(None);
        }
    };
    let polarity = scorer.score(&raw.text).await?;
    Ok(Some(Review::new(raw.text, fields, polarity)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// An ordered collection of scored reviews, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRecordSet {
    reviews: Vec<Review>,
}

impl ReviewRecordSet {
    #[must_use]
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// Parses and scores `raw` reviews, keeping their order. Up to
    /// `concurrency` scoring requests run at once.
    ///
    /// # Errors
    ///
    /// The first [`SentimentError`] returned by `scorer`. Malformed reviews
    /// are skipped rather than reported.
    pub async fn build<S: SentimentScorer>(
        raw: Vec<RawReview>,
        scorer: &S,
        concurrency: usize,
    ) -> Result<Self, SentimentError> {
        let scored: Vec<Option<Review>> = stream::iter(raw)
            .map(|r| score_review(r, scorer))
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;
        Ok(Self::from_reviews(scored.into_iter().flatten().collect()))
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// The `n` most reviewed cities. Ties keep the order in which cities
    /// first appear.
    #[must_use]
    pub fn top_cities(&self, n: usize) -> Vec<CityCount> {
        let mut counts: Vec<CityCount> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for review in &self.reviews {
            if let Some(&i) = index.get(review.city()) {
                counts[i].count += 1;
            } else {
                index.insert(review.city(), counts.len());
                counts.push(CityCount {
                    city: review.city().to_owned(),
                    count: 1,
                });
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(n);
        counts
    }

    /// Mean star rating rounded to two decimals; `None` for an empty set.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        mean(self.reviews.iter().map(Review::rating))
    }

    /// Mean sentiment (the enthusiasm score) rounded to two decimals; `None`
    /// for an empty set.
    #[must_use]
    pub fn average_sentiment(&self) -> Option<f64> {
        mean(self.reviews.iter().map(Review::sentiment))
    }

    #[must_use]
    pub fn recent_reviews(&self, n: usize) -> Vec<&str> {
        self.reviews.iter().take(n).map(Review::text).collect()
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
