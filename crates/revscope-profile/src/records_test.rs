use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn review(text: &str, places: &[&str], city: &str, rating: f64, polarity: f64) -> Review {
    Review::new(
        text,
        ReviewFields {
            places: places.iter().map(|p| (*p).to_owned()).collect(),
            city: city.to_owned(),
            rating,
        },
        polarity,
    )
}

fn raw(text: &str, rating: &str, location: &[&str]) -> RawReview {
    RawReview {
        text: text.to_owned(),
        raw_places: "Tacos, Bars".to_owned(),
        raw_location: location.iter().map(|l| (*l).to_owned()).collect(),
        raw_rating: rating.to_owned(),
    }
}

/// Scores every text 0.2 and counts how often it was asked.
#[derive(Default)]
struct CountingScorer {
    calls: AtomicUsize,
}

impl SentimentScorer for CountingScorer {
    async fn score(&self, _text: &str) -> Result<f64, SentimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(0.2)
    }
}

struct QuotaScorer;

impl SentimentScorer for QuotaScorer {
    async fn score(&self, _text: &str) -> Result<f64, SentimentError> {
        Err(SentimentError::QuotaExceeded("daily limit".to_owned()))
    }
}

// ---------------------------------------------------------------------------
// sentiment_from_polarity
// ---------------------------------------------------------------------------

#[test]
fn transform_maps_polarity_bounds() {
    assert!((sentiment_from_polarity(1.0) - 10.0).abs() < f64::EPSILON);
    assert!(sentiment_from_polarity(-1.0).abs() < f64::EPSILON);
    assert!((sentiment_from_polarity(0.0) - 5.0).abs() < f64::EPSILON);
}

#[test]
fn transform_clamps_out_of_range_polarity() {
    assert!((sentiment_from_polarity(3.5) - 10.0).abs() < f64::EPSILON);
    assert!(sentiment_from_polarity(-2.0).abs() < f64::EPSILON);
    assert!((sentiment_from_polarity(f64::NAN) - 5.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// field parsers
// ---------------------------------------------------------------------------

#[test]
fn parse_rating_reads_leading_number() {
    assert!((parse_rating("4.0 star rating").unwrap() - 4.0).abs() < f64::EPSILON);
    assert!((parse_rating("1.5 star rating").unwrap() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn parse_rating_rejects_garbage_and_out_of_range() {
    assert!(matches!(
        parse_rating("star rating"),
        Err(ProfileError::MalformedField { field: "rating", .. })
    ));
    assert!(parse_rating("0.5 star rating").is_err());
    assert!(parse_rating("9.0 star rating").is_err());
    assert!(parse_rating("").is_err());
}

#[test]
fn parse_city_uses_second_line_of_two() {
    let lines = vec!["123 Main St".to_owned(), "Oakland, CA 94612".to_owned()];
    assert_eq!(parse_city(&lines).unwrap(), "Oakland, CA");
}

#[test]
fn parse_city_uses_first_line_otherwise() {
    let single = vec!["Berkeley, CA 94704".to_owned()];
    assert_eq!(parse_city(&single).unwrap(), "Berkeley, CA");

    let three = vec![
        "Alameda, CA 94501".to_owned(),
        "Suite 4".to_owned(),
        "Ferry Terminal".to_owned(),
    ];
    assert_eq!(parse_city(&three).unwrap(), "Alameda, CA");
}

#[test]
fn parse_city_rejects_empty_or_short_lines() {
    assert!(matches!(
        parse_city(&[]),
        Err(ProfileError::MalformedField { field: "location", .. })
    ));
    assert!(parse_city(&["94612".to_owned()]).is_err());
}

#[test]
fn parse_places_trims_and_drops_blanks() {
    assert_eq!(
        parse_places(" Coffee & Tea ,Bakeries,, "),
        vec!["Coffee & Tea".to_owned(), "Bakeries".to_owned()]
    );
    assert!(parse_places("").is_empty());
}

// ---------------------------------------------------------------------------
// statistics
// ---------------------------------------------------------------------------

#[test]
fn average_rating_is_mean_of_ratings() {
    let set = ReviewRecordSet::from_reviews(vec![
        review("a", &[], "Oakland, CA", 4.0, 0.0),
        review("b", &[], "Oakland, CA", 5.0, 0.0),
        review("c", &[], "Oakland, CA", 3.0, 0.0),
    ]);
    assert_eq!(set.average_rating(), Some(4.0));
}

#[test]
fn averages_round_to_two_decimals() {
    let set = ReviewRecordSet::from_reviews(vec![
        review("a", &[], "Oakland, CA", 4.0, 0.1),
        review("b", &[], "Oakland, CA", 4.0, 0.0),
        review("c", &[], "Oakland, CA", 5.0, 0.0),
    ]);
    assert_eq!(set.average_rating(), Some(4.33));
    assert_eq!(set.average_sentiment(), Some(5.17));
}

#[test]
fn empty_set_has_no_averages() {
    let set = ReviewRecordSet::default();
    assert_eq!(set.average_rating(), None);
    assert_eq!(set.average_sentiment(), None);
    assert!(set.top_cities(3).is_empty());
    assert!(set.recent_reviews(3).is_empty());
}

#[test]
fn recent_reviews_keeps_fetch_order() {
    let set = ReviewRecordSet::from_reviews(
        (0..5)
            .map(|i| review(&format!("r{i}"), &[], "Oakland, CA", 4.0, 0.0))
            .collect(),
    );
    assert_eq!(set.recent_reviews(3), vec!["r0", "r1", "r2"]);
}

#[test]
fn top_cities_breaks_ties_by_first_appearance() {
    let set = ReviewRecordSet::from_reviews(vec![
        review("a", &[], "Berkeley, CA", 4.0, 0.0),
        review("b", &[], "Oakland, CA", 4.0, 0.0),
        review("c", &[], "Oakland, CA", 4.0, 0.0),
        review("d", &[], "Alameda, CA", 4.0, 0.0),
        review("e", &[], "Berkeley, CA", 4.0, 0.0),
        review("f", &[], "Emeryville, CA", 4.0, 0.0),
    ]);
    let top = set.top_cities(3);
    let names: Vec<&str> = top.iter().map(|c| c.city.as_str()).collect();
    assert_eq!(names, vec!["Berkeley, CA", "Oakland, CA", "Alameda, CA"]);
    assert_eq!(top[0].count, 2);
    assert_eq!(top[2].count, 1);
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[tokio::test]
async fn build_skips_malformed_reviews_without_scoring_them() {
    let scorer = CountingScorer::default();
    let raws = vec![
        raw("good one", "4.0 star rating", &["Oakland, CA 94612"]),
        raw("bad rating", "n/a", &["Oakland, CA 94612"]),
        raw("bad location", "3.0 star rating", &[]),
        raw("another", "5.0 star rating", &["1 Elm St", "Berkeley, CA 94704"]),
    ];

    let set = ReviewRecordSet::build(raws, &scorer, 2).await.unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
    assert_eq!(set.recent_reviews(3), vec!["good one", "another"]);
    assert_eq!(set.reviews()[1].city(), "Berkeley, CA");
    assert_eq!(set.reviews()[0].places(), ["Tacos", "Bars"]);
    assert!((set.reviews()[0].sentiment() - 6.0).abs() < 1e-9);
}

#[tokio::test]
async fn build_surfaces_scorer_failure() {
    let raws = vec![raw("fine", "4.0 star rating", &["Oakland, CA 94612"])];
    let result = ReviewRecordSet::build(raws, &QuotaScorer, 4).await;
    assert!(matches!(result, Err(SentimentError::QuotaExceeded(_))));
}
