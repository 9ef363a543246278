//! Offline lexicon scorer for review text.

use crate::error::SentimentError;
use crate::scorer::SentimentScorer;

/// Word weights tuned for restaurant and venue reviews.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("best", 0.5),
    ("delicious", 0.5),
    ("excellent", 0.5),
    ("fantastic", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("perfect", 0.5),
    ("wonderful", 0.5),
    ("fresh", 0.3),
    ("friendly", 0.3),
    ("good", 0.3),
    ("great", 0.4),
    ("recommend", 0.4),
    ("tasty", 0.4),
    ("cozy", 0.3),
    ("attentive", 0.3),
    ("nice", 0.2),
    ("favorite", 0.4),
    // Negative signals
    ("awful", -0.6),
    ("bland", -0.4),
    ("bad", -0.4),
    ("cold", -0.2),
    ("dirty", -0.5),
    ("disappointing", -0.5),
    ("disappointed", -0.5),
    ("disgusting", -0.7),
    ("horrible", -0.6),
    ("mediocre", -0.3),
    ("overpriced", -0.4),
    ("rude", -0.5),
    ("slow", -0.3),
    ("stale", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
];

/// Words that flip the sign of the next weighted word.
const NEGATORS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "didn't"];

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words, sums matching weights (negated when the
/// previous word is a negator), and clamps the result to `[-1.0, 1.0]`.
/// Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    let mut negate = false;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
            .to_lowercase();
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += if negate { -weight } else { weight };
        }
        negate = NEGATORS.contains(&w.as_str());
    }
    score.clamp(-1.0, 1.0)
}

/// [`SentimentScorer`] backed by [`lexicon_score`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<f64, SentimentError> {
        Ok(lexicon_score(text))
    }
}
