//! Review-text sentiment scoring for revscope.
//!
//! [`SentimentScorer`] maps text to a polarity in `[-1.0, 1.0]`. Two backends
//! ship: the Google Cloud Natural Language API and an offline word lexicon.
//! [`ScorerBackend`] picks one from [`revscope_core::AppConfig`].

pub mod error;
pub mod google;
pub mod lexicon;
pub mod scorer;

mod retry;

pub use error::SentimentError;
pub use google::GoogleLanguageClient;
pub use lexicon::{lexicon_score, LexiconScorer};
pub use scorer::{ScorerBackend, SentimentScorer};
