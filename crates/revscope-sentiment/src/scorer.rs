//! The scoring contract and runtime backend selection.

use std::future::Future;

use revscope_core::{AppConfig, SentimentBackend};

use crate::error::SentimentError;
use crate::google::GoogleLanguageClient;
use crate::lexicon::LexiconScorer;

/// Maps text to a polarity in `[-1.0, 1.0]` (negative to positive).
pub trait SentimentScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SentimentError`] when the backing service is unreachable,
    /// out of quota, or answers with something unparseable.
    fn score(&self, text: &str) -> impl Future<Output = Result<f64, SentimentError>> + Send;
}

/// The scorer the binaries inject into the profile service.
pub enum ScorerBackend {
    Google(GoogleLanguageClient),
    Lexicon(LexiconScorer),
}

impl ScorerBackend {
    /// Builds the backend selected by `config.sentiment_backend`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingApiKey`] if the Google backend is
    /// selected without a key, or any construction error of
    /// [`GoogleLanguageClient`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        match config.sentiment_backend {
            SentimentBackend::Google => {
                let key = config
                    .google_language_api_key
                    .as_deref()
                    .ok_or_else(|| SentimentError::MissingApiKey("google".to_owned()))?;
                let client = GoogleLanguageClient::with_base_url(
                    key,
                    config.sentiment_request_timeout_secs,
                    config.sentiment_max_retries,
                    config.sentiment_retry_backoff_ms,
                    &config.sentiment_base_url,
                )?;
                Ok(Self::Google(client))
            }
            SentimentBackend::Lexicon => Ok(Self::Lexicon(LexiconScorer)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google(_) => "google",
            Self::Lexicon(_) => "lexicon",
        }
    }
}

impl SentimentScorer for ScorerBackend {
    async fn score(&self, text: &str) -> Result<f64, SentimentError> {
        match self {
            Self::Google(client) => client.score(text).await,
            Self::Lexicon(lexicon) => lexicon.score(text).await,
        }
    }
}
