//! Client for the Google Cloud Natural Language `analyzeSentiment` endpoint.
//!
//! Only the document-level score is read; sentence-level results and
//! magnitude are ignored.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::retry::retry_with_backoff;
use crate::scorer::SentimentScorer;

const DEFAULT_BASE_URL: &str = "https://language.googleapis.com";
const ANALYZE_PATH: &str = "v1/documents:analyzeSentiment";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    document: Document<'a>,
    encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    document_sentiment: DocumentSentiment,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    #[serde(default)]
    score: f64,
}

/// Sentiment scorer backed by Google Cloud Natural Language.
///
/// Built once with the API key and shared by every scoring call of a profile
/// build. Use [`GoogleLanguageClient::with_base_url`] to point at a mock
/// server in tests.
pub struct GoogleLanguageClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GoogleLanguageClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SentimentError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::InvalidBaseUrl`] if `base_url` is not a URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("revscope/0.1 (sentiment)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(ANALYZE_PATH))
            .map_err(|e| SentimentError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries,
            backoff_base_ms,
        })
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    async fn analyze_once(&self, text: &str) -> Result<f64, SentimentError> {
        let body = AnalyzeRequest {
            document: Document {
                kind: "PLAIN_TEXT",
                content: text,
            },
            encoding_type: "UTF8",
        };

        let response = self
            .client
            .post(self.request_url())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SentimentError::RateLimited);
        }

        let payload = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&payload);
            if status == reqwest::StatusCode::FORBIDDEN && message.to_lowercase().contains("quota")
            {
                return Err(SentimentError::QuotaExceeded(message));
            }
            return Err(SentimentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnalyzeResponse =
            serde_json::from_str(&payload).map_err(|e| SentimentError::Deserialize {
                context: "analyzeSentiment response".to_owned(),
                source: e,
            })?;

        Ok(parsed.document_sentiment.score.clamp(-1.0, 1.0))
    }
}

impl SentimentScorer for GoogleLanguageClient {
    async fn score(&self, text: &str) -> Result<f64, SentimentError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.analyze_once(text)
        })
        .await
    }
}

/// Pulls `error.message` out of a Google API error envelope, falling back to
/// the raw body.
fn api_error_message(payload: &str) -> String {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| payload.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_appends_key_to_analyze_endpoint() {
        let client = GoogleLanguageClient::with_base_url("k3y", 5, 0, 0, "https://lang.example.com/")
            .expect("client");
        assert_eq!(
            client.request_url().as_str(),
            "https://lang.example.com/v1/documents:analyzeSentiment?key=k3y"
        );
    }

    #[test]
    fn request_body_uses_plain_text_document() {
        let body = AnalyzeRequest {
            document: Document {
                kind: "PLAIN_TEXT",
                content: "Lovely brunch.",
            },
            encoding_type: "UTF8",
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["document"]["type"], "PLAIN_TEXT");
        assert_eq!(json["document"]["content"], "Lovely brunch.");
        assert_eq!(json["encodingType"], "UTF8");
    }

    #[test]
    fn api_error_message_reads_google_envelope() {
        let body = r#"{"error":{"code":400,"message":"Invalid document","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "Invalid document");
    }

    #[test]
    fn api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("upstream exploded"), "upstream exploded");
    }
}
