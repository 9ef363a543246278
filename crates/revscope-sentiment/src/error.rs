use thiserror::Error;

/// Errors returned by sentiment scorers.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the language service.
    #[error("sentiment service rate limited the request")]
    RateLimited,

    /// The project's quota is spent; retrying will not help.
    #[error("sentiment quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-2xx answer from the language service.
    #[error("sentiment API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sentiment backend '{0}' requires GOOGLE_LANGUAGE_API_KEY")]
    MissingApiKey(String),

    #[error("invalid sentiment base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
