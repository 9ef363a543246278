use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment scorer the binaries wire into the profile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// Google Cloud Natural Language `analyzeSentiment`.
    Google,
    /// Offline word-weight scorer; no network access.
    Lexicon,
}

impl std::fmt::Display for SentimentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentBackend::Google => write!(f, "google"),
            SentimentBackend::Lexicon => write!(f, "lexicon"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub site_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_inter_request_delay_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub friend_concurrency: usize,
    pub sentiment_backend: SentimentBackend,
    pub google_language_api_key: Option<String>,
    pub sentiment_base_url: String,
    pub sentiment_request_timeout_secs: u64,
    pub sentiment_max_retries: u32,
    pub sentiment_retry_backoff_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("site_base_url", &self.site_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field(
                "scraper_inter_request_delay_ms",
                &self.scraper_inter_request_delay_ms,
            )
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field("friend_concurrency", &self.friend_concurrency)
            .field("sentiment_backend", &self.sentiment_backend)
            .field(
                "google_language_api_key",
                &self.google_language_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sentiment_base_url", &self.sentiment_base_url)
            .field(
                "sentiment_request_timeout_secs",
                &self.sentiment_request_timeout_secs,
            )
            .field("sentiment_max_retries", &self.sentiment_max_retries)
            .field(
                "sentiment_retry_backoff_ms",
                &self.sentiment_retry_backoff_ms,
            )
            .finish()
    }
}
