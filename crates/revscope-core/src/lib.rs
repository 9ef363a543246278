pub mod app_config;
pub mod config;
pub mod types;

pub use app_config::{AppConfig, Environment, SentimentBackend};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use types::{RawReview, UserBasics, FRIEND_SAMPLE_CAP, REVIEWS_PER_PAGE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
