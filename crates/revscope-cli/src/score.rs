use revscope_core::AppConfig;
use revscope_profile::sentiment_from_polarity;
use revscope_sentiment::{ScorerBackend, SentimentScorer};

/// Scores `text` with the configured backend and prints the raw polarity and
/// the 0-10 sentiment it maps to.
///
/// # Errors
///
/// Returns an error if the backend cannot be built or the scoring call fails.
pub(crate) async fn run_score(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let scorer = ScorerBackend::from_config(config)?;
    let polarity = scorer.score(text).await?;
    println!("{}", format_score(scorer.name(), polarity));
    Ok(())
}

fn format_score(backend: &str, polarity: f64) -> String {
    format!(
        "backend: {backend}\npolarity: {polarity:.3}\nsentiment: {:.2} out of 10",
        sentiment_from_polarity(polarity)
    )
}
