//! `profile` command: build a profile and print it.

use std::fmt::Write as _;

use anyhow::Context;
use revscope_core::AppConfig;
use revscope_profile::{CohortSummary, ProfileResult, ProfileService, ProfileSettings};
use revscope_scraper::ReviewSiteClient;
use revscope_sentiment::ScorerBackend;

/// Builds the profile for `user_id` and prints it to stdout.
///
/// The build races Ctrl-C; an interrupt drops the build future, which cancels
/// every outstanding request.
///
/// # Errors
///
/// Returns an error if the collaborators cannot be constructed, the build
/// fails, or the user interrupts it.
pub(crate) async fn run_profile(config: &AppConfig, user_id: &str, json: bool) -> anyhow::Result<()> {
    let fetcher = ReviewSiteClient::from_config(config)?;
    let scorer = ScorerBackend::from_config(config)?;
    tracing::info!(user_id, sentiment_backend = scorer.name(), "building profile");
    let service = ProfileService::new(fetcher, scorer, ProfileSettings::from_config(config));

    let profile = tokio::select! {
        result = service.build_profile(user_id) => {
            result.with_context(|| format!("failed to build profile for {user_id}"))?
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            anyhow::bail!("interrupted");
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print!("{}", render_report(&profile));
    }
    Ok(())
}

/// Plain-text report: the user block, recent reviews, then the friend block.
pub(crate) fn render_report(profile: &ProfileResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n***User Data:***");
    let _ = writeln!(out, "name: {}", profile.name);
    let _ = writeln!(out, "hometown: {}", profile.hometown);
    let _ = writeln!(out, "total friends: {}", profile.total_friends);
    let _ = writeln!(out, "total reviews: {}\n", profile.total_reviews);

    write_cohort(&mut out, &profile.primary, "did you", "were you");

    let _ = writeln!(out, "recent reviews:");
    for review in profile.primary.recent_reviews.iter().flatten() {
        let _ = writeln!(out, "\t{review}");
    }

    let _ = writeln!(out, "\n***Friend Data:***");
    write_cohort(
        &mut out,
        &profile.friend_cohort,
        "did your friends",
        "were your friends",
    );
    out
}

fn write_cohort(out: &mut String, summary: &CohortSummary, did: &str, were: &str) {
    let visited = join_or_none(
        summary
            .top_visited_places
            .iter()
            .map(|p| format!("{} ({})", p.place, p.visits)),
    );
    let enthusiastic = join_or_none(
        summary
            .top_enthusiastic_places
            .iter()
            .map(|p| format!("{} ({:.2})", p.place, p.sentiment)),
    );
    let cities = join_or_none(
        summary
            .top_visited_cities
            .iter()
            .map(|c| format!("{} ({})", c.city, c.count)),
    );

    let _ = writeln!(out, "What places {did} visit the most? {visited}");
    let _ = writeln!(out, "What places {were} most enthusiastic about? {enthusiastic}");
    let _ = writeln!(out, "What cities {did} visit the most? {cities}");
    let _ = writeln!(
        out,
        "average rating: {} out of 5 stars",
        or_na(summary.average_rating)
    );
    let _ = writeln!(
        out,
        "enthusiasm score: {} out of 10\n",
        or_na(summary.enthusiasm_score)
    );
}

fn join_or_none(items: impl Iterator<Item = String>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_owned()
    } else {
        joined
    }
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2}"))
}
