mod profile;
mod score;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "revscope-cli")]
#[command(about = "Build review-history profiles from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build and print the profile of a user and their friends
    Profile {
        /// The review site's user id
        user_id: String,

        /// Print the JSON payload instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Score a piece of text with the configured sentiment backend
    Score {
        /// Text to score
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = revscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Profile { user_id, json } => profile::run_profile(&config, &user_id, json).await,
        Commands::Score { text } => score::run_score(&config, &text).await,
    }
}
