//! tmsearch - trademark registry search scraper.
//!
//! Searches a public trademark registry by keyword and appends every
//! extracted record to text files on disk.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tmsearch::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "tmsearch=info"
    } else {
        "tmsearch=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
