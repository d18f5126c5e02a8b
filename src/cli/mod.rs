//! Command-line interface.

mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "tmsearch")]
#[command(about = "Search the trademark registry and store every matching record")]
#[command(version)]
pub struct Cli {
    /// Free-text search keyword
    keyword: String,

    /// Registry origin
    #[arg(long, env = "TMSEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory record files are appended to
    #[arg(long, env = "TMSEARCH_OUTPUT_DIR", default_value = "filestorage")]
    output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "TMSEARCH_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// User agent override
    #[arg(long, env = "TMSEARCH_USER_AGENT")]
    user_agent: Option<String>,

    /// Print each record as JSON
    #[arg(long)]
    print: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            output_dir: self.output_dir.clone(),
            request_timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            ..Settings::with_base_url(&self.base_url)
        }
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run the search.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::cmd_search(&cli.settings(), &cli.keyword, cli.print).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_and_defaults() {
        let cli = Cli::try_parse_from(["tmsearch", "apple"]).unwrap();
        assert_eq!(cli.keyword, "apple");
        assert!(!cli.print);

        let settings = cli.settings();
        assert_eq!(settings.request_timeout, 30);
        assert_eq!(settings.output_dir, PathBuf::from("filestorage"));
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "tmsearch",
            "--base-url",
            "http://127.0.0.1:9000/",
            "--timeout",
            "5",
            "--print",
            "-v",
            "green tea",
        ])
        .unwrap();
        assert_eq!(cli.keyword, "green tea");
        assert!(cli.print);
        assert!(cli.verbose);

        let settings = cli.settings();
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.request_timeout, 5);
    }

    #[test]
    fn test_keyword_is_required() {
        assert!(Cli::try_parse_from(["tmsearch"]).is_err());
    }
}
