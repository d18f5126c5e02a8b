//! Keyword search command.

use console::style;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::scrapers::{ResponseMode, SearchClient, SearchError};
use crate::storage::FileSink;

/// Search the registry for `keyword` and append results under the output dir.
///
/// Pipeline failures are reported and end the command normally; only setup
/// errors are returned.
pub async fn cmd_search(settings: &Settings, keyword: &str, print: bool) -> anyhow::Result<()> {
    let client = SearchClient::from_settings(settings)?;
    let sink = FileSink::new(&settings.output_dir);

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    println!(
        "{} Searching {} for '{}'",
        style("→").cyan(),
        settings.base_url,
        keyword
    );

    let outcome = client.search(keyword, &sink, &cancel).await;
    ctrl_c.abort();

    match outcome {
        Ok(report) => {
            println!(
                "{} Results: {} ({} page{})",
                style("✓").green(),
                report.estimate.items,
                report.estimate.pages,
                if report.estimate.pages == 1 { "" } else { "s" }
            );
            if report.mode == ResponseMode::Inline && report.estimate.pages > 1 {
                println!(
                    "{} Registry answered inline; only the first page was imported",
                    style("!").yellow()
                );
            }
            if print {
                for record in &report.records {
                    println!("{}", record.to_json());
                }
            }
            println!(
                "{} Import finished: {} saved, {} failed → {}",
                style("✓").green(),
                report.saved,
                report.failed,
                sink.dir().display()
            );
        }
        Err(SearchError::TokenMissing) => {
            println!("{} Empty XSRF token, search aborted", style("✗").red());
        }
        Err(SearchError::EmptyResultSet) => {
            println!("{} No results for '{}'", style("✗").red(), keyword);
        }
        Err(SearchError::Cancelled) => {
            println!("{} Search cancelled", style("✗").red());
        }
        Err(e) => {
            println!("{} Search request failed: {}", style("✗").red(), e);
        }
    }

    Ok(())
}
