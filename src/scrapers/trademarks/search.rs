//! Search orchestration.

use std::future::Future;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::super::{HttpClient, SearchError, SearchResult};
use super::count::{CountEstimator, PageEstimate};
use super::extract::HtmlExtractor;
use super::form::{search_form, search_headers};
use super::token::TokenProvider;
use crate::config::{Endpoints, Settings};
use crate::models::TrademarkRecord;
use crate::storage::{RecordSink, SaveParams};

/// How the registry answered the search POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    /// 302 to a results page; every page was fetched with GET.
    Redirect { location: String, pages_fetched: u64 },
    /// 200 with the first results page inline.
    Inline,
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub keyword: String,
    pub estimate: PageEstimate,
    pub mode: ResponseMode,
    pub records: Vec<TrademarkRecord>,
    /// Records the sink accepted.
    pub saved: usize,
    /// Records the sink rejected.
    pub failed: usize,
}

/// Runs one keyword search end to end.
///
/// A token is fetched per call and never reused across searches.
pub struct SearchClient {
    client: HttpClient,
    endpoints: Endpoints,
    tokens: TokenProvider,
    counter: CountEstimator,
    extractor: HtmlExtractor,
}

impl SearchClient {
    pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            tokens: TokenProvider::new(client.clone(), &endpoints),
            counter: CountEstimator::new(client.clone(), endpoints.clone()),
            extractor: HtmlExtractor::new(endpoints.base_url()),
            client,
            endpoints,
        }
    }

    pub fn from_settings(settings: &Settings) -> SearchResult<Self> {
        let client = HttpClient::from_settings(settings)?;
        Ok(Self::new(client, settings.endpoints()))
    }

    /// Search for `keyword` and forward every extracted record to `sink`.
    ///
    /// Failing steps end the search with the reason: no token, an empty
    /// result set, or a failed search request. Individual page and save
    /// failures are logged and skipped.
    pub async fn search<S>(
        &self,
        keyword: &str,
        sink: &S,
        cancel: &CancellationToken,
    ) -> SearchResult<SearchReport>
    where
        S: RecordSink + ?Sized,
    {
        let token = match cancellable(cancel, self.tokens.fetch_token()).await? {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to obtain XSRF token: {}", e);
                return Err(SearchError::TokenMissing);
            }
        };

        let estimate = cancellable(cancel, self.counter.estimate_or_empty(keyword)).await?;
        if estimate.is_empty() {
            warn!("No results for '{}'", keyword);
            return Err(SearchError::EmptyResultSet);
        }
        info!(
            "Results: {} ({} page{})",
            estimate.items,
            estimate.pages,
            if estimate.pages == 1 { "" } else { "s" }
        );

        let headers = search_headers(&token, &self.endpoints)?;
        let form = search_form(keyword, &token);
        let response = cancellable(
            cancel,
            self.client
                .post_form(&self.endpoints.search(), &form, headers),
        )
        .await??;

        let location = response
            .location()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        let (mode, records) = match (response.status, location) {
            (StatusCode::FOUND, Some(location)) => {
                debug!("Search redirected to {}", location);
                let records = self.follow_pages(&location, estimate.pages, cancel).await?;
                (
                    ResponseMode::Redirect {
                        location,
                        pages_fetched: estimate.pages,
                    },
                    records,
                )
            }
            (StatusCode::OK, _) => {
                if estimate.pages > 1 {
                    // Inline responses carry the first page only.
                    info!(
                        "Inline search response; {} of {} pages not fetched",
                        estimate.pages - 1,
                        estimate.pages
                    );
                }
                let html = cancellable(cancel, response.text()).await??;
                (ResponseMode::Inline, self.extractor.extract(&html))
            }
            (status, _) => {
                return Err(SearchError::UnexpectedResponse {
                    status: status.as_u16(),
                })
            }
        };

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let params = SaveParams::with_suffix(keyword);
        let mut saved = 0;
        let mut failed = 0;
        for record in &records {
            if sink.save(record, TrademarkRecord::SOURCE_NAME, &params) {
                saved += 1;
            } else {
                failed += 1;
                warn!("Failed to save record {}", record.id());
            }
        }
        info!(
            "Import finished for '{}': {} saved, {} failed",
            keyword, saved, failed
        );

        Ok(SearchReport {
            keyword: keyword.to_string(),
            estimate,
            mode,
            records,
            saved,
            failed,
        })
    }

    /// Fetch result pages `0..pages` behind a redirect target, in order.
    async fn follow_pages(
        &self,
        location: &str,
        pages: u64,
        cancel: &CancellationToken,
    ) -> SearchResult<Vec<TrademarkRecord>> {
        let mut records = Vec::new();
        for index in 0..pages {
            let url = self.resolve(&page_url(location, index));
            match cancellable(cancel, self.fetch_page(&url)).await? {
                Ok(page) => {
                    debug!("Page {} yielded {} records", index, page.len());
                    records.extend(page);
                }
                Err(e) => warn!("Failed to load page {}: {}", url, e),
            }
        }
        Ok(records)
    }

    async fn fetch_page(&self, url: &str) -> SearchResult<Vec<TrademarkRecord>> {
        let response = self.client.get(url).await?;
        if !response.is_success() {
            return Err(SearchError::HttpStatus {
                status: response.status.as_u16(),
                url: url.to_string(),
            });
        }
        let html = response.text().await?;
        Ok(self.extractor.extract(&html))
    }

    /// Qualify a possibly relative redirect target against the registry origin.
    fn resolve(&self, target: &str) -> String {
        Url::parse(self.endpoints.base_url())
            .and_then(|base| base.join(target))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.endpoints.base_url(), target))
    }
}

/// URL of result page `index` behind a redirect target.
///
/// Page 0 is the target itself; later pages add a `p` query parameter.
pub fn page_url(location: &str, index: u64) -> String {
    if index == 0 {
        location.to_string()
    } else if location.contains('?') {
        format!("{}&p={}", location, index)
    } else {
        format!("{}?p={}", location, index)
    }
}

/// Race `future` against cancellation.
async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> SearchResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
        output = future => Ok(output),
    }
}
