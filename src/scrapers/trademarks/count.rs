//! Result count lookup and page estimation.

use reqwest::StatusCode;
use tracing::{debug, warn};

use super::super::{HttpClient, SearchError, SearchResult};
use crate::config::Endpoints;

/// Fixed page size of the registry results table.
pub const ITEMS_PER_PAGE: u64 = 100;

/// Matched item count and the number of result pages covering it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageEstimate {
    pub items: u64,
    pub pages: u64,
}

impl PageEstimate {
    pub fn from_items(items: u64) -> Self {
        Self {
            items,
            pages: items.div_ceil(ITEMS_PER_PAGE),
        }
    }

    /// No pages means the search must not proceed.
    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }
}

/// Queries the count endpoint for a keyword.
#[derive(Clone)]
pub struct CountEstimator {
    client: HttpClient,
    endpoints: Endpoints,
}

impl CountEstimator {
    pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Look up the number of items matching `keyword`.
    pub async fn estimate(&self, keyword: &str) -> SearchResult<PageEstimate> {
        let url = self.endpoints.count(keyword);
        let response = self.client.get(&url).await?;
        if response.status != StatusCode::OK {
            return Err(SearchError::HttpStatus {
                status: response.status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let items = parse_count(&body)?;
        debug!("Count for '{}': {}", keyword, items);
        Ok(PageEstimate::from_items(items))
    }

    /// Like [`estimate`](Self::estimate), but any failure yields an empty estimate.
    pub async fn estimate_or_empty(&self, keyword: &str) -> PageEstimate {
        match self.estimate(keyword).await {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!("Failed to get result count for '{}': {}", keyword, e);
                PageEstimate::default()
            }
        }
    }
}

/// Read the `count` field of a count endpoint body.
///
/// Malformed JSON is an error; a missing or non-numeric field is zero.
pub fn parse_count(body: &str) -> SearchResult<u64> {
    let data: serde_json::Value =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    let count = match data.get("count") {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}
