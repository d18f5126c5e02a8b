//! Application settings and registry endpoint derivation.

use std::path::PathBuf;
use std::time::Duration;

/// Default registry origin.
pub const DEFAULT_BASE_URL: &str = "https://search.ipaustralia.gov.au";

/// Default directory for stored records, relative to the working directory.
const DEFAULT_OUTPUT_SUBDIR: &str = "filestorage";

const ADVANCED_SEARCH_PATH: &str = "/trademarks/search/advanced";
const COUNT_PATH: &str = "/trademarks/search/count";
const SEARCH_PATH: &str = "/trademarks/search/doSearch";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Registry origin, without a trailing slash.
    pub base_url: String,
    /// Directory where record files are appended.
    pub output_dir: PathBuf,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent override; `None` sends a browser-like default.
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_SUBDIR),
            request_timeout: 30,
            user_agent: None,
        }
    }
}

impl Settings {
    /// Create settings pointing at a different registry origin.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Endpoints derived from the configured origin.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url)
    }
}

/// Registry endpoints used by one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Registry origin, used to qualify relative links.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Advanced search page; its response carries the XSRF cookie.
    pub fn advanced_search(&self) -> String {
        format!("{}{}", self.base_url, ADVANCED_SEARCH_PATH)
    }

    /// Result count endpoint for a keyword.
    pub fn count(&self, keyword: &str) -> String {
        format!(
            "{}{}?wv%5B0%5D={}",
            self.base_url,
            COUNT_PATH,
            urlencoding::encode(keyword)
        )
    }

    /// Search form action.
    pub fn search(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}
