//! Search pipeline error types.

use thiserror::Error;

/// Why a pipeline step failed.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {status} while requesting {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Empty XSRF token")]
    TokenMissing,
    #[error("Empty result set")]
    EmptyResultSet,
    #[error("Invalid request header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Unexpected search response status: {status}")]
    UnexpectedResponse { status: u16 },
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    /// True for failures of the search request itself.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::HttpStatus { .. }
                | Self::InvalidHeader(_)
                | Self::UnexpectedResponse { .. }
        )
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
