//! Registry scrapers: HTTP plumbing and the trademark search pipeline.

mod error;
mod http_client;
pub mod trademarks;

pub use error::{SearchError, SearchResult};
pub use http_client::{HeadResponse, HttpClient, HttpResponse, USER_AGENT};
pub use trademarks::{
    CountEstimator, HtmlExtractor, PageEstimate, ResponseMode, SearchClient, SearchReport,
    TokenProvider,
};
