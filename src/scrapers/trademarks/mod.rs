//! Trademark registry search pipeline.
//!
//! One search runs strictly in sequence:
//! token → result count → search POST → (redirect pages | inline page) → sink.

mod count;
mod extract;
mod form;
mod search;
mod token;

pub use count::{parse_count, CountEstimator, PageEstimate, ITEMS_PER_PAGE};
pub use extract::{
    clean_label, ColumnLayout, HtmlExtractor, RESULTS_TABLE_ID, WITHOUT_IMAGE, WITH_IMAGE,
};
pub use form::{search_form, search_headers};
pub use search::{page_url, ResponseMode, SearchClient, SearchReport};
pub use token::{extract_xsrf_token, TokenProvider, XSRF_COOKIE};
