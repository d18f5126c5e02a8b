//! XSRF token acquisition.

use tracing::debug;

use super::super::{HttpClient, SearchError, SearchResult};
use crate::config::Endpoints;

/// Cookie carrying the anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Obtains a session anti-forgery token from the advanced search page.
#[derive(Clone)]
pub struct TokenProvider {
    client: HttpClient,
    url: String,
}

impl TokenProvider {
    pub fn new(client: HttpClient, endpoints: &Endpoints) -> Self {
        Self {
            client,
            url: endpoints.advanced_search(),
        }
    }

    /// Fetch a fresh token with a HEAD request.
    ///
    /// The token is echoed back unmodified as both the `_csrf` form field and
    /// the `XSRF-TOKEN` cookie of the search request.
    pub async fn fetch_token(&self) -> SearchResult<String> {
        let response = self.client.head(&self.url).await?;
        if !response.is_success() {
            return Err(SearchError::HttpStatus {
                status: response.status.as_u16(),
                url: self.url.clone(),
            });
        }

        let token = extract_xsrf_token(response.set_cookies.iter().map(String::as_str));
        debug!("XSRF token present: {}", token.is_some());
        token.ok_or(SearchError::TokenMissing)
    }
}

/// Find the XSRF token among `set-cookie` header values.
///
/// Returns the cookie value up to its first `;`. An empty value counts as absent.
pub fn extract_xsrf_token<'a, I>(set_cookies: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    set_cookies.into_iter().find_map(|cookie| {
        let (name, rest) = cookie.split_once('=')?;
        if name.trim() != XSRF_COOKIE {
            return None;
        }
        let value = rest.split(';').next().unwrap_or_default();
        (!value.is_empty()).then(|| value.to_string())
    })
}
