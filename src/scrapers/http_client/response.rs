//! HTTP response wrappers.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Response, StatusCode};

/// HTTP response wrapper.
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    /// Every `set-cookie` value, which the header map would collapse.
    pub set_cookies: Vec<String>,
    pub(crate) response: Response,
}

impl HttpResponse {
    pub(crate) fn from_response(response: Response) -> Self {
        let (headers, set_cookies) = collect_headers(response.headers());
        Self {
            status: response.status(),
            headers,
            set_cookies,
            response,
        }
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the Location header.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").map(|s| s.as_str())
    }

    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}

/// HEAD response wrapper (no body, just headers).
pub struct HeadResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub set_cookies: Vec<String>,
}

impl HeadResponse {
    pub(crate) fn from_response(response: &Response) -> Self {
        let (headers, set_cookies) = collect_headers(response.headers());
        Self {
            status: response.status(),
            headers,
            set_cookies,
        }
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Flatten a header map into lowercase name/value pairs plus all cookies.
fn collect_headers(map: &HeaderMap) -> (HashMap<String, String>, Vec<String>) {
    let mut headers = HashMap::new();
    for (name, value) in map {
        if let Ok(v) = value.to_str() {
            headers.insert(name.to_string(), v.to_string());
        }
    }
    let set_cookies = map
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .collect();
    (headers, set_cookies)
}
