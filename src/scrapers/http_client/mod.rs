//! HTTP client for the registry search pipeline.

mod response;

pub use response::{HeadResponse, HttpResponse};

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::{redirect, Client};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;

/// Default user agent. The registry serves its search form to browsers only.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36";

/// HTTP client with a redirect-following and a redirect-observing transport.
///
/// Page fetches follow redirects. The search form POST must not, because the
/// registry signals multi-page results with a 302.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    no_redirect_client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the default browser-like user agent.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(timeout, None)
    }

    /// Create a new HTTP client sending `user_agent`, or [`USER_AGENT`] when unset.
    pub fn with_user_agent(
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = user_agent.unwrap_or(USER_AGENT);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        let no_redirect_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect_client,
        })
    }

    /// Create a client from application settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(settings.timeout(), settings.user_agent.as_deref())
    }

    /// Make a HEAD request; only status and headers are read.
    pub async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self.client.head(url).send().await?;
        debug!(
            "HEAD {} -> {} ({}ms)",
            url,
            response.status(),
            start.elapsed().as_millis()
        );
        Ok(HeadResponse::from_response(&response))
    }

    /// Make a GET request, following redirects.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        debug!(
            "GET {} -> {} ({}ms)",
            url,
            response.status(),
            start.elapsed().as_millis()
        );
        Ok(HttpResponse::from_response(response))
    }

    /// POST a form-encoded body without following redirects.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
        headers: HeaderMap,
    ) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self
            .no_redirect_client
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?;
        debug!(
            "POST {} -> {} ({}ms)",
            url,
            response.status(),
            start.elapsed().as_millis()
        );
        Ok(HttpResponse::from_response(response))
    }
}
