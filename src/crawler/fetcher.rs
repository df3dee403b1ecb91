//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetch` capability the engine requests pages through
//! - Building the reqwest client (redirects are never followed)
//! - Classifying responses into HTML pages and reportable failures

use crate::config::HttpConfig;
use crate::state::CrawlVariant;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Status code bot-detection layers answer with
pub const BLOCKED_STATUS: StatusCode = StatusCode::FORBIDDEN;

/// Body marker left by Cloudflare's bot-detection challenge pages
pub const BLOCKED_MARKER: &str = "/cdn-cgi/";

/// Raw response of a single GET request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body decoded as text
    pub body: String,
}

impl FetchResponse {
    /// Returns the Content-Type header value, if present and valid text
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Capability for fetching a URL with a set of request headers
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issues one GET request
    ///
    /// Only transport-level failures are errors here; every HTTP status is
    /// returned as a response and classified by the caller.
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<T: Fetch + ?Sized> Fetch for &T {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<FetchResponse, FetchError> {
        (**self).fetch(url, headers).await
    }
}

/// Builds the request headers identifying `variant`
pub fn variant_headers(variant: CrawlVariant) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(variant.user_agent()));
    headers
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are not followed: a 3xx answer is reported like any other
/// non-2xx status. Timeouts are only applied when configured.
///
/// # Example
///
/// ```no_run
/// use mirrorline::config::HttpConfig;
/// use mirrorline::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// `Fetch` implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, &e))?;

        Ok(FetchResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}

/// Classifies a response, returning the HTML body of a usable page
///
/// | Condition | Result |
/// |-----------|--------|
/// | 403 with `/cdn-cgi/` in the body | `Blocked` |
/// | Any other non-2xx | `UnexpectedStatus` |
/// | 2xx without Content-Type | `UnsupportedContent` |
/// | 2xx with a non-HTML Content-Type | `UnsupportedContent` |
/// | 2xx HTML | `Ok(body)` |
pub fn classify_response(url: &str, response: FetchResponse) -> Result<String, FetchError> {
    let status = response.status;

    if !status.is_success() {
        if status == BLOCKED_STATUS && response.body.contains(BLOCKED_MARKER) {
            return Err(FetchError::Blocked {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        return Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
            body: response.body,
        });
    }

    match response.content_type() {
        Some(content_type) if is_html(content_type) => Ok(response.body),
        content_type => Err(FetchError::UnsupportedContent {
            url: url.to_string(),
            content_type: content_type.map(str::to_string),
        }),
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}
