//! Origin fetcher.
//!
//! # Responsibilities
//! - Issue one GET per call with the fixed identification headers
//! - Follow redirects and report the final URL
//! - Split failures into transport and upstream-status kinds

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::schema::TimeoutConfig;
use crate::observability::metrics;
use crate::origin::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

/// Bytes and metadata of one successful origin response.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub bytes: Bytes,
    /// `Content-Type` as advertised by the origin.
    pub content_type: Option<String>,
    /// URL after redirects; the base for rewriting.
    pub resolved_url: Url,
}

/// Errors that can occur while fetching from the origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS, redirect or body read failure.
    #[error("transport failure fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// The origin answered outside the 2xx range.
    #[error("origin answered {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },
}

/// Anything that can fetch a URL from the origin.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError>;
}

/// The real HTTP fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct OriginFetcher {
    client: Client,
}

impl OriginFetcher {
    /// Build a fetcher whose client carries the identification headers.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(identification_headers())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;

        Ok(Self { client })
    }
}

fn identification_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::REFERER, HeaderValue::from_static(REFERER));
    headers
}

#[async_trait]
impl Fetch for OriginFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError> {
        tracing::debug!(url = %url, "Fetching from origin");

        let transport = |e: reqwest::Error| {
            metrics::record_fetch("transport_error");
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Origin returned non-success status");
            metrics::record_fetch("status_error");
            return Err(FetchError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let resolved_url = response.url().clone();
        let bytes = response.bytes().await.map_err(transport)?;

        metrics::record_fetch("success");
        tracing::debug!(
            url = %url,
            resolved_url = %resolved_url,
            content_type = content_type.as_deref().unwrap_or("-"),
            len = bytes.len(),
            "Origin fetch complete"
        );

        Ok(FetchResult {
            bytes,
            content_type,
            resolved_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identification_headers() {
        let headers = identification_headers();
        assert_eq!(headers.get(header::REFERER).unwrap(), REFERER);
        assert!(headers.get(header::ACCEPT).unwrap().to_str().unwrap().starts_with("text/html"));
        assert!(headers.contains_key(header::ACCEPT_LANGUAGE));
    }

    #[test]
    fn test_error_messages_name_the_url() {
        let err = FetchError::UpstreamStatus {
            url: "https://en.wikipedia.org/wiki/X".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "origin answered 503 for https://en.wikipedia.org/wiki/X");
    }
}
