//! Route handlers.
//!
//! # Responsibilities
//! - Validate the `targetUrl` query parameter before any fetch
//! - Fetch through the retry policy
//! - Transform pages; stream resources back untouched
//!
//! # Design Decisions
//! - Validation failures never reach the fetcher
//! - Page HTML is transformed on the blocking pool
//! - Every outcome is recorded under its route label

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::config::{BrandingConfig, ResourceConfig};
use crate::http::response::ProxyError;
use crate::observability::metrics;
use crate::origin::{
    host_within, Fetch, FetchError, FetchResult, ALLOWED_DOMAIN_SUFFIX, DEFAULT_TARGET,
};
use crate::resilience::{retry, RetryPolicy};
use crate::transform::{transform_page, TARGET_PARAM};

/// Content type used when the origin does not advertise one.
pub const DEFAULT_PAGE_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn Fetch>,
    pub retry: RetryPolicy,
    pub branding: Arc<BrandingConfig>,
    pub resources: Arc<ResourceConfig>,
}

type QueryPairs = Query<Vec<(String, String)>>;

/// `GET /`: fetch, transform and return one page.
pub async fn page_view(State(state): State<AppState>, Query(params): QueryPairs) -> Response {
    let start = Instant::now();
    let response = match serve_page(&state, &params).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("page", response.status().as_u16(), start);
    response
}

/// `GET /resource`: fetch a subresource and return its bytes as-is.
pub async fn resource(State(state): State<AppState>, Query(params): QueryPairs) -> Response {
    let start = Instant::now();
    let response = match serve_resource(&state, &params).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("resource", response.status().as_u16(), start);
    response
}

async fn serve_page(state: &AppState, params: &[(String, String)]) -> Result<Response, ProxyError> {
    let target = page_target(params)?;
    tracing::debug!(target = %target, "Serving page");

    let fetched = fetch_with_retry(state, &target)
        .await
        .map_err(ProxyError::PageUnavailable)?;

    let content_type = fetched
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_PAGE_CONTENT_TYPE.to_string());

    let branding = state.branding.clone();
    let body = tokio::task::spawn_blocking(move || {
        let html = String::from_utf8_lossy(&fetched.bytes);
        transform_page(&html, fetched.resolved_url.as_str(), &branding)
    })
    .await
    .map_err(|e| ProxyError::Transform(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

async fn serve_resource(
    state: &AppState,
    params: &[(String, String)],
) -> Result<Response, ProxyError> {
    let raw = target_param(params)
        .filter(|t| !t.is_empty())
        .ok_or(ProxyError::MissingTarget)?;
    let target = parse_target(raw)?;
    if !resource_host_allowed(&state.resources, &target) {
        return Err(ProxyError::Forbidden(host_label(&target)));
    }

    let fetched = fetch_with_retry(state, &target)
        .await
        .map_err(ProxyError::ResourceUnavailable)?;

    let cache_control = format!("public, max-age={}", state.resources.cache_max_age_secs);
    let mut response = ([(header::CACHE_CONTROL, cache_control)], fetched.bytes).into_response();
    if let Some(content_type) = fetched.content_type {
        match content_type.parse() {
            Ok(value) => {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            Err(_) => tracing::warn!(content_type = %content_type, "Dropping unusable content type"),
        }
    }
    Ok(response)
}

async fn fetch_with_retry(state: &AppState, target: &Url) -> Result<FetchResult, FetchError> {
    retry(&state.retry, || {
        let fetcher = state.fetcher.clone();
        let url = target.clone();
        async move { fetcher.fetch(&url).await }
    })
    .await
}

fn target_param(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(name, _)| name == TARGET_PARAM)
        .map(|(_, value)| value.as_str())
}

/// Resolve the page target: default when absent, validated, with every
/// other query parameter carried over to the origin request.
fn page_target(params: &[(String, String)]) -> Result<Url, ProxyError> {
    let raw = target_param(params)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TARGET);
    let mut target = parse_target(raw)?;

    let host = target.host_str().unwrap_or_default();
    if !host_within(host, ALLOWED_DOMAIN_SUFFIX) {
        return Err(ProxyError::Forbidden(host_label(&target)));
    }

    let mut passthrough = params.iter().filter(|(name, _)| name != TARGET_PARAM).peekable();
    if passthrough.peek().is_some() {
        let mut pairs = target.query_pairs_mut();
        for (name, value) in passthrough {
            pairs.append_pair(name, value);
        }
    }
    Ok(target)
}

fn parse_target(raw: &str) -> Result<Url, ProxyError> {
    let url = Url::parse(raw).map_err(|_| ProxyError::BadTarget(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ProxyError::BadTarget(raw.to_string())),
    }
}

fn resource_host_allowed(resources: &ResourceConfig, target: &Url) -> bool {
    if resources.allowed_domain_suffixes.is_empty() {
        return true;
    }
    let host = target.host_str().unwrap_or_default();
    resources
        .allowed_domain_suffixes
        .iter()
        .any(|suffix| host_within(host, suffix))
}

fn host_label(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_page_target_defaults() {
        let url = page_target(&[]).unwrap();
        assert_eq!(url.as_str(), "https://wikipedia.org/");

        let url = page_target(&pairs(&[("targetUrl", "")])).unwrap();
        assert_eq!(url.host_str(), Some("wikipedia.org"));
    }

    #[test]
    fn test_page_target_validation() {
        let err = page_target(&pairs(&[("targetUrl", "https://evil.com/")])).unwrap_err();
        assert!(matches!(err, ProxyError::Forbidden(host) if host == "evil.com"));

        let err = page_target(&pairs(&[("targetUrl", "https://evilwikipedia.org/")])).unwrap_err();
        assert!(matches!(err, ProxyError::Forbidden(_)));

        let err = page_target(&pairs(&[("targetUrl", "not a url")])).unwrap_err();
        assert!(matches!(err, ProxyError::BadTarget(_)));

        let err = page_target(&pairs(&[("targetUrl", "ftp://en.wikipedia.org/x")])).unwrap_err();
        assert!(matches!(err, ProxyError::BadTarget(_)));
    }

    #[test]
    fn test_page_target_carries_other_params() {
        let url = page_target(&pairs(&[
            ("search", "rust lang"),
            ("targetUrl", "https://en.wikipedia.org/w/index.php?fulltext=1"),
            ("title", "Special:Search"),
        ]))
        .unwrap();

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            pairs(&[
                ("fulltext", "1"),
                ("search", "rust lang"),
                ("title", "Special:Search"),
            ])
        );
    }

    #[test]
    fn test_page_target_without_extras_is_unchanged() {
        let url = page_target(&pairs(&[("targetUrl", "https://en.wikipedia.org/wiki/Rust")])).unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/Rust");
    }

    #[test]
    fn test_resource_allow_list() {
        let resources = ResourceConfig::default();
        let ok = Url::parse("https://upload.wikimedia.org/a.png").unwrap();
        let bad = Url::parse("https://tracker.example/a.png").unwrap();
        assert!(resource_host_allowed(&resources, &ok));
        assert!(!resource_host_allowed(&resources, &bad));

        let open = ResourceConfig {
            allowed_domain_suffixes: Vec::new(),
            ..ResourceConfig::default()
        };
        assert!(resource_host_allowed(&open, &bad));
    }
}
