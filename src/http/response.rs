//! Response shaping for failures.
//!
//! # Responsibilities
//! - Map boundary errors to status codes
//! - Render minimal HTML fragments that name only the failure category
//!
//! # Design Decisions
//! - Transport and status failures collapse into one 502 outcome
//! - Diagnostics go to the log, never into the body
//! - Failure bodies carry our own `text/html` type, never the origin's

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::origin::FetchError;

/// Everything that can end a request before a successful response.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Target host is outside the allowed domain.
    #[error("target host '{0}' is not allowed")]
    Forbidden(String),

    /// Target could not be parsed or is not http(s).
    #[error("invalid target '{0}'")]
    BadTarget(String),

    /// `/resource` was called without a target.
    #[error("no targetUrl provided")]
    MissingTarget,

    /// Page fetch failed after all retries.
    #[error("page unavailable: {0}")]
    PageUnavailable(FetchError),

    /// Resource fetch failed after all retries.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(FetchError),

    /// The transformation task died.
    #[error("transformation failed: {0}")]
    Transform(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Forbidden(_) => StatusCode::FORBIDDEN,
            ProxyError::BadTarget(_) | ProxyError::MissingTarget => StatusCode::BAD_REQUEST,
            ProxyError::PageUnavailable(_) | ProxyError::ResourceUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing fragment for this failure.
    pub fn fragment(&self) -> &'static str {
        match self {
            ProxyError::Forbidden(_) => "<h1>Forbidden</h1>",
            ProxyError::BadTarget(_) => "<h1>Error: Invalid URL format.</h1>",
            ProxyError::MissingTarget => "<h1>Error: No targetUrl provided.</h1>",
            ProxyError::PageUnavailable(_) => {
                "<h1>Failed to load the page. Please try again later or refresh the page.</h1>"
            }
            ProxyError::ResourceUnavailable(_) => {
                "<h1>Failed to load the resource after several attempts. Please refresh the page or try again later.</h1>"
            }
            ProxyError::Transform(_) => "<h1>Something went wrong while preparing this page.</h1>",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
        }
        (status, Html(self.fragment())).into_response()
    }
}
