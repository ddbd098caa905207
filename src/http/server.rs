//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page and resource handlers
//! - Serve static assets for every other path
//! - Wire up middleware (tracing, request ID, security headers)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::handlers::{self, AppState};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::origin::{Fetch, OriginFetcher};
use crate::resilience::RetryPolicy;
use crate::security::headers;

/// HTTP server for the reading proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that fetches from the live origin.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let fetcher = OriginFetcher::new(&config.timeouts)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a server around any fetcher.
    pub fn with_fetcher(config: ProxyConfig, fetcher: Arc<dyn Fetch>) -> Self {
        let state = AppState {
            fetcher,
            retry: RetryPolicy::from(&config.retries),
            branding: Arc::new(config.branding.clone()),
            resources: Arc::new(config.resources.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::page_view))
            .route("/resource", get(handlers::resource))
            .with_state(state);

        if config.static_files.enabled {
            router = router.fallback_service(ServeDir::new(&config.static_files.directory));
        }

        if config.security.enable_headers {
            router = headers::apply_security_headers(router);
        }

        router
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_files = self.config.static_files.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
