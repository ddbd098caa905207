//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! The origin itself is not configurable; see [`crate::origin`].

use serde::{Deserialize, Serialize};

/// Root configuration for WikiSpace.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream client timeouts.
    pub timeouts: TimeoutConfig,

    /// Retry configuration for origin fetches.
    pub retries: RetryConfig,

    /// Sub-resource route settings.
    pub resources: ResourceConfig,

    /// Static asset serving.
    pub static_files: StaticFilesConfig,

    /// Branding injected into every page.
    pub branding: BrandingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration for the upstream client.
///
/// Only connection establishment is bounded; a slow origin holds its
/// request until it answers or the retries are exhausted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { connect_secs: 10 }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt (0 disables retrying).
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay_ms: 80,
        }
    }
}

/// Sub-resource route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Host suffixes the resource route may fetch from.
    /// An empty list allows any host.
    pub allowed_domain_suffixes: Vec<String>,

    /// `max-age` advertised on proxied resources, in seconds.
    pub cache_max_age_secs: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            allowed_domain_suffixes: vec!["wikipedia.org".to_string(), "wikimedia.org".to_string()],
            cache_max_age_secs: 86_400,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Serve files from `directory` for unmatched paths.
    pub enabled: bool,

    /// Directory holding the stylesheet and other assets.
    pub directory: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "public".to_string(),
        }
    }
}

/// Branding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Brand name used for the page title and heading.
    pub title: String,

    /// Line shown under the heading on the portal page.
    pub tagline: String,

    /// Stylesheet injected into every page head.
    pub stylesheet_href: String,

    /// Prepend the desktop-only notice overlay.
    pub mobile_notice: bool,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            title: "WikiSpace".to_string(),
            tagline: "A clutter free Wikipedia".to_string(),
            stylesheet_href: "/wikispace.css".to_string(),
            mobile_notice: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [retries]
            max_retries = 3

            [branding]
            title = "Reader"
            "#,
        )
        .unwrap();

        assert_eq!(config.retries.max_retries, 3);
        assert_eq!(config.retries.delay_ms, 80);
        assert_eq!(config.branding.title, "Reader");
        assert_eq!(config.branding.stylesheet_href, "/wikispace.css");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.resources.cache_max_age_secs, 86_400);
        assert!(config.static_files.enabled);
    }
}
