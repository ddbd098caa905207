//! The single origin this proxy fronts.
//!
//! # Data Flow
//! ```text
//! validated target URL
//!     → fetcher.rs (GET with identification headers, follow redirects)
//!     → FetchResult { bytes, content_type, resolved_url }
//! ```
//!
//! # Design Decisions
//! - Origin constants are compiled in; the proxy serves one site family
//! - Host checks compare whole labels, so `evilwikipedia.org` is rejected

pub mod fetcher;

pub use fetcher::{Fetch, FetchError, FetchResult, OriginFetcher};

/// Page fetched when the page route gets no `targetUrl`.
pub const DEFAULT_TARGET: &str = "https://wikipedia.org";

/// Hosts allowed on the page route end with this domain.
pub const ALLOWED_DOMAIN_SUFFIX: &str = "wikipedia.org";

/// Referer sent with every origin request.
pub const REFERER: &str = "https://www.wikipedia.org/";

/// Identifies the proxy to the origin.
pub const USER_AGENT: &str = concat!(
    "WikiSpace/",
    env!("CARGO_PKG_VERSION"),
    " (clutter-free reading proxy)"
);

pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// True when `host` equals `suffix` or is a subdomain of it.
///
/// Comparison is ASCII case-insensitive.
pub fn host_within(host: &str, suffix: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let suffix = suffix.to_ascii_lowercase();
    host == suffix
        || host
            .strip_suffix(&suffix)
            .is_some_and(|rest| rest.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_within_accepts_subdomains() {
        assert!(host_within("wikipedia.org", ALLOWED_DOMAIN_SUFFIX));
        assert!(host_within("en.wikipedia.org", ALLOWED_DOMAIN_SUFFIX));
        assert!(host_within("EN.M.Wikipedia.ORG", ALLOWED_DOMAIN_SUFFIX));
        assert!(host_within("en.wikipedia.org.", ALLOWED_DOMAIN_SUFFIX));
    }

    #[test]
    fn test_host_within_rejects_lookalikes() {
        assert!(!host_within("evilwikipedia.org", ALLOWED_DOMAIN_SUFFIX));
        assert!(!host_within("wikipedia.org.evil.com", ALLOWED_DOMAIN_SUFFIX));
        assert!(!host_within("example.com", ALLOWED_DOMAIN_SUFFIX));
        assert!(!host_within("", ALLOWED_DOMAIN_SUFFIX));
    }
}
