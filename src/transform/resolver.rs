//! URL resolution against a page base.
//!
//! Failures never escape: a reference that cannot be joined is logged and
//! handed back unchanged.

use url::Url;

/// Prefixes that are never resolved or proxied. Matched case-sensitively.
pub const PROTECTED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:", "#"];

/// True if `reference` starts with one of [`PROTECTED_PREFIXES`].
pub fn is_protected(reference: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|p| reference.starts_with(p))
}

/// Resolve `reference` against `base` into an absolute URL string.
pub fn resolve(base: &str, reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }
    if is_protected(reference) {
        return reference.to_string();
    }
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }

    match Url::parse(base).and_then(|b| b.join(reference)) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!(base, reference, error = %e, "URL resolution failed");
            reference.to_string()
        }
    }
}

/// Host of an absolute URL string, if it parses and has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}
