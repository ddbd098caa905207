//! Link and resource rewriting.
//!
//! Every resource-bearing attribute is pointed at `/resource?targetUrl=…`
//! and every same-origin anchor at `/?targetUrl=…`, so the browser never
//! talks to the origin directly for anything the page loads.

use dom_query::Document;

use crate::transform::{dom, resolver};

/// Which proxy entry point a rewritten reference goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Re-enters the transformation pipeline.
    Page,
    /// Returns the bytes verbatim.
    Resource,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Page => "/",
            Route::Resource => "/resource",
        }
    }
}

/// Query parameter both entry points read the target from.
pub const TARGET_PARAM: &str = "targetUrl";

/// Which attribute of a tag gets rewritten, and to which route.
#[derive(Debug, Clone, Copy)]
pub struct RewriteTarget {
    pub tag: &'static str,
    pub attribute: &'static str,
    pub route: Route,
}

pub static REWRITE_TARGETS: &[RewriteTarget] = &[
    RewriteTarget { tag: "img", attribute: "src", route: Route::Resource },
    RewriteTarget { tag: "link", attribute: "href", route: Route::Resource },
    RewriteTarget { tag: "video", attribute: "poster", route: Route::Resource },
    RewriteTarget { tag: "audio", attribute: "src", route: Route::Resource },
    RewriteTarget { tag: "source", attribute: "src", route: Route::Resource },
    RewriteTarget { tag: "a", attribute: "href", route: Route::Page },
];

/// Anchors to these stay on the origin.
pub const VERBATIM_PATTERNS: &[&str] = &["/wiki/Portal:", "Contents/Portals", "/wiki/Wikipedia:Contents/"];

pub fn target_for(tag: &str) -> Option<&'static RewriteTarget> {
    REWRITE_TARGETS.iter().find(|t| t.tag == tag)
}

/// `<route>?targetUrl=<percent-encoded url>`.
pub fn proxied(route: Route, url: &str) -> String {
    format!("{}?{}={}", route.path(), TARGET_PARAM, urlencoding::encode(url))
}

/// What an anchor's href should become, given its resolved URL.
fn anchor_href(base_host: Option<&str>, resolved: &str) -> String {
    let link_host = resolver::host_of(resolved);
    if let (Some(base), Some(link)) = (base_host, link_host.as_deref()) {
        if base != link {
            return resolved.to_string();
        }
    }
    if VERBATIM_PATTERNS.iter().any(|p| resolved.contains(p)) {
        return resolved.to_string();
    }
    proxied(Route::Page, resolved)
}

/// Rewrite every table-listed attribute in `doc` against `base`.
pub fn rewrite_links(doc: &Document, base: &str) {
    let base_host = resolver::host_of(base);
    let selector = REWRITE_TARGETS.iter().map(|t| t.tag).collect::<Vec<_>>().join(", ");

    for node in doc.select(&selector).nodes() {
        let Some(target) = dom::tag_name(node).and_then(|tag| target_for(&tag)) else {
            continue;
        };
        if target.tag == "img" {
            node.set_attr("loading", "lazy");
        }

        let Some(original) = node.attr(target.attribute) else {
            continue;
        };
        if original.is_empty() || resolver::is_protected(&original) {
            continue;
        }

        let resolved = resolver::resolve(base, &original);
        let rewritten = match target.route {
            Route::Page => anchor_href(base_host.as_deref(), &resolved),
            Route::Resource => proxied(Route::Resource, &resolved),
        };
        node.set_attr(target.attribute, &rewritten);
    }
}
