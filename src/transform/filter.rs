//! Markup filter.
//!
//! Deletes everything in [`REMOVAL_CATALOG`], drops `srcset` so images load
//! once through the resource route, and rebrands the `<title>`.

use dom_query::Document;

use crate::transform::dom;

/// Why a rule is in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Scripts and embedded active content.
    ActiveContent,
    /// Hints that would make the browser contact the origin directly.
    ResourceHint,
    /// Origin navigation, toolbars and maintenance boxes.
    OriginChrome,
    /// Leftovers that only make sense with the origin's scripts or styles.
    Presentational,
}

/// A structural match rule for deletion.
#[derive(Debug, Clone, Copy)]
pub struct RemovalRule {
    pub selector: &'static str,
    pub reason: RemovalReason,
}

const fn rule(selector: &'static str, reason: RemovalReason) -> RemovalRule {
    RemovalRule { selector, reason }
}

use RemovalReason::{ActiveContent, OriginChrome, Presentational, ResourceHint};

/// Elements removed from every page, applied in order.
pub static REMOVAL_CATALOG: &[RemovalRule] = &[
    rule("script", ActiveContent),
    rule("noscript", ActiveContent),
    rule("iframe", ActiveContent),
    rule("object", ActiveContent),
    rule("embed", ActiveContent),
    rule(r#"meta[http-equiv="refresh"]"#, ActiveContent),
    rule(r#"link[rel="preload"]"#, ResourceHint),
    rule(r#"link[rel="prefetch"]"#, ResourceHint),
    rule(r#"link[rel="dns-prefetch"]"#, ResourceHint),
    rule(r#"link[rel="preconnect"]"#, ResourceHint),
    rule(r#"link[rel="modulepreload"]"#, ResourceHint),
    rule("div#mw-interwiki-results", OriginChrome),
    rule("nav.vector-toc-landmark", OriginChrome),
    rule("div.vector-body-before-content", OriginChrome),
    rule("div#contentSub", OriginChrome),
    rule("div.vector-column-start", OriginChrome),
    rule("div.vector-column-end", OriginChrome),
    rule("footer", OriginChrome),
    rule("ul#filetoc", OriginChrome),
    rule("ul.portalbox", OriginChrome),
    rule("div.vector-page-toolbar", OriginChrome),
    rule("div.vector-header-start", OriginChrome),
    rule("div.styled-select", OriginChrome),
    rule(r#"nav[data-jsl10n="all-languages-nav-label"]"#, OriginChrome),
    rule("table.plainlinks", OriginChrome),
    rule("table.box-More_citations_needed", OriginChrome),
    rule("div.side-box", OriginChrome),
    rule("div.spoken-wikipedia", OriginChrome),
    rule("div.nowraplinks", OriginChrome),
    rule("div.catlinks", OriginChrome),
    rule("div.wikipedia25-cta-container", OriginChrome),
    rule("div#shared-image-desc", OriginChrome),
    rule("div#mw-sharedupload", OriginChrome),
    rule("nav.vector-user-links", OriginChrome),
    rule("div.mw-aria-live-region", OriginChrome),
    rule("span.mw-editsection", OriginChrome),
    rule("sup", OriginChrome),
    rule("div.mw-search-profile-tabs", OriginChrome),
    rule("div#mw-imagepage-content", OriginChrome),
    rule("div.portal-bar", OriginChrome),
    rule("div.metadata", OriginChrome),
    rule("div.mw-footer-container", OriginChrome),
    rule("div.plainlinks", OriginChrome),
    rule("span.cdx-text-input__icon", Presentational),
    rule("a.cdx-button", Presentational),
    rule("hr", Presentational),
    rule("div.mw-search-spinner", Presentational),
    rule("td > style", Presentational),
    rule("caption.infobox-title", Presentational),
];

/// Elements whose `srcset` is dropped.
pub const SRCSET_SELECTOR: &str = "img, source";

/// Apply the filter to `doc`. Running it twice removes nothing further.
pub fn filter_markup(doc: &Document, brand: &str) {
    for rule in REMOVAL_CATALOG {
        let matched = doc.select(rule.selector);
        if matched.exists() {
            tracing::trace!(
                selector = rule.selector,
                reason = ?rule.reason,
                count = matched.length(),
                "Removing elements"
            );
            matched.remove();
        }
    }

    doc.select(SRCSET_SELECTOR).remove_attr("srcset");

    for title in doc.select("title").nodes() {
        dom::replace_text(title, brand);
    }
}
