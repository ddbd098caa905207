//! Collapsible widget normalization.
//!
//! MediaWiki `.mw-collapsible` containers depend on origin scripts to fold.
//! Each one that has a `.mw-collapsible-content` region becomes a native
//! `<details>` whose `<summary>` is picked by [`CAPTION_SOURCES`].

use std::sync::LazyLock;

use dom_query::{Document, NodeRef, Selection};
use regex::Regex;

use crate::transform::dom;

pub const CONTAINER_SELECTOR: &str = ".mw-collapsible";
pub const CONTENT_SELECTOR: &str = ".mw-collapsible-content";
pub const TOGGLE_SELECTOR: &str = ".mw-collapsible-toggle";
pub const COLLAPSED_CLASS: &str = "mw-collapsed";
pub const FALLBACK_CAPTION: &str = "Show/Hide";

/// Trailing view/talk/edit navbar letters, optionally separated by dots.
static NAVBAR_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s*[·•]?\s*\b[vte]\b)+\s*[·•]?\s*$").expect("NAVBAR_MARKERS regex")
});

/// A caption lookup. Returns `None` when it has nothing non-empty.
pub type CaptionSource = fn(&Selection) -> Option<String>;

/// Caption lookups in priority order; the first non-empty result wins.
pub static CAPTION_SOURCES: &[(&str, CaptionSource)] = &[
    ("navbox-title", navbox_title),
    ("sidebar-title", sidebar_title),
    ("heading", first_heading),
    ("table-header", first_table_header),
    ("toggle", toggle_text),
    ("expand-attr", expand_text_attr),
];

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn first_text(container: &Selection, selector: &str) -> Option<String> {
    let found = container.select(selector);
    let first = found.first();
    first.exists().then(|| first.text().to_string())
}

/// Strip trailing `v t e` navbar markers from a navbox title.
pub fn strip_navbar_markers(text: &str) -> String {
    NAVBAR_MARKERS.replace(text.trim(), "").trim().to_string()
}

pub fn navbox_title(container: &Selection) -> Option<String> {
    first_text(container, ".navbox-title").and_then(|t| non_empty(&strip_navbar_markers(&t)))
}

pub fn sidebar_title(container: &Selection) -> Option<String> {
    first_text(container, ".sidebar-list-title").and_then(|t| non_empty(&t))
}

pub fn first_heading(container: &Selection) -> Option<String> {
    first_text(container, "h1, h2, h3, h4, h5, h6").and_then(|t| non_empty(&t))
}

pub fn first_table_header(container: &Selection) -> Option<String> {
    first_text(container, "th").and_then(|t| non_empty(&t))
}

pub fn toggle_text(container: &Selection) -> Option<String> {
    first_text(container, TOGGLE_SELECTOR).and_then(|t| non_empty(&t.replace(['[', ']'], "")))
}

pub fn expand_text_attr(container: &Selection) -> Option<String> {
    ["data-expandtext", "data-collapsetext"]
        .iter()
        .find_map(|name| container.attr(name).and_then(|v| non_empty(&v)))
}

/// Run the caption chain over a container.
pub fn caption_for(container: &Selection) -> String {
    CAPTION_SOURCES
        .iter()
        .find_map(|(_, lookup)| lookup(container))
        .unwrap_or_else(|| FALLBACK_CAPTION.to_string())
}

/// Convert every eligible collapsible in `doc`. Returns how many were replaced.
pub fn normalize_collapsibles(doc: &Document) -> usize {
    let containers: Vec<NodeRef> = doc.select(CONTAINER_SELECTOR).nodes().to_vec();
    let mut replaced = 0;

    for container in &containers {
        if !dom::is_attached(doc, container) {
            // Went away with an enclosing widget's toggle.
            continue;
        }
        if convert(doc, container) {
            replaced += 1;
        }
    }

    if replaced > 0 {
        tracing::debug!(replaced, "Normalized collapsible widgets");
    }
    replaced
}

fn convert(doc: &Document, container: &NodeRef) -> bool {
    let selection = Selection::from(*container);
    let content = selection.select(CONTENT_SELECTOR).first();
    let Some(content) = content.nodes().first().copied() else {
        return false;
    };

    let caption = caption_for(&selection);
    let open = !container.has_class(COLLAPSED_CLASS);

    selection.select(TOGGLE_SELECTOR).remove();

    let details = doc.tree.new_element("details");
    if open {
        details.set_attr("open", "");
    }
    let summary = dom::element_with_text(&doc.tree, "summary", &caption);
    details.append_child(&summary);
    for child in content.children() {
        details.append_child(&child);
    }

    dom::replace_node(container, &details);
    true
}
