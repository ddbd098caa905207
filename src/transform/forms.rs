//! Form submission rewriting.
//!
//! Forms post to the proxy root; the real action travels in a hidden
//! `targetUrl` field and the page route appends the other fields as query
//! parameters.

use dom_query::Document;

use crate::transform::links::{Route, TARGET_PARAM};
use crate::transform::resolver;

pub fn rewrite_forms(doc: &Document, base: &str) {
    for form in doc.select("form").nodes() {
        let Some(action) = form.attr("action").filter(|a| !a.is_empty()) else {
            continue;
        };
        let absolute = resolver::resolve(base, &action);

        form.set_attr("action", Route::Page.path());

        let hidden = doc.tree.new_element("input");
        hidden.set_attr("type", "hidden");
        hidden.set_attr("name", TARGET_PARAM);
        hidden.set_attr("value", &absolute);
        form.prepend_child(&hidden);
    }
}
