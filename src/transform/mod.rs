//! HTML transformation pipeline.
//!
//! # Data Flow
//! ```text
//! origin bytes + resolved URL
//!     → filter.rs (delete catalog, strip srcset, retitle)
//!     → collapsible.rs (mw-collapsible → <details>)
//!     → forms.rs + links.rs (route references through the proxy)
//!     → branding.rs (title block, source footer, stylesheet)
//!     → serialized HTML
//! ```
//!
//! # Design Decisions
//! - One owned `Document` per request; every step takes it by reference
//! - Steps run in a fixed order; branding last so its URLs stay literal
//! - Rule tables are static data, tested on their own

pub mod branding;
pub mod collapsible;
pub mod dom;
pub mod filter;
pub mod forms;
pub mod links;
pub mod resolver;

use dom_query::Document;

use crate::config::BrandingConfig;

pub use links::{Route, TARGET_PARAM};
pub use resolver::resolve;

/// Run the whole pipeline over one page.
///
/// `base_url` is the post-redirect URL the page was fetched from; every
/// relative reference is resolved against it and it is disclosed in the
/// source footer.
pub fn transform_page(html: &str, base_url: &str, branding: &BrandingConfig) -> String {
    let doc = Document::from(html);

    filter::filter_markup(&doc, &branding.title);
    collapsible::normalize_collapsibles(&doc);
    forms::rewrite_forms(&doc, base_url);
    links::rewrite_links(&doc, base_url);
    branding::inject_branding(&doc, base_url, branding);

    doc.html().to_string()
}
