//! Branding injection.
//!
//! Runs after link rewriting so the elements added here (stylesheet, source
//! footer) keep their literal URLs. All text goes in as text nodes.

use dom_query::Document;

use crate::config::BrandingConfig;
use crate::transform::dom;

const ORIGIN_LOGO: &str = "h1.central-textlogo-wrapper";
const HIDDEN_REGIONS: &str = "nav, div#p-lang-btn";
const SEARCH_INPUT: &str = "input#searchInput";
const SEARCH_BUTTON: &str = "button.pure-button";

pub fn inject_branding(doc: &Document, source_url: &str, branding: &BrandingConfig) {
    replace_logo(doc, branding);
    hide_regions(doc);
    relabel_search(doc, branding);
    tidy_search_chrome(doc);
    append_source_footer(doc, source_url);
    if branding.mobile_notice {
        prepend_mobile_notice(doc);
    }
    link_stylesheet(doc, &branding.stylesheet_href);
}

fn replace_logo(doc: &Document, branding: &BrandingConfig) {
    for logo in doc.select(ORIGIN_LOGO).nodes() {
        let block = doc.tree.new_element("div");
        block.set_attr("id", "pageTitle");

        let heading = dom::element_with_text(&doc.tree, "h1", &branding.title);
        heading.set_attr("id", "main-title-wikispace");
        block.append_child(&heading);

        let tagline = dom::element_with_text(&doc.tree, "p", &branding.tagline);
        tagline.set_attr("style", "font-size: 2rem; letter-spacing: 1px;");
        block.append_child(&tagline);

        dom::replace_node(logo, &block);
    }
}

fn hide_regions(doc: &Document) {
    for node in doc.select(HIDDEN_REGIONS).nodes() {
        dom::merge_style(node, "visibility", "hidden");
    }
}

fn relabel_search(doc: &Document, branding: &BrandingConfig) {
    doc.select(SEARCH_INPUT)
        .set_attr("placeholder", &format!("Search {}", branding.title));
    for button in doc.select(SEARCH_BUTTON).nodes() {
        dom::replace_text(button, "Search");
    }
}

/// Drop origin classes that only make sense with the origin's scripts.
fn tidy_search_chrome(doc: &Document) {
    doc.select("button.cdx-search-input__end-button.cdx-button")
        .set_attr("class", "button-bug");
    doc.select("header.vector-header").remove_class("mw-header");
    doc.select("form").remove_class("cdx-search-input--has-end-button");
    doc.select("div.mw-search-form-wrapper").remove_attr("class");
}

fn append_source_footer(doc: &Document, source_url: &str) {
    let Some(body) = doc.select("body").nodes().first().copied() else {
        return;
    };

    let footer = doc.tree.new_element("footer");
    footer.set_attr("id", "source-footer");
    let paragraph = doc.tree.new_element("p");
    let label = dom::element_with_text(&doc.tree, "strong", "Live Source:\u{a0}");
    let link = dom::element_with_text(&doc.tree, "a", source_url);
    link.set_attr("href", source_url);
    link.set_attr("target", "_blank");
    link.set_attr("rel", "noopener noreferrer");

    paragraph.append_child(&label);
    paragraph.append_child(&link);
    footer.append_child(&paragraph);
    body.append_child(&footer);
}

fn prepend_mobile_notice(doc: &Document) {
    let Some(body) = doc.select("body").nodes().first().copied() else {
        return;
    };

    let overlay = doc.tree.new_element("div");
    overlay.set_attr("id", "mobile-warning-overlay");
    let content = doc.tree.new_element("div");
    content.set_attr("class", "overlay-content");
    content.append_child(&dom::element_with_text(&doc.tree, "h2", "Developer Notice:"));
    content.append_child(&dom::element_with_text(
        &doc.tree,
        "p",
        "This project is not currently optimized for mobile devices, please view from a desktop browser.",
    ));
    overlay.append_child(&content);
    body.prepend_child(&overlay);
}

fn link_stylesheet(doc: &Document, href: &str) {
    let Some(head) = doc.select("head").nodes().first().copied() else {
        return;
    };
    let link = doc.tree.new_element("link");
    link.set_attr("rel", "stylesheet");
    link.set_attr("href", href);
    head.prepend_child(&link);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://en.wikipedia.org/wiki/Rust";

    fn branded(html: &str) -> Document {
        let doc = Document::from(html);
        inject_branding(&doc, SOURCE, &BrandingConfig::default());
        doc
    }

    #[test]
    fn test_logo_replaced_with_title_block() {
        let doc = branded(
            r#"<body><h1 class="central-textlogo-wrapper"><span>Wikipedia</span></h1></body>"#,
        );
        assert!(!doc.select(ORIGIN_LOGO).exists());
        assert_eq!(doc.select("#pageTitle > h1#main-title-wikispace").text().to_string(), "WikiSpace");
        assert_eq!(doc.select("#pageTitle > p").text().to_string(), "A clutter free Wikipedia");
    }

    #[test]
    fn test_regions_hidden_not_removed() {
        let doc = branded(r#"<body><nav id="n" style="color: red">x</nav><div id="p-lang-btn">y</div></body>"#);
        assert_eq!(
            doc.select("#n").attr("style").unwrap().to_string(),
            "color: red; visibility: hidden;"
        );
        assert_eq!(
            doc.select("#p-lang-btn").attr("style").unwrap().to_string(),
            "visibility: hidden;"
        );
    }

    #[test]
    fn test_search_relabelled() {
        let doc = branded(
            r#"<body><form class="cdx-search-input--has-end-button keep"><input id="searchInput" placeholder="Search Wikipedia">
               <button class="pure-button"><i>icon</i>Go</button></form>
               <header class="vector-header mw-header"></header>
               <div class="mw-search-form-wrapper x"></div></body>"#,
        );
        assert_eq!(
            doc.select("#searchInput").attr("placeholder").unwrap().to_string(),
            "Search WikiSpace"
        );
        assert_eq!(doc.select("button.pure-button").text().to_string(), "Search");
        assert!(!doc.select("button i").exists());
        assert!(doc.select("form.keep").exists());
        assert!(!doc.select("form.cdx-search-input--has-end-button").exists());
        assert!(doc.select("header.vector-header").exists());
        assert!(!doc.select("header.mw-header").exists());
        assert!(!doc.select("div.mw-search-form-wrapper, div.x").exists());
    }

    #[test]
    fn test_source_footer_and_stylesheet() {
        let doc = branded("<html><head><title>t</title></head><body><p>x</p></body></html>");

        let link = doc.select("#source-footer a");
        assert_eq!(link.attr("href").unwrap().to_string(), SOURCE);
        assert_eq!(link.attr("target").unwrap().to_string(), "_blank");
        assert_eq!(link.text().to_string(), SOURCE);
        assert!(doc.select("body > footer#source-footer:last-child").exists());

        let first = doc.select("head > :first-child");
        assert_eq!(first.attr("rel").unwrap().to_string(), "stylesheet");
        assert_eq!(first.attr("href").unwrap().to_string(), "/wikispace.css");

        assert!(doc.select("body > #mobile-warning-overlay:first-child").exists());
    }

    #[test]
    fn test_mobile_notice_optional() {
        let doc = Document::from("<body><p>x</p></body>");
        let branding = BrandingConfig {
            mobile_notice: false,
            ..BrandingConfig::default()
        };
        inject_branding(&doc, SOURCE, &branding);
        assert!(!doc.select("#mobile-warning-overlay").exists());
    }

    #[test]
    fn test_hostile_source_url_stays_text() {
        let hostile = r#"https://en.wikipedia.org/wiki/"><script>alert(1)</script>"#;
        let doc = Document::from("<body></body>");
        inject_branding(&doc, hostile, &BrandingConfig::default());

        assert!(!doc.select("script").exists());
        assert_eq!(doc.select("#source-footer a").text().to_string(), hostile);
        assert_eq!(doc.select("#source-footer a").attr("href").unwrap().to_string(), hostile);
    }
}
