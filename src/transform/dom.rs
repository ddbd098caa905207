//! Small tree-building helpers over `dom_query`.
//!
//! Everything here creates nodes structurally; text is always a text node
//! and attribute values are set as data, never parsed as markup.

use dom_query::{Document, NodeRef, Tree};

/// Replace all children of `node` with a single text node.
pub fn replace_text(node: &NodeRef, text: &str) {
    for child in node.children() {
        child.remove_from_parent();
    }
    let text_node = node.tree.new_text(text);
    node.append_child(&text_node);
}

/// Create a detached element holding `text`.
pub fn element_with_text<'a>(tree: &'a Tree, name: &str, text: &str) -> NodeRef<'a> {
    let element = tree.new_element(name);
    let text_node = tree.new_text(text);
    element.append_child(&text_node);
    element
}

/// Put `replacement` where `node` is and detach `node`.
pub fn replace_node(node: &NodeRef, replacement: &NodeRef) {
    node.insert_before(replacement);
    node.remove_from_parent();
}

/// Add one declaration to the `style` attribute, keeping what is there.
pub fn merge_style(node: &NodeRef, property: &str, value: &str) {
    let declaration = format!("{property}: {value};");
    let style = match node.attr("style") {
        Some(existing) if !existing.trim().is_empty() => {
            let existing = existing.trim().trim_end_matches(';');
            format!("{existing}; {declaration}")
        }
        _ => declaration,
    };
    node.set_attr("style", &style);
}

/// True while `node` is still reachable from the document root.
pub fn is_attached(doc: &Document, node: &NodeRef) -> bool {
    let mut top = *node;
    while let Some(parent) = top.parent() {
        top = parent;
    }
    top.id == doc.root().id
}

/// Lower-case tag name of an element node.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|name| name.to_ascii_lowercase())
}
