//! Locator hints derived from an element's own attributes

use crate::dom::DomNode;

/// Class tokens in source order, duplicates kept
pub fn class_tokens<N: DomNode>(node: &N) -> Vec<String> {
    node.attribute("class")
        .map(|classes| classes.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// `.a.b.c` for classes `a b c`; empty when the element has no classes.
///
/// Ids are not consulted.
pub fn css_selector(class_names: &[String]) -> String {
    class_names.iter().map(|c| format!(".{}", c)).collect()
}

/// The element's `href`, or an empty string when it has none
pub fn link_of<N: DomNode>(node: &N) -> String {
    match node.required_attribute("href") {
        Ok(href) => href.to_string(),
        Err(err) => {
            log::trace!("{}; link left empty", err);
            String::new()
        }
    }
}

/// A readable label such as `a_navbar_brand` or `li_3`.
///
/// Built from the first non-empty of id, name and first class; otherwise from
/// `ordinal`, the element's 1-based count among same-tag elements in the scan.
/// Labels are not unique.
pub fn object_name<N: DomNode>(node: &N, ordinal: usize) -> String {
    let tag = node.local_name();
    let key = ["id", "name"]
        .iter()
        .filter_map(|attr| node.attribute(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| class_tokens(node).into_iter().next());

    match key {
        Some(key) => format!("{}_{}", tag, to_identifier(&key)),
        None => format!("{}_{}", tag, ordinal),
    }
}

fn to_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
