//! Document tree access
//!
//! The scanner never touches a parser directly. It walks any tree that implements
//! [`DomNode`], which exposes just the tag name, attributes, element children and
//! parent of a node. Two adapters are provided:
//! - [`HtmlPage`] / [`HtmlNode`]: HTML text parsed with `scraper`
//! - [`ElementNode`] / [`ElementCursor`]: an owned element tree, e.g. a JSON snapshot
//!
//! The remaining submodules hold the locator synthesis that runs over those trees.

pub mod element;
pub mod html;
pub mod selector;
pub mod xpath;

pub use element::{ElementCursor, ElementNode};
pub use html::{HtmlNode, HtmlPage};
pub use selector::{class_tokens, css_selector, link_of, object_name};
pub use xpath::{resolve_xpath, sibling_position, xpath_of};

use crate::error::{CatalogError, Result};

/// Read-only view of one element in a document tree
///
/// Nodes are cheap handles: cloning one never copies the subtree, and equality means
/// "same node in the same tree", not structural equality.
pub trait DomNode: Clone + PartialEq {
    /// Tag name as stored by the tree
    fn tag_name(&self) -> &str;

    /// Value of the attribute `name`, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// All attributes as (name, value) pairs
    fn attributes(&self) -> Vec<(&str, &str)>;

    /// Element children in document order
    fn children(&self) -> Vec<Self>;

    /// Parent element, `None` for the document root
    fn parent(&self) -> Option<Self>;

    /// Lower-cased tag name
    fn local_name(&self) -> String {
        self.tag_name().to_ascii_lowercase()
    }

    /// Check if element is a specific tag
    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// Like [`DomNode::attribute`] but reports a gap as [`CatalogError::AttributeMissing`]
    fn required_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name).ok_or_else(|| CatalogError::AttributeMissing {
            tag: self.local_name(),
            attribute: name.to_string(),
        })
    }
}

/// Pre-order iterator over `root` and all of its descendant elements
pub struct Descendants<N: DomNode> {
    stack: Vec<N>,
}

impl<N: DomNode> Iterator for Descendants<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

/// Walk `root` and its descendants in pre-order
pub fn descendants<N: DomNode>(root: &N) -> Descendants<N> {
    Descendants { stack: vec![root.clone()] }
}

/// Find the first `<body>` element at or below `root`
pub fn find_body<N: DomNode>(root: &N) -> Option<N> {
    descendants(root).find(|node| node.is_tag("body"))
}

/// Like [`find_body`], failing with a parse error when the tree has no body
pub fn require_body<N: DomNode>(root: &N) -> Result<N> {
    find_body(root).ok_or_else(|| CatalogError::Parse("document has no <body> element".to_string()))
}

/// Every element strictly below `root` with the given tag, in document order
pub fn list_nodes_by_tag<N: DomNode>(root: &N, tag: &str) -> Vec<N> {
    descendants(root).skip(1).filter(|node| node.is_tag(tag)).collect()
}

/// Count the elements strictly below `root`
pub fn count_descendants<N: DomNode>(root: &N) -> usize {
    descendants(root).count() - 1
}
