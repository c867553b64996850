use crate::dom::DomNode;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// One element of a page snapshot: an owned tree that can be stored as JSON and
/// scanned without re-parsing HTML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Lower-case tag name as the scanner will report it
    pub tag_name: String,

    /// Attributes in document order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// A leaf element with no attributes
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Load a snapshot written by [`ElementNode::to_json`] or by an external capture tool
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Set an attribute; a repeated key keeps its first position
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }
}

/// A position inside an [`ElementNode`] tree that remembers how it got there,
/// so the owned tree can answer `parent()` without back-pointers
#[derive(Debug, Clone)]
pub struct ElementCursor<'a> {
    node: &'a ElementNode,
    parent: Option<Rc<ElementCursor<'a>>>,
}

impl<'a> ElementCursor<'a> {
    /// Start at the root of a tree
    pub fn new(root: &'a ElementNode) -> Self {
        Self { node: root, parent: None }
    }

    /// The element this cursor points at
    pub fn node(&self) -> &'a ElementNode {
        self.node
    }
}

impl PartialEq for ElementCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
    }
}

impl DomNode for ElementCursor<'_> {
    fn tag_name(&self) -> &str {
        &self.node.tag_name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.node.attributes.get(name).map(String::as_str)
    }

    fn attributes(&self) -> Vec<(&str, &str)> {
        self.node.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    fn children(&self) -> Vec<Self> {
        let parent = Rc::new(self.clone());
        self.node
            .children
            .iter()
            .map(|child| ElementCursor { node: child, parent: Some(Rc::clone(&parent)) })
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_keep_attribute_order() {
        let mut element = ElementNode::new("button").with_attribute("id", "send").with_attribute("class", "btn");
        element.add_attribute("id", "submit");

        let keys: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "class"]);
        assert_eq!(element.attributes["id"], "submit");
        assert!(element.children.is_empty());
    }

    #[test]
    fn test_json_snapshot() {
        let json = r#"{
            "tag_name": "html",
            "children": [
                {"tag_name": "body", "children": [
                    {"tag_name": "a", "attributes": {"href": "/home", "class": "nav"}}
                ]}
            ]
        }"#;

        let tree = ElementNode::from_json(json).unwrap();
        let anchor = &tree.children[0].children[0];
        assert_eq!(anchor.tag_name, "a");
        assert_eq!(anchor.attributes.get("class").map(String::as_str), Some("nav"));
        assert!(tree.attributes.is_empty());

        let again = ElementNode::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(tree, again);

        assert!(ElementNode::from_json("{not json").is_err());
    }

    #[test]
    fn test_cursor_navigation() {
        let tree = ElementNode::new("html").with_children(vec![
            ElementNode::new("head"),
            ElementNode::new("body").with_children(vec![ElementNode::new("p").with_attribute("id", "intro")]),
        ]);

        let root = ElementCursor::new(&tree);
        assert!(root.parent().is_none());

        let children = root.children();
        assert_eq!(children.len(), 2);
        let body = children[1].clone();
        assert!(body.is_tag("body"));
        assert_eq!(body.parent().unwrap(), root);

        let p = body.children().remove(0);
        assert_eq!(p.attribute("id"), Some("intro"));
        assert_eq!(p.attributes(), vec![("id", "intro")]);
        assert_eq!(p.parent().unwrap().parent().unwrap(), root);
    }

    #[test]
    fn test_cursor_equality_is_identity() {
        let tree = ElementNode::new("ul").with_children(vec![ElementNode::new("li"), ElementNode::new("li")]);
        let root = ElementCursor::new(&tree);
        let items = root.children();

        assert_ne!(items[0], items[1]);
        assert_eq!(items[0], root.children()[0]);
    }
}
