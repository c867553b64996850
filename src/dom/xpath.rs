//! Absolute, index-qualified XPaths such as `/html[1]/body[1]/div[2]/a[1]`.
//!
//! Each step is `tag[n]` where `n` counts only the siblings sharing that tag,
//! so a path names exactly one element of the tree it was built from.

use crate::dom::DomNode;
use std::collections::HashMap;
use std::fmt;

/// One `tag[position]` step of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathStep {
    pub tag: String,
    pub position: usize,
}

impl XPathStep {
    pub fn new(tag: impl Into<String>, position: usize) -> Self {
        Self { tag: tag.into(), position }
    }

    /// Parse `tag[n]`; `n` must be a positive integer
    pub fn parse(step: &str) -> Option<Self> {
        let (tag, rest) = step.split_once('[')?;
        let position: usize = rest.strip_suffix(']')?.parse().ok()?;
        if tag.is_empty() || position == 0 {
            return None;
        }
        Some(Self::new(tag.to_ascii_lowercase(), position))
    }
}

impl fmt::Display for XPathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tag, self.position)
    }
}

/// 1-based position of `node` among the children of its parent that share its tag.
/// The document root is always at position 1.
pub fn sibling_position<N: DomNode>(node: &N) -> usize {
    let Some(parent) = node.parent() else {
        return 1;
    };

    let mut position = 0;
    for sibling in parent.children() {
        if sibling.is_tag(node.tag_name()) {
            position += 1;
        }
        if sibling == *node {
            return position;
        }
    }

    // Only reachable with an adapter whose parent does not list the node.
    position.max(1)
}

/// Build the absolute path of `node` by walking up to the document root
pub fn xpath_of<N: DomNode>(node: &N) -> String {
    let mut steps = Vec::new();
    let mut current = Some(node.clone());

    while let Some(n) = current {
        steps.push(XPathStep::new(n.local_name(), sibling_position(&n)));
        current = n.parent();
    }

    steps.iter().rev().map(|s| format!("/{}", s)).collect()
}

/// The children of `parent` paired with the path step each one contributes.
///
/// Equivalent to calling [`sibling_position`] on every child, in a single pass.
pub fn indexed_children<N: DomNode>(parent: &N) -> Vec<(N, XPathStep)> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    parent
        .children()
        .into_iter()
        .map(|child| {
            let tag = child.local_name();
            let count = seen.entry(tag.clone()).or_insert(0);
            *count += 1;
            let step = XPathStep::new(tag, *count);
            (child, step)
        })
        .collect()
}

/// Split an absolute path into its steps. Returns `None` for anything that is
/// not a sequence of `/tag[n]` steps.
pub fn parse_xpath(xpath: &str) -> Option<Vec<XPathStep>> {
    let rest = xpath.strip_prefix('/')?;
    rest.split('/').map(XPathStep::parse).collect()
}

/// Find the element that `xpath` names, starting from the document root
pub fn resolve_xpath<N: DomNode>(root: &N, xpath: &str) -> Option<N> {
    let steps = parse_xpath(xpath)?;
    let (first, rest) = steps.split_first()?;

    if !root.is_tag(&first.tag) || first.position != 1 {
        return None;
    }

    let mut current = root.clone();
    for step in rest {
        current = current
            .children()
            .into_iter()
            .filter(|child| child.is_tag(&step.tag))
            .nth(step.position - 1)?;
    }

    Some(current)
}
