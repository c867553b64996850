//! Minimal XML tree for the output document

use indexmap::IndexMap;

/// An XML document with a single root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

/// XML element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    /// Default namespace declared on this element, if any
    namespace: Option<String>,
    attributes: IndexMap<String, String>,
    children: Vec<XmlContent>,
}

/// XML content node
#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    Element(XmlElement),
    Text(String),
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Serialize with an XML 1.0 / UTF-8 declaration
    pub fn to_xml_string(&self, indent: bool) -> String {
        let mut buf = String::with_capacity(4096);
        buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_element(&self.root, indent, &mut buf);
        if indent {
            buf.push('\n');
        }
        buf
    }
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: declare a default namespace on this element
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace = Some(uri.into());
        self
    }

    /// Builder method: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn push_element(&mut self, child: XmlElement) {
        self.children.push(XmlContent::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlContent::Text(text.into()));
    }

    /// Qualified name as written
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without any prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attributes in insertion order; namespace declarations are not included
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[XmlContent] {
        &self.children
    }

    /// Direct element children
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlContent::Element(e) => Some(e),
            XmlContent::Text(_) => None,
        })
    }

    /// Concatenated direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlContent::Text(t) => Some(t.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect()
    }

    /// Elements strictly below this one with the given local name, in document order
    pub fn descendants_named(&self, local_name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        let mut stack: Vec<&XmlElement> = self.child_elements().collect();
        stack.reverse();

        while let Some(element) = stack.pop() {
            if element.local_name() == local_name {
                found.push(element);
            }
            let mark = stack.len();
            stack.extend(element.child_elements());
            stack[mark..].reverse();
        }

        found
    }

    fn has_text(&self) -> bool {
        self.children.iter().any(|c| matches!(c, XmlContent::Text(_)))
    }
}

/// Iterative to cope with deep trees: each element pushes its closing step
/// before its children.
fn write_element(root: &XmlElement, indent: bool, buf: &mut String) {
    enum Step<'a> {
        Open { element: &'a XmlElement, depth: usize, pretty: bool },
        Close { element: &'a XmlElement, depth: usize, pretty: bool },
        Text(&'a str),
    }

    let mut stack = vec![Step::Open { element: root, depth: 0, pretty: indent }];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open { element, depth, pretty } => {
                if pretty && depth > 0 {
                    newline(buf, depth);
                }
                buf.push('<');
                buf.push_str(&element.name);

                if let Some(uri) = &element.namespace {
                    buf.push_str(" xmlns=\"");
                    escape_attribute_to_buf(uri, buf);
                    buf.push('"');
                }

                for (name, value) in &element.attributes {
                    buf.push(' ');
                    buf.push_str(name);
                    buf.push_str("=\"");
                    escape_attribute_to_buf(value, buf);
                    buf.push('"');
                }

                if element.children.is_empty() {
                    buf.push_str("/>");
                    continue;
                }
                buf.push('>');

                // Mixed content is written inline so no whitespace is added to the text.
                let child_pretty = pretty && !element.has_text();
                stack.push(Step::Close { element, depth, pretty: child_pretty });

                for child in element.children.iter().rev() {
                    match child {
                        XmlContent::Element(e) => stack.push(Step::Open {
                            element: e,
                            depth: depth + 1,
                            pretty: child_pretty,
                        }),
                        XmlContent::Text(t) => stack.push(Step::Text(t)),
                    }
                }
            }
            Step::Close { element, depth, pretty } => {
                if pretty {
                    newline(buf, depth);
                }
                buf.push_str("</");
                buf.push_str(&element.name);
                buf.push('>');
            }
            Step::Text(text) => escape_text_to_buf(text, buf),
        }
    }
}

fn newline(buf: &mut String, depth: usize) {
    buf.push('\n');
    for _ in 0..depth {
        buf.push_str("  ");
    }
}

// Characters XML 1.0 cannot carry at all are dropped.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text content
fn escape_text_to_buf(s: &str, buf: &mut String) {
    for c in s.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '\r' => buf.push_str("&#13;"),
            _ => buf.push(c),
        }
    }
}

/// Escape an attribute value, keeping whitespace characters that attribute
/// normalization would otherwise turn into spaces
fn escape_attribute_to_buf(s: &str, buf: &mut String) {
    for c in s.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\t' => buf.push_str("&#9;"),
            '\n' => buf.push_str("&#10;"),
            '\r' => buf.push_str("&#13;"),
            _ => buf.push(c),
        }
    }
}
