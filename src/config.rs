use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling a page scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanOptions {
    /// Tags whose elements (and their subtrees) are left out of the catalog.
    ///
    /// Empty by default, so every element under `<body>` is catalogued.
    pub exclude_tags: Vec<String>,
}

impl ScanOptions {
    /// Create options that catalogue every element
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: skip elements with the given tag
    pub fn exclude_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclude_tags.push(tag.into().to_ascii_lowercase());
        self
    }

    /// Builder method: skip `script`, `style` and `noscript` elements
    pub fn without_scripts(self) -> Self {
        self.exclude_tag("script").exclude_tag("style").exclude_tag("noscript")
    }

    /// Check whether elements with this tag are skipped
    pub fn is_excluded(&self, tag: &str) -> bool {
        self.exclude_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Options controlling the shape of the output document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WriterOptions {
    /// Local name of the root element; consumers look for `page` in it
    pub root_name: String,

    /// Name of the single root attribute that carries the label
    pub label_attribute: String,

    /// Pretty-print with two-space indentation
    pub indent: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            root_name: "pageCatalog".to_string(),
            label_attribute: "name".to_string(),
            indent: true,
        }
    }
}

impl WriterOptions {
    /// Create default writer options
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the root element name
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Builder method: set the label attribute name
    pub fn label_attribute(mut self, name: impl Into<String>) -> Self {
        self.label_attribute = name.into();
        self
    }

    /// Builder method: toggle indentation
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Reject options that would produce a document downstream tools cannot read
    pub fn validate(&self) -> Result<()> {
        if !self.root_name.contains("page") {
            return Err(CatalogError::Config(format!(
                "root element name '{}' must contain 'page'",
                self.root_name
            )));
        }
        if !is_xml_name(&self.root_name) {
            return Err(CatalogError::Config(format!("'{}' is not a valid element name", self.root_name)));
        }
        if !is_xml_name(&self.label_attribute) || self.label_attribute.starts_with("xmlns") {
            return Err(CatalogError::Config(format!(
                "'{}' is not a valid label attribute name",
                self.label_attribute
            )));
        }
        Ok(())
    }
}

/// Combined options, as read from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub scan: ScanOptions,
    pub writer: WriterOptions,
}

impl CatalogConfig {
    /// Load options from a JSON file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let config: CatalogConfig = serde_json::from_str(&text)?;
        config.writer.validate()?;
        Ok(config)
    }
}

// Unprefixed XML names only; the document declares a default namespace.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
