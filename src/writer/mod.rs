//! Catalog export
//!
//! [`CatalogWriter`] projects a [`Catalog`] into a namespaced XML document and
//! persists it. The layout is:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <pageCatalog xmlns="http://example.org/ns" name="main">
//!   <pageObjects>
//!     <pageObject link="index.html" tagName="a" objectName="a_navbar_brand"
//!                 cssSelector=".navbar-brand" xPath="/html[1]/body[1]/a[1]">
//!       <className>navbar-brand</className>
//!     </pageObject>
//!   </pageObjects>
//! </pageCatalog>
//! ```
//!
//! `id` and `nameAttribute` are omitted when the element had no such attribute,
//! so an absent value is never confused with an empty one.

pub mod document;

pub use document::{XmlContent, XmlDocument, XmlElement};

use crate::catalog::{Catalog, PageEntry};
use crate::config::WriterOptions;
use crate::error::{CatalogError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Builds catalog documents and writes them to disk
#[derive(Debug, Clone, Default)]
pub struct CatalogWriter {
    options: WriterOptions,
    /// Most recently built document
    document: Option<XmlDocument>,
}

impl CatalogWriter {
    /// Create a writer with the given options
    pub fn new(options: WriterOptions) -> Self {
        Self { options, document: None }
    }

    /// The options this writer was built with
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// The most recently created document, if any
    pub fn document(&self) -> Option<&XmlDocument> {
        self.document.as_ref()
    }

    /// Project `catalog` into a document whose root is in `namespace_uri` and
    /// carries `root_label`. Replaces any previously created document.
    pub fn create_document(&mut self, catalog: &Catalog, namespace_uri: &str, root_label: &str) -> Result<&XmlDocument> {
        self.options.validate()?;
        if namespace_uri.trim().is_empty() {
            return Err(CatalogError::Config("namespace URI must not be empty".to_string()));
        }

        let mut objects = XmlElement::new("pageObjects");
        for entry in catalog {
            objects.push_element(page_object(entry));
        }

        let mut root = XmlElement::new(self.options.root_name.as_str())
            .with_namespace(namespace_uri)
            .with_attribute(self.options.label_attribute.as_str(), root_label);
        root.push_element(objects);

        log::debug!(
            "Created <{}> document with {} page objects in {}",
            self.options.root_name,
            catalog.len(),
            namespace_uri
        );

        Ok(&*self.document.insert(XmlDocument::new(root)))
    }

    /// Write the most recent document to `directory/filename`, forcing an `.xml`
    /// extension. The file appears complete or not at all: content goes to a
    /// temporary file in the same directory which is then renamed over the target.
    pub fn output_document(&self, directory: impl AsRef<Path>, filename: &str) -> Result<PathBuf> {
        let document = self.document.as_ref().ok_or(CatalogError::NoDocument)?;
        let directory = directory.as_ref();
        let path = directory.join(xml_file_name(filename)?);

        let xml = document.to_xml_string(self.options.indent);

        let mut temp = temp_file_for(&path, directory)?;
        temp.write_all(xml.as_bytes()).map_err(|e| CatalogError::io(temp.path(), e))?;
        temp.as_file().sync_all().map_err(|e| CatalogError::io(temp.path(), e))?;
        temp.persist(&path).map_err(|e| CatalogError::io(&path, e.error))?;

        log::debug!("Wrote {} bytes to {}", xml.len(), path.display());
        Ok(path)
    }
}

/// A temporary file next to `target` whose permissions match what a plain write
/// would give: the existing target's mode when overwriting, `0666` less the umask
/// otherwise.
fn temp_file_for(target: &Path, directory: &Path) -> Result<NamedTempFile> {
    let existing = std::fs::metadata(target).ok().filter(|m| m.is_file()).map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".page-catalog").suffix(".tmp");

    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        // applied at open(2), so the umask still takes effect
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let temp = builder.tempfile_in(directory).map_err(|e| CatalogError::io(directory, e))?;

    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| CatalogError::io(temp.path(), e))?;
    }

    Ok(temp)
}

/// One `pageObject` element per entry
fn page_object(entry: &PageEntry) -> XmlElement {
    let mut element = XmlElement::new("pageObject");

    if let Some(id) = entry.id() {
        element.set_attribute("id", id);
    }
    element.set_attribute("link", entry.link());
    element.set_attribute("tagName", entry.tag_name());
    if let Some(name) = entry.name_attribute() {
        element.set_attribute("nameAttribute", name);
    }
    element.set_attribute("objectName", entry.object_name());
    element.set_attribute("cssSelector", entry.css_selector());
    element.set_attribute("xPath", entry.xpath());

    for class_name in entry.class_names() {
        let mut class = XmlElement::new("className");
        class.push_text(class_name.as_str());
        element.push_element(class);
    }

    element
}

/// `name` with an `.xml` extension; a bare file name is required
fn xml_file_name(filename: &str) -> Result<String> {
    let trimmed = filename.trim();
    let is_bare = Path::new(trimmed).file_name().is_some_and(|f| f == trimmed);
    if trimmed.is_empty() || !is_bare {
        return Err(CatalogError::Config(format!("'{}' is not a plain file name", filename)));
    }

    let has_xml_extension = Path::new(trimmed)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));

    if has_xml_extension {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}.xml", trimmed))
    }
}
