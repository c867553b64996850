//! # page-catalog
//!
//! A Rust library that turns rendered HTML into a catalog of element locators for
//! test-automation tools.
//!
//! ## Features
//!
//! - **Page Scanning**: Every element under `<body>`, in document order, one entry each
//! - **Locator Synthesis**: Unique index-qualified XPaths and class-based CSS selectors
//! - **Filtering**: Tag-based views that keep document order
//! - **XML Export**: Namespaced `pageObjects/pageObject` documents, written atomically
//!
//! ## Library Usage
//!
//! ### Scanning a Page
//!
//! ```rust
//! use page_catalog::scan_page;
//!
//! # fn main() -> page_catalog::Result<()> {
//! let html = r#"<html><body><div class="nav"><a class="brand" href="index.html">Home</a></div></body></html>"#;
//! let catalog = scan_page(html)?;
//!
//! assert_eq!(catalog.len(), 2);
//! let link = catalog.filter_by_tags(["a"]).first().cloned().unwrap();
//! assert_eq!(link.xpath(), "/html[1]/body[1]/div[1]/a[1]");
//! assert_eq!(link.css_selector(), ".brand");
//! assert_eq!(link.link(), "index.html");
//! # Ok(())
//! # }
//! ```
//!
//! ### Writing the Catalog
//!
//! ```rust,no_run
//! use page_catalog::{scan_page, CatalogWriter, WriterOptions};
//!
//! # fn main() -> page_catalog::Result<()> {
//! let catalog = scan_page("<html><body><p>Hi</p></body></html>")?;
//!
//! let mut writer = CatalogWriter::new(WriterOptions::default());
//! writer.create_document(&catalog, "http://example.org/pages", "home")?;
//! let path = writer.output_document("out", "home")?;
//! println!("Wrote {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Keeping the Parsed Page
//!
//! [`PageScanner::scan`] returns a [`PageScan`] that keeps the parsed document, so
//! raw nodes can be listed and XPaths resolved back to elements:
//!
//! ```rust
//! # use page_catalog::PageScanner;
//! # fn main() -> page_catalog::Result<()> {
//! let scan = PageScanner::default().scan("<body><ul><li>a</li><li>b</li></ul></body>")?;
//! let items = scan.list_nodes_by_tag("li")?;
//! assert_eq!(items.len(), 2);
//! assert!(scan.resolve("/html[1]/body[1]/ul[1]/li[2]").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: Tree access trait, HTML and snapshot adapters, XPath and selector synthesis
//! - [`catalog`]: Catalog entries and the ordered catalog
//! - [`scanner`]: Page scanning
//! - [`writer`]: XML projection and output
//! - [`config`]: Scan and writer options
//! - [`error`]: Error types and result aliases

pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod scanner;
pub mod writer;

pub use catalog::{Catalog, PageEntry};
pub use config::{CatalogConfig, ScanOptions, WriterOptions};
pub use dom::{DomNode, ElementCursor, ElementNode, HtmlNode, HtmlPage};
pub use error::{CatalogError, Result};
pub use scanner::{scan_page, PageScan, PageScanner};
pub use writer::{CatalogWriter, XmlDocument, XmlElement};
