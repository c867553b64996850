use crate::catalog::entry::EntryFields;
use crate::catalog::{Catalog, PageEntry};
use crate::config::ScanOptions;
use crate::dom::xpath::{indexed_children, xpath_of};
use crate::dom::{self, class_tokens, css_selector, link_of, object_name, DomNode, ElementCursor, ElementNode, HtmlNode, HtmlPage};
use crate::error::Result;
use std::collections::HashMap;

/// Turns page source into a [`Catalog`]
///
/// The scanner holds only its options; every scan builds its own working state, so
/// one scanner can serve many pages, from many threads.
#[derive(Debug, Clone, Default)]
pub struct PageScanner {
    options: ScanOptions,
}

impl PageScanner {
    /// Create a scanner with the given options
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// The options this scanner was built with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// The `<body>` element of a parsed page
    pub fn locate_body<'a>(&self, page: &'a HtmlPage) -> Result<HtmlNode<'a>> {
        page.body()
    }

    /// Parse `html` and catalogue every element under its body
    pub fn scan_page(&self, html: &str) -> Result<Catalog> {
        Ok(self.scan(html)?.into_catalog())
    }

    /// Like [`PageScanner::scan_page`], keeping the parsed page for follow-up queries
    pub fn scan(&self, html: &str) -> Result<PageScan> {
        let page = HtmlPage::parse(html)?;
        let body = self.locate_body(&page)?;
        let catalog = self.scan_node(&body);
        Ok(PageScan { page, catalog })
    }

    /// Catalogue an owned snapshot tree rooted at `<html>`
    pub fn scan_snapshot(&self, root: &ElementNode) -> Result<Catalog> {
        let body = dom::require_body(&ElementCursor::new(root))?;
        Ok(self.scan_node(&body))
    }

    /// Catalogue every element strictly below `root`, in pre-order.
    ///
    /// Paths are absolute: they start at the document root even when `root` is
    /// deeper in the tree.
    pub fn scan_node<N: DomNode>(&self, root: &N) -> Catalog {
        let root_xpath = xpath_of(root);
        let mut context = ScanContext::new(&self.options);

        let mut stack: Vec<(N, String)> = Vec::with_capacity(64);
        push_children(&mut stack, root, &root_xpath);

        while let Some((node, xpath)) = stack.pop() {
            let tag = node.local_name();
            if context.skips(&tag) {
                log::trace!("Skipping excluded <{}> at {}", tag, xpath);
                continue;
            }

            push_children(&mut stack, &node, &xpath);
            context.record(&node, tag, xpath);
        }

        log::debug!("Catalogued {} elements under {}", context.catalog.len(), root_xpath);
        context.catalog
    }
}

/// Push the children of `parent` so they pop off in document order
fn push_children<N: DomNode>(stack: &mut Vec<(N, String)>, parent: &N, parent_xpath: &str) {
    for (child, step) in indexed_children(parent).into_iter().rev() {
        stack.push((child, format!("{}/{}", parent_xpath, step)));
    }
}

/// Working state of a single scan
struct ScanContext<'o> {
    options: &'o ScanOptions,
    catalog: Catalog,
    /// Elements seen so far per tag, for fallback object names
    ordinals: HashMap<String, usize>,
}

impl<'o> ScanContext<'o> {
    fn new(options: &'o ScanOptions) -> Self {
        Self {
            options,
            catalog: Catalog::with_capacity(256),
            ordinals: HashMap::new(),
        }
    }

    fn skips(&self, tag: &str) -> bool {
        self.options.is_excluded(tag)
    }

    fn record<N: DomNode>(&mut self, node: &N, tag: String, xpath: String) {
        let ordinal = self.ordinals.entry(tag.clone()).or_insert(0);
        *ordinal += 1;

        let class_names = class_tokens(node);
        let entry = PageEntry::from_fields(EntryFields {
            id: node.attribute("id").map(str::to_string),
            link: link_of(node),
            name_attribute: node.attribute("name").map(str::to_string),
            object_name: object_name(node, *ordinal),
            css_selector: css_selector(&class_names),
            class_names,
            tag_name: tag,
            xpath,
        });

        log::trace!("Catalogued {}", entry.to_simple_string());
        self.catalog.push(entry);
    }
}

/// A parsed page together with the catalog scanned from it
pub struct PageScan {
    page: HtmlPage,
    catalog: Catalog,
}

impl PageScan {
    /// The catalog produced by the scan
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Give up the parsed page and keep the catalog
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// The parsed page
    pub fn page(&self) -> &HtmlPage {
        &self.page
    }

    /// The page's `<body>` element
    pub fn body(&self) -> Result<HtmlNode<'_>> {
        self.page.body()
    }

    /// Entries of this scan whose tag is in `tags`, in document order
    pub fn filter_by_tags<I, S>(&self, tags: I) -> Catalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.catalog.filter_by_tags(tags)
    }

    /// Raw elements under the body with the given tag, in document order
    pub fn list_nodes_by_tag(&self, tag: &str) -> Result<Vec<HtmlNode<'_>>> {
        Ok(dom::list_nodes_by_tag(&self.body()?, tag))
    }

    /// The element an entry's XPath points at
    pub fn resolve(&self, xpath: &str) -> Option<HtmlNode<'_>> {
        dom::resolve_xpath(&self.page.root(), xpath)
    }
}

impl std::fmt::Debug for PageScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageScan").field("entries", &self.catalog.len()).finish()
    }
}

/// Scan `html` with default options
pub fn scan_page(html: &str) -> Result<Catalog> {
    PageScanner::default().scan_page(html)
}
