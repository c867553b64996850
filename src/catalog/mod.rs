//! The ordered result of a page scan
//!
//! A [`Catalog`] holds one [`PageEntry`] per element, in document order, keyed by
//! XPath. Filtering produces a new catalog and never touches the original.

pub mod entry;

pub use entry::PageEntry;

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Entries of one scan, in pre-order document order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Map from XPath to entry; insertion order is document order
    entries: IndexMap<String, PageEntry>,
}

impl Catalog {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { entries: IndexMap::with_capacity(capacity) }
    }

    /// Append an entry. XPaths from one scan never collide.
    pub(crate) fn push(&mut self, entry: PageEntry) {
        let previous = self.entries.insert(entry.xpath().to_string(), entry);
        debug_assert!(previous.is_none(), "duplicate XPath in catalog");
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a position in document order
    pub fn get(&self, index: usize) -> Option<&PageEntry> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// First entry in document order
    pub fn first(&self) -> Option<&PageEntry> {
        self.get(0)
    }

    /// Iterate over entries in document order
    pub fn iter(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.values()
    }

    /// Only the entries whose tag is in `tags`, order preserved. Tags match
    /// case-insensitively; no matches gives an empty catalog.
    pub fn filter_by_tags<I, S>(&self, tags: I) -> Catalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = tags.into_iter().map(|t| t.as_ref().to_ascii_lowercase()).collect();

        let entries = self
            .entries
            .iter()
            .filter(|(_, entry)| wanted.contains(entry.tag_name()))
            .map(|(xpath, entry)| (xpath.clone(), entry.clone()))
            .collect();

        Catalog { entries }
    }

    /// Find entry by XPath
    pub fn find_by_xpath(&self, xpath: &str) -> Option<&PageEntry> {
        self.entries.get(xpath)
    }

    /// Find the first entry with the given element ID
    pub fn find_by_id(&self, id: &str) -> Option<&PageEntry> {
        self.iter().find(|entry| entry.id() == Some(id))
    }

    /// Find the first entry with the given class selector
    pub fn find_by_css_selector(&self, css_selector: &str) -> Option<&PageEntry> {
        self.iter().find(|entry| entry.css_selector() == css_selector)
    }

    /// Number of entries with the given tag
    pub fn count_by_tag(&self, tag: &str) -> usize {
        self.iter().filter(|entry| entry.is_tag(tag)).count()
    }

    /// Distinct tag names, in order of first appearance
    pub fn tag_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .map(PageEntry::tag_name)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Export to JSON as an array of entries
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// IndexMap equality ignores order; catalogs are only equal element-wise.
impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.entries.values().eq(other.entries.values())
    }
}

impl Eq for Catalog {}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl IntoIterator for Catalog {
    type Item = PageEntry;
    type IntoIter = indexmap::map::IntoValues<String, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PageEntry;
    type IntoIter = indexmap::map::Values<'a, String, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
