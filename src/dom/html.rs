use crate::dom::{self, DomNode};
use crate::error::{CatalogError, Result};
use scraper::{ElementRef, Html};
use std::ops::Deref;

/// A parsed HTML document
///
/// Owns the tree produced by the HTML5 parser; [`HtmlNode`] handles borrow from it.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// Parse page source. Malformed markup is repaired the way browsers do;
    /// only empty input is rejected here.
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(CatalogError::Parse("document is empty".to_string()));
        }

        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            log::debug!("HTML parser recovered from {} errors", document.errors.len());
        }

        Ok(Self { document })
    }

    /// The `<html>` element
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.document.root_element())
    }

    /// The `<body>` element, or a parse error when the document has none
    /// (e.g. a frameset document)
    pub fn body(&self) -> Result<HtmlNode<'_>> {
        dom::require_body(&self.root())
    }
}

impl std::fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlPage").field("root", &self.root().tag_name()).finish()
    }
}

/// An element of an [`HtmlPage`]
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    /// The wrapped `scraper` element
    pub fn element(&self) -> ElementRef<'a> {
        self.0
    }

    /// Concatenated text of this element and its descendants
    pub fn text(&self) -> String {
        self.0.text().collect()
    }
}

impl<'a> From<ElementRef<'a>> for HtmlNode<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        HtmlNode(element)
    }
}

impl PartialEq for HtmlNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        // Tree node ids, not the `id` attribute.
        Deref::deref(&self.0).id() == Deref::deref(&other.0).id()
    }
}

impl DomNode for HtmlNode<'_> {
    fn tag_name(&self) -> &str {
        self.0.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn attributes(&self) -> Vec<(&str, &str)> {
        self.0.value().attrs().collect()
    }

    fn children(&self) -> Vec<Self> {
        self.0.children().filter_map(ElementRef::wrap).map(HtmlNode).collect()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(HtmlNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(HtmlPage::parse(""), Err(CatalogError::Parse(_))));
        assert!(matches!(HtmlPage::parse("  \n\t "), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_body_is_located() {
        let page = HtmlPage::parse("<html><head><title>t</title></head><body><p>Hi</p></body></html>").unwrap();
        let body = page.body().unwrap();

        assert_eq!(body.tag_name(), "body");
        assert_eq!(body.parent().unwrap(), page.root());
        assert!(page.root().parent().is_none());
    }

    #[test]
    fn test_fragment_gets_implied_body() {
        let page = HtmlPage::parse("<div>loose</div>").unwrap();
        let body = page.body().unwrap();
        let children = body.children();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag_name(), "div");
        assert_eq!(children[0].text(), "loose");
    }

    #[test]
    fn test_frameset_has_no_body() {
        let page = HtmlPage::parse("<html><frameset><frame src=\"a.html\"></frameset></html>").unwrap();
        assert!(matches!(page.body(), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_children_skip_text_and_comments() {
        let page = HtmlPage::parse("<body>text<!-- note --><span>a</span> more <b>b</b></body>").unwrap();
        let tags: Vec<_> = page.body().unwrap().children().iter().map(|c| c.local_name()).collect();
        assert_eq!(tags, vec!["span", "b"]);
    }

    #[test]
    fn test_attributes_and_case() {
        let page = HtmlPage::parse("<BODY><A HREF=\"x.html\" Class=\"one two\">x</A></BODY>").unwrap();
        let anchor = page.body().unwrap().children().remove(0);

        assert_eq!(anchor.tag_name(), "a");
        assert_eq!(anchor.attribute("href"), Some("x.html"));
        assert_eq!(anchor.attribute("class"), Some("one two"));
        assert_eq!(anchor.attributes().len(), 2);
        assert!(anchor.attribute("id").is_none());
    }
}
