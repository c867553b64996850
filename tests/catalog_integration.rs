use page_catalog::dom::{self, xpath_of};
use page_catalog::{scan_page, CatalogError, DomNode, ElementNode, HtmlNode, PageScanner, ScanOptions};
use std::collections::HashSet;

const TRADEWINDS: &str = include_str!("fixtures/tradewinds.html");

/// Copy a parsed subtree into an owned snapshot
fn to_snapshot(node: &HtmlNode) -> ElementNode {
    let mut element = ElementNode::new(node.tag_name());
    for (name, value) in node.attributes() {
        element.add_attribute(name, value);
    }
    for child in node.children() {
        element.add_child(to_snapshot(&child));
    }
    element
}

#[test]
fn test_fixture_counts() {
    let catalog = scan_page(TRADEWINDS).expect("Failed to scan fixture");

    assert_eq!(catalog.len(), 78);
    assert_eq!(catalog.filter_by_tags(["a"]).len(), 16);
    assert_eq!(catalog.count_by_tag("script"), 3);
    assert_eq!(catalog.count_by_tag("li"), 7);
}

#[test]
fn test_first_anchor() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let anchors = scan.filter_by_tags(["a"]);
    let first = anchors.first().expect("No anchors found");

    assert_eq!(first.link(), "index.html");
    assert_eq!(first.css_selector(), ".navbar-brand.tradewinds");
    assert_eq!(first.xpath(), "/html[1]/body[1]/div[1]/div[1]/div[1]/a[1]");
    assert_eq!(first.class_names(), ["navbar-brand", "tradewinds"]);
    assert_eq!(first.id(), None);
    assert_eq!(first.name_attribute(), None);
}

#[test]
fn test_first_div_selector() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let divs = scan.filter_by_tags(["div"]);
    let navbar = divs.first().unwrap();

    assert_eq!(navbar.css_selector(), ".navbar.navbar-inverse.navbar-fixed-top");
    assert_eq!(navbar.xpath(), "/html[1]/body[1]/div[1]");
    assert_eq!(navbar.link(), "");
}

#[test]
fn test_selected_paths() {
    let catalog = scan_page(TRADEWINDS).unwrap();

    let about = catalog.find_by_xpath("/html[1]/body[1]/div[1]/div[1]/div[2]/ul[1]/li[2]/a[1]").unwrap();
    assert_eq!(about.link(), "about.html");

    let terms = catalog.find_by_xpath("/html[1]/body[1]/div[3]/footer[1]/p[1]/a[2]").unwrap();
    assert_eq!(terms.link(), "terms.html");

    let hr = catalog.find_by_xpath("/html[1]/body[1]/div[3]/hr[1]").unwrap();
    assert_eq!(hr.tag_name(), "hr");

    let booking = catalog.find_by_id("booking").unwrap();
    assert_eq!(booking.xpath(), "/html[1]/body[1]/div[4]");
    assert_eq!(booking.css_selector(), ".modal.fade");

    let last = catalog.get(catalog.len() - 1).unwrap();
    assert_eq!(last.xpath(), "/html[1]/body[1]/script[3]");
}

#[test]
fn test_optional_attributes() {
    let catalog = scan_page(TRADEWINDS).unwrap();

    let cta = catalog.iter().find(|e| e.name_attribute() == Some("cta")).unwrap();
    assert_eq!(cta.link(), "destinations.html");
    assert_eq!(cta.css_selector(), ".btn.btn-primary.btn-lg");

    let email = catalog.find_by_id("email").unwrap();
    assert_eq!(email.name_attribute(), Some("email"));
    assert_eq!(email.object_name(), "input_email");

    let headline = catalog.find_by_id("headline").unwrap();
    assert_eq!(headline.css_selector(), "");
    assert_eq!(headline.class_names().len(), 0);

    assert!(catalog.iter().all(|e| !e.object_name().is_empty()));
    assert!(catalog.iter().filter(|e| !e.is_tag("a")).all(|e| e.link().is_empty()));
}

#[test]
fn test_determinism() {
    let first = scan_page(TRADEWINDS).unwrap();
    let second = scan_page(TRADEWINDS).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_completeness() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let body = scan.body().unwrap();

    assert_eq!(scan.catalog().len(), dom::count_descendants(&body));
}

#[test]
fn test_filter_correctness() {
    let catalog = scan_page(TRADEWINDS).unwrap();
    let position = |xpath: &str| catalog.iter().position(|e| e.xpath() == xpath).unwrap();

    let tag_sets: Vec<Vec<&str>> = vec![
        vec!["a"],
        vec!["div"],
        vec!["a", "button", "input"],
        vec!["h1", "h2", "h3", "h4"],
        vec!["table"],
    ];

    for tags in tag_sets {
        let filtered = catalog.filter_by_tags(&tags);
        let wanted: HashSet<&str> = tags.iter().copied().collect();

        assert!(filtered.iter().all(|e| wanted.contains(e.tag_name())));
        let expected = catalog.iter().filter(|e| wanted.contains(e.tag_name())).count();
        assert_eq!(filtered.len(), expected, "count mismatch for {:?}", tags);

        let positions: Vec<_> = filtered.iter().map(|e| position(e.xpath())).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "order broken for {:?}", tags);
    }
}

#[test]
fn test_scan_filter_matches_catalog_filter() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let unfiltered = scan_page(TRADEWINDS).unwrap();

    for tag in unfiltered.tag_names() {
        assert_eq!(scan.filter_by_tags([tag]), unfiltered.filter_by_tags([tag]));
    }
}

#[test]
fn test_xpaths_unique_and_resolvable() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let body = scan.body().unwrap();
    let nodes: Vec<_> = dom::descendants(&body).skip(1).collect();

    let unique: HashSet<_> = scan.catalog().iter().map(|e| e.xpath()).collect();
    assert_eq!(unique.len(), scan.catalog().len());

    for (node, entry) in nodes.iter().zip(scan.catalog()) {
        let resolved = scan.resolve(entry.xpath()).expect("XPath did not resolve");
        assert_eq!(&resolved, node);
        assert_eq!(resolved.local_name(), entry.tag_name());
        assert_eq!(xpath_of(&resolved), entry.xpath());
    }
}

#[test]
fn test_list_nodes_by_tag() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let nodes = scan.list_nodes_by_tag("a").unwrap();
    let entries = scan.filter_by_tags(["a"]);

    assert_eq!(nodes.len(), 16);
    for (node, entry) in nodes.iter().zip(&entries) {
        assert_eq!(node.attribute("href").unwrap_or_default(), entry.link());
        assert_eq!(xpath_of(node), entry.xpath());
    }
    assert_eq!(nodes[0].text(), "Tradewinds");
}

#[test]
fn test_snapshot_scan_matches_html_scan() {
    let scan = PageScanner::default().scan(TRADEWINDS).unwrap();
    let snapshot = to_snapshot(&scan.page().root());

    let json = snapshot.to_json().unwrap();
    let restored = ElementNode::from_json(&json).unwrap();

    let from_snapshot = PageScanner::default().scan_snapshot(&restored).unwrap();
    assert_eq!(&from_snapshot, scan.catalog());
}

#[test]
fn test_excluding_scripts() {
    let scanner = PageScanner::new(ScanOptions::new().without_scripts());
    let catalog = scanner.scan_page(TRADEWINDS).unwrap();

    assert_eq!(catalog.len(), 75);
    assert_eq!(catalog.count_by_tag("script"), 0);
    assert_eq!(catalog.find_by_id("booking").unwrap().xpath(), "/html[1]/body[1]/div[4]");
}

#[test]
fn test_parse_failures() {
    assert!(matches!(scan_page(""), Err(CatalogError::Parse(_))));
    assert!(matches!(scan_page("   \n"), Err(CatalogError::Parse(_))));
}
