//! Loads the fixture site's data directory into the fixture page.

use std::path::PathBuf;
use std::time::Duration;

use cms_core::{CmsConfig, DirectorySource, HERO_TITLE_VARIABLE, Loader, MemorySource};
use cms_dom::Document;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn page() -> Document {
    let html = std::fs::read_to_string(fixtures().join("index.html")).unwrap();
    Document::parse_html(&html)
}

fn text(doc: &Document, selector: &str) -> String {
    let node = doc
        .query(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("no match for {selector}"));
    doc.text(node)
}

fn all_texts(doc: &Document, selector: &str) -> Vec<String> {
    doc.query_all(selector)
        .unwrap()
        .into_iter()
        .map(|id| doc.text(id))
        .collect()
}

#[tokio::test]
async fn test_full_site_load() {
    let source = DirectorySource::new(fixtures().join("_data"));
    let loader = Loader::new(source, CmsConfig::default());
    let mut doc = page();
    loader.load(&mut doc).await.unwrap();

    assert_eq!(text(&doc, "title"), "Mentor Zografos | Διαφημιστικά");
    assert_eq!(doc.variable(HERO_TITLE_VARIABLE), Some("Τα πάντα για την επιχείρησή σου!"));
    assert_eq!(
        all_texts(&doc, ".hero-buttons .btn"),
        vec!["Δείτε τα προϊόντα", "Επικοινωνία"]
    );
    assert_eq!(
        all_texts(&doc, ".about-text p"),
        vec!["Ξεκινήσαμε το 2009.", "Εξυπηρετούμε όλη την Ελλάδα."]
    );
    assert_eq!(all_texts(&doc, ".products-grid .featured h3"), vec!["Αναλώσιμα Φαρμακείου"]);
    assert_eq!(
        all_texts(&doc, ".contact-item:nth-child(2) .contact-details p"),
        vec!["Γραφείο: 210 1234567", "Κινητό: 6912345678"]
    );
    assert_eq!(all_texts(&doc, ".nav-menu .nav-link"), vec!["Αρχική", "Σχετικά", "Προϊόντα"]);
    assert_eq!(
        text(&doc, ".footer-bottom p"),
        "© 2025 Mentor Zografos | Κατασκευή - Φιλοξενία: mianagn"
    );

    let popup = doc.query("#specialOfferPopup").unwrap().unwrap();
    assert!(doc.is_visible(popup));
    assert_eq!(text(&doc, ".btn-popup"), "Μάθετε περισσότερα");
}

#[tokio::test]
async fn test_second_load_changes_nothing() {
    let loader = Loader::new(
        DirectorySource::new(fixtures().join("_data")),
        CmsConfig::default(),
    );
    let mut doc = page();
    loader.load(&mut doc).await.unwrap();
    let once = doc.to_html();

    loader.load(&mut doc).await.unwrap();
    assert_eq!(doc.to_html(), once);
}

#[tokio::test]
async fn test_missing_data_dir_keeps_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = CmsConfig {
        fetch_timeout_ms: Some(5_000),
        ..CmsConfig::default()
    };
    let source = DirectorySource::new(dir.path().join("_data"))
        .with_timeout(Some(Duration::from_millis(5_000)));
    let loader = Loader::new(source, config);

    let original = page();
    let mut doc = page();
    let patches = loader.load(&mut doc).await.unwrap();

    // Only the popup is touched: without an enabled offer it is hidden.
    assert_eq!(patches.len(), 1);
    assert_eq!(text(&doc, ".hero-subtitle"), text(&original, ".hero-subtitle"));
    assert_eq!(all_texts(&doc, ".nav-menu a"), all_texts(&original, ".nav-menu a"));
    let popup = doc.query("#specialOfferPopup").unwrap().unwrap();
    assert!(!doc.is_visible(popup));
}

#[tokio::test]
async fn test_patch_list_serializes() {
    let source = MemorySource::new().with("navigation", "items:\n  - text: Home\n    link: /\n");
    let loader = Loader::new(source, CmsConfig::default());
    let doc = page();
    let data = loader.fetch_all().await;
    let patches = loader.patches(&doc, &data);

    let json = serde_json::to_value(&patches).unwrap();
    let ops: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|patch| patch["op"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ops, vec!["replace_children", "set_visible"]);
    assert_eq!(
        json[0]["children"][0],
        serde_json::json!({
            "type": "element",
            "name": "a",
            "attributes": { "href": "/", "class": "nav-link" },
            "children": [{ "type": "text", "text": "Home" }]
        })
    );
}

#[tokio::test]
async fn test_byte_order_mark_does_not_hide_a_section() {
    let source = MemorySource::new().with("about", "\u{feff}title: Με BOM\nsubtitle: Από Notepad\n");
    let loader = Loader::new(source, CmsConfig::default());
    let mut doc = page();
    loader.load(&mut doc).await.unwrap();

    assert_eq!(text(&doc, "#about .section-title"), "Με BOM");
    assert_eq!(text(&doc, "#about .section-subtitle"), "Από Notepad");
}
