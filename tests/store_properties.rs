use markupbook::core::document;
use markupbook::{SectionStore, StoreError};
use tempfile::TempDir;

const THREE_PAGES: &str = "# Notebook\n\nIntro line\n\n## A\n\n<p>a</p>\n\n## B\n\n<p>b</p>\n\n## C\n\n<p>c</p>\n";

fn store_with(text: &str) -> (TempDir, SectionStore) {
    let tmp = TempDir::new().unwrap();
    let store = SectionStore::new(tmp.path());
    store.write(text).unwrap();
    (tmp, store)
}

#[test]
fn etag_is_stable_for_unchanged_document() {
    let (_tmp, store) = store_with(THREE_PAGES);
    assert_eq!(store.compute_etag().unwrap(), store.compute_etag().unwrap());

    store.write("").unwrap();
    let empty = store.compute_etag().unwrap();
    store.write("").unwrap();
    assert_eq!(store.compute_etag().unwrap(), empty);
}

#[test]
fn etag_changes_with_any_byte() {
    let (_tmp, store) = store_with(THREE_PAGES);
    let original = store.compute_etag().unwrap();

    store.write(&format!("{THREE_PAGES}\n")).unwrap();
    assert_ne!(store.compute_etag().unwrap(), original);

    store.write(&THREE_PAGES.replace("<p>b</p>", "<p>B</p>")).unwrap();
    assert_ne!(store.compute_etag().unwrap(), original);
}

#[test]
fn list_and_load_agree_with_split() {
    let (_tmp, store) = store_with(THREE_PAGES);
    let sections = document::split(THREE_PAGES);

    assert_eq!(store.list_pages().unwrap(), vec!["A", "B", "C"]);
    for section in sections {
        assert_eq!(store.load_page(&section.title).unwrap(), section.content);
    }
}

#[test]
fn never_written_document_is_empty() {
    let tmp = TempDir::new().unwrap();
    let store = SectionStore::new(tmp.path().join("markups"));
    assert_eq!(store.read().unwrap(), "");
    assert!(store.list_pages().unwrap().is_empty());
    assert!(!store.document_path().exists());
}

#[test]
fn save_keeps_preamble_and_other_sections() {
    let (_tmp, store) = store_with(THREE_PAGES);
    store.save_page("B", "B2", "<p>new b</p>").unwrap();

    let text = store.read().unwrap();
    assert_eq!(store.list_pages().unwrap(), vec!["A", "B2", "C"]);
    assert_eq!(document::preamble(&text), "# Notebook\n\nIntro line\n\n");
    assert_eq!(store.load_page("A").unwrap(), "\n<p>a</p>\n\n");
    assert_eq!(store.load_page("B2").unwrap(), "\n<p>new b</p>\n");
    assert_eq!(store.load_page("C").unwrap(), "\n<p>c</p>\n");
    assert_eq!(
        text,
        "# Notebook\n\nIntro line\n\n## A\n\n<p>a</p>\n\n## B2\n\n<p>new b</p>\n## C\n\n<p>c</p>\n"
    );
}

#[test]
fn rename_changes_heading_only() {
    let (_tmp, store) = store_with(THREE_PAGES);
    let before = store.load_page("B").unwrap();
    store.rename_section("B", "Bravo").unwrap();

    assert_eq!(store.load_page("Bravo").unwrap(), before);
    assert_eq!(store.read().unwrap(), THREE_PAGES.replace("## B\n", "## Bravo\n"));
}

#[test]
fn insert_on_empty_document_adds_preamble() {
    let tmp = TempDir::new().unwrap();
    let store = SectionStore::new(tmp.path());
    store.insert_new_section("X").unwrap();

    let text = store.read().unwrap();
    assert_eq!(store.list_pages().unwrap(), vec!["X"]);
    assert!(document::preamble(&text).starts_with("# Notebook\n"));
}

#[test]
fn external_edit_is_detected() {
    let (_tmp, store) = store_with("# Notebook\n\n## A\n\n<p>a</p>\n");
    let e0 = store.compute_etag().unwrap();

    let external = "# Notebook\n\n## A\n\n<p>changed</p>\n";
    std::fs::write(store.document_path(), external).unwrap();
    let e1 = store.compute_etag().unwrap();
    assert_ne!(e0, e1);

    let err = store
        .save_page_if_match("A", "A", "<p>a</p>", &e0)
        .unwrap_err();
    match err {
        StoreError::EtagMismatch { expected, actual } => {
            assert_eq!(expected, e0);
            assert_eq!(actual, e1);
        }
        other => panic!("expected etag mismatch, got {other:?}"),
    }
    assert_eq!(store.read().unwrap(), external);

    store.save_page_if_match("A", "A", "<p>mine</p>", &e1).unwrap();
    assert_eq!(store.load_page("A").unwrap(), "\n<p>mine</p>\n");
}

#[test]
fn missing_targets_fail_cleanly() {
    let (_tmp, store) = store_with(THREE_PAGES);
    assert!(matches!(store.load_page("Z"), Err(StoreError::NotFound(_))));
    assert!(matches!(
        store.save_page("Z", "Y", "x"),
        Err(StoreError::SectionNotFound(_))
    ));
    assert!(matches!(
        store.rename_section("Z", "Y"),
        Err(StoreError::SectionNotFound(_))
    ));
    assert_eq!(store.read().unwrap(), THREE_PAGES);

    store.write("# Notebook\n").unwrap();
    assert!(matches!(
        store.save_page("Z", "Y", "x"),
        Err(StoreError::NoSections)
    ));
    assert_eq!(store.read().unwrap(), "# Notebook\n");
}
