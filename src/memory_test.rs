use super::*;

fn doc_with_buttons() -> (MemoryDocument, NodeId, NodeId, NodeId) {
    let doc = MemoryDocument::new();
    let body = doc.append(MemoryDocument::ROOT, "body");
    let wrapper = doc.append(body, "div");
    doc.add_class(&wrapper, "main-theme-switches");
    let dark = doc.append(wrapper, "button");
    doc.add_class(&dark, "theme-buttons");
    doc.set_attribute(dark, "data-theme", "dark-theme");
    let next = doc.append(body, "button");
    doc.set_attribute(next, "id", "next-theme-button");
    (doc, wrapper, dark, next)
}

// =============================================================
// Selectors
// =============================================================

#[test]
fn query_by_class_id_tag_and_attribute() {
    let (doc, wrapper, dark, next) = doc_with_buttons();
    assert_eq!(doc.query(".main-theme-switches"), Some(wrapper));
    assert_eq!(doc.query("#next-theme-button"), Some(next));
    assert_eq!(doc.query_all("button"), vec![dark, next]);
    assert_eq!(doc.query("[data-theme]"), Some(dark));
    assert_eq!(doc.query("button[data-theme=\"dark-theme\"]"), Some(dark));
    assert_eq!(doc.query("[data-theme=light-theme]"), None);
    assert_eq!(doc.query("button.theme-buttons"), Some(dark));
}

#[test]
fn selector_lists_match_any_group() {
    let (doc, wrapper, _, next) = doc_with_buttons();
    assert_eq!(doc.query_all("#next-theme-button, .main-theme-switches"), vec![wrapper, next]);
}

#[test]
fn combinators_and_garbage_match_nothing() {
    let (doc, ..) = doc_with_buttons();
    assert!(doc.query_all(".main-theme-switches button").is_empty());
    assert!(doc.query_all("div > button").is_empty());
    assert!(doc.query_all("").is_empty());
    assert!(doc.query_all(".").is_empty());
    assert!(doc.query_all("[unclosed").is_empty());
}

#[test]
fn query_within_only_returns_descendants() {
    let (doc, wrapper, dark, _) = doc_with_buttons();
    assert_eq!(doc.query_all_within(&wrapper, "button"), vec![dark]);
    assert!(doc.query_all_within(&dark, "button").is_empty());
}

#[test]
fn closest_is_inclusive_and_walks_up() {
    let (doc, wrapper, dark, next) = doc_with_buttons();
    let icon = doc.append(dark, "span");
    assert_eq!(doc.closest(&icon, ".theme-buttons"), Some(dark));
    assert_eq!(doc.closest(&dark, ".theme-buttons"), Some(dark));
    assert_eq!(doc.closest(&icon, ".main-theme-switches"), Some(wrapper));
    assert_eq!(doc.closest(&next, ".theme-buttons"), None);
}

#[test]
fn contains_is_inclusive() {
    let (doc, wrapper, dark, next) = doc_with_buttons();
    assert!(doc.contains(&wrapper, &dark));
    assert!(doc.contains(&wrapper, &wrapper));
    assert!(!doc.contains(&wrapper, &next));
    assert!(doc.contains(&MemoryDocument::ROOT, &next));
}

// =============================================================
// Class list
// =============================================================

#[test]
fn add_class_does_not_duplicate() {
    let doc = MemoryDocument::new();
    doc.add_class(&MemoryDocument::ROOT, "dark-theme");
    doc.add_class(&MemoryDocument::ROOT, "dark-theme");
    assert_eq!(doc.classes(&MemoryDocument::ROOT), ["dark-theme"]);
    assert!(doc.has_class(&MemoryDocument::ROOT, "dark-theme"));
}

#[test]
fn replace_class_keeps_position() {
    let doc = MemoryDocument::new();
    doc.add_class(&MemoryDocument::ROOT, "layout");
    doc.add_class(&MemoryDocument::ROOT, "dark-theme");
    doc.add_class(&MemoryDocument::ROOT, "wide");
    assert!(doc.replace_class(&MemoryDocument::ROOT, "dark-theme", "light-theme"));
    assert_eq!(doc.classes(&MemoryDocument::ROOT), ["layout", "light-theme", "wide"]);
}

#[test]
fn replace_class_missing_old_is_noop() {
    let doc = MemoryDocument::new();
    assert!(!doc.replace_class(&MemoryDocument::ROOT, "dark-theme", "light-theme"));
    assert!(doc.classes(&MemoryDocument::ROOT).is_empty());
}

#[test]
fn replace_class_with_present_new_removes_old() {
    let doc = MemoryDocument::new();
    doc.add_class(&MemoryDocument::ROOT, "dark-theme");
    doc.add_class(&MemoryDocument::ROOT, "light-theme");
    assert!(doc.replace_class(&MemoryDocument::ROOT, "dark-theme", "light-theme"));
    assert_eq!(doc.classes(&MemoryDocument::ROOT), ["light-theme"]);
}

#[test]
fn unknown_nodes_are_ignored() {
    let doc = MemoryDocument::new();
    doc.add_class(&42, "x");
    doc.set_attribute(42, "data-theme", "x");
    assert!(doc.classes(&42).is_empty());
    assert_eq!(doc.attribute(&42, "data-theme"), None);
    assert!(!doc.replace_class(&42, "x", "y"));
}

#[test]
fn media_queries_default_to_false() {
    let doc = MemoryDocument::new();
    assert!(!doc.matches_media("(prefers-color-scheme: dark)"));
    doc.set_media("(prefers-color-scheme: dark)", true);
    assert!(doc.matches_media("(prefers-color-scheme: dark)"));
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn store_round_trips_and_counts_writes() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn failing_store_keeps_previous_value() {
    let store = MemoryStore::with_value("k", "old");
    store.fail_writes(true);
    assert_eq!(store.set("k", "new"), Err(StorageError::Write("quota exceeded".into())));
    assert_eq!(store.get("k").as_deref(), Some("old"));
    assert_eq!(store.write_count(), 0);
}
