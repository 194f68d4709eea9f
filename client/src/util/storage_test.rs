use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let store = MemoryStorage::new();
    assert!(store.is_empty());
    assert_eq!(store.get("accessToken"), None);
}

#[test]
fn memory_storage_set_then_get() {
    let store = MemoryStorage::new();
    store.set("accessToken", "abc");
    assert_eq!(store.get("accessToken").as_deref(), Some("abc"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_storage_set_overwrites() {
    let store = MemoryStorage::new();
    store.set("k", "one");
    store.set("k", "two");
    assert_eq!(store.get("k").as_deref(), Some("two"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let store = MemoryStorage::new();
    store.remove("nope");
    assert!(store.is_empty());
}

// =============================================================
// BrowserStorage outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_without_hydrate() {
    let store = BrowserStorage;
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
    store.remove("k");
}

// =============================================================
// JSON helpers
// =============================================================

#[test]
fn json_helpers_round_trip_struct() {
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Draft {
        email: String,
    }
    let store = MemoryStorage::new();
    save_json(&store, "draft", &Draft { email: "a@b.com".to_owned() });
    let loaded: Option<Draft> = load_json(&store, "draft");
    assert_eq!(loaded, Some(Draft { email: "a@b.com".to_owned() }));
}

#[test]
fn load_json_malformed_returns_none() {
    let store = MemoryStorage::new();
    store.set("draft", "{not json");
    let loaded: Option<serde_json::Value> = load_json(&store, "draft");
    assert!(loaded.is_none());
}
