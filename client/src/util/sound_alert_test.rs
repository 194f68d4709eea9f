use super::*;
use crate::util::storage::MemoryStorage;

#[test]
fn read_preference_defaults_to_enabled() {
    let store = MemoryStorage::new();
    assert!(read_preference(&store));
}

#[test]
fn read_preference_honors_stored_false() {
    let store = MemoryStorage::new();
    store.set(SOUND_ALERT_KEY, "false");
    assert!(!read_preference(&store));
}

#[test]
fn read_preference_treats_garbage_as_enabled() {
    let store = MemoryStorage::new();
    store.set(SOUND_ALERT_KEY, "maybe");
    assert!(read_preference(&store));
}

#[test]
fn write_preference_stores_boolean_string() {
    let store = MemoryStorage::new();
    write_preference(&store, false);
    assert_eq!(store.get(SOUND_ALERT_KEY).as_deref(), Some("false"));
    write_preference(&store, true);
    assert_eq!(store.get(SOUND_ALERT_KEY).as_deref(), Some("true"));
}

#[test]
fn toggle_flips_and_persists() {
    let store = MemoryStorage::new();
    let next = toggle(&store, true);
    assert!(!next);
    assert!(!read_preference(&store));
    assert!(toggle(&store, next));
    assert!(read_preference(&store));
}
