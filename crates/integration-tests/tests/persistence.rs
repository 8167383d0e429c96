//! Persistence scenarios over the file-backed store: reload behavior,
//! layout stability, and tolerance of malformed persisted data.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use tangerine_cart::{CartStore, JsonFileStore, RecordingSink};
use tangerine_core::UserProfile;
use tangerine_integration_tests::cents;

fn file_store(path: &std::path::Path) -> CartStore<JsonFileStore> {
    CartStore::new(JsonFileStore::new(path), Arc::new(RecordingSink::new()))
}

#[test]
fn cart_survives_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = file_store(&path);
    store.log_in(&UserProfile::new("Ada")).unwrap();
    store
        .add_item("Burger", cents(599), Some("burger.png".to_owned()))
        .unwrap();
    store.add_item("Pizza", cents(999), None).unwrap();
    store.add_item("Burger", cents(599), None).unwrap();
    let before = store.load_cart().unwrap();
    drop(store);

    // A fresh process over the same file sees the identical cart.
    let reopened = file_store(&path);
    assert!(reopened.is_authenticated().unwrap());
    assert_eq!(reopened.load_cart().unwrap(), before);
    assert_eq!(reopened.cart_count().unwrap(), 3);
}

#[test]
fn persisted_layout_uses_the_historical_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = file_store(&path);
    store.log_in(&UserProfile::new("Ada")).unwrap();
    store.add_item("Burger", cents(599), None).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let state: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(state["userLoggedIn"], "true");

    let profile: serde_json::Value =
        serde_json::from_str(state["userData"].as_str().unwrap()).unwrap();
    assert_eq!(profile["firstName"], "Ada");

    let items: serde_json::Value =
        serde_json::from_str(state["cartItems"].as_str().unwrap()).unwrap();
    let burger = &items.as_array().unwrap()[0];
    assert_eq!(burger["name"], "Burger");
    assert_eq!(burger["price"], 5.99);
    assert_eq!(burger["quantity"], 1);
    assert!(burger["addedAt"].is_string());
    assert!(burger["id"].is_i64());
}

#[test]
fn malformed_cart_value_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = file_store(&path);
    store.log_in(&UserProfile::new("Ada")).unwrap();

    // Clobber the cart value with junk; the store must shrug it off.
    use tangerine_cart::KeyValueStore;
    let kv = JsonFileStore::new(&path);
    kv.set("cartItems", "][ definitely not json").unwrap();

    assert!(store.load_cart().unwrap().is_empty());
    assert_eq!(store.cart_count().unwrap(), 0);

    // And the cart is usable again after the next mutation.
    store.add_item("Burger", cents(599), None).unwrap();
    assert_eq!(store.cart_count().unwrap(), 1);
}

#[test]
fn foreign_session_flag_values_do_not_authenticate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    use tangerine_cart::KeyValueStore;
    let kv = JsonFileStore::new(&path);
    kv.set("userLoggedIn", "yes").unwrap();

    let store = file_store(&path);
    assert!(!store.is_authenticated().unwrap());
}

#[test]
fn logout_keeps_the_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = file_store(&path);
    store.log_in(&UserProfile::new("Ada")).unwrap();
    store.add_item("Burger", cents(599), None).unwrap();
    store.log_out().unwrap();

    assert!(!store.is_authenticated().unwrap());
    assert_eq!(store.current_user().unwrap(), None);
    assert_eq!(store.load_cart().unwrap().len(), 1);
}
