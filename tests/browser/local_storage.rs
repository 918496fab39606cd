#![cfg(target_arch = "wasm32")]

use capture_probe::platform::{KeyValueStorage as _, LocalStorage};
use wasm_bindgen_test::*;

use crate::clear_local_storage;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn reads_written_value() {
    clear_local_storage();
    let storage = LocalStorage::open().unwrap();

    storage.set("settings", r#"{"a":1}"#).unwrap();

    assert_eq!(storage.get("settings").unwrap(), Some(r#"{"a":1}"#.into()));
}

#[wasm_bindgen_test]
fn missing_key_is_none() {
    clear_local_storage();
    let storage = LocalStorage::open().unwrap();

    assert_eq!(storage.get("missing").unwrap(), None);
}

#[wasm_bindgen_test]
fn removes_value() {
    clear_local_storage();
    let storage = LocalStorage::open().unwrap();
    storage.set("settings", "x").unwrap();

    storage.remove("settings").unwrap();
    storage.remove("settings").unwrap();

    assert_eq!(storage.get("settings").unwrap(), None);
}

#[wasm_bindgen_test]
fn shares_entries_between_handles() {
    clear_local_storage();
    LocalStorage::open().unwrap().set("settings", "y").unwrap();

    let other = LocalStorage::open().unwrap();

    assert_eq!(other.get("settings").unwrap(), Some("y".into()));
}
