use crate::{ConfigStore, DEFAULT_PASSWORD, DEFAULT_PORT, ServerConfig};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serde_json::json;
use tempfile::TempDir;

fn temp_store() -> (TempDir, ConfigStore) {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::in_dir(temp.path());
    (temp, store)
}

// =========================================================================
// Load
// =========================================================================

#[test]
fn given_no_config_file_when_load_then_defaults() {
    let (_temp, store) = temp_store();

    assert_that!(store.load(), eq(&ServerConfig::default()));
}

#[test]
fn given_malformed_json_when_load_then_defaults() {
    // Given
    let (_temp, store) = temp_store();
    std::fs::write(store.path(), "this is not json {{{{").unwrap();

    // When
    let config = store.load();

    // Then
    assert_that!(config, eq(&ServerConfig::default()));
}

#[test]
fn given_malformed_json_when_try_load_then_error_mentions_file() {
    let (_temp, store) = temp_store();
    std::fs::write(store.path(), "{ not json").unwrap();

    let result = store.try_load();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.json"));
}

#[test]
fn given_partial_document_on_disk_when_load_then_merged_with_defaults() {
    let (_temp, store) = temp_store();
    std::fs::write(store.path(), r#"{ "host": "192.168.1.10" }"#).unwrap();

    let config = store.load();

    assert_that!(config.host.as_str(), eq("192.168.1.10"));
    assert_that!(config.port, eq(DEFAULT_PORT));
}

// =========================================================================
// Save
// =========================================================================

#[test]
fn given_full_config_when_save_then_load_returns_same_config() {
    // Given
    let (_temp, store) = temp_store();
    let raw = json!({
        "host": "127.0.0.1",
        "port": 9000,
        "storagePath": "/tmp/x",
        "username": "a",
        "password": "b"
    });

    // When
    let saved = store.save(&raw);

    // Then
    assert_that!(saved, eq(true));
    assert_that!(store.load(), eq(&ServerConfig::parse(&raw)));
}

#[test]
fn given_partial_config_when_save_then_load_returns_coerced_form() {
    let (_temp, store) = temp_store();
    let raw = json!({ "port": "9100", "username": "" });

    assert_that!(store.save(&raw), eq(true));

    let loaded = store.load();
    assert_that!(loaded.port, eq(9100));
    assert_that!(loaded.password.as_str(), eq(DEFAULT_PASSWORD));
    assert_that!(loaded, eq(&ServerConfig::parse(&raw)));
}

#[test]
fn given_non_object_when_save_then_false_and_nothing_written() {
    let (_temp, store) = temp_store();

    assert_that!(store.save(&json!("nope")), eq(false));
    assert_that!(store.path().exists(), eq(false));
}

#[test]
fn given_missing_parent_dir_when_save_then_created() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::in_dir(&temp.path().join("nested").join("dir"));

    assert_that!(store.save(&json!({ "host": "localhost" })), eq(true));
    assert_that!(store.load().host.as_str(), eq("localhost"));
}

#[test]
fn given_successful_save_then_no_temp_files_left_behind() {
    let (temp, store) = temp_store();

    assert!(store.save(&json!({})));

    let entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_that!(entries, eq(&vec!["config.json".to_string()]));
}

#[test]
fn given_unwritable_target_when_save_then_false() {
    // A directory squatting on the config path makes the rename fail.
    let (_temp, store) = temp_store();
    std::fs::create_dir_all(store.path().join("occupied")).unwrap();

    assert_that!(store.save(&json!({})), eq(false));
}

#[test]
fn given_saved_document_then_unknown_keys_are_not_written() {
    let (_temp, store) = temp_store();

    store.save(&json!({ "theme": "dark" }));

    let contents = std::fs::read_to_string(store.path()).unwrap();
    assert!(!contents.contains("theme"));
    assert!(contents.contains("storagePath"));
}

// =========================================================================
// Ensure Exists
// =========================================================================

#[test]
fn given_no_file_when_ensure_exists_then_default_written() {
    let (_temp, store) = temp_store();

    let created = store.ensure_exists();

    assert_that!(created, ok(anything()));
    assert_that!(created.unwrap(), eq(true));
    assert_that!(store.try_load().unwrap(), eq(&ServerConfig::default()));
}

#[test]
fn given_existing_file_when_ensure_exists_then_left_untouched() {
    let (_temp, store) = temp_store();
    store.save(&json!({ "host": "10.1.1.1" }));

    assert_that!(store.ensure_exists().unwrap(), eq(false));
    assert_that!(store.load().host.as_str(), eq("10.1.1.1"));
}
