#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::tempdir;
use tsgen::config::{
    auto_detect_config_path, load_config, load_or_default, resolve_config_path, GenConfig,
    StorageKind, CONFIG_FILE,
};

// finish() reads the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_defaults() {
    let config = GenConfig::default();
    assert_eq!(config.output_folder, "sys-gen/");
    assert_eq!(config.generated_suffix, ".generated");
    assert_eq!(config.std_api_file_name, "sys-std");
    assert_eq!(config.request_manager_file_name, "sys-request-manager");
    assert_eq!(config.default_module_name, "service-api");
    assert_eq!(config.http_service_class, "ServiceRequestManager");
    assert!(config.http_service_include.is_none());
    assert!(config.enable_time_integration);
    assert_eq!(config.time.local_date, "string");
    assert_eq!(config.indent(), "  ");
    assert!(!config.optional_nullable_properties);
    assert_eq!(config.storage, StorageKind::File);
}

#[test]
fn test_load_toml() {
    let _env = env_lock();
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        r#"
output_folder = "src/app/generated"
default_module_name = "shop-api"
indent_width = 4
optional_nullable_properties = true
storage = "memory"

[time]
local_date = "Date"

[path_overrides]
"com.acme.shop" = "shop"

[exclude_classes]
internal = "com\\.acme\\.internal\\..*"

[type_overrides]
"java.util.UUID" = "string"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap().unwrap();
    // trailing slash added
    assert_eq!(config.output_folder, "src/app/generated/");
    assert_eq!(config.default_module_name, "shop-api");
    assert_eq!(config.indent(), "    ");
    assert!(config.optional_nullable_properties);
    assert_eq!(config.storage, StorageKind::Memory);
    assert_eq!(config.time.local_date, "Date");
    // untouched members of a partial table keep their defaults
    assert_eq!(config.time.local_time, "string");
    assert_eq!(config.path_overrides["com.acme.shop"], "shop");
    assert_eq!(config.type_overrides["java.util.UUID"], "string");
    assert_eq!(config.generated_suffix, ".generated");
}

#[test]
fn test_missing_file_is_none() {
    let dir = tempdir().unwrap();
    assert!(load_config(&dir.path().join(CONFIG_FILE)).unwrap().is_none());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "indent_width = \"wide\"").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse generator config"));
}

#[test]
fn test_invalid_exclusion_pattern_is_an_error() {
    let _env = env_lock();
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[exclude_classes]\nbroken = \"com.(acme\"\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken"));
}

#[test]
fn test_auto_detect_walks_up() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("build").join("symbols");
    fs::create_dir_all(&nested).unwrap();
    let symbols = nested.join("symbols.yaml");
    fs::write(&symbols, "types: []").unwrap();

    let config_path = dir.path().join(CONFIG_FILE);
    fs::write(&config_path, "default_module_name = \"found\"").unwrap();
    assert_eq!(auto_detect_config_path(&symbols), Some(config_path));
}

#[test]
fn test_explicit_path_wins_when_present() {
    let _env = env_lock();
    let dir = tempdir().unwrap();
    let symbols = dir.path().join("symbols.yaml");
    let detected = dir.path().join(CONFIG_FILE);
    fs::write(&detected, "default_module_name = \"detected\"").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "default_module_name = \"explicit\"").unwrap();

    assert_eq!(resolve_config_path(Some(&explicit), &symbols), Some(explicit.clone()));
    let config = load_or_default(Some(&explicit), &symbols).unwrap();
    assert_eq!(config.default_module_name, "explicit");

    // missing explicit file falls back to detection
    let missing = dir.path().join("missing.toml");
    let config = load_or_default(Some(&missing), &symbols).unwrap();
    assert_eq!(config.default_module_name, "detected");
}

#[test]
fn test_environment_overrides() {
    let _env = env_lock();
    std::env::set_var("TSGEN_OUTPUT_FOLDER", "env-out");
    std::env::set_var("TSGEN_INDENT_WIDTH", "3");
    let config = GenConfig::default().finish();
    std::env::remove_var("TSGEN_OUTPUT_FOLDER");
    std::env::remove_var("TSGEN_INDENT_WIDTH");

    let config = config.unwrap();
    assert_eq!(config.output_folder, "env-out/");
    assert_eq!(config.indent_width, 3);

    std::env::set_var("TSGEN_INDENT_WIDTH", "many");
    let err = GenConfig::default().finish().unwrap_err();
    std::env::remove_var("TSGEN_INDENT_WIDTH");
    assert!(err.to_string().contains("TSGEN_INDENT_WIDTH"));
}

#[test]
fn test_environment_overrides_apply_to_defaults() {
    let _env = env_lock();
    let dir = tempdir().unwrap();
    let symbols = dir.path().join("symbols.yaml");
    let missing = dir.path().join("missing.toml");

    std::env::set_var("TSGEN_OUTPUT_FOLDER", "from-env");
    let fallback = load_or_default(Some(&missing), &symbols);
    fs::write(dir.path().join(CONFIG_FILE), "default_module_name = \"found\"").unwrap();
    let loaded = load_or_default(None, &symbols);
    std::env::remove_var("TSGEN_OUTPUT_FOLDER");

    assert_eq!(fallback.unwrap().output_folder, "from-env/");
    let loaded = loaded.unwrap();
    assert_eq!(loaded.output_folder, "from-env/");
    assert_eq!(loaded.default_module_name, "found");
}
