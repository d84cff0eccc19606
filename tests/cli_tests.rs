#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

mod common;
use common::fixtures::SHOP;

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let symbols = dir.path().join("symbols.yaml");
    fs::write(&symbols, SHOP).unwrap();
    (dir, symbols)
}

fn tsgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsgen"))
        .current_dir(dir)
        .env("TSGEN_LOG_LEVEL", "warn")
        .args(args)
        .output()
        .expect("run tsgen")
}

#[test]
fn test_cli_generate_writes_files() {
    let (dir, symbols) = workspace();
    let out = dir.path().join("web");
    let output = tsgen(
        dir.path(),
        &[
            "generate",
            "--symbols",
            symbols.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let item = out.join("sys-gen/com/acme/shop/model/Item.generated.ts");
    assert!(item.exists());
    assert!(fs::read_to_string(item).unwrap().contains("export interface Item {"));
    assert!(out.join("sys-gen/service-api.module.ts").exists());
    assert!(out.join("sys-gen/sys-std.ts").exists());
}

#[test]
fn test_cli_dry_run_lists_paths() {
    let (dir, symbols) = workspace();
    let output = tsgen(
        dir.path(),
        &["generate", "--symbols", symbols.to_str().unwrap(), "--dry-run"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout
        .lines()
        .any(|l| l == "sys-gen/com/acme/shop/api/ItemController.generated.ts"));
    assert!(!dir.path().join("sys-gen").exists());
}

#[test]
fn test_cli_uses_config_next_to_symbols() {
    let (dir, symbols) = workspace();
    fs::write(
        dir.path().join("tsgen.toml"),
        "output_folder = \"client\"\ndefault_module_name = \"shop\"\n",
    )
    .unwrap();
    let output = tsgen(
        dir.path(),
        &["generate", "--symbols", symbols.to_str().unwrap(), "--dry-run"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "client/shop.module.ts"));
}

#[test]
fn test_cli_inspect_prints_model() {
    let (dir, symbols) = workspace();
    let output = tsgen(dir.path(), &["inspect", "--symbols", symbols.to_str().unwrap()]);
    assert!(output.status.success());
    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        model["endpoints"][0]["controller_type"],
        "com.acme.shop.api.ItemController"
    );
    assert!(model["types"].as_array().unwrap().len() > 5);
}

#[test]
fn test_cli_missing_symbols_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = tsgen(dir.path(), &["generate", "--symbols", "nope.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.yaml"));
}
