//! # intentbot CLI Validate Integration Tests
//!
//! File: cli/tests/validate.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `intentbot validate`, including the catalog that
//! ships at the root of the repository.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn shipped_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../intents.json")
}

#[test]
fn test_validate_json_catalog() {
    let fixture = Fixture::new(GREETING_CATALOG, "json");
    fixture
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("  - greeting: 2 patterns, 2 responses")
                .and(predicate::str::contains("No 'fallback' intent"))
                .and(predicate::str::contains("✅ Catalog is valid: 2 intents, 3 patterns.")),
        );
}

#[test]
fn test_validate_toml_catalog() {
    let catalog = r#"
        [[intents]]
        intent = "greeting"
        patterns = ["hello"]
        responses = ["Hi!"]

        [[intents]]
        intent = "fallback"
        responses = ["Pardon?"]
    "#;
    let fixture = Fixture::new(catalog, "toml");
    fixture
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("  - fallback: 0 patterns, 1 responses")
                .and(predicate::str::contains("No 'fallback' intent").not()),
        );
}

#[test]
fn test_validate_shipped_catalog() {
    let fixture = Fixture::new("[]", "json");
    fixture
        .cmd()
        .arg("--intents")
        .arg(shipped_catalog())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Catalog is valid: 6 intents, 16 patterns."));
}

#[test]
fn test_validate_duplicate_intents() {
    let catalog = r#"[
      {"intent": "greeting", "patterns": ["hello"], "responses": ["Hi!"]},
      {"intent": "greeting", "patterns": ["hey"], "responses": ["Hey!"]}
    ]"#;
    let fixture = Fixture::new(catalog, "json");
    fixture
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Intent 'greeting' is defined more than once in the catalog.",
        ));
}

#[test]
fn test_validate_malformed_json() {
    let fixture = Fixture::new("[{\"intent\": ", "json");
    fixture
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed JSON intent catalog"));
}

#[test]
fn test_validate_missing_catalog() {
    let fixture = Fixture::new(GREETING_CATALOG, "json");
    fixture
        .cmd()
        .args(["--intents", "nowhere.json", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Intent file 'nowhere.json' not found."));
}

#[test]
fn test_validate_unsupported_extension() {
    let fixture = Fixture::new("greeting: hello", "yaml");
    fixture
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported intent catalog format 'yaml'"));
}

#[test]
fn test_project_config_from_subdirectory() {
    let fixture = Fixture::new(GREETING_CATALOG, "json");
    let nested = fixture.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();
    fs::create_dir(fixture.path().join(".git")).unwrap();
    fs::write(
        fixture.path().join(".intentbot.toml"),
        "[model]\nbackend = \"lexical\"\n\n[intents]\npath = \"intents.json\"\n",
    )
    .unwrap();

    intentbot_cmd()
        .current_dir(&nested)
        .env_remove("INTENTBOT_CONFIG")
        .env("HOME", fixture.path())
        .env("XDG_CONFIG_HOME", fixture.path().join("xdg"))
        .arg("validate")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(fixture.catalog_path.display().to_string())
                .and(predicate::str::contains("✅ Catalog is valid: 2 intents, 3 patterns.")),
        );
}
