//! # intentbot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every binary
//! test runs against a throwaway directory holding an intent catalog and a
//! config file that selects the offline `lexical` backend, so no test
//! downloads a model or depends on the developer's own configuration.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The two-intent catalog used by most tests.
pub const GREETING_CATALOG: &str = r#"[
  {"intent": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!", "Hello!"]},
  {"intent": "bot_name", "patterns": ["what is your name"], "responses": ["I am Bot."]}
]"#;

pub const DEFAULT_RESPONSE: &str = "I'm not sure how to respond to that.";

/// Command pointing at the compiled `intentbot` binary.
pub fn intentbot_cmd() -> Command {
    Command::cargo_bin("intentbot").expect("Failed to find intentbot binary for testing")
}

/// A temporary bot setup: catalog file plus config file.
pub struct Fixture {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl Fixture {
    /// Writes `catalog` as `intents.<extension>` and a lexical-backend config.
    pub fn new(catalog: &str, extension: &str) -> Self {
        Self::with_config(catalog, extension, "")
    }

    /// Like `new`, with extra TOML appended to the generated config file.
    pub fn with_config(catalog: &str, extension: &str, extra_config: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let catalog_path = dir.path().join(format!("intents.{}", extension));
        fs::write(&catalog_path, catalog).expect("Failed to write catalog");

        let config_path = dir.path().join("intentbot.toml");
        let config = format!(
            "[model]\nbackend = \"lexical\"\n\n[intents]\npath = {:?}\n\n{}",
            catalog_path.to_string_lossy(),
            extra_config
        );
        fs::write(&config_path, config).expect("Failed to write config");

        Self {
            dir,
            config_path,
            catalog_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `intentbot --config <fixture config>` running inside the fixture directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = intentbot_cmd();
        cmd.current_dir(self.path())
            .env_remove("INTENTBOT_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }
}
