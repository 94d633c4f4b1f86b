//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common devfiles and a fixture that writes them into a
//! temporary directory.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);
//!     fixture.command().arg("validate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::devfiles;
    pub use super::TestFixture;
}

/// Devfile snippets shared by the tests.
#[allow(dead_code)]
pub mod devfiles {
    /// 2.2.0 devfile with variables, a volume mount, projects and events.
    pub const NODEJS: &str = r#"schemaVersion: 2.2.0
metadata:
  name: nodejs
  version: 2.1.1
variables:
  nodeImage: registry.access.redhat.com/ubi8/nodejs-18
attributes:
  tier: frontend
components:
  - name: runtime
    attributes:
      role: app
    container:
      image: "{{nodeImage}}:latest"
      memoryLimit: 1024Mi
      mountSources: true
      volumeMounts:
        - name: npm-cache
          path: /opt/app-root/src/.npm
      endpoints:
        - name: http
          targetPort: 3000
  - name: npm-cache
    volume:
      size: 1Gi
  - name: tools
    attributes:
      role: dev
    container:
      image: busybox
commands:
  - id: install
    exec:
      component: runtime
      commandLine: npm install
      workingDir: ${PROJECT_SOURCE}
      group:
        kind: build
        isDefault: true
  - id: run
    exec:
      component: runtime
      commandLine: npm start
      group:
        kind: run
        isDefault: true
  - id: deploy
    composite:
      commands: [install, run]
projects:
  - name: web
    git:
      remotes:
        origin: https://github.com/acme/web.git
  - name: archive
    zip:
      location: https://example.com/web.zip
events:
  postStart: [install]
"#;

    /// 2.0.0 devfile: no top-level variables or attributes.
    pub const BASE_SCHEMA: &str = r#"schemaVersion: 2.0.0
metadata:
  name: legacy
components:
  - name: runtime
    container:
      image: python:3.11
"#;

    /// Exec command pointing at a component that does not exist.
    pub const BROKEN_REFERENCE: &str = r#"schemaVersion: 2.2.0
components:
  - name: runtime
    container:
      image: node:18
commands:
  - id: run
    exec:
      component: ghost
      commandLine: npm start
"#;

    /// Undeclared variable reference; valid otherwise.
    pub const UNDECLARED_VARIABLE: &str = r#"schemaVersion: 2.1.0
components:
  - name: runtime
    container:
      image: "{{missing}}"
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "schemaVersion: [unclosed";
}

/// A test fixture that provides a temporary directory with an optional
/// `devfile.yaml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `devfile.yaml` with the given content.
    pub fn with_devfile(self, content: &str) -> Self {
        self.with_file("devfile.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to `devfile.yaml`.
    pub fn devfile_path(&self) -> PathBuf {
        self.temp_dir.path().join("devfile.yaml")
    }

    /// Current content of `devfile.yaml`.
    pub fn read_devfile(&self) -> String {
        std::fs::read_to_string(self.devfile_path()).expect("Failed to read devfile")
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// `DEVFILE_PATH` is cleared so the default `devfile.yaml` is used.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("devfile");
        cmd.current_dir(self.path())
            .env_remove("DEVFILE_PATH")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_devfile() {
        let fixture = TestFixture::new().with_devfile(devfiles::BASE_SCHEMA);
        assert!(fixture.devfile_path().exists());
    }

    #[test]
    fn test_devfiles_are_valid_yaml() {
        for content in [
            devfiles::NODEJS,
            devfiles::BASE_SCHEMA,
            devfiles::BROKEN_REFERENCE,
            devfiles::UNDECLARED_VARIABLE,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(content).expect("Devfile should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(devfiles::INVALID_YAML).is_err());
    }
}
