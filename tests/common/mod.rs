//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and metadata snippets to reduce
//! duplication across test files.
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
//!     let fixture = TestFixture::new().with_metadata(blueprints::COMPLETE);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::blueprints;
    pub use super::TestFixture;
}

/// Common metadata and template snippets for testing.
#[allow(dead_code)]
pub mod blueprints {
    /// Metadata yielding a complete Solution record.
    pub const COMPLETE: &str = r#"
apiVersion: blueprints.cloud.google.com/v1alpha1
kind: BlueprintMetadata
metadata:
  name: terraform-example-webapp
spec:
  info:
    title: Example Web-App
    source:
      repo: https://github.com/example/terraform-example-webapp.git
    description:
      tagline: Run a web app on Cloud Run
      detailed: Deploys a containerised web app backed by a database.
      architecture:
        - Users reach the app through a load balancer
        - Cloud Run serves the requests
    deploymentDuration:
      configurationSecs: 90
      deploymentSecs: 600
    costEstimate:
      description: cost of this solution is $12.5
      url: https://cloud.google.com/products/calculator
    cloudProducts:
      - productId: SERVERLESS_SECTION
        pageUrl: run/detail
        label: Cloud Run
      - productId: BIGQUERY_SECTION
        label: BigQuery
  requirements:
    roles:
      - level: Project
        roles:
          - roles/run.admin
    services:
      - run.googleapis.com
  interfaces:
    variables:
      - name: project_id
        varType: string
        required: true
      - name: service_name
        varType: string
        defaultValue: webapp
        required: true
    outputs:
      - name: service_url
      - name: console_link
"#;

    /// Display metadata with UI hints for [`COMPLETE`].
    pub const DISPLAY: &str = r#"
spec:
  ui:
    input:
      variables:
        service_name:
          regexValidation: "^[a-z][a-z0-9-]*$"
    runtime:
      outputs:
        service_url:
          openInNewTab: true
"#;

    /// Metadata with two project-level role sets.
    pub const TWO_PROJECT_ROLE_SETS: &str = r#"
spec:
  info:
    title: Conflicting Roles
    source:
      repo: https://github.com/example/conflicting.git
  requirements:
    roles:
      - level: Project
        roles: [roles/run.admin]
      - level: Project
        roles: [roles/owner]
"#;

    /// Metadata missing everything the record requires.
    pub const INCOMPLETE: &str = r#"
spec:
  info:
    title: Incomplete
"#;

    /// A catalog template using every placeholder.
    pub const TEMPLATE: &str = "{namespace $INGESTION_ID}\n\
id: $SOLUTION_ID\n\
title: $SOLUTION_TITLE\n\
summary: $SOLUTION_SUMMARY\n\
description: $SOLUTION_DESCRIPTION\n\
$DIAGRAM_DESCRIPTION";

    /// An overlay touching every honoured field.
    pub const OVERLAY: &str = r#"
# hand-maintained corrections
git_source { ref: "v1.2.0" directory: "infra" }
cost_estimate_usd: 99.5
deploy_data {
  links { output_name: "console_link" show_in_notification: true }
  location_configs: CLOUD_RUN
}
"#;
}

/// Directory name matching the repository in [`blueprints::COMPLETE`].
pub const REPO_DIR: &str = "terraform-example-webapp";

/// A test fixture holding a blueprint directory, a template and an
/// output directory inside one temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_metadata(blueprints::COMPLETE)
///     .with_template(blueprints::TEMPLATE);
///
/// fixture.generate_command().assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with empty blueprint and output directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("out")
            .create_dir_all()
            .expect("Failed to create output directory");
        temp_dir
            .child(REPO_DIR)
            .child("modules/webapp")
            .create_dir_all()
            .expect("Failed to create blueprint directory");
        Self { temp_dir }
    }

    /// Add a `metadata.yaml` to the blueprint directory.
    pub fn with_metadata(self, content: &str) -> Self {
        self.with_blueprint_file("metadata.yaml", content)
    }

    /// Add a `metadata.display.yaml` to the blueprint directory.
    pub fn with_display(self, content: &str) -> Self {
        self.with_blueprint_file("metadata.display.yaml", content)
    }

    /// Add a file to the blueprint directory.
    pub fn with_blueprint_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.blueprint_path().join(name), content)
            .expect("Failed to write blueprint file");
        self
    }

    /// Add the catalog template at the fixture root.
    pub fn with_template(self, content: &str) -> Self {
        self.with_file("soy_template.soy", content)
    }

    /// Add an overlay at the fixture root.
    pub fn with_overlay(self, content: &str) -> Self {
        self.with_file("overlay.textproto", content)
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

    /// Get the path to the blueprint directory.
    pub fn blueprint_path(&self) -> PathBuf {
        self.temp_dir.path().join(REPO_DIR).join("modules/webapp")
    }

    /// Get the path to the output directory.
    pub fn output_path(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Reads a generated file from the output directory.
    #[allow(dead_code)]
    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_path().join(name)).expect("Failed to read output")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("solution-gen");
        cmd.current_dir(self.path())
            .env_remove("SOLUTION_GEN_OVERLAY")
            .env_remove("SOLUTION_GEN_TEMPLATE")
            .env_remove("SOLUTION_GEN_SOLUTION_ID")
            .arg("--color")
            .arg("never");
        cmd
    }

    /// Create a `generate` command for the fixture's blueprint and output
    /// directory.
    #[allow(dead_code)]
    pub fn generate_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("generate")
            .arg("--blueprint")
            .arg(self.blueprint_path())
            .arg("--output-dir")
            .arg(self.output_path());
        cmd
    }

    /// Create a `validate` command for the fixture's blueprint.
    #[allow(dead_code)]
    pub fn validate_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("validate").arg("--blueprint").arg(self.blueprint_path());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_directories() {
        let fixture = TestFixture::new();
        assert!(fixture.blueprint_path().is_dir());
        assert!(fixture.output_path().is_dir());
    }

    #[test]
    fn test_fixture_with_metadata() {
        let fixture = TestFixture::new().with_metadata(blueprints::COMPLETE);
        assert!(fixture.blueprint_path().join("metadata.yaml").exists());
    }

    #[test]
    fn test_blueprints_are_valid_yaml() {
        let snippets = [
            blueprints::COMPLETE,
            blueprints::DISPLAY,
            blueprints::TWO_PROJECT_ROLE_SETS,
            blueprints::INCOMPLETE,
        ];
        for snippet in snippets {
            let result: Result<serde_yaml::Value, _> = serde_yaml::from_str(snippet);
            assert!(result.is_ok(), "Snippet should be valid YAML: {}", snippet);
        }
    }
}
