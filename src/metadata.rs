//! # Blueprint Metadata Schema and Loading
//!
//! This module defines the data structures that represent a blueprint's
//! `metadata.yaml` and `metadata.display.yaml` files, as well as the logic for
//! loading them. Both files share the `BlueprintMetadata` shape: the first
//! describes the module itself, the second carries the deploy-time UI hints
//! under `spec.ui`.
//!
//! Every field is optional and falls back to its zero value, so a sparse
//! metadata file loads successfully and any missing required information is
//! reported later by the validator, all at once.

use crate::defaults::{DISPLAY_METADATA_FILE, METADATA_FILE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root of a blueprint metadata document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintMetadata {
    pub api_version: String,
    pub kind: String,
    pub metadata: ResourceMetadata,
    pub spec: BlueprintSpec,
}

/// Kubernetes-style object metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceMetadata {
    pub name: String,
    pub annotations: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintSpec {
    pub info: BlueprintInfo,
    pub content: BlueprintContent,
    pub interfaces: BlueprintInterfaces,
    pub requirements: BlueprintRequirements,
    pub ui: BlueprintUi,
}

/// General information about the blueprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintInfo {
    pub title: String,
    pub source: Option<BlueprintRepoDetail>,
    pub version: String,
    pub description: BlueprintDescription,
    pub icon: String,
    pub deployment_duration: BlueprintTimeEstimate,
    pub cost_estimate: BlueprintCostEstimate,
    pub cloud_products: Vec<BlueprintCloudProduct>,
    pub org_policy_checks: Vec<BlueprintOrgPolicyCheck>,
    pub single_deployment: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintRepoDetail {
    pub repo: String,
    pub source_type: String,
    pub dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintDescription {
    pub tagline: String,
    pub detailed: String,
    pub pre_deploy: String,
    pub html: String,
    pub eula_urls: Vec<String>,
    /// Architecture steps; when empty, `content.architecture.description`
    /// is used instead.
    pub architecture: Vec<String>,
}

/// Estimated configuration and deployment time, in seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintTimeEstimate {
    pub configuration_secs: i64,
    pub deployment_secs: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintCostEstimate {
    pub description: String,
    pub url: String,
}

/// A cloud product used by the blueprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintCloudProduct {
    pub product_id: String,
    pub page_url: String,
    pub label: String,
    pub is_external: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintOrgPolicyCheck {
    pub policy_id: String,
    pub required_values: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintContent {
    pub architecture: BlueprintArchitecture,
    pub documentation: Vec<BlueprintListContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintArchitecture {
    pub diagram_url: String,
    pub description: Vec<String>,
}

/// A titled link, used for documentation entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintListContent {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintInterfaces {
    pub variables: Vec<BlueprintVariable>,
    pub outputs: Vec<BlueprintOutput>,
}

/// A Terraform input variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintVariable {
    pub name: String,
    pub description: String,
    pub var_type: String,
    /// Raw default value; `None` when the variable has no default.
    pub default_value: Option<serde_yaml::Value>,
    pub required: bool,
}

/// A Terraform output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintOutput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintRequirements {
    pub roles: Vec<BlueprintRoles>,
    pub services: Vec<String>,
}

/// A set of IAM roles granted at one level of the resource hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintRoles {
    pub level: String,
    pub roles: Vec<String>,
    pub parent: String,
}

impl BlueprintRoles {
    /// Level label marking the roles granted on the deployment project.
    pub const PROJECT_LEVEL: &'static str = "Project";

    pub fn is_project_level(&self) -> bool {
        self.level == Self::PROJECT_LEVEL
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintUi {
    pub input: BlueprintUiInput,
    pub runtime: BlueprintUiOutput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintUiInput {
    /// UI hints keyed by variable name.
    pub variables: HashMap<String, DisplayVariable>,
}

/// Deploy-time UI hints for one input variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayVariable {
    pub name: String,
    pub title: String,
    pub invisible: bool,
    pub regex_validation: String,
    pub minimum: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintUiOutput {
    /// UI hints keyed by output name.
    pub outputs: HashMap<String, DisplayOutput>,
}

/// Deploy-time UI hints for one output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOutput {
    pub open_in_new_tab: bool,
    pub show_in_notification: bool,
    pub label: String,
}

/// Parses a YAML string into `BlueprintMetadata`.
///
/// An empty document yields the default (all-empty) metadata.
pub fn parse(yaml_content: &str) -> Result<BlueprintMetadata> {
    if yaml_content.trim().is_empty() {
        return Ok(BlueprintMetadata::default());
    }
    serde_yaml::from_str(yaml_content).map_err(Error::Yaml)
}

/// Loads a metadata file from disk.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BlueprintMetadata> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read metadata '{}': {}", path.display(), e),
    })?;
    parse(&content).map_err(|e| Error::MetadataParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Loads the blueprint and display metadata from a blueprint directory.
///
/// The display file is optional; when it does not exist the UI hints are
/// all empty.
pub fn from_blueprint_dir<P: AsRef<Path>>(dir: P) -> Result<(BlueprintMetadata, BlueprintMetadata)> {
    let dir = dir.as_ref();
    let blueprint = from_file(dir.join(METADATA_FILE))?;

    let display_path = dir.join(DISPLAY_METADATA_FILE);
    let display = if display_path.exists() {
        from_file(&display_path)?
    } else {
        log::debug!(
            "No display metadata at {}, using empty UI hints",
            display_path.display()
        );
        BlueprintMetadata::default()
    };

    Ok((blueprint, display))
}
