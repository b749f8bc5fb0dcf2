//! # Completeness Validation
//!
//! Two independent checks guard the pipeline's outputs: one over the text
//! fields feeding the template, one over the Solution record. Both collect
//! every violation before failing so a blueprint author can fix them all in
//! one pass.

use crate::error::{Error, Result};
use crate::solution::Solution;
use crate::template::TextFields;

/// Label reported when the record has no deploy data at all.
pub const MISSING_DEPLOY_DATA: &str = "Inputs, Outputs, Roles, APIs";

fn fail_if_any(subject: &str, fields: Vec<&str>) -> Result<()> {
    if fields.is_empty() {
        return Ok(());
    }
    Err(Error::Validation {
        subject: subject.to_string(),
        fields: fields.into_iter().map(String::from).collect(),
    })
}

/// Checks that every text field used by the template is populated.
pub fn validate_text_fields(text_fields: &TextFields) -> Result<()> {
    let mut invalid = Vec::new();
    if text_fields.name.is_empty() {
        invalid.push("solutionName");
    }
    if text_fields.description.is_empty() {
        invalid.push("solutionDescription");
    }
    if text_fields.title.is_empty() {
        invalid.push("solutionTitle");
    }
    if text_fields.summary.is_empty() {
        invalid.push("solutionSummary");
    }
    if text_fields.diagram_steps.is_empty() {
        invalid.push("solutionDiagramSteps");
    }
    fail_if_any("text fields", invalid)
}

/// Checks that the Solution record carries every required field group.
pub fn validate_solution(solution: &Solution) -> Result<()> {
    let mut invalid = Vec::new();
    if solution
        .git_source
        .as_ref()
        .map_or(true, |git| git.repo.is_empty())
    {
        invalid.push("Repository source");
    }
    if solution.cloud_product_identifiers.is_empty() {
        invalid.push("CloudProductIdentifier");
    }
    if solution.deployment_estimate.is_none() {
        invalid.push("DeploymentEstimate");
    }
    match &solution.deploy_data {
        None => invalid.push(MISSING_DEPLOY_DATA),
        Some(deploy) => {
            if deploy.roles.is_empty() {
                invalid.push("Roles");
            }
            if deploy.apis.is_empty() {
                invalid.push("APIs");
            }
            if deploy.links.is_empty() {
                invalid.push("Outputs");
            }
        }
    }
    fail_if_any("solution", invalid)
}
