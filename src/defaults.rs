//! Default values for solution-gen.
//!
//! This module provides centralized default values used by the generator,
//! the overlay merger, the template renderer and the CLI, so that none of
//! them hides its own copy of a baseline list or a fixed file name.

/// Roles the deploying service account always needs, appended after the
/// blueprint's own project-level roles.
pub const REQUIRED_ROLES: [&str; 3] = [
    "roles/serviceusage.serviceUsageAdmin",
    "roles/iam.serviceAccountAdmin",
    "roles/resourcemanager.projectIamAdmin",
];

/// APIs every deployment needs in addition to the blueprint's services.
pub const REQUIRED_APIS: [&str; 1] = ["config.googleapis.com"];

/// Inputs the catalog supplies itself; they never become configuration
/// sections.
pub const DEFAULT_INPUTS: [&str; 3] = ["project_id", "region", "labels"];

/// Icon asset name written into every Solution record.
pub const ICON_URL: &str = "solution_icon.png";

/// Architecture diagram asset name written into every Solution record.
pub const DIAGRAM_URL: &str = "solution_diagram.png";

/// Sentinel for an unknown cost estimate.
pub const UNKNOWN_COST_USD: f64 = -1.0;

/// Prefix of a cost description carrying a machine-readable USD amount.
pub const COST_DESCRIPTION_PREFIX: &str = "cost of this solution is $";

/// Blueprint metadata file inside a blueprint directory.
pub const METADATA_FILE: &str = "metadata.yaml";

/// Deploy-time UI metadata file inside a blueprint directory.
pub const DISPLAY_METADATA_FILE: &str = "metadata.display.yaml";

/// Overlay document read from the working directory.
pub const OVERLAY_FILE: &str = "overlay.textproto";

/// Template rendered with the solution's text fields.
pub const TEMPLATE_FILE: &str = "soy_template.soy";

/// Extension of the rendered template.
pub const TEMPLATE_EXTENSION: &str = "soy";

/// Returns the baseline roles as owned strings.
pub fn required_roles() -> Vec<String> {
    REQUIRED_ROLES.iter().map(|r| r.to_string()).collect()
}

/// Returns the baseline APIs as owned strings.
pub fn required_apis() -> Vec<String> {
    REQUIRED_APIS.iter().map(|a| a.to_string()).collect()
}

/// Returns the default inputs as owned strings.
pub fn default_inputs() -> Vec<String> {
    DEFAULT_INPUTS.iter().map(|i| i.to_string()).collect()
}
