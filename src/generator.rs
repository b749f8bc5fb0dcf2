//! # Solution Record Generation
//!
//! Builds a [`Solution`] from a blueprint's metadata and its deploy-time UI
//! metadata. Each `add_*` deriver fills one group of fields from the source
//! metadata; [`generate`] runs them in a fixed order and finishes by
//! validating the record, so callers only ever see a complete Solution or an
//! error.
//!
//! Derivation is a pure function of its inputs: the baseline lists and the
//! blueprint path arrive through [`GeneratorConfig`], never from global
//! state, and identical inputs produce identical records.

use log::{debug, warn};

use crate::defaults;
use crate::error::{Error, Result};
use crate::metadata::{BlueprintMetadata, DisplayOutput, DisplayVariable};
use crate::solution::{
    CloudProductIdentifier, ConfigurationProperty, ConfigurationSection,
    ConsoleProductIdentifier, DeployData, DeploymentEstimate, DeploymentLink, GitSource,
    LocationConfig, OrgPolicyCheck, PropertyType, Solution,
};
use crate::validate::validate_solution;

/// Inputs to generation that do not come from the metadata files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Path of the blueprint, used to locate the module inside its repository.
    pub blueprint_path: String,
    /// Roles appended to the project-level roles when absent.
    pub required_roles: Vec<String>,
    /// APIs appended to the required services when absent.
    pub required_apis: Vec<String>,
    /// Inputs that never become configuration sections.
    pub default_inputs: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            blueprint_path: String::new(),
            required_roles: defaults::required_roles(),
            required_apis: defaults::required_apis(),
            default_inputs: defaults::default_inputs(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with the default baseline lists.
    pub fn new(blueprint_path: impl Into<String>) -> Self {
        Self {
            blueprint_path: blueprint_path.into(),
            ..Self::default()
        }
    }
}

/// Section ids with a dedicated location config.
const LOCATION_CONFIGS: &[(&str, LocationConfig)] = &[
    ("BIGQUERY_SECTION_transfers", LocationConfig::BigqueryDataTransfer),
    ("CLOUD_BUILD_SECTION", LocationConfig::CloudBuild),
    ("CLOUD_DEPLOY_SECTION", LocationConfig::CloudDeploy),
    ("FUNCTIONS_SECTION", LocationConfig::CloudFunctionsV2),
    ("CACHE_SECTION", LocationConfig::CloudMemorystore),
    ("SERVERLESS_SECTION", LocationConfig::CloudRun),
    ("COMPUTE_SECTION", LocationConfig::Compute),
];

/// Generates a validated Solution record.
///
/// # Arguments
/// * `blueprint` - The blueprint's `metadata.yaml` contents
/// * `display` - The blueprint's `metadata.display.yaml` contents (UI hints)
/// * `config` - Blueprint path and baseline lists
///
/// # Errors
/// * `Error::MultipleProjectRoleSets` if more than one project-level role
///   set is declared
/// * `Error::Validation` if any required field group ends up empty
pub fn generate(
    blueprint: &BlueprintMetadata,
    display: &BlueprintMetadata,
    config: &GeneratorConfig,
) -> Result<Solution> {
    let mut solution = Solution::default();

    add_git_source(&mut solution, blueprint, &config.blueprint_path);
    add_deployment_time_estimate(&mut solution, blueprint);
    add_cost_estimate(&mut solution, blueprint);

    solution.deploy_data = Some(DeployData::default());
    add_roles(&mut solution, blueprint, &config.required_roles)?;
    add_apis(&mut solution, blueprint, &config.required_apis);
    add_variables(&mut solution, blueprint, display, &config.default_inputs);
    add_outputs(&mut solution, blueprint, display);
    add_documentation_links(&mut solution, blueprint);
    add_is_singleton(&mut solution, blueprint);
    add_org_policy_checks(&mut solution, blueprint);
    add_cloud_product_identifiers(&mut solution, blueprint);
    add_location_configs(&mut solution);

    solution.icon_url = defaults::ICON_URL.to_string();
    solution.diagram_url = defaults::DIAGRAM_URL.to_string();

    validate_solution(&solution)?;
    Ok(solution)
}

fn deploy_data(solution: &mut Solution) -> &mut DeployData {
    solution.deploy_data.get_or_insert_with(DeployData::default)
}

/// Sets the repository (without `.git`) and the module's directory inside it.
///
/// The directory is the part of `blueprint_path` after the first segment
/// equal to the repository name, or empty when no segment matches.
pub fn add_git_source(solution: &mut Solution, blueprint: &BlueprintMetadata, blueprint_path: &str) {
    let git_source = solution.git_source.get_or_insert_with(GitSource::default);
    if let Some(source) = &blueprint.spec.info.source {
        git_source.repo = source
            .repo
            .strip_suffix(".git")
            .unwrap_or(&source.repo)
            .to_string();
    }

    let repo_name = git_source.repo.rsplit('/').next().unwrap_or_default();
    let segments: Vec<&str> = blueprint_path.split('/').collect();
    git_source.directory = if repo_name.is_empty() {
        String::new()
    } else {
        segments
            .iter()
            .position(|segment| *segment == repo_name)
            .map(|idx| segments[idx + 1..].join("/"))
            .unwrap_or_default()
    };
    debug!(
        "git source: repo='{}' directory='{}'",
        git_source.repo, git_source.directory
    );
}

/// Converts seconds to whole minutes, rounding up and saturating at the
/// `i32` range.
pub fn ceil_minutes(seconds: i64) -> i32 {
    let minutes = seconds.div_euclid(60) + i64::from(seconds.rem_euclid(60) != 0);
    i32::try_from(minutes).unwrap_or(if minutes < 0 { i32::MIN } else { i32::MAX })
}

/// Sets the deployment estimate when both durations are positive.
pub fn add_deployment_time_estimate(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    let duration = &blueprint.spec.info.deployment_duration;
    if duration.configuration_secs > 0 && duration.deployment_secs > 0 {
        solution.deployment_estimate = Some(DeploymentEstimate {
            configuration_minutes: ceil_minutes(duration.configuration_secs),
            deployment_minutes: ceil_minutes(duration.deployment_secs),
        });
    }
}

/// Copies the cost link and extracts the USD amount from the description.
///
/// The amount stays at [`defaults::UNKNOWN_COST_USD`] unless the description
/// is the fixed prefix followed by a parsable finite number.
pub fn add_cost_estimate(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    let cost = &blueprint.spec.info.cost_estimate;
    if !cost.url.is_empty() {
        solution.cost_estimate_link = cost.url.clone();
    }

    solution.cost_estimate_usd = defaults::UNKNOWN_COST_USD;
    if let Some(amount) = cost
        .description
        .strip_prefix(defaults::COST_DESCRIPTION_PREFIX)
    {
        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() => solution.cost_estimate_usd = value,
            _ => debug!("ignoring unparsable cost amount '{}'", amount),
        }
    }
}

/// Seeds the roles from the single project-level role set and appends the
/// baseline roles that are missing.
///
/// A blueprint without any role entries gets no roles at all, so the record
/// fails validation instead of carrying only the baseline.
pub fn add_roles(
    solution: &mut Solution,
    blueprint: &BlueprintMetadata,
    required_roles: &[String],
) -> Result<()> {
    if blueprint.spec.requirements.roles.is_empty() {
        debug!("no role requirements declared, skipping roles");
        return Ok(());
    }
    let project_sets: Vec<_> = blueprint
        .spec
        .requirements
        .roles
        .iter()
        .filter(|r| r.is_project_level())
        .collect();
    if project_sets.len() > 1 {
        return Err(Error::MultipleProjectRoleSets {
            count: project_sets.len(),
        });
    }

    let mut roles: Vec<String> = project_sets
        .first()
        .map(|set| set.roles.clone())
        .unwrap_or_default();
    append_missing(&mut roles, required_roles);
    deploy_data(solution).roles = roles;
    Ok(())
}

/// Copies the required services and appends the baseline APIs that are
/// missing. Nothing is added when no services are declared.
pub fn add_apis(solution: &mut Solution, blueprint: &BlueprintMetadata, required_apis: &[String]) {
    if blueprint.spec.requirements.services.is_empty() {
        debug!("no services declared, skipping APIs");
        return;
    }
    let mut apis = blueprint.spec.requirements.services.clone();
    append_missing(&mut apis, required_apis);
    deploy_data(solution).apis = apis;
}

fn append_missing(list: &mut Vec<String>, baseline: &[String]) {
    for item in baseline {
        if !list.contains(item) {
            list.push(item.clone());
        }
    }
}

/// Builds one configuration section per required, non-default input.
pub fn add_variables(
    solution: &mut Solution,
    blueprint: &BlueprintMetadata,
    display: &BlueprintMetadata,
    default_inputs: &[String],
) {
    let no_hint = DisplayVariable::default();
    let mut sections = Vec::new();

    for variable in &blueprint.spec.interfaces.variables {
        if default_inputs.contains(&variable.name) || !variable.required {
            continue;
        }
        let hint = display
            .spec
            .ui
            .input
            .variables
            .get(&variable.name)
            .unwrap_or(&no_hint);

        let mut property = ConfigurationProperty {
            name: variable.name.clone(),
            is_required: variable.required,
            is_hidden: hint.invisible,
            validation: hint.regex_validation.clone(),
            ..Default::default()
        };
        let default_value = variable.default_value.as_ref().and_then(format_default_value);

        match variable.var_type.as_str() {
            "string" => {
                property.r#type = Some(PropertyType::String);
                property.default_value = default_value.unwrap_or_default();
                property.pattern = hint.regex_validation.clone();
                property.max_length = hint.maximum as i32;
                property.min_length = hint.minimum as i32;
            }
            "bool" => {
                property.r#type = Some(PropertyType::Boolean);
                property.default_value = default_value.unwrap_or_default();
            }
            "list" => {
                property.r#type = Some(PropertyType::Array);
                property.max_items = hint.maximum as i32;
                property.min_items = hint.minimum as i32;
            }
            "number" => {
                // integers and floats share the "number" type
                property.r#type = Some(PropertyType::Number);
                property.default_value = default_value.unwrap_or_default();
                property.maximum = hint.maximum as f32;
                property.minimum = hint.minimum as f32;
            }
            other => warn!(
                "variable '{}' has unsupported type '{}', leaving its type unset",
                variable.name, other
            ),
        }

        sections.push(ConfigurationSection {
            properties: vec![property],
        });
    }

    debug!("derived {} configuration sections", sections.len());
    deploy_data(solution).configuration_sections = sections;
}

/// Renders a default value the way a generic value printer would: scalars
/// bare, sequences as `[a b]`, mappings as `map[k:v]`. `None` for null.
pub fn format_default_value(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    fn render(value: &Value) -> String {
        match value {
            Value::Null => "<nil>".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(render).collect();
                format!("[{}]", parts.join(" "))
            }
            Value::Mapping(map) => {
                let mut parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}:{}", render(k), render(v)))
                    .collect();
                parts.sort();
                format!("map[{}]", parts.join(" "))
            }
            Value::Tagged(tagged) => render(&tagged.value),
        }
    }

    match value {
        Value::Null => None,
        other => Some(render(other)),
    }
}

/// Builds one deployment link per declared output.
pub fn add_outputs(solution: &mut Solution, blueprint: &BlueprintMetadata, display: &BlueprintMetadata) {
    let no_hint = DisplayOutput::default();
    let links: Vec<DeploymentLink> = blueprint
        .spec
        .interfaces
        .outputs
        .iter()
        .map(|output| {
            let hint = display
                .spec
                .ui
                .runtime
                .outputs
                .get(&output.name)
                .unwrap_or(&no_hint);
            DeploymentLink {
                output_name: output.name.clone(),
                open_in_new_tab: hint.open_in_new_tab,
                show_in_notification: hint.show_in_notification,
            }
        })
        .collect();
    deploy_data(solution).links = links;
}

/// Picks the landing page and walkthrough id out of the documentation list.
pub fn add_documentation_links(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    for doc in &blueprint.spec.content.documentation {
        match doc.title.to_lowercase().replace(' ', "_").as_str() {
            "landing_page" => solution.documentation_link = doc.url.clone(),
            "tutorial_walkthrough_id" => solution.neos_walkthrough_id = doc.url.clone(),
            _ => {}
        }
    }
}

pub fn add_is_singleton(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    deploy_data(solution).is_singleton = blueprint.spec.info.single_deployment;
}

pub fn add_org_policy_checks(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    deploy_data(solution).org_policy_checks = blueprint
        .spec
        .info
        .org_policy_checks
        .iter()
        .map(|check| OrgPolicyCheck {
            id: check.policy_id.clone(),
            required_values: check.required_values.clone(),
        })
        .collect();
}

/// Builds one product identifier per cloud product.
///
/// External products link their page URL directly; internal products use
/// the URL with `/` replaced by `_` as the console page id.
pub fn add_cloud_product_identifiers(solution: &mut Solution, blueprint: &BlueprintMetadata) {
    solution.cloud_product_identifiers = blueprint
        .spec
        .info
        .cloud_products
        .iter()
        .map(|product| {
            let mut console = ConsoleProductIdentifier {
                section_id: product.product_id.clone(),
                ..Default::default()
            };
            if !product.page_url.is_empty() {
                if product.is_external {
                    console.page_id = product.page_url.clone();
                    console.page_id_for_post_deployment_link = product.page_url.clone();
                } else {
                    console.page_id = product.page_url.replace('/', "_");
                }
            }
            CloudProductIdentifier {
                label: product.label.clone(),
                console_product_identifier: Some(console),
            }
        })
        .collect();
}

/// Maps a console section id to the location config it needs, if any.
pub fn location_config_for(section_id: &str) -> Option<LocationConfig> {
    LOCATION_CONFIGS
        .iter()
        .find(|(id, _)| *id == section_id)
        .map(|(_, config)| *config)
        .or_else(|| {
            section_id
                .contains("BIGQUERY")
                .then_some(LocationConfig::BigqueryDataset)
        })
}

/// Appends one location config per product identifier whose section needs
/// one. Must run after [`add_cloud_product_identifiers`].
pub fn add_location_configs(solution: &mut Solution) {
    let configs: Vec<LocationConfig> = solution
        .cloud_product_identifiers
        .iter()
        .filter_map(|identifier| location_config_for(identifier.section_id()))
        .collect();
    deploy_data(solution).location_configs.extend(configs);
}
