//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a
//! blueprint's metadata without writing anything.
//!
//! ## Functionality
//!
//! - **Record Completeness**: Generates the Solution record, which fails on
//!   conflicting project roles or missing required field groups.
//! - **Text Completeness**: Checks the fields the catalog template needs.
//! - **Pattern Validation**: Checks that every UI `regexValidation` pattern
//!   compiles. Broken patterns are warnings, errors under `--strict`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use solution_gen::metadata::BlueprintMetadata;
use solution_gen::output::{OutputConfig, Status};
use solution_gen::template::TextFields;
use solution_gen::validate::validate_text_fields;

use super::load_and_generate;

/// Check that a blueprint's metadata yields a complete Solution
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the blueprint directory containing metadata.yaml.
    #[arg(short, long, value_name = "DIR")]
    pub blueprint: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Returns `(variable, error)` for every UI validation pattern that does
/// not compile.
pub fn invalid_patterns(display: &BlueprintMetadata) -> Vec<(String, String)> {
    let mut invalid: Vec<(String, String)> = display
        .spec
        .ui
        .input
        .variables
        .iter()
        .filter(|(_, hint)| !hint.regex_validation.is_empty())
        .filter_map(|(name, hint)| {
            regex::Regex::new(&hint.regex_validation)
                .err()
                .map(|e| (name.clone(), e.to_string()))
        })
        .collect();
    invalid.sort();
    invalid
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating blueprint: {}",
        out.marker(Status::Scan),
        out.highlight(args.blueprint.display())
    );

    let loaded = match load_and_generate(&args.blueprint) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("{} {:#}", out.marker(Status::Err), e);
            return Err(anyhow::anyhow!("Blueprint validation failed"));
        }
    };
    println!("{} Solution record is complete", out.marker(Status::Ok));

    let mut has_errors = false;
    let mut has_warnings = false;

    let text_fields = TextFields::from_metadata(&loaded.blueprint, None);
    match validate_text_fields(&text_fields) {
        Ok(()) => println!("{} Template text fields are complete", out.marker(Status::Ok)),
        Err(e) => {
            println!("{} {}", out.marker(Status::Err), e);
            has_errors = true;
        }
    }

    for (variable, error) in invalid_patterns(&loaded.display) {
        println!(
            "{} Invalid validation pattern for variable '{}': {}",
            out.marker(Status::Warn),
            variable,
            error
        );
        has_warnings = true;
    }

    if let Some(deploy) = &loaded.solution.deploy_data {
        println!("\n{} Solution Summary:", out.marker(Status::Info));
        println!("   Solution id: {}", text_fields.id);
        println!("   Inputs: {}", deploy.configuration_sections.len());
        println!("   Outputs: {}", deploy.links.len());
        println!("   Roles: {}", deploy.roles.len());
        println!("   APIs: {}", deploy.apis.len());
        println!("   Location configs: {}", deploy.location_configs.len());
    }

    if has_errors {
        return Err(anyhow::anyhow!("Blueprint validation failed"));
    }
    if has_warnings && args.strict {
        return Err(anyhow::anyhow!(
            "Blueprint validation failed in strict mode"
        ));
    }

    if has_warnings {
        println!("{} Blueprint is valid but has warnings", out.marker(Status::Warn));
    } else {
        println!("{} Blueprint is valid", out.marker(Status::Ok));
    }
    Ok(())
}
