//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `solution-gen` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `solution_gen` library.

pub mod generate;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;

use solution_gen::generator::{generate, GeneratorConfig};
use solution_gen::metadata::{self, BlueprintMetadata};
use solution_gen::solution::Solution;

/// Metadata and generated record for one blueprint.
pub struct LoadedBlueprint {
    pub blueprint: BlueprintMetadata,
    pub display: BlueprintMetadata,
    pub solution: Solution,
}

/// Loads the blueprint's metadata files and generates its Solution record.
pub fn load_and_generate(blueprint_dir: &Path) -> Result<LoadedBlueprint> {
    let (blueprint, display) = metadata::from_blueprint_dir(blueprint_dir).with_context(|| {
        format!(
            "Failed to load blueprint metadata from {}",
            blueprint_dir.display()
        )
    })?;

    let config = GeneratorConfig::new(blueprint_dir.to_string_lossy());
    let solution = generate(&blueprint, &display, &config)
        .context("Failed to generate the Solution record")?;

    Ok(LoadedBlueprint {
        blueprint,
        display,
        solution,
    })
}
