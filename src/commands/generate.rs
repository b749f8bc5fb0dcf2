//! # Generate Command Implementation
//!
//! Runs the full pipeline for one blueprint:
//! 1. Load `metadata.yaml` and `metadata.display.yaml`
//! 2. Derive and validate the Solution record
//! 3. Apply the overlay, if one exists, and validate again
//! 4. Render the catalog template in memory
//! 5. Write the record to `<solution id>.textproto` (or `.json`), then the
//!    template to `<solution id>.soy`
//!
//! Nothing is written unless the record and the text fields are complete.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::warn;
use std::path::PathBuf;

use solution_gen::defaults::{OVERLAY_FILE, TEMPLATE_EXTENSION, TEMPLATE_FILE};
use solution_gen::output::{OutputConfig, Status};
use solution_gen::solution::Solution;
use solution_gen::template::{self, RenderOptions, TextFields};
use solution_gen::{overlay, textproto, validate};

use super::load_and_generate;

/// Serialization of the generated record.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFormat {
    /// Protobuf text format
    Textproto,
    /// JSON
    Json,
}

impl RecordFormat {
    fn extension(self) -> &'static str {
        match self {
            RecordFormat::Textproto => "textproto",
            RecordFormat::Json => "json",
        }
    }

    fn serialize(self, solution: &Solution) -> Result<String> {
        match self {
            RecordFormat::Textproto => Ok(textproto::to_string(solution)),
            RecordFormat::Json => serde_json::to_string_pretty(solution)
                .map(|json| json + "\n")
                .context("Failed to serialize the Solution record as JSON"),
        }
    }
}

/// Generate the Solution record and catalog template for a blueprint
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the blueprint directory containing metadata.yaml.
    ///
    /// The part of the path after the repository's name becomes the
    /// record's git directory.
    #[arg(short, long, value_name = "DIR")]
    pub blueprint: PathBuf,

    /// Solution id to use instead of one derived from the blueprint title.
    #[arg(long, value_name = "ID", env = "SOLUTION_GEN_SOLUTION_ID")]
    pub solution_id: Option<String>,

    /// Overlay document overriding derived fields (ignored when absent).
    #[arg(long, value_name = "FILE", env = "SOLUTION_GEN_OVERLAY", default_value = OVERLAY_FILE)]
    pub overlay: PathBuf,

    /// Catalog template to render.
    #[arg(long, value_name = "FILE", env = "SOLUTION_GEN_TEMPLATE", default_value = TEMPLATE_FILE)]
    pub template: PathBuf,

    /// Directory for the generated files (defaults to current directory).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format of the generated Solution record.
    #[arg(long, value_enum, default_value_t = RecordFormat::Textproto)]
    pub format: RecordFormat,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `generate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    if !args.quiet {
        println!(
            "{} Generating solution for {}",
            out.marker(Status::Scan),
            out.highlight(args.blueprint.display())
        );
    }

    let loaded = load_and_generate(&args.blueprint)?;
    let mut solution = loaded.solution;

    overlay::apply_overlay_file(&mut solution, &args.overlay)
        .with_context(|| format!("Failed to apply overlay {}", args.overlay.display()))?;
    validate::validate_solution(&solution).context("Solution is incomplete after overlay")?;

    let record = args.format.serialize(&solution)?;
    let text_fields = TextFields::from_metadata(&loaded.blueprint, args.solution_id.as_deref());

    let options = RenderOptions {
        template_path: args.template.clone(),
        output_dir: output_dir.clone(),
        extension: TEMPLATE_EXTENSION.to_string(),
    };
    let rendered = template::render_to_string(&text_fields, &options)
        .with_context(|| format!("Failed to render template {}", args.template.display()))?;

    let record_path = output_dir.join(format!("{}.{}", text_fields.id, args.format.extension()));
    std::fs::write(&record_path, record)
        .with_context(|| format!("Failed to write {}", record_path.display()))?;

    let template_path = options.output_path(&text_fields.id);
    if let Err(e) = template::write_output(&template_path, &rendered) {
        // leave no record behind without its template
        if let Err(remove_err) = std::fs::remove_file(&record_path) {
            warn!("Failed to remove {}: {}", record_path.display(), remove_err);
        }
        return Err(e).context("Failed to write the rendered template");
    }

    if !args.quiet {
        let deploy = solution.deploy_data.as_ref();
        println!(
            "{} Solution {} ({} inputs, {} outputs, {} roles, {} APIs)",
            out.marker(Status::Ok),
            out.highlight(&text_fields.id),
            deploy.map_or(0, |d| d.configuration_sections.len()),
            deploy.map_or(0, |d| d.links.len()),
            deploy.map_or(0, |d| d.roles.len()),
            deploy.map_or(0, |d| d.apis.len()),
        );
        println!(
            "{} Wrote {}",
            out.marker(Status::Write),
            out.highlight(template_path.display())
        );
        println!(
            "{} Wrote {}",
            out.marker(Status::Write),
            out.highlight(record_path.display())
        );
    }

    Ok(())
}
