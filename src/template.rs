//! # Template Rendering
//!
//! Renders the solution's catalog template: a text file containing
//! `$PLACEHOLDER` markers that are replaced with the solution's derived text
//! fields. The rendered file is named after the solution id.
//!
//! ## Placeholders
//!
//! | Placeholder | Value |
//! |---|---|
//! | `$INGESTION_ID` | solution id with `_` replaced by `-` |
//! | `$SOLUTION_ID` | solution id |
//! | `$SOLUTION_NAME` | blueprint title |
//! | `$SOLUTION_TITLE` | blueprint title |
//! | `$SOLUTION_SUMMARY` | description tagline |
//! | `$SOLUTION_DESCRIPTION` | detailed description |
//! | `$DIAGRAM_DESCRIPTION` | one message block per architecture step |
//!
//! Substitution is a single left-to-right pass: text inserted for one
//! placeholder is never scanned for further placeholders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::{TEMPLATE_EXTENSION, TEMPLATE_FILE};
use crate::error::{Error, Result};
use crate::metadata::BlueprintMetadata;
use crate::validate::validate_text_fields;

const DIAGRAM_STEP_MESSAGE: &str = "  {msg desc=\"Step $COUNT of $SOLUTION_NAME diagram description\"}\n    $SOLUTION_DIAGRAM_DESCRIPTION\n  {/msg}\n";
const LINE_SEPARATOR: &str = "  {\\n}\n";

/// Text derived from the blueprint for template rendering only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFields {
    pub name: String,
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub diagram_steps: Vec<String>,
}

impl TextFields {
    /// Derives the text fields from blueprint metadata.
    ///
    /// The architecture steps come from `info.description.architecture`,
    /// falling back to `content.architecture.description` when empty.
    pub fn from_metadata(blueprint: &BlueprintMetadata, solution_id_override: Option<&str>) -> Self {
        let info = &blueprint.spec.info;
        let diagram_steps = if info.description.architecture.is_empty() {
            blueprint.spec.content.architecture.description.clone()
        } else {
            info.description.architecture.clone()
        };

        Self {
            name: info.title.clone(),
            id: solution_id(&info.title, solution_id_override),
            title: info.title.clone(),
            summary: info.description.tagline.clone(),
            description: info.description.detailed.clone(),
            diagram_steps,
        }
    }
}

/// Returns the override when non-empty, otherwise the name lower-cased with
/// `-` and spaces replaced by `_`.
pub fn solution_id(name: &str, solution_id_override: Option<&str>) -> String {
    match solution_id_override {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => name.to_lowercase().replace(['-', ' '], "_"),
    }
}

/// The display form of a solution id.
pub fn readable_solution_id(solution_id: &str) -> String {
    solution_id.replace('_', "-")
}

/// Builds one numbered message block per step, separated by line markers.
///
/// The step text is inserted first, so `$SOLUTION_NAME` and `$COUNT` inside
/// a step are expanded as well.
pub fn diagram_description(steps: &[String], solution_name: &str) -> String {
    let mut buffer = String::new();
    for (idx, step) in steps.iter().enumerate() {
        if idx > 0 {
            buffer.push_str(LINE_SEPARATOR);
        }
        let message = DIAGRAM_STEP_MESSAGE
            .replace("$SOLUTION_DIAGRAM_DESCRIPTION", step)
            .replace("$SOLUTION_NAME", solution_name)
            .replace("$COUNT", &(idx + 1).to_string());
        buffer.push_str(&message);
    }
    buffer
}

/// Replaces `$`-prefixed placeholders in one pass.
///
/// At each `$` the replacements are tried in order and the first match
/// wins; a `$` matching none is copied through.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match replacements.iter().find(|(from, _)| tail.starts_with(from)) {
            Some((from, to)) => {
                out.push_str(to);
                rest = &tail[from.len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Where the template comes from and where the rendered file goes.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    pub extension: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(TEMPLATE_FILE),
            output_dir: PathBuf::from("."),
            extension: TEMPLATE_EXTENSION.to_string(),
        }
    }
}

impl RenderOptions {
    /// Path of the rendered file for a solution id.
    pub fn output_path(&self, solution_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", solution_id, self.extension))
    }
}

/// Substitutes the text fields into a template string.
pub fn render_str(template: &str, text_fields: &TextFields) -> String {
    let ingestion_id = readable_solution_id(&text_fields.id);
    let diagram = diagram_description(&text_fields.diagram_steps, &text_fields.name);
    substitute(
        template,
        &[
            ("$INGESTION_ID", ingestion_id.as_str()),
            ("$SOLUTION_ID", text_fields.id.as_str()),
            ("$SOLUTION_NAME", text_fields.name.as_str()),
            ("$SOLUTION_TITLE", text_fields.title.as_str()),
            ("$SOLUTION_SUMMARY", text_fields.summary.as_str()),
            ("$SOLUTION_DESCRIPTION", text_fields.description.as_str()),
            ("$DIAGRAM_DESCRIPTION", diagram.as_str()),
        ],
    )
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read template '{}': {}", path.display(), e),
    })
}

/// Validates the text fields and renders the template in memory.
///
/// Lets a caller check that rendering succeeds before it writes anything.
pub fn render_to_string(text_fields: &TextFields, options: &RenderOptions) -> Result<String> {
    validate_text_fields(text_fields)?;
    let template = read_template(&options.template_path)?;
    Ok(render_str(&template, text_fields))
}

/// Writes rendered output to `path`.
pub fn write_output(path: &Path, output: &str) -> Result<()> {
    fs::write(path, output).map_err(|e| Error::Filesystem {
        message: format!("Failed to write '{}': {}", path.display(), e),
    })?;
    log::info!("Rendered template to {}", path.display());
    Ok(())
}

/// Validates the text fields, renders the template and writes
/// `<solution id>.<extension>` into the output directory.
///
/// Returns the path of the written file. Nothing is written when validation
/// fails or the template cannot be read.
pub fn render(text_fields: &TextFields, options: &RenderOptions) -> Result<PathBuf> {
    let output = render_to_string(text_fields, options)?;
    let path = options.output_path(&text_fields.id);
    write_output(&path, &output)?;
    Ok(path)
}
