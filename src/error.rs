//! # Error Handling
//!
//! This module defines the centralized error type for the `solution-gen`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure mode of the generation pipeline, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while loading metadata, generating a Solution record, applying an
//!   overlay, validating, rendering, or writing output.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! All of these errors are fatal to a run. The only non-fatal conditions in
//! the pipeline (an absent overlay file and an unparsable cost string) never
//! surface as an `Error` at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for solution-gen operations
#[derive(Error, Debug)]
pub enum Error {
    /// The blueprint declares more than one requirement entry at project level.
    #[error("more than one set of project level roles present in blueprint metadata (found {count})")]
    MultipleProjectRoleSets { count: usize },

    /// One or more required fields are missing or empty.
    ///
    /// `fields` lists every violation, not just the first.
    #[error("{subject} validation failed, these fields are missing or empty: {}", fields.join(", "))]
    Validation {
        /// What was being validated (e.g. "solution" or "text fields")
        subject: String,
        /// Labels of every offending field group
        fields: Vec<String>,
    },

    /// The overlay document is not valid protobuf text format for a Solution.
    #[error("Overlay parsing error at line {line}: {message}")]
    OverlayParse { line: usize, message: String },

    /// The blueprint metadata could not be parsed.
    #[error("Metadata parsing error in {}: {message}", path.display())]
    MetadataParse { path: PathBuf, message: String },

    /// A filesystem operation failed, with the offending path in the message.
    ///
    /// Every read and write in the library reports through this variant.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Field labels of a validation failure, empty for every other kind.
    pub fn invalid_fields(&self) -> &[String] {
        match self {
            Error::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
