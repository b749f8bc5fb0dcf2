//! # Solution Generator Library
//!
//! This library turns a blueprint's metadata into a catalog "Solution"
//! record and a rendered catalog template. It is designed to be used by the
//! `solution-gen` command-line tool but can also be embedded in other
//! publishing pipelines.
//!
//! ## Quick Example
//!
//! ```
//! use solution_gen::generator::{generate, GeneratorConfig};
//! use solution_gen::metadata;
//!
//! let blueprint = metadata::parse(r#"
//! spec:
//!   info:
//!     title: Example
//!     source:
//!       repo: https://github.com/example/terraform-example.git
//!     deploymentDuration:
//!       configurationSecs: 60
//!       deploymentSecs: 300
//!     cloudProducts:
//!       - productId: SERVERLESS_SECTION
//!         label: Cloud Run
//!   requirements:
//!     roles:
//!       - level: Project
//!         roles: [roles/run.admin]
//!     services: [run.googleapis.com]
//!   interfaces:
//!     outputs:
//!       - name: service_url
//! "#).unwrap();
//! let display = metadata::BlueprintMetadata::default();
//!
//! let config = GeneratorConfig::new("terraform-example/modules/web");
//! let solution = generate(&blueprint, &display, &config).unwrap();
//! assert_eq!(solution.git_source.unwrap().directory, "modules/web");
//! ```
//!
//! ## Core Concepts
//!
//! - **Metadata (`metadata`)**: the serde model of `metadata.yaml` and
//!   `metadata.display.yaml`.
//! - **Solution record (`solution`)**: the catalog-facing output record.
//! - **Generation (`generator`)**: field derivation rules from metadata to
//!   record.
//! - **Overlay (`overlay`)**: hand-written partial records that override a
//!   few derived fields.
//! - **Validation (`validate`)**: completeness checks reporting every
//!   missing field at once.
//! - **Templates (`template`)**: placeholder substitution into the catalog
//!   template.
//! - **Text format (`textproto`)**: protobuf text format parsing and
//!   writing for records and overlays.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: read the blueprint and display metadata.
//! 2.  **Generate**: derive and validate the Solution record.
//! 3.  **Overlay**: apply `overlay.textproto` when present.
//! 4.  **Validate**: re-check the record after overrides.
//! 5.  **Render**: write the catalog template and the serialized record.

pub mod defaults;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod output;
pub mod overlay;
pub mod solution;
pub mod template;
pub mod textproto;
pub mod validate;

#[cfg(test)]
mod generator_proptest;
