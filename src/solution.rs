//! # Solution Record
//!
//! The catalog-facing record describing how to deploy a blueprint. Field
//! names follow the protobuf message definitions, so the text-format codec
//! in [`crate::textproto`] and the JSON output share one vocabulary.
//!
//! Message-typed fields are `Option`s: the generator and the overlay merger
//! both depend on telling "absent" apart from "present but empty". Scalar
//! fields follow proto3 rules, where the zero value means "unset".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub git_source: Option<GitSource>,
    pub deployment_estimate: Option<DeploymentEstimate>,
    pub cost_estimate_usd: f64,
    pub cost_estimate_link: String,
    pub deploy_data: Option<DeployData>,
    pub cloud_product_identifiers: Vec<CloudProductIdentifier>,
    pub documentation_link: String,
    pub neos_walkthrough_id: String,
    pub icon_url: String,
    pub diagram_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSource {
    pub repo: String,
    pub r#ref: String,
    pub directory: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentEstimate {
    pub configuration_minutes: i32,
    pub deployment_minutes: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployData {
    pub roles: Vec<String>,
    pub apis: Vec<String>,
    pub configuration_sections: Vec<ConfigurationSection>,
    pub links: Vec<DeploymentLink>,
    pub location_configs: Vec<LocationConfig>,
    pub is_singleton: bool,
    pub org_policy_checks: Vec<OrgPolicyCheck>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSection {
    pub properties: Vec<ConfigurationProperty>,
}

/// One user-facing deployment input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationProperty {
    pub name: String,
    /// `None` when the Terraform type has no catalog counterpart.
    pub r#type: Option<PropertyType>,
    pub default_value: String,
    pub is_required: bool,
    pub is_hidden: bool,
    pub validation: String,
    pub pattern: String,
    pub max_length: i32,
    pub min_length: i32,
    pub max_items: i32,
    pub min_items: i32,
    pub maximum: f32,
    pub minimum: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentLink {
    pub output_name: String,
    pub open_in_new_tab: bool,
    pub show_in_notification: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgPolicyCheck {
    pub id: String,
    pub required_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudProductIdentifier {
    pub label: String,
    pub console_product_identifier: Option<ConsoleProductIdentifier>,
}

impl CloudProductIdentifier {
    /// Section id of the console product, empty when none is set.
    pub fn section_id(&self) -> &str {
        self.console_product_identifier
            .as_ref()
            .map(|c| c.section_id.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleProductIdentifier {
    pub section_id: String,
    pub page_id: String,
    pub page_id_for_post_deployment_link: String,
}

/// Implements the text-format name mapping shared by the record's enums.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The enum value name used in text format and JSON.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("unknown {} value '{}'", stringify!($name), other)),
                }
            }
        }
    };
}

/// Type of a configuration property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Array,
}

text_enum!(PropertyType {
    String => "STRING",
    Number => "NUMBER",
    Boolean => "BOOLEAN",
    Array => "ARRAY",
});

/// A cloud product section that needs a region/location chosen at deploy
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationConfig {
    BigqueryDataTransfer,
    BigqueryDataset,
    CloudBuild,
    CloudDeploy,
    #[serde(rename = "CLOUD_FUNCTIONS_V2")]
    CloudFunctionsV2,
    CloudMemorystore,
    CloudRun,
    Compute,
}

text_enum!(LocationConfig {
    BigqueryDataTransfer => "BIGQUERY_DATA_TRANSFER",
    BigqueryDataset => "BIGQUERY_DATASET",
    CloudBuild => "CLOUD_BUILD",
    CloudDeploy => "CLOUD_DEPLOY",
    CloudFunctionsV2 => "CLOUD_FUNCTIONS_V2",
    CloudMemorystore => "CLOUD_MEMORYSTORE",
    CloudRun => "CLOUD_RUN",
    Compute => "COMPUTE",
});
