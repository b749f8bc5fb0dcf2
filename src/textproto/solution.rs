//! Text-format bindings for the Solution record types.

use super::{Field, TextMessage, TextWriter, ToText};
use crate::error::Result;
use crate::solution::{
    CloudProductIdentifier, ConfigurationProperty, ConfigurationSection,
    ConsoleProductIdentifier, DeployData, DeploymentEstimate, DeploymentLink, GitSource,
    OrgPolicyCheck, Solution,
};

impl TextMessage for Solution {
    const NAME: &'static str = "Solution";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "git_source" => field.merge_into(&mut self.git_source)?,
            "deployment_estimate" => field.merge_into(&mut self.deployment_estimate)?,
            "cost_estimate_usd" => self.cost_estimate_usd = field.as_f64()?,
            "cost_estimate_link" => self.cost_estimate_link = field.as_string()?,
            "deploy_data" => field.merge_into(&mut self.deploy_data)?,
            "cloud_product_identifiers" => {
                self.cloud_product_identifiers.push(field.as_message()?)
            }
            "documentation_link" => self.documentation_link = field.as_string()?,
            "neos_walkthrough_id" => self.neos_walkthrough_id = field.as_string()?,
            "icon_url" => self.icon_url = field.as_string()?,
            "diagram_url" => self.diagram_url = field.as_string()?,
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for Solution {
    fn write_text(&self, w: &mut TextWriter) {
        if let Some(git_source) = &self.git_source {
            w.message("git_source", git_source);
        }
        if let Some(estimate) = &self.deployment_estimate {
            w.message("deployment_estimate", estimate);
        }
        w.double("cost_estimate_usd", self.cost_estimate_usd);
        w.string("cost_estimate_link", &self.cost_estimate_link);
        if let Some(deploy_data) = &self.deploy_data {
            w.message("deploy_data", deploy_data);
        }
        for identifier in &self.cloud_product_identifiers {
            w.message("cloud_product_identifiers", identifier);
        }
        w.string("documentation_link", &self.documentation_link);
        w.string("neos_walkthrough_id", &self.neos_walkthrough_id);
        w.string("icon_url", &self.icon_url);
        w.string("diagram_url", &self.diagram_url);
    }
}

impl TextMessage for GitSource {
    const NAME: &'static str = "GitSource";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "repo" => self.repo = field.as_string()?,
            "ref" => self.r#ref = field.as_string()?,
            "directory" => self.directory = field.as_string()?,
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for GitSource {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("repo", &self.repo);
        w.string("ref", &self.r#ref);
        w.string("directory", &self.directory);
    }
}

impl TextMessage for DeploymentEstimate {
    const NAME: &'static str = "DeploymentEstimate";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "configuration_minutes" => self.configuration_minutes = field.as_i32()?,
            "deployment_minutes" => self.deployment_minutes = field.as_i32()?,
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for DeploymentEstimate {
    fn write_text(&self, w: &mut TextWriter) {
        w.int("configuration_minutes", self.configuration_minutes);
        w.int("deployment_minutes", self.deployment_minutes);
    }
}

impl TextMessage for DeployData {
    const NAME: &'static str = "DeployData";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "roles" => self.roles.push(field.as_string()?),
            "apis" => self.apis.push(field.as_string()?),
            "configuration_sections" => self.configuration_sections.push(field.as_message()?),
            "links" => self.links.push(field.as_message()?),
            "location_configs" => self.location_configs.push(field.as_enum()?),
            "is_singleton" => self.is_singleton = field.as_bool()?,
            "org_policy_checks" => self.org_policy_checks.push(field.as_message()?),
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for DeployData {
    fn write_text(&self, w: &mut TextWriter) {
        w.strings("roles", &self.roles);
        w.strings("apis", &self.apis);
        for section in &self.configuration_sections {
            w.message("configuration_sections", section);
        }
        for link in &self.links {
            w.message("links", link);
        }
        for config in &self.location_configs {
            w.enumeration("location_configs", config);
        }
        w.boolean("is_singleton", self.is_singleton);
        for check in &self.org_policy_checks {
            w.message("org_policy_checks", check);
        }
    }
}

impl TextMessage for ConfigurationSection {
    const NAME: &'static str = "ConfigurationSection";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "properties" => self.properties.push(field.as_message()?),
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for ConfigurationSection {
    fn write_text(&self, w: &mut TextWriter) {
        for property in &self.properties {
            w.message("properties", property);
        }
    }
}

impl TextMessage for ConfigurationProperty {
    const NAME: &'static str = "ConfigurationProperty";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "name" => self.name = field.as_string()?,
            "type" => self.r#type = Some(field.as_enum()?),
            "default_value" => self.default_value = field.as_string()?,
            "is_required" => self.is_required = field.as_bool()?,
            "is_hidden" => self.is_hidden = field.as_bool()?,
            "validation" => self.validation = field.as_string()?,
            "pattern" => self.pattern = field.as_string()?,
            "max_length" => self.max_length = field.as_i32()?,
            "min_length" => self.min_length = field.as_i32()?,
            "max_items" => self.max_items = field.as_i32()?,
            "min_items" => self.min_items = field.as_i32()?,
            "maximum" => self.maximum = field.as_f32()?,
            "minimum" => self.minimum = field.as_f32()?,
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for ConfigurationProperty {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("name", &self.name);
        if let Some(property_type) = &self.r#type {
            w.enumeration("type", property_type);
        }
        w.string("default_value", &self.default_value);
        w.boolean("is_required", self.is_required);
        w.boolean("is_hidden", self.is_hidden);
        w.string("validation", &self.validation);
        w.string("pattern", &self.pattern);
        w.int("max_length", self.max_length);
        w.int("min_length", self.min_length);
        w.int("max_items", self.max_items);
        w.int("min_items", self.min_items);
        w.float("maximum", self.maximum);
        w.float("minimum", self.minimum);
    }
}

impl TextMessage for DeploymentLink {
    const NAME: &'static str = "DeploymentLink";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "output_name" => self.output_name = field.as_string()?,
            "open_in_new_tab" => self.open_in_new_tab = field.as_bool()?,
            "show_in_notification" => self.show_in_notification = field.as_bool()?,
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for DeploymentLink {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("output_name", &self.output_name);
        w.boolean("open_in_new_tab", self.open_in_new_tab);
        w.boolean("show_in_notification", self.show_in_notification);
    }
}

impl TextMessage for OrgPolicyCheck {
    const NAME: &'static str = "OrgPolicyCheck";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "id" => self.id = field.as_string()?,
            "required_values" => self.required_values.push(field.as_string()?),
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for OrgPolicyCheck {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("id", &self.id);
        w.strings("required_values", &self.required_values);
    }
}

impl TextMessage for CloudProductIdentifier {
    const NAME: &'static str = "CloudProductIdentifier";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "label" => self.label = field.as_string()?,
            "console_product_identifier" => {
                field.merge_into(&mut self.console_product_identifier)?
            }
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for CloudProductIdentifier {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("label", &self.label);
        if let Some(console) = &self.console_product_identifier {
            w.message("console_product_identifier", console);
        }
    }
}

impl TextMessage for ConsoleProductIdentifier {
    const NAME: &'static str = "ConsoleProductIdentifier";

    fn merge_field(&mut self, field: &Field) -> Result<()> {
        match field.name.as_str() {
            "section_id" => self.section_id = field.as_string()?,
            "page_id" => self.page_id = field.as_string()?,
            "page_id_for_post_deployment_link" => {
                self.page_id_for_post_deployment_link = field.as_string()?
            }
            _ => return Err(field.unknown::<Self>()),
        }
        Ok(())
    }
}

impl ToText for ConsoleProductIdentifier {
    fn write_text(&self, w: &mut TextWriter) {
        w.string("section_id", &self.section_id);
        w.string("page_id", &self.page_id);
        w.string(
            "page_id_for_post_deployment_link",
            &self.page_id_for_post_deployment_link,
        );
    }
}
