//! Integration tests for the library pipeline.
//!
//! These tests drive metadata loading, generation, overlay merging, record
//! serialization and template rendering through the public API, the way the
//! `generate` command composes them.

mod common;

use solution_gen::generator::{generate, GeneratorConfig};
use solution_gen::solution::{LocationConfig, PropertyType, Solution};
use solution_gen::template::{self, RenderOptions, TextFields};
use solution_gen::error::Error;
use solution_gen::{metadata, overlay, textproto, validate};
use tempfile::TempDir;

fn write_blueprint(temp: &TempDir) -> std::path::PathBuf {
    let dir = temp.path().join(common::REPO_DIR).join("modules/webapp");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("metadata.yaml"), common::blueprints::COMPLETE).unwrap();
    std::fs::write(dir.join("metadata.display.yaml"), common::blueprints::DISPLAY).unwrap();
    dir
}

fn generate_from(dir: &std::path::Path) -> Solution {
    let (blueprint, display) = metadata::from_blueprint_dir(dir).unwrap();
    let config = GeneratorConfig::new(dir.to_string_lossy());
    generate(&blueprint, &display, &config).unwrap()
}

#[test]
fn test_pipeline_derives_complete_record() {
    let temp = TempDir::new().unwrap();
    let dir = write_blueprint(&temp);
    let solution = generate_from(&dir);

    let git = solution.git_source.as_ref().unwrap();
    assert_eq!(git.repo, "https://github.com/example/terraform-example-webapp");
    assert_eq!(git.directory, "modules/webapp");

    let estimate = solution.deployment_estimate.as_ref().unwrap();
    assert_eq!(estimate.configuration_minutes, 2);
    assert_eq!(estimate.deployment_minutes, 10);
    assert_eq!(solution.cost_estimate_usd, 12.5);

    let deploy = solution.deploy_data.as_ref().unwrap();
    assert_eq!(deploy.roles[0], "roles/run.admin");
    assert_eq!(deploy.roles.len(), 4);
    assert_eq!(deploy.apis, vec!["run.googleapis.com", "config.googleapis.com"]);
    assert_eq!(
        deploy.location_configs,
        vec![LocationConfig::CloudRun, LocationConfig::BigqueryDataset]
    );

    assert_eq!(deploy.configuration_sections.len(), 1);
    let property = &deploy.configuration_sections[0].properties[0];
    assert_eq!(property.name, "service_name");
    assert_eq!(property.r#type, Some(PropertyType::String));
    assert_eq!(property.default_value, "webapp");
    assert_eq!(property.pattern, "^[a-z][a-z0-9-]*$");

    assert_eq!(deploy.links.len(), 2);
    assert!(deploy.links[0].open_in_new_tab);
    assert!(!deploy.links[1].open_in_new_tab);

    let page = solution.cloud_product_identifiers[0]
        .console_product_identifier
        .as_ref()
        .unwrap();
    assert_eq!(page.page_id, "run_detail");
}

#[test]
fn test_pipeline_overlay_then_revalidate() {
    let temp = TempDir::new().unwrap();
    let dir = write_blueprint(&temp);
    let mut solution = generate_from(&dir);

    let overlay_path = temp.path().join("overlay.textproto");
    std::fs::write(&overlay_path, common::blueprints::OVERLAY).unwrap();
    overlay::apply_overlay_file(&mut solution, &overlay_path).unwrap();
    validate::validate_solution(&solution).unwrap();

    let git = solution.git_source.as_ref().unwrap();
    assert_eq!(git.r#ref, "v1.2.0");
    assert_eq!(git.directory, "infra");
    assert_eq!(solution.cost_estimate_usd, 99.5);

    let deploy = solution.deploy_data.as_ref().unwrap();
    assert_eq!(deploy.location_configs, vec![LocationConfig::CloudRun]);
    let console_link = deploy
        .links
        .iter()
        .find(|l| l.output_name == "console_link")
        .unwrap();
    assert!(console_link.show_in_notification);
}

#[test]
fn test_pipeline_missing_overlay_keeps_record() {
    let temp = TempDir::new().unwrap();
    let dir = write_blueprint(&temp);
    let mut solution = generate_from(&dir);
    let before = solution.clone();

    overlay::apply_overlay_file(&mut solution, &temp.path().join("absent.textproto")).unwrap();
    assert_eq!(solution, before);
}

#[test]
fn test_pipeline_record_text_decodes_to_same_record() {
    let temp = TempDir::new().unwrap();
    let dir = write_blueprint(&temp);
    let solution = generate_from(&dir);

    let text = textproto::to_string(&solution);
    let decoded: Solution = textproto::decode(&text).unwrap();
    assert_eq!(decoded, solution);
}

#[test]
fn test_pipeline_renders_template() {
    let temp = TempDir::new().unwrap();
    let dir = write_blueprint(&temp);
    let (blueprint, _) = metadata::from_blueprint_dir(&dir).unwrap();

    let template_path = temp.path().join("catalog.soy");
    std::fs::write(&template_path, common::blueprints::TEMPLATE).unwrap();
    let options = RenderOptions {
        template_path,
        output_dir: temp.path().to_path_buf(),
        ..RenderOptions::default()
    };

    let text_fields = TextFields::from_metadata(&blueprint, None);
    let path = template::render(&text_fields, &options).unwrap();
    assert_eq!(path, temp.path().join("example_web_app.soy"));

    let rendered = std::fs::read_to_string(path).unwrap();
    assert!(rendered.contains("{namespace example-web-app}"));
    assert!(rendered.contains("description: Deploys a containerised web app"));
}

#[test]
fn test_pipeline_incomplete_metadata_reports_fields() {
    let blueprint = metadata::parse(common::blueprints::INCOMPLETE).unwrap();
    let err = generate(
        &blueprint,
        &metadata::BlueprintMetadata::default(),
        &GeneratorConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    let fields = err.invalid_fields();
    assert!(fields.contains(&"Repository source".to_string()));
    assert!(fields.contains(&"CloudProductIdentifier".to_string()));
    assert!(fields.contains(&"DeploymentEstimate".to_string()));
    assert!(fields.contains(&"Outputs".to_string()));
    assert!(fields.contains(&"Roles".to_string()));
    assert!(fields.contains(&"APIs".to_string()));
}
