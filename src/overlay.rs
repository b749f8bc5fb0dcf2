//! # Overlay Merging
//!
//! An overlay is a hand-written, partial Solution record in protobuf text
//! format. It lets a blueprint owner correct the handful of derived fields
//! that metadata cannot express. Only these fields are honoured:
//!
//! - **Output links**: `open_in_new_tab` / `show_in_notification` of links
//!   with a matching `output_name`
//! - **Location configs**: a non-empty list replaces the derived list
//! - **Cost**: a positive `cost_estimate_usd` replaces the derived cost
//! - **Git source**: a non-empty `ref` or `directory` replaces the derived
//!   value; `repo` is never overridden
//!
//! Every other field may appear in the overlay but has no effect.

use log::{debug, info};
use std::path::Path;

use crate::error::{Error, Result};
use crate::solution::Solution;
use crate::textproto;

/// Parses an overlay document.
pub fn parse(content: &str) -> Result<Solution> {
    textproto::decode(content)
}

/// Loads an overlay file, returning `None` when it does not exist.
pub fn load(path: &Path) -> Result<Option<Solution>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No overlay at {}, keeping derived values", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(Error::Filesystem {
                message: format!("Failed to read overlay '{}': {}", path.display(), e),
            })
        }
    };
    parse(&content).map(Some)
}

/// Applies the overlay file at `path` to `solution`.
///
/// A missing file leaves the solution untouched and succeeds.
pub fn apply_overlay_file(solution: &mut Solution, path: &Path) -> Result<()> {
    if let Some(overlay) = load(path)? {
        info!("Applying overlay from {}", path.display());
        apply_overlay(solution, &overlay);
    }
    Ok(())
}

/// Applies every override rule of `overlay` to `solution`.
pub fn apply_overlay(solution: &mut Solution, overlay: &Solution) {
    override_outputs(solution, overlay);
    override_location_configs(solution, overlay);
    override_cost_estimate(solution, overlay);
    override_git_source(solution, overlay);
}

fn override_outputs(solution: &mut Solution, overlay: &Solution) {
    let (Some(overlay_data), Some(deploy_data)) = (&overlay.deploy_data, &mut solution.deploy_data)
    else {
        return;
    };
    for overlay_link in &overlay_data.links {
        if overlay_link.output_name.is_empty() {
            continue;
        }
        for link in deploy_data
            .links
            .iter_mut()
            .filter(|link| link.output_name == overlay_link.output_name)
        {
            debug!("Overriding link flags for output '{}'", link.output_name);
            link.open_in_new_tab = overlay_link.open_in_new_tab;
            link.show_in_notification = overlay_link.show_in_notification;
        }
    }
}

fn override_location_configs(solution: &mut Solution, overlay: &Solution) {
    let Some(overlay_data) = &overlay.deploy_data else {
        return;
    };
    if overlay_data.location_configs.is_empty() {
        return;
    }
    solution
        .deploy_data
        .get_or_insert_with(Default::default)
        .location_configs = overlay_data.location_configs.clone();
}

fn override_cost_estimate(solution: &mut Solution, overlay: &Solution) {
    if overlay.cost_estimate_usd > 0.0 {
        solution.cost_estimate_usd = overlay.cost_estimate_usd;
    }
}

fn override_git_source(solution: &mut Solution, overlay: &Solution) {
    let Some(overlay_git) = &overlay.git_source else {
        return;
    };
    let git_source = solution.git_source.get_or_insert_with(Default::default);
    if !overlay_git.r#ref.is_empty() {
        git_source.r#ref = overlay_git.r#ref.clone();
    }
    if !overlay_git.directory.is_empty() {
        git_source.directory = overlay_git.directory.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::{DeployData, DeploymentLink, GitSource, LocationConfig};
    use tempfile::TempDir;

    fn solution() -> Solution {
        Solution {
            git_source: Some(GitSource {
                repo: "https://github.com/example/repo".to_string(),
                r#ref: String::new(),
                directory: "modules/app".to_string(),
            }),
            cost_estimate_usd: 12.0,
            deploy_data: Some(DeployData {
                links: vec![
                    DeploymentLink {
                        output_name: "url".to_string(),
                        open_in_new_tab: true,
                        show_in_notification: false,
                    },
                    DeploymentLink {
                        output_name: "bucket".to_string(),
                        ..Default::default()
                    },
                ],
                location_configs: vec![
                    LocationConfig::CloudRun,
                    LocationConfig::Compute,
                    LocationConfig::BigqueryDataset,
                ],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_cost_override_only_when_positive() {
        let mut target = solution();
        apply_overlay(&mut target, &parse("cost_estimate_usd: 99").unwrap());
        assert_eq!(target.cost_estimate_usd, 99.0);

        let mut target = solution();
        apply_overlay(&mut target, &parse("cost_estimate_usd: 0").unwrap());
        assert_eq!(target.cost_estimate_usd, 12.0);

        let mut target = solution();
        apply_overlay(&mut target, &parse("cost_estimate_usd: -5").unwrap());
        assert_eq!(target.cost_estimate_usd, 12.0);
    }

    #[test]
    fn test_location_configs_replaced_not_merged() {
        let mut target = solution();
        apply_overlay(
            &mut target,
            &parse("deploy_data { location_configs: CLOUD_BUILD }").unwrap(),
        );
        assert_eq!(
            target.deploy_data.unwrap().location_configs,
            vec![LocationConfig::CloudBuild]
        );
    }

    #[test]
    fn test_empty_overlay_location_configs_keep_derived() {
        let mut target = solution();
        apply_overlay(&mut target, &parse("deploy_data { is_singleton: true }").unwrap());
        let deploy = target.deploy_data.unwrap();
        assert_eq!(deploy.location_configs.len(), 3);
        assert!(!deploy.is_singleton);
    }

    #[test]
    fn test_link_flags_overridden_by_name() {
        let mut target = solution();
        let overlay = parse(
            r#"
deploy_data {
  links { output_name: "url" show_in_notification: true }
  links { output_name: "missing" open_in_new_tab: true }
  links { open_in_new_tab: true }
}
"#,
        )
        .unwrap();
        apply_overlay(&mut target, &overlay);

        let links = target.deploy_data.unwrap().links;
        assert_eq!(links.len(), 2);
        assert!(!links[0].open_in_new_tab);
        assert!(links[0].show_in_notification);
        assert!(!links[1].open_in_new_tab);
        assert!(!links[1].show_in_notification);
    }

    #[test]
    fn test_git_source_override_keeps_repo() {
        let mut target = solution();
        apply_overlay(
            &mut target,
            &parse(r#"git_source { repo: "https://other" ref: "v1.2.0" }"#).unwrap(),
        );
        let git = target.git_source.unwrap();
        assert_eq!(git.repo, "https://github.com/example/repo");
        assert_eq!(git.r#ref, "v1.2.0");
        assert_eq!(git.directory, "modules/app");
    }

    #[test]
    fn test_git_source_directory_override() {
        let mut target = solution();
        apply_overlay(
            &mut target,
            &parse(r#"git_source { directory: "modules/web" }"#).unwrap(),
        );
        assert_eq!(target.git_source.unwrap().directory, "modules/web");
    }

    #[test]
    fn test_missing_overlay_file_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut target = solution();
        apply_overlay_file(&mut target, &temp.path().join("overlay.textproto")).unwrap();
        assert_eq!(target, solution());
    }

    #[test]
    fn test_overlay_file_applied() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("overlay.textproto");
        std::fs::write(&path, "cost_estimate_usd: 42\n").unwrap();

        let mut target = solution();
        apply_overlay_file(&mut target, &path).unwrap();
        assert_eq!(target.cost_estimate_usd, 42.0);
    }

    #[test]
    fn test_malformed_overlay_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("overlay.textproto");
        std::fs::write(&path, "deploy_data {\n  links {\n").unwrap();

        let mut target = solution();
        let err = apply_overlay_file(&mut target, &path).unwrap_err();
        assert!(matches!(err, Error::OverlayParse { .. }));
        assert_eq!(target, solution());
    }

    #[test]
    fn test_unreadable_overlay_is_io_failure() {
        let temp = TempDir::new().unwrap();
        // a directory cannot be read as a file
        let err = load(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_deeply_nested_overlay_is_parse_error() {
        let content = "deploy_data {".repeat(200_000) + &"}".repeat(200_000);
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, Error::OverlayParse { .. }));
    }
}
