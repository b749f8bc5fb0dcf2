//! Property-based tests for Solution generation.
//!
//! These tests use proptest to generate random metadata and verify that
//! the derivation invariants hold for all of it.

#[cfg(test)]
mod proptest_tests {
    use crate::generator::{
        add_apis, add_roles, ceil_minutes, generate, location_config_for, GeneratorConfig,
    };
    use crate::metadata::{self, BlueprintMetadata, BlueprintOutput, BlueprintRoles};
    use crate::overlay::apply_overlay;
    use crate::solution::{LocationConfig, Solution};
    use proptest::prelude::*;

    const BASE_BLUEPRINT: &str = r#"
spec:
  info:
    title: Property App
    source:
      repo: https://github.com/example/property-app.git
    deploymentDuration:
      configurationSecs: 120
      deploymentSecs: 600
    cloudProducts:
      - productId: CLOUD_RUN_SECTION
        label: Cloud Run
  requirements:
    roles:
      - level: Project
        roles: [roles/run.admin]
    services: [run.googleapis.com]
  interfaces:
    outputs:
      - name: service_url
"#;

    fn base_blueprint() -> BlueprintMetadata {
        metadata::parse(BASE_BLUEPRINT).unwrap()
    }

    fn with_project_roles(roles: Vec<String>) -> BlueprintMetadata {
        let mut blueprint = BlueprintMetadata::default();
        blueprint.spec.requirements.roles.push(BlueprintRoles {
            level: BlueprintRoles::PROJECT_LEVEL.to_string(),
            roles,
            parent: String::new(),
        });
        blueprint
    }

    // ============================================================================
    // ceil_minutes property tests
    // ============================================================================

    proptest! {
        /// Property: ceil_minutes is the smallest whole minute count covering the seconds
        #[test]
        fn ceil_minutes_is_ceiling(seconds in 1i64..1_000_000_000) {
            let minutes = i64::from(ceil_minutes(seconds));
            prop_assert!(minutes * 60 >= seconds);
            prop_assert!((minutes - 1) * 60 < seconds);
        }

        /// Property: exact multiples of a minute are not rounded up
        #[test]
        fn ceil_minutes_exact_minutes(minutes in 1i32..1_000_000) {
            prop_assert_eq!(ceil_minutes(i64::from(minutes) * 60), minutes);
        }
    }

    // ============================================================================
    // Baseline list property tests
    // ============================================================================

    proptest! {
        /// Property: each baseline role appears exactly once, after the declared roles
        #[test]
        fn baseline_roles_appear_once(
            declared in prop::collection::vec("roles/[a-z]{1,8}\\.[a-z]{1,8}", 0..6)
        ) {
            let baseline = crate::defaults::required_roles();
            let mut solution = Solution::default();
            add_roles(&mut solution, &with_project_roles(declared.clone()), &baseline).unwrap();
            let roles = &solution.deploy_data.as_ref().unwrap().roles;

            prop_assert_eq!(&roles[..declared.len()], &declared[..]);
            for role in &baseline {
                prop_assert!(roles.contains(role));
                if !declared.contains(role) {
                    prop_assert_eq!(roles.iter().filter(|r| *r == role).count(), 1);
                }
            }
        }

        /// Property: adding the baseline APIs twice changes nothing
        #[test]
        fn baseline_apis_idempotent(
            services in prop::collection::vec("[a-z]{1,10}\\.googleapis\\.com", 1..6)
        ) {
            let baseline = crate::defaults::required_apis();
            let mut blueprint = BlueprintMetadata::default();
            blueprint.spec.requirements.services = services;

            let mut once = Solution::default();
            add_apis(&mut once, &blueprint, &baseline);
            let once_apis = once.deploy_data.as_ref().unwrap().apis.clone();

            blueprint.spec.requirements.services = once_apis.clone();
            let mut twice = Solution::default();
            add_apis(&mut twice, &blueprint, &baseline);
            prop_assert_eq!(&twice.deploy_data.as_ref().unwrap().apis, &once_apis);
        }
    }

    // ============================================================================
    // generate property tests
    // ============================================================================

    proptest! {
        /// Property: generate is deterministic (same metadata = same record)
        #[test]
        fn generate_is_deterministic(
            outputs in prop::collection::vec("[a-z_]{1,12}", 1..8),
            path in "[a-z/]{0,20}",
        ) {
            let mut blueprint = base_blueprint();
            blueprint.spec.interfaces.outputs = outputs
                .into_iter()
                .map(|name| BlueprintOutput { name, description: String::new() })
                .collect();
            let display = BlueprintMetadata::default();
            let config = GeneratorConfig::new(path);

            let first = generate(&blueprint, &display, &config).unwrap();
            let second = generate(&blueprint, &display, &config).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: unknown section ids mentioning BIGQUERY map to the dataset config
        #[test]
        fn bigquery_sections_get_dataset_config(prefix in "[A-Z_]{0,8}", suffix in "[A-Z_]{0,8}") {
            let section = format!("{}BIGQUERY{}", prefix, suffix);
            prop_assume!(section != "BIGQUERY_SECTION_transfers");
            prop_assert_eq!(location_config_for(&section), Some(LocationConfig::BigqueryDataset));
        }

        /// Property: any positive overlay cost replaces the derived cost
        #[test]
        fn positive_overlay_cost_wins(cost in 0.01f64..1_000_000.0) {
            let mut solution = generate(
                &base_blueprint(),
                &BlueprintMetadata::default(),
                &GeneratorConfig::default(),
            )
            .unwrap();
            let overlay = Solution { cost_estimate_usd: cost, ..Solution::default() };
            apply_overlay(&mut solution, &overlay);
            prop_assert_eq!(solution.cost_estimate_usd, cost);
        }

        /// Property: a non-positive overlay cost leaves the derived cost alone
        #[test]
        fn non_positive_overlay_cost_ignored(cost in -1_000.0f64..=0.0) {
            let mut solution = generate(
                &base_blueprint(),
                &BlueprintMetadata::default(),
                &GeneratorConfig::default(),
            )
            .unwrap();
            let derived = solution.cost_estimate_usd;
            let overlay = Solution { cost_estimate_usd: cost, ..Solution::default() };
            apply_overlay(&mut solution, &overlay);
            prop_assert_eq!(solution.cost_estimate_usd, derived);
        }
    }
}
