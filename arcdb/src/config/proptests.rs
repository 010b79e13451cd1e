//! Property-based tests for configuration system.

use super::loader::expand_path;
use super::schema::Config;
use crate::kv::KvBackend;
use proptest::prelude::*;
use std::path::PathBuf;

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("/[a-z]{1,10}(/[a-z]{1,10}){0,3}\\.db"),
        prop::option::of(0u64..=600_000),
        prop::option::of(prop_oneof![Just(KvBackend::Sqlite), Just(KvBackend::Memory)]),
        prop::option::of(prop_oneof![
            Just("quiet".to_string()),
            Just("normal".to_string()),
            Just("verbose".to_string()),
        ]),
    )
        .prop_map(|(path, timeout, backend, log_mode)| Config {
            database_path: path.map(PathBuf::from),
            busy_timeout_ms: timeout,
            kv_backend: backend,
            log_mode,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Serializing and re-reading a config yields the same config
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }

    // Generated configs always validate
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(config.validate().is_ok());
    }

    // The database config mirrors the resolved values
    #[test]
    fn database_config_reflects_config(config in config_strategy()) {
        let db = config.database_config();
        prop_assert_eq!(db.busy_timeout, config.busy_timeout());
        if let Some(path) = &config.database_path {
            prop_assert_eq!(&db.path, path);
        }
    }

    // Paths with nothing to expand come back unchanged
    #[test]
    fn plain_paths_unchanged(path in "/[A-Za-z0-9_.-]{1,12}(/[A-Za-z0-9_.-]{1,12}){0,4}") {
        prop_assert_eq!(expand_path(&path), PathBuf::from(&path));
    }

    // Expansion is idempotent once no references remain
    #[test]
    fn expansion_idempotent(path in "(~/)?[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let once = expand_path(&path);
        let twice = expand_path(&once.to_string_lossy());
        prop_assert_eq!(once, twice);
    }
}
