//! Property-based tests for migration discovery and application.

use proptest::prelude::*;
use rusqlite::Connection;

use super::migrations::{applied_migrations, parse_script_name, Migrator};

fn script_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Any zero-padded version with a valid name parses back exactly
    #[test]
    fn well_formed_names_parse(version in 1u32..100_000, name in script_name_strategy()) {
        let file_name = format!("{version:03}_{name}.sql");
        prop_assert_eq!(parse_script_name(&file_name), Some((version, name)));
    }

    // Names without a numeric prefix never parse
    #[test]
    fn non_numeric_prefixes_are_rejected(prefix in "[a-z]{1,8}", name in script_name_strategy()) {
        let file_name = format!("{prefix}_{name}.sql");
        prop_assert_eq!(parse_script_name(&file_name), None);
    }

    // Whatever order scripts are supplied in, they are applied by version
    #[test]
    fn apply_order_ignores_input_order(
        versions in prop::collection::btree_set(1u32..500, 1..12),
        seed in any::<u64>(),
    ) {
        let mut sources: Vec<(String, String)> = versions
            .iter()
            .map(|v| (format!("{v:03}_step.sql"), format!("CREATE TABLE t{v} (id INTEGER);")))
            .collect();
        // Deterministic shuffle
        let len = sources.len();
        for i in 0..len {
            let j = usize::try_from(seed.rotate_left(u32::try_from(i).unwrap_or(0)) % len as u64)
                .unwrap_or(0);
            sources.swap(i, j);
        }

        let mut conn = Connection::open_in_memory().unwrap();
        let migrator = Migrator::from_sources(sources).unwrap();
        prop_assert_eq!(migrator.apply(&mut conn).unwrap(), versions.len());

        let recorded: Vec<u32> = applied_migrations(&conn)
            .unwrap()
            .into_iter()
            .map(|m| m.version)
            .collect();
        let expected: Vec<u32> = versions.into_iter().collect();
        prop_assert_eq!(recorded, expected);
        prop_assert_eq!(migrator.apply(&mut conn).unwrap(), 0);
    }
}
