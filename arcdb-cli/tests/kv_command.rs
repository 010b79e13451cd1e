//! Integration tests for the `kv` command family.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_set_then_get_across_processes() {
    let env = TestEnv::new();

    env.kv_set("test:key", r#"{"counter":42,"name":"example"}"#);
    assert_eq!(
        env.kv_get("test:key").trim_end(),
        r#"{"counter":42,"name":"example"}"#
    );

    // The durable store shares the migrated database
    assert_eq!(env.recorded_versions(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_get_missing_key_exits_one() {
    let env = TestEnv::new();

    env.command()
        .args(["kv", "get", "absent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("key not found: absent"));
}

#[test]
fn test_set_overwrites() {
    let env = TestEnv::new();

    env.kv_set("k", "v1");
    env.kv_set("k", "v2");
    assert_eq!(env.kv_get("k").trim_end(), "v2");
}

#[test]
fn test_delete_then_get_is_not_found() {
    let env = TestEnv::new();

    env.kv_set("a", "1");
    env.command()
        .args(["kv", "delete", "a"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted a"));

    env.command().args(["kv", "get", "a"]).assert().code(1);

    // Deleting again is fine
    env.command().args(["kv", "delete", "a"]).assert().success();
}

#[test]
fn test_memory_backend_does_not_persist() {
    let env = TestEnv::new();

    env.command()
        .args(["kv", "--memory", "set", "ephemeral", "value"])
        .assert()
        .success();

    env.command()
        .args(["kv", "--memory", "get", "ephemeral"])
        .assert()
        .code(1);

    // Nothing was written to disk
    assert!(!env.db_path().exists());
}

#[test]
fn test_backend_from_environment() {
    let env = TestEnv::new();

    env.command()
        .env("ARC_KV_BACKEND", "memory")
        .args(["kv", "set", "k", "v"])
        .assert()
        .success();

    assert!(!env.db_path().exists());
}

#[test]
fn test_empty_key_is_invalid() {
    let env = TestEnv::new();

    env.command()
        .args(["kv", "set", "", "value"])
        .assert()
        .code(4);
}

#[test]
fn test_quiet_set_prints_nothing() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "kv", "set", "k", "v"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}
