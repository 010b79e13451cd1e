//! SQL constants owned by the library itself.
//!
//! The application schema lives in the bundled migration scripts; this
//! module only holds the statements for the tables arcdb manages directly:
//! the migration tracking table and the key-value table.

/// SQL statement to create the migration tracking table.
pub const CREATE_MIGRATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        version INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

/// SQL statement to read the set of applied versions.
pub const SELECT_APPLIED_VERSIONS: &str = "SELECT version FROM schema_migrations";

/// SQL statement to list applied migrations in version order.
pub const SELECT_APPLIED_MIGRATIONS: &str =
    "SELECT version, name, applied_at FROM schema_migrations ORDER BY version";

/// SQL statement to record a migration as applied.
pub const INSERT_APPLIED_MIGRATION: &str =
    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)";

/// SQL statement to create the key-value table.
///
/// `updated_at` holds nanoseconds since the Unix epoch.
pub const CREATE_KV_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY,
        value BLOB,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to look up a single value.
pub const SELECT_KV_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";

/// SQL statement to upsert a value.
///
/// `updated_at` never moves backwards for a key even if the wall clock does.
pub const UPSERT_KV_VALUE: &str = r"
    INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = MAX(kv_store.updated_at, excluded.updated_at)";

/// SQL statement to delete a value by key.
pub const DELETE_KV_VALUE: &str = "DELETE FROM kv_store WHERE key = ?1";
