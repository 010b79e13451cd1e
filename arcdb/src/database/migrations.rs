//! Versioned schema migrations.
//!
//! Migration scripts are SQL files named `<NNN>_<name>.sql`, embedded into
//! the binary at build time from the crate's `migrations/` directory. The
//! integer prefix is the version and defines the only valid apply order.
//! Each pending script runs in its own transaction together with the
//! bookkeeping insert into `schema_migrations`, so a script is either fully
//! applied and recorded, or not at all.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, TransactionBehavior};
use rust_embed::Embed;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_MIGRATIONS_TABLE, INSERT_APPLIED_MIGRATION, SELECT_APPLIED_MIGRATIONS,
    SELECT_APPLIED_VERSIONS,
};

/// Format of `applied_at` as written by `CURRENT_TIMESTAMP`.
const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Embed)]
#[folder = "migrations/"]
struct BundledMigrations;

/// A single versioned schema change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    version: u32,
    name: String,
    body: String,
}

impl MigrationScript {
    /// Creates a script from its parts.
    #[must_use]
    pub fn new(version: u32, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
            body: body.into(),
        }
    }

    /// Returns the script version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the SQL executed when the script is applied.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the version and name of this script.
    #[must_use]
    pub fn info(&self) -> MigrationInfo {
        MigrationInfo {
            version: self.version,
            name: self.name.clone(),
        }
    }
}

/// Version and name of a bundled or applied migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationInfo {
    /// Migration version.
    pub version: u32,
    /// Migration name.
    pub name: String,
}

/// A row of the `schema_migrations` tracking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Migration version.
    pub version: u32,
    /// Migration name as recorded when it was applied.
    pub name: String,
    /// When the migration was committed, if recorded.
    pub applied_at: Option<NaiveDateTime>,
}

/// Parses a migration file name into its version and name.
///
/// Returns `None` unless the name has the form `<digits>_<name>.sql` with a
/// non-empty name and a positive version. Leading zeros in the version are
/// allowed.
///
/// # Examples
///
/// ```
/// use arcdb::database::migrations::parse_script_name;
///
/// assert_eq!(parse_script_name("001_init.sql"), Some((1, "init".to_string())));
/// assert_eq!(parse_script_name("README.md"), None);
/// assert_eq!(parse_script_name("abc_init.sql"), None);
/// assert_eq!(parse_script_name("000_init.sql"), None);
/// ```
#[must_use]
pub fn parse_script_name(file_name: &str) -> Option<(u32, String)> {
    let stem = file_name.strip_suffix(".sql")?;
    let (prefix, name) = stem.split_once('_')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) || name.is_empty() {
        return None;
    }
    let version: u32 = prefix.parse().ok()?;
    if version == 0 {
        return None;
    }
    Some((version, name.to_string()))
}

/// Discovers and applies migration scripts.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use arcdb::database::migrations::Migrator;
///
/// let mut conn = Connection::open_in_memory().unwrap();
/// let migrator = Migrator::bundled().unwrap();
/// let applied = migrator.apply(&mut conn).unwrap();
/// assert_eq!(applied, migrator.scripts().len());
///
/// // A second run is a no-op.
/// assert_eq!(migrator.apply(&mut conn).unwrap(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Migrator {
    scripts: Vec<MigrationScript>,
}

impl Migrator {
    /// Builds a migrator over the scripts embedded in this binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMigrationVersion`] if two bundled scripts
    /// share a version.
    pub fn bundled() -> Result<Self> {
        Self::from_sources(BundledMigrations::iter().filter_map(|path| {
            let file = BundledMigrations::get(&path)?;
            match String::from_utf8(file.data.into_owned()) {
                Ok(body) => Some((path.into_owned(), body)),
                Err(_) => {
                    log::debug!("skipping migration {path}: body is not valid UTF-8");
                    None
                }
            }
        }))
    }

    /// Builds a migrator from `(file name, body)` pairs.
    ///
    /// Entries whose file name does not parse (see [`parse_script_name`]) or
    /// that live in a subdirectory are skipped. The resulting scripts are
    /// sorted by version regardless of input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMigrationVersion`] if two entries share a
    /// version.
    pub fn from_sources<I, N, B>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<String>,
    {
        let mut by_version: BTreeMap<u32, (String, MigrationScript)> = BTreeMap::new();

        for (file_name, body) in sources {
            let file_name = file_name.as_ref();
            if Path::new(file_name).components().count() != 1 {
                log::debug!("skipping nested migration entry {file_name}");
                continue;
            }
            let Some((version, name)) = parse_script_name(file_name) else {
                log::debug!("skipping migration entry {file_name}: not <version>_<name>.sql");
                continue;
            };

            if let Some((first, _)) = by_version.get(&version) {
                return Err(Error::DuplicateMigrationVersion {
                    version,
                    first: first.clone(),
                    second: file_name.to_string(),
                });
            }
            by_version.insert(
                version,
                (file_name.to_string(), MigrationScript::new(version, name, body)),
            );
        }

        Ok(Self {
            scripts: by_version.into_values().map(|(_, script)| script).collect(),
        })
    }

    /// Returns the discovered scripts in apply order.
    #[must_use]
    pub fn scripts(&self) -> &[MigrationScript] {
        &self.scripts
    }

    /// Returns the version and name of every discovered script, in order.
    #[must_use]
    pub fn info(&self) -> Vec<MigrationInfo> {
        self.scripts.iter().map(MigrationScript::info).collect()
    }

    /// Applies every script not yet recorded in `schema_migrations`.
    ///
    /// Scripts run in ascending version order, each inside its own
    /// transaction together with its bookkeeping insert. The first failure
    /// rolls back that script and stops the run; earlier scripts stay
    /// committed. A recorded version is never re-run, even if its body has
    /// changed since.
    ///
    /// Returns the number of scripts applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bookkeeping`] if the tracking table cannot be
    /// created or read, and [`Error::Migration`] if a script fails.
    pub fn apply(&self, conn: &mut Connection) -> Result<usize> {
        conn.execute_batch(CREATE_MIGRATIONS_TABLE)
            .map_err(|source| Error::Bookkeeping { source })?;
        let applied = applied_versions(conn)?;

        let mut count = 0;
        for script in &self.scripts {
            if applied.contains(&script.version) {
                continue;
            }
            apply_one(conn, script).map_err(|source| Error::Migration {
                version: script.version,
                name: script.name.clone(),
                source,
            })?;
            log::info!("applied migration {:03}_{}", script.version, script.name);
            count += 1;
        }

        Ok(count)
    }

    /// Returns the scripts that [`Migrator::apply`] would run next.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bookkeeping`] if the tracking table cannot be read.
    pub fn pending(&self, conn: &Connection) -> Result<Vec<MigrationInfo>> {
        let applied = if tracking_table_exists(conn)? {
            applied_versions(conn)?
        } else {
            HashSet::new()
        };

        Ok(self
            .scripts
            .iter()
            .filter(|script| !applied.contains(&script.version))
            .map(MigrationScript::info)
            .collect())
    }
}

/// Returns the version and name of every bundled script, in order.
///
/// # Errors
///
/// Returns an error if the bundle contains duplicate versions.
pub fn embedded_migrations() -> Result<Vec<MigrationInfo>> {
    Ok(Migrator::bundled()?.info())
}

/// Applies all pending bundled migrations to `conn`.
///
/// # Errors
///
/// See [`Migrator::apply`].
pub fn run_migrations(conn: &mut Connection) -> Result<usize> {
    Migrator::bundled()?.apply(conn)
}

/// Returns the bundled scripts not yet recorded in `conn`.
///
/// # Errors
///
/// See [`Migrator::pending`].
pub fn pending_migrations(conn: &Connection) -> Result<Vec<MigrationInfo>> {
    Migrator::bundled()?.pending(conn)
}

/// Lists the migrations recorded in `schema_migrations`, ordered by version.
///
/// A database that has never been migrated yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Bookkeeping`] if the tracking table cannot be read.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    if !tracking_table_exists(conn)? {
        return Ok(Vec::new());
    }

    let read = || -> rusqlite::Result<Vec<AppliedMigration>> {
        let mut stmt = conn.prepare(SELECT_APPLIED_MIGRATIONS)?;
        let rows = stmt.query_map([], |row| {
            let applied_at: Option<String> = row.get(2)?;
            let applied_at = applied_at
                .map(|raw| {
                    NaiveDateTime::parse_from_str(&raw, APPLIED_AT_FORMAT).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                    })
                })
                .transpose()?;
            Ok(AppliedMigration {
                version: row.get(0)?,
                name: row.get(1)?,
                applied_at,
            })
        })?;
        rows.collect()
    };

    read().map_err(|source| Error::Bookkeeping { source })
}

fn tracking_table_exists(conn: &Connection) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
        [],
        |row| row.get(0),
    )
    .map_err(|source| Error::Bookkeeping { source })
}

fn applied_versions(conn: &Connection) -> Result<HashSet<u32>> {
    let read = || -> rusqlite::Result<HashSet<u32>> {
        let mut stmt = conn.prepare(SELECT_APPLIED_VERSIONS)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect()
    };

    read().map_err(|source| Error::Bookkeeping { source })
}

fn apply_one(conn: &mut Connection, script: &MigrationScript) -> rusqlite::Result<()> {
    // Dropping the transaction without commit rolls it back.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(&script.body)?;
    tx.execute(INSERT_APPLIED_MIGRATION, params![script.version, script.name])?;
    tx.commit()
}
