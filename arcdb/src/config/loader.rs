//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading arc configuration files
//! from various locations with proper precedence.

use crate::config::environment::EnvironmentConfig;
use crate::config::schema::Config;
use crate::error::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "ARC_CONFIG";

/// Directory holding the project-local configuration file.
pub const PROJECT_CONFIG_DIR: &str = ".arc";

/// File name of every configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use arcdb::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load(None, Path::new(".")).unwrap();
/// println!("Database: {}", config.database_path().display());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Candidate configuration files, highest precedence first.
    ///
    /// The order is:
    /// 1. `explicit`, if given
    /// 2. `$ARC_CONFIG`
    /// 3. `.arc/config.yaml` in the nearest ancestor of `working_dir` that has one
    /// 4. `$XDG_CONFIG_HOME/arc/config.yaml`, else `~/.config/arc/config.yaml`
    ///
    /// Paths are `~`/`$VAR` expanded and duplicates are dropped.
    #[must_use]
    pub fn search_paths(explicit: Option<&Path>, working_dir: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(path) = explicit {
            candidates.push(expand_path(&path.to_string_lossy()));
        }

        if let Some(path) = env::var(CONFIG_ENV).ok().filter(|v| !v.is_empty()) {
            candidates.push(expand_path(&path));
        }

        if let Some(path) = Self::discover_project_config(working_dir) {
            candidates.push(path);
        }

        if let Some(path) = Self::global_config_path() {
            candidates.push(path);
        }

        let mut unique: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
    }

    /// Load the effective configuration.
    ///
    /// The first existing file from [`ConfigLoader::search_paths`] is parsed;
    /// when none exists the defaults are used. Environment overrides are
    /// applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed, or if
    /// an environment override is invalid.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Config> {
        let mut config = match Self::search_paths(explicit, working_dir)
            .into_iter()
            .find(|path| path.is_file())
        {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Self::load_file(&path)?
            }
            None => Config::default(),
        };

        EnvironmentConfig::apply_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Find `.arc/config.yaml` by walking up from `start_dir`.
    ///
    /// Stops at the first directory containing one.
    #[must_use]
    pub fn discover_project_config(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load and parse a YAML configuration file.
    ///
    /// A relative or `~`-prefixed `database_path` is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        if let Some(db_path) = config.database_path.take() {
            config.database_path = Some(expand_path(&db_path.to_string_lossy()));
        }

        Ok(config)
    }

    /// Get the global configuration file path.
    ///
    /// Returns `None` if neither `XDG_CONFIG_HOME` nor a home directory is
    /// available.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        let base = env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("arc").join(CONFIG_FILE_NAME))
    }
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references in `path`.
///
/// `~` and `~/…` resolve against the home directory; `~user` is left
/// untouched. Unset variables expand to the empty string. A `$` that does
/// not start a variable reference is kept as is.
///
/// # Examples
///
/// ```
/// use arcdb::config::expand_path;
/// use std::path::Path;
///
/// assert_eq!(expand_path("/absolute/arc.db"), Path::new("/absolute/arc.db"));
/// assert!(expand_path("~/arc.db").ends_with("arc.db"));
/// ```
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    if path.is_empty() {
        return PathBuf::new();
    }

    let home = home::home_dir().filter(|h| !h.as_os_str().is_empty());
    let tilde_expanded = match (path, home) {
        ("~", Some(home)) => home.to_string_lossy().into_owned(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]).to_string_lossy().into_owned(),
        (p, _) => p.to_string(),
    };

    PathBuf::from(expand_env(&tilde_expanded))
}

fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                if is_var_name(name) {
                    out.push_str(&env::var(name).unwrap_or_default());
                    rest = &braced[end + 1..];
                    continue;
                }
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if len > 0 {
                out.push_str(&env::var(&after[..len]).unwrap_or_default());
                rest = &after[len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
