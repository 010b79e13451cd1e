//! Stderr backend for the `log` facade.
//!
//! Library code logs with `log::debug!`, `log::info!` and `log::warn!`.
//! Nothing is printed until a binary installs a [`Logger`], whose
//! [`LogLevel`] decides which records reach stderr.

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{Level, LevelFilter, Metadata, Record};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "ARC_LOG_MODE";

/// Output verbosity, ordered from least to most verbose.
///
/// # Examples
///
/// ```
/// use arcdb::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing but the command's own output.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything, including per-migration info and debug records.
    Verbose,
}

impl LogLevel {
    /// Parses `quiet`, `normal` or `verbose`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected value.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The most verbose facade level let through at this setting.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

/// A `log` backend writing `LEVEL: message` lines to stderr.
///
/// # Examples
///
/// ```
/// use arcdb::{Logger, LogLevel};
///
/// Logger::new(LogLevel::Verbose).install();
/// log::info!("visible on stderr");
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Maps the configured level onto the facade's filter.
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        self.level.filter()
    }

    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Only the first call in a process takes effect.
    pub fn install(self) {
        let filter = self.level_filter();
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(filter);
        }
    }
}

/// Renders one record the way [`Logger`] prints it.
fn render(level: Level, args: &fmt::Arguments<'_>) -> String {
    let tag = match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug | Level::Trace => "DEBUG",
    };
    format!("{tag}: {args}")
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", render(record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Picks the logger level from CLI flags, then `ARC_LOG_MODE`, then the
/// default.
///
/// `verbose` wins over `quiet`. An unparsable `ARC_LOG_MODE` is ignored.
///
/// # Examples
///
/// ```
/// use arcdb::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| LogLevel::parse(&mode).ok())
            .unwrap_or_default()
    };
    Logger::new(level)
}
