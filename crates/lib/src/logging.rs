//! Process-wide logger bootstrap driven by a configuration tree.
//!
//! The logger is installed explicitly, once, with [`init`]. It reads two keys
//! from the tree:
//!
//! - `log.file`: where to append log lines. Defaults to `<executable>.log` in
//!   the current directory.
//! - `log.level`: an `EnvFilter` directive such as `info` or `cfgtree=debug`.
//!   Defaults to `info`. `RUST_LOG`, when set, adds further directives.
//!
//! ```no_run
//! # use cfgtree::{Tree, logging};
//! let config = Tree::new();
//! config.set("log.file", "/var/log/app.log");
//! config.set("log.level", "debug");
//!
//! let handle = logging::init(&config)?;
//! tracing::info!(file = %handle.path().display(), "Logging started");
//! # Ok::<(), cfgtree::logging::LogError>(())
//! ```

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::Tree;

/// Tree key holding the log file path.
pub const FILE_KEY: &str = "log.file";
/// Tree key holding the filter directive.
pub const LEVEL_KEY: &str = "log.level";
/// Filter used when the tree has no `log.level`.
pub const DEFAULT_LEVEL: &str = "info";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file could not be opened for appending
    #[error("Failed to open log file '{}': {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured level is not a valid filter directive
    #[error("Invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed
    #[error("A global logger is already installed")]
    AlreadyInitialized,
}

// Conversion from LogError to the main Error type
impl From<LogError> for crate::Error {
    fn from(err: LogError) -> Self {
        crate::Error::Log(err)
    }
}

/// Handle onto the installed logger.
///
/// Dropping the handle syncs the log file to disk. The global subscriber itself
/// stays installed for the rest of the process.
#[derive(Debug)]
pub struct LogHandle {
    path: PathBuf,
    file: File,
}

impl LogHandle {
    /// The file log lines are appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.file.sync_data()
    }
}

impl Drop for LogHandle {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// `<executable stem>.log` in the current directory.
pub fn default_log_file() -> PathBuf {
    let stem = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    PathBuf::from(format!("{stem}.log"))
}

/// The log file configured in `tree`, or [`default_log_file`].
pub fn log_file_path(tree: &Tree) -> PathBuf {
    tree.string(FILE_KEY)
        .map(PathBuf::from)
        .unwrap_or_else(default_log_file)
}

/// Builds the filter from `log.level` plus any `RUST_LOG` directives.
pub fn filter_from(tree: &Tree) -> Result<EnvFilter, LogError> {
    let level = tree
        .string(LEVEL_KEY)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    parse_filter(&level)
}

/// Parses a comma-separated filter such as `warn,cfgtree=debug`, then adds any
/// `RUST_LOG` directives on top.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, LogError> {
    let mut filter = EnvFilter::try_new(directives).map_err(|source| LogError::InvalidFilter {
        directive: directives.to_string(),
        source,
    })?;

    if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        for directive in env.split(',').filter(|d| !d.trim().is_empty()) {
            let parsed = directive.parse().map_err(|source| LogError::InvalidFilter {
                directive: directive.to_string(),
                source,
            })?;
            filter = filter.add_directive(parsed);
        }
    }
    Ok(filter)
}

/// Installs the global logger configured by `tree`.
///
/// Fails with [`LogError::AlreadyInitialized`] if any global subscriber is
/// already in place.
pub fn init(tree: &Tree) -> Result<LogHandle, LogError> {
    let filter = filter_from(tree)?;
    let path = log_file_path(tree);
    let open_failed = |source| LogError::OpenFailed {
        path: path.clone(),
        source,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(open_failed)?;
    let writer = file.try_clone().map_err(open_failed)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)?;

    tracing::info!(path = %path.display(), "Logger initialized");
    Ok(LogHandle { path, file })
}
