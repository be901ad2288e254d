//! Configuration management for the sync command.
//!
//! Sync settings come from environment variables with sensible defaults, and
//! any value given on the command line wins over the environment.
//!
//! # Environment Variables
//!
//! - `CALNOTE_ADB`: adb executable used for pushing (defaults to `adb`)
//! - `CALNOTE_PLUGIN_DIR`: local plugin directory to watch
//! - `CALNOTE_REMOTE_DIR`: directory on the device the plugin lives in
//! - `CALNOTE_SYNC_EXCLUDE`: comma separated file names never pushed
//!   (defaults to `.hotreload,.DS_Store,Thumbs.db`)
//! - `CALNOTE_POLL_INTERVAL_MS`: watcher poll interval (defaults to 1000)

use crate::constants::{
    DEFAULT_ADB_COMMAND, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SYNC_EXCLUDES, ENV_VAR_ADB,
    ENV_VAR_PLUGIN_DIR, ENV_VAR_POLL_INTERVAL_MS, ENV_VAR_REMOTE_DIR, ENV_VAR_SYNC_EXCLUDE,
    PUSH_COMMAND_FORBIDDEN_CHARS,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Values supplied on the command line; `None` falls back to the environment.
#[derive(Debug, Clone, Default)]
pub struct SyncOverrides {
    pub adb: Option<String>,
    pub local_dir: Option<String>,
    pub remote_dir: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

/// Settings of the device sync.
///
/// # Examples
///
/// ```
/// use calnote::config::SyncConfig;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = SyncConfig {
///     adb: "adb".to_string(),
///     local_dir: PathBuf::from("/work/vault/.obsidian/plugins/full-calendar"),
///     remote_dir: "/sdcard/Documents/Vault/.obsidian/plugins/full-calendar".to_string(),
///     excludes: vec![".hotreload".to_string()],
///     poll_interval: Duration::from_secs(1),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Push command, run as `{adb} push <local> <remote>`.
    pub adb: String,
    /// Local directory whose files are pushed.
    pub local_dir: PathBuf,
    /// Matching directory on the device.
    pub remote_dir: String,
    /// File names never pushed.
    pub excludes: Vec<String>,
    /// Delay between two watcher polls.
    pub poll_interval: Duration,
}

impl SyncConfig {
    /// Validates the push command.
    ///
    /// The command is spawned directly, not through a shell, so spaces and
    /// backslashes (Windows install paths) are allowed; shell metacharacters
    /// are not.
    fn validate_push_command(command: &str) -> AppResult<&str> {
        if command.trim().is_empty() {
            return Err(AppError::Config("Push command cannot be empty".to_string()));
        }

        for &ch in PUSH_COMMAND_FORBIDDEN_CHARS {
            if command.contains(ch) {
                return Err(AppError::Config(format!(
                    "Push command cannot contain shell metacharacters: '{}'",
                    ch
                )));
            }
        }

        Ok(command)
    }

    /// Loads the configuration from the environment, applying `overrides`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the local or remote directory is missing,
    /// if path expansion fails, or if a value fails validation.
    pub fn load(overrides: &SyncOverrides) -> AppResult<Self> {
        let adb = overrides
            .adb
            .clone()
            .or_else(|| env::var(ENV_VAR_ADB).ok())
            .unwrap_or_else(|| DEFAULT_ADB_COMMAND.to_string());
        let adb = Self::validate_push_command(&adb)?.to_string();

        let local_raw = overrides
            .local_dir
            .clone()
            .or_else(|| env::var(ENV_VAR_PLUGIN_DIR).ok())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Local plugin directory not set. Use --local or {}",
                    ENV_VAR_PLUGIN_DIR
                ))
            })?;

        // Expand the path (handles ~ and environment variables)
        let expanded = shellexpand::full(&local_raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let local_dir = PathBuf::from(expanded.into_owned());

        let remote_dir = overrides
            .remote_dir
            .clone()
            .or_else(|| env::var(ENV_VAR_REMOTE_DIR).ok())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Remote directory not set. Use --remote or {}",
                    ENV_VAR_REMOTE_DIR
                ))
            })?;

        let excludes = match env::var(ENV_VAR_SYNC_EXCLUDE) {
            Ok(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => DEFAULT_SYNC_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        };

        let poll_interval_ms = match overrides.poll_interval_ms {
            Some(ms) => ms,
            None => match env::var(ENV_VAR_POLL_INTERVAL_MS) {
                Ok(raw) => raw.trim().parse().map_err(|_| {
                    AppError::Config(format!(
                        "{} must be a whole number of milliseconds, got '{}'",
                        ENV_VAR_POLL_INTERVAL_MS, raw
                    ))
                })?,
                Err(_) => DEFAULT_POLL_INTERVAL_MS,
            },
        };

        Ok(SyncConfig {
            adb,
            local_dir,
            remote_dir,
            excludes,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - the push command is empty or contains shell metacharacters
    /// - the local directory is empty or relative
    /// - the remote directory is empty or not absolute
    /// - the poll interval is zero
    pub fn validate(&self) -> AppResult<()> {
        Self::validate_push_command(&self.adb)?;

        if self.local_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Local plugin directory path is empty".to_string(),
            ));
        }
        if !self.local_dir.is_absolute() {
            return Err(AppError::Config(
                "Local plugin directory must be an absolute path".to_string(),
            ));
        }
        if self.remote_dir.trim().is_empty() {
            return Err(AppError::Config("Remote directory is empty".to_string()));
        }
        if !self.remote_dir.starts_with('/') {
            return Err(AppError::Config(
                "Remote directory must be an absolute device path".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(AppError::Config(
                "Poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
