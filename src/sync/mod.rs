//! Device sync: push changed plugin files to a device.
//!
//! The push itself goes through the [`RemotePush`] trait so the watch loop can
//! be driven by `adb` in practice and by a recording fake in tests. The loop is
//! single threaded: every change is pushed to completion before the next one,
//! and a failed push is logged and skipped, never retried.

use crate::config::SyncConfig;
use crate::errors::{AppResult, SyncError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Copies one local file to a remote path, replacing any existing remote file.
pub trait RemotePush {
    fn push(&self, local: &Path, remote: &str) -> Result<(), SyncError>;
}

/// Pushes files with `adb push`.
#[derive(Debug, Clone)]
pub struct AdbPush {
    command: String,
}

impl AdbPush {
    pub fn new(command: impl Into<String>) -> Self {
        AdbPush {
            command: command.into(),
        }
    }
}

impl RemotePush for AdbPush {
    fn push(&self, local: &Path, remote: &str) -> Result<(), SyncError> {
        debug!("Running {} push {:?} {}", self.command, local, remote);
        let status = Command::new(&self.command)
            .arg("push")
            .arg(local)
            .arg(remote)
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(SyncError::NonZeroExit {
                command: self.command.clone(),
                status_code: status.code().unwrap_or(-1),
            }),
            Err(e) => {
                let command = self.command.clone();
                Err(match e.kind() {
                    std::io::ErrorKind::NotFound => SyncError::CommandNotFound { command, source: e },
                    std::io::ErrorKind::PermissionDenied => {
                        SyncError::PermissionDenied { command, source: e }
                    }
                    _ => SyncError::ExecutionFailed { command, source: e },
                })
            }
        }
    }
}

/// Maps a local file to its path on the device.
///
/// The relative path below `local_root` is appended to `remote_root` with
/// forward slashes, whatever the host separator.
pub fn remote_path_for(local_root: &Path, remote_root: &str, file: &Path) -> Result<String, SyncError> {
    let relative = file
        .strip_prefix(local_root)
        .map_err(|_| SyncError::OutsideRoot {
            path: file.to_path_buf(),
        })?;
    let relative = relative.to_string_lossy().replace('\\', "/");
    Ok(format!("{}/{}", remote_root.trim_end_matches('/'), relative))
}

/// Whether the file's name is on the exclusion list.
pub fn is_excluded(file: &Path, excludes: &[String]) -> bool {
    file.file_name()
        .and_then(|name| name.to_str())
        .map(|name| excludes.iter().any(|ex| ex == name))
        .unwrap_or(false)
}

/// Tally of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files pushed successfully
    pub pushed: usize,
    /// Files whose push failed
    pub failed: usize,
    /// Files skipped by the exclusion list
    pub excluded: usize,
}

impl SyncReport {
    fn record(&mut self, outcome: &Result<(), SyncError>) {
        match outcome {
            Ok(()) => self.pushed += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Pushes a single changed file, logging the outcome.
pub fn sync_file<P: RemotePush + ?Sized>(
    pusher: &P,
    config: &SyncConfig,
    file: &Path,
) -> Result<(), SyncError> {
    let remote = remote_path_for(&config.local_dir, &config.remote_dir, file)?;
    info!("Syncing changed file: {:?}", file);
    match pusher.push(file, &remote) {
        Ok(()) => {
            debug!("Pushed {:?} to {}", file, remote);
            Ok(())
        }
        Err(e) => {
            warn!("File sync failed for {:?}: {}", file, e);
            Err(e)
        }
    }
}

fn files_under(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

/// Pushes every non-excluded file below the local directory.
pub fn sync_tree<P: RemotePush + ?Sized>(pusher: &P, config: &SyncConfig) -> SyncReport {
    info!("Syncing {:?} to {}", config.local_dir, config.remote_dir);
    let mut report = SyncReport::default();
    for entry in files_under(&config.local_dir) {
        if is_excluded(entry.path(), &config.excludes) {
            report.excluded += 1;
            continue;
        }
        let outcome = sync_file(pusher, config, entry.path());
        report.record(&outcome);
    }
    info!(
        "Sync complete: {} pushed, {} failed",
        report.pushed, report.failed
    );
    report
}

/// Detects file changes by comparing modification times between polls.
#[derive(Debug)]
pub struct PollingWatcher {
    root: PathBuf,
    excludes: Vec<String>,
    seen: HashMap<PathBuf, SystemTime>,
}

impl PollingWatcher {
    /// Starts watching `root`; files present now are not reported as changes.
    pub fn new(root: &Path, excludes: &[String]) -> Self {
        let mut watcher = PollingWatcher {
            root: root.to_path_buf(),
            excludes: excludes.to_vec(),
            seen: HashMap::new(),
        };
        watcher.seen = watcher.snapshot();
        watcher
    }

    fn snapshot(&self) -> HashMap<PathBuf, SystemTime> {
        files_under(&self.root)
            .filter(|entry| !is_excluded(entry.path(), &self.excludes))
            .filter_map(|entry| {
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((entry.into_path(), modified))
            })
            .collect()
    }

    /// Returns files created or modified since the previous poll, sorted.
    pub fn poll(&mut self) -> Vec<PathBuf> {
        let current = self.snapshot();
        let mut changed: Vec<PathBuf> = current
            .iter()
            .filter(|(path, modified)| self.seen.get(*path) != Some(*modified))
            .map(|(path, _)| path.clone())
            .collect();
        changed.sort();
        self.seen = current;
        changed
    }
}

/// Watches the local directory and pushes each change as it is seen.
///
/// `should_stop` is checked once per poll interval. Every change is handled
/// to completion before the next; failures are counted and the loop goes on.
pub fn watch<P, F>(pusher: &P, config: &SyncConfig, mut should_stop: F) -> AppResult<SyncReport>
where
    P: RemotePush + ?Sized,
    F: FnMut() -> bool,
{
    info!("Watching for plugin changes in: {:?}", config.local_dir);
    let mut watcher = PollingWatcher::new(&config.local_dir, &config.excludes);
    let mut report = SyncReport::default();

    while !should_stop() {
        thread::sleep(config.poll_interval);
        for file in watcher.poll() {
            let outcome = sync_file(pusher, config, &file);
            report.record(&outcome);
        }
    }

    info!("Stopped watching {:?}", config.local_dir);
    Ok(report)
}
