//! Flat `.txt` export of a vault.

use crate::constants::{EXPORT_FILE_SUFFIX, EXPORT_SKIP_DIRS, EXPORT_SKIP_FILES};
use crate::errors::AppResult;
use crate::ops::{is_pruned, readable_entries};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Parameters of an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Tree to export
    pub base_dir: PathBuf,
    /// Flat destination directory, skipped during the walk
    pub export_dir: PathBuf,
}

/// Report of a completed export.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Files copied
    pub copied: usize,
    /// Files on the skip list
    pub skipped: usize,
    /// Files that could not be copied or directory entries that could not be read
    pub failed: usize,
    pub duration: Duration,
}

/// Copies every file below the base directory into the export directory as
/// `{name}.txt`.
///
/// The export is flat: subdirectories are not recreated, so two files with the
/// same name overwrite each other and the one visited last wins. The export
/// directory itself and `chrono_analyser` directories are not descended into,
/// and `LICENSE.md` / `README.md` are left out. Symlinks are followed; entries
/// the walk cannot read are logged and counted as failures.
///
/// # Errors
///
/// Fails only if the export directory cannot be created or the base directory
/// cannot be walked. Individual copy failures are logged and counted.
pub fn export_to_txt(options: &ExportOptions) -> AppResult<ExportReport> {
    let start_time = Instant::now();
    info!(
        "Exporting {:?} to {:?}",
        options.base_dir, options.export_dir
    );

    fs::create_dir_all(&options.export_dir)?;
    let root = fs::canonicalize(&options.base_dir)?;
    let export_dir = fs::canonicalize(&options.export_dir)?;

    let mut report = ExportReport::default();
    let mut unreadable = 0;
    let walker = WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let skipped_name = entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map_or(false, |name| EXPORT_SKIP_DIRS.contains(&name));
            !skipped_name && !is_pruned(entry, Some(&export_dir))
        });

    for entry in readable_entries(walker, &mut unreadable) {
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if EXPORT_SKIP_FILES.contains(&file_name.as_str()) {
            debug!("Skipping {:?}", entry.path());
            report.skipped += 1;
            continue;
        }

        let dest = export_dir.join(format!("{}{}", file_name, EXPORT_FILE_SUFFIX));
        match fs::copy(entry.path(), &dest) {
            Ok(_) => {
                debug!("Exported {:?} to {:?}", entry.path(), dest);
                report.copied += 1;
            }
            Err(e) => {
                warn!("Failed to export {:?}: {}", entry.path(), e);
                report.failed += 1;
            }
        }
    }

    report.failed += unreadable;
    report.duration = start_time.elapsed();
    info!(
        "Export complete: {} files copied to {:?} in {:?}",
        report.copied, options.export_dir, report.duration
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_flattens_and_skips() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("src/nested")).unwrap();
        fs::create_dir_all(base.join("chrono_analyser")).unwrap();
        fs::write(base.join("main.ts"), "main").unwrap();
        fs::write(base.join("src/nested/view.ts"), "view").unwrap();
        fs::write(base.join("README.md"), "readme").unwrap();
        fs::write(base.join("src/LICENSE.md"), "license").unwrap();
        fs::write(base.join("chrono_analyser/analysis.py"), "skip").unwrap();

        let options = ExportOptions {
            base_dir: base.to_path_buf(),
            export_dir: base.join("exported"),
        };
        let report = export_to_txt(&options).unwrap();

        assert_eq!(report.copied, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(
            fs::read_to_string(base.join("exported/view.ts.txt")).unwrap(),
            "view"
        );
        assert!(base.join("exported/main.ts.txt").exists());
        assert!(!base.join("exported/analysis.py.txt").exists());

        // A second run must not re-export its own output.
        let again = export_to_txt(&options).unwrap();
        assert_eq!(again.copied, 2);
        assert!(!base.join("exported/main.ts.txt.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_export_continues_past_broken_link() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let base = dir.path().join("vault");
        fs::create_dir_all(base.join("a")).unwrap();
        fs::write(base.join("a/first.ts"), "first").unwrap();
        fs::write(base.join("z.ts"), "last").unwrap();
        symlink(base.join("gone.ts"), base.join("b-broken.ts")).unwrap();
        symlink(base.join("z.ts"), base.join("linked.ts")).unwrap();

        let report = export_to_txt(&ExportOptions {
            base_dir: base.clone(),
            export_dir: dir.path().join("txt"),
        })
        .unwrap();

        assert_eq!(report.copied, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("txt/linked.ts.txt")).unwrap(),
            "last"
        );
        assert!(dir.path().join("txt/z.ts.txt").exists());
    }
}
