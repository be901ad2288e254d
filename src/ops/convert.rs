//! Full Note to Daily Note conversion.
//!
//! Walks a vault, parses every markdown note that carries frontmatter, folds the
//! dated ones into a [`DailyAggregate`] and writes one Daily Note per date.

use crate::constants::NOTE_FILE_EXTENSION;
use crate::daily::{aggregate, flush, CheckboxPolicy, DailyAggregate, FullNote};
use crate::errors::AppResult;
use crate::frontmatter;
use crate::ops::{is_pruned, readable_entries};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Parameters of a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Root of the Full Note vault
    pub input_dir: PathBuf,
    /// Where Daily Notes are written; never read back as input
    pub output_dir: PathBuf,
    pub checkbox_policy: CheckboxPolicy,
}

/// Report of a completed conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Markdown files found
    pub scanned: usize,
    /// Files with frontmatter that were folded
    pub parsed: usize,
    /// Files without frontmatter
    pub skipped: usize,
    /// Files or directory entries that could not be read
    pub failed: usize,
    /// Daily Notes written
    pub written: Vec<PathBuf>,
    /// Daily Notes that could not be written
    pub write_failures: usize,
    pub duration: Duration,
}

/// Markdown files found by [`collect_markdown_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownFiles {
    /// Note paths, sorted
    pub files: Vec<PathBuf>,
    /// Directory entries the walk could not read
    pub unreadable: usize,
}

/// Lists markdown files below `input_dir`, sorted by path.
///
/// Sorting makes the order of events within a date independent of how the
/// platform enumerates directories. `output_dir` is pruned from the walk.
/// Symlinks are followed; a broken link or a link cycle is logged and
/// counted as unreadable. Returned paths are rooted at the canonical form of
/// `input_dir`.
pub fn collect_markdown_files(input_dir: &Path, output_dir: &Path) -> AppResult<MarkdownFiles> {
    let root = fs::canonicalize(input_dir)?;
    let pruned = fs::canonicalize(output_dir).ok();

    let mut collected = MarkdownFiles::default();
    let walker = WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, pruned.as_deref()));

    for entry in readable_entries(walker, &mut collected.unreadable) {
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.ends_with(NOTE_FILE_EXTENSION))
        {
            collected.files.push(path.to_path_buf());
        }
    }
    collected.files.sort();
    Ok(collected)
}

/// Reads one note. `Ok(None)` means the file is not an event note.
pub fn read_full_note(path: &Path) -> AppResult<Option<FullNote>> {
    let content = fs::read_to_string(path)?;
    if !frontmatter::has_frontmatter(&content) {
        return Ok(None);
    }
    let parsed = frontmatter::parse(&content);
    Ok(Some(FullNote {
        source: path.to_path_buf(),
        frontmatter: parsed.frontmatter,
        body: parsed.body,
    }))
}

/// Converts a Full Note vault into Daily Notes.
///
/// # Flow
///
/// 1. Collect `.md` files below the input directory, skipping the output directory
/// 2. Sort them by path
/// 3. Read each note; unreadable files and entries are logged and counted
/// 4. Fold the notes into a fresh aggregate
/// 5. Write one `YYYY-MM-DD.md` per date
///
/// # Errors
///
/// Does not fail on individual notes or individual output files. Only fails
/// if the input tree cannot be walked or the output directory cannot be created.
pub fn convert_full_to_daily(options: &ConvertOptions) -> AppResult<ConversionReport> {
    let start_time = Instant::now();
    info!(
        "Converting {:?} into daily notes in {:?}",
        options.input_dir, options.output_dir
    );

    let MarkdownFiles { files, unreadable } =
        collect_markdown_files(&options.input_dir, &options.output_dir)?;
    let mut report = ConversionReport {
        scanned: files.len(),
        failed: unreadable,
        ..Default::default()
    };

    let mut notes = Vec::with_capacity(files.len());
    for path in &files {
        match read_full_note(path) {
            Ok(Some(note)) => notes.push(note),
            Ok(None) => {
                debug!("Skipping {:?}: no frontmatter", path);
                report.skipped += 1;
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                report.failed += 1;
            }
        }
    }
    report.parsed = notes.len();

    let daily: DailyAggregate = aggregate(&notes, options.checkbox_policy);
    debug!("Aggregated {} notes into {} dates", notes.len(), daily.len());

    let flushed = flush(&daily, &options.output_dir)?;
    report.written = flushed.written;
    report.write_failures = flushed.failed.len();
    report.duration = start_time.elapsed();

    info!(
        "Conversion complete: {} daily notes from {} notes in {:?}",
        report.written.len(),
        report.parsed,
        report.duration
    );
    Ok(report)
}
