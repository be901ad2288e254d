//! High-level operations behind the CLI commands.
//!
//! Each operation takes an options struct, does its file work and returns a
//! report. Per-file failures are logged and counted in the report; only
//! failures that stop the whole run come back as errors.

pub mod convert;
pub mod export;
pub mod generate;

use std::fs;
use std::path::Path;
use tracing::warn;
use walkdir::DirEntry;

pub use convert::{convert_full_to_daily, ConversionReport, ConvertOptions, MarkdownFiles};
pub use export::{export_to_txt, ExportOptions, ExportReport};
pub use generate::{
    generate_daily_note_calendar, generate_full_note_calendar, DailyNoteOptions,
    FullNoteOptions, GenerationReport,
};

/// Whether a walk should not descend into `entry`.
///
/// `pruned` must already be canonical, as must the walk root.
/// Walks follow links, so a symlinked directory is compared by its target.
pub(crate) fn is_pruned(entry: &DirEntry, pruned: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    pruned.map_or(false, |dir| {
        if entry.path_is_symlink() {
            fs::canonicalize(entry.path()).map_or(false, |target| target == dir)
        } else {
            entry.path() == dir
        }
    })
}

/// Drops walk entries that cannot be read, logging each one and counting it
/// in `unreadable`.
pub(crate) fn readable_entries<'a, I>(
    entries: I,
    unreadable: &'a mut usize,
) -> impl Iterator<Item = DirEntry> + 'a
where
    I: IntoIterator<Item = walkdir::Result<DirEntry>>,
    I::IntoIter: 'a,
{
    entries.into_iter().filter_map(move |entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Skipping unreadable entry: {}", e);
            *unreadable += 1;
            None
        }
    })
}
