//! Fixture generation for both calendar formats.

use crate::codec::write_full_note;
use crate::constants::{DATE_FORMAT_ISO, NOTE_FILE_EXTENSION};
use crate::daily::render_generated_day;
use crate::errors::AppResult;
use crate::event::Event;
use crate::generate::{gen_day_events, gen_recurring_event, gen_single_event, GeneratorOptions};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Events generated per Daily Note.
const MIN_DAILY_EVENTS: usize = 4;
const MAX_DAILY_EVENTS: usize = 8;

/// Parameters of a Full Note generation run.
#[derive(Debug, Clone)]
pub struct FullNoteOptions {
    pub output_dir: PathBuf,
    /// Number of single events
    pub singles: usize,
    /// Number of recurring events
    pub recurring: usize,
    /// First date single events are spread from
    pub start: NaiveDate,
    pub generator: GeneratorOptions,
}

/// Parameters of a Daily Note generation run.
#[derive(Debug, Clone)]
pub struct DailyNoteOptions {
    pub output_dir: PathBuf,
    /// Number of consecutive days
    pub days: usize,
    pub start: NaiveDate,
    /// Heading the events are listed under
    pub heading: String,
}

/// Report of a completed generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub singles: usize,
    pub recurring: usize,
    pub daily_notes: usize,
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

/// Writes `singles` single and `recurring` recurring Full Notes.
///
/// Single events are spread over `max(1, singles / 2)` days starting at
/// `start`, so most days get two events.
///
/// # Errors
///
/// Returns an error if the output directory or a note cannot be written.
pub fn generate_full_note_calendar<R: Rng + ?Sized>(
    rng: &mut R,
    options: &FullNoteOptions,
) -> AppResult<GenerationReport> {
    info!(
        "Generating {} single and {} recurring notes in {:?}",
        options.singles, options.recurring, options.output_dir
    );
    fs::create_dir_all(&options.output_dir)?;

    let mut report = GenerationReport::default();
    let spread = (options.singles / 2).max(1);
    for i in 0..options.singles {
        let date = options.start + Duration::days((i % spread) as i64);
        let event = Event::Single(gen_single_event(rng, date, &options.generator)?);
        let path = write_full_note(&options.output_dir, &event)?;
        debug!("Wrote single event {:?}", path);
        report.singles += 1;
        report.files.push(path);
    }

    for _ in 0..options.recurring {
        let event = Event::Recurring(gen_recurring_event(rng)?);
        let path = write_full_note(&options.output_dir, &event)?;
        debug!("Wrote recurring event {:?}", path);
        report.recurring += 1;
        report.files.push(path);
    }

    Ok(report)
}

/// Writes one generated Daily Note per day for `days` days from `start`.
///
/// # Errors
///
/// Returns an error if the output directory or a note cannot be written.
pub fn generate_daily_note_calendar<R: Rng + ?Sized>(
    rng: &mut R,
    options: &DailyNoteOptions,
) -> AppResult<GenerationReport> {
    info!(
        "Generating {} daily notes in {:?}",
        options.days, options.output_dir
    );
    fs::create_dir_all(&options.output_dir)?;

    let mut report = GenerationReport::default();
    for i in 0..options.days {
        let date = options.start + Duration::days(i as i64);
        let lines = gen_day_events(rng, MIN_DAILY_EVENTS, MAX_DAILY_EVENTS)?;
        let file_name = format!("{}{}", date.format(DATE_FORMAT_ISO), NOTE_FILE_EXTENSION);
        let path = options.output_dir.join(file_name);
        fs::write(&path, render_generated_day(&options.heading, &lines))?;
        debug!("Wrote daily note {:?} with {} events", path, lines.len());
        report.daily_notes += 1;
        report.files.push(path);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_filename, FilenameSchedule};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
    }

    #[test]
    fn test_full_note_calendar_spreads_singles() {
        let dir = tempdir().unwrap();
        let options = FullNoteOptions {
            output_dir: dir.path().join("events_fullnote"),
            singles: 10,
            recurring: 3,
            start: start(),
            generator: GeneratorOptions::default(),
        };
        let report = generate_full_note_calendar(&mut StdRng::seed_from_u64(5), &options).unwrap();

        assert_eq!(report.singles, 10);
        assert_eq!(report.recurring, 3);
        assert_eq!(report.files.len(), 13);

        let last_day = start() + Duration::days(4);
        for path in &report.files[..10] {
            let name = path.file_name().unwrap().to_str().unwrap();
            match decode_filename(name).unwrap().schedule {
                FilenameSchedule::Date(date) => assert!(date >= start() && date <= last_day),
                other => panic!("Expected a dated filename, got {:?}", other),
            }
        }
        for path in &report.files[10..] {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with('('));
        }
    }

    #[test]
    fn test_full_note_calendar_with_zero_singles() {
        let dir = tempdir().unwrap();
        let options = FullNoteOptions {
            output_dir: dir.path().to_path_buf(),
            singles: 0,
            recurring: 0,
            start: start(),
            generator: GeneratorOptions::default(),
        };
        let report = generate_full_note_calendar(&mut StdRng::seed_from_u64(5), &options).unwrap();
        assert_eq!(report, GenerationReport::default());
    }

    #[test]
    fn test_daily_note_calendar_writes_one_file_per_day() {
        let dir = tempdir().unwrap();
        let options = DailyNoteOptions {
            output_dir: dir.path().to_path_buf(),
            days: 3,
            start: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            heading: "Events".to_string(),
        };
        let report = generate_daily_note_calendar(&mut StdRng::seed_from_u64(8), &options).unwrap();

        assert_eq!(report.daily_notes, 3);
        for name in ["2025-12-31.md", "2026-01-01.md", "2026-01-02.md"] {
            let content = fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(content.starts_with("## Events\n\n- [ ] ") || content.starts_with("## Events\n\n- [x] "));
            assert!(content.ends_with("\n\n## Diary\n\n"));
        }
    }
}
