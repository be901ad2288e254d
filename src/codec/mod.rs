//! Full Note filename codec and note writer.
//!
//! The calendar plugin derives each Full Note's file name from the event, and
//! these notes double as the plugin's test fixtures, so the names produced here
//! must match the plugin's own naming exactly:
//!
//! - Single: `2025-07-21 Work - Team - Standup.md`
//! - Weekly: `(Every M,W,F) Work - Team - Standup.md`
//! - Monthly: `(Every month on the 5) Book Club.md`
//! - Yearly: `(Every year on Mar 7) Anniversary.md`

use crate::constants::{
    self, MONTH_ABBREVIATIONS, NOTE_FILE_EXTENSION, RECURRING_NOTE_PLACEHOLDER,
    SINGLE_NOTE_PLACEHOLDER,
};
use crate::errors::{AppResult, EventError};
use crate::event::{Event, Recurrence, Weekday};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const EVERY_PREFIX: &str = "(Every ";
const MONTHLY_PREFIX: &str = "month on the ";
const YEARLY_PREFIX: &str = "year on ";

/// Renders the recurrence descriptor without its parentheses.
fn descriptor(recurrence: &Recurrence) -> String {
    match recurrence {
        Recurrence::Weekly(days) => format!("Every {}", Recurrence::weekday_codes(days)),
        Recurrence::Monthly { day } => format!("Every month on the {}", day),
        Recurrence::Yearly { month, day } => {
            format!("Every year on {} {}", month_abbreviation(*month), day)
        }
    }
}

/// Three letter month name for `month` (1-12).
fn month_abbreviation(month: u8) -> &'static str {
    MONTH_ABBREVIATIONS
        .get(usize::from(month.saturating_sub(1)))
        .copied()
        .unwrap_or("")
}

/// Encodes an event into its Full Note file name.
///
/// # Examples
///
/// ```
/// use calnote::codec::encode_filename;
/// use calnote::event::{Event, EventTiming, RecurringEvent, Recurrence, Weekday};
///
/// let event = Event::Recurring(RecurringEvent {
///     recurrence: Recurrence::weekly(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]).unwrap(),
///     timing: EventTiming::AllDay,
///     timezone: "Europe/Budapest".to_string(),
///     category: Some("Work".to_string()),
///     subcategory: Some("Team".to_string()),
///     title: "Standup".to_string(),
/// });
/// assert_eq!(encode_filename(&event), "(Every M,W,F) Work - Team - Standup.md");
/// ```
pub fn encode_filename(event: &Event) -> String {
    let title = event.constructed_title();
    match event {
        Event::Single(ev) => format!(
            "{} {}{}",
            ev.date.format(constants::DATE_FORMAT_ISO),
            title,
            NOTE_FILE_EXTENSION
        ),
        Event::Recurring(ev) => format!(
            "({}) {}{}",
            descriptor(&ev.recurrence),
            title,
            NOTE_FILE_EXTENSION
        ),
    }
}

/// The schedule part of a decoded Full Note file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameSchedule {
    Date(NaiveDate),
    Recurring(Recurrence),
}

/// A Full Note file name split into schedule and constructed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFilename {
    pub schedule: FilenameSchedule,
    pub title: String,
}

/// Decodes a Full Note file name produced by [`encode_filename`].
pub fn decode_filename(name: &str) -> Result<DecodedFilename, EventError> {
    let unrecognized = || EventError::UnrecognizedFilename(name.to_string());
    let stem = name.strip_suffix(NOTE_FILE_EXTENSION).ok_or_else(unrecognized)?;

    if let Some(rest) = stem.strip_prefix(EVERY_PREFIX) {
        let (inner, title) = rest.split_once(") ").ok_or_else(unrecognized)?;
        return Ok(DecodedFilename {
            schedule: FilenameSchedule::Recurring(decode_descriptor(inner, name)?),
            title: title.to_string(),
        });
    }

    let (date, title) = stem.split_once(' ').ok_or_else(unrecognized)?;
    let date = NaiveDate::parse_from_str(date, constants::DATE_FORMAT_ISO)
        .map_err(|_| unrecognized())?;
    Ok(DecodedFilename {
        schedule: FilenameSchedule::Date(date),
        title: title.to_string(),
    })
}

fn decode_descriptor(inner: &str, name: &str) -> Result<Recurrence, EventError> {
    let unrecognized = || EventError::UnrecognizedFilename(name.to_string());

    if let Some(day) = inner.strip_prefix(MONTHLY_PREFIX) {
        let day = day.parse::<u32>().map_err(|_| unrecognized())?;
        return Recurrence::monthly(day);
    }

    if let Some(rest) = inner.strip_prefix(YEARLY_PREFIX) {
        let (month, day) = rest.split_once(' ').ok_or_else(unrecognized)?;
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| *abbr == month)
            .ok_or_else(unrecognized)?;
        let day = day.parse::<u32>().map_err(|_| unrecognized())?;
        return Recurrence::yearly(month as u32 + 1, day);
    }

    let days = inner
        .split(',')
        .map(Weekday::from_code)
        .collect::<Result<Vec<_>, _>>()?;
    Recurrence::weekly(days)
}

/// Renders the full content of a Full Note: frontmatter, heading and placeholder body.
pub fn render_note(event: &Event) -> String {
    let placeholder = match event {
        Event::Single(_) => SINGLE_NOTE_PLACEHOLDER,
        Event::Recurring(_) => RECURRING_NOTE_PLACEHOLDER,
    };
    format!(
        "{}\n# {}\n\n{}\n",
        event.to_frontmatter().to_block(),
        event.constructed_title(),
        placeholder
    )
}

/// Writes the event's Full Note into `dir`, returning the file path.
///
/// Two events with the same file name overwrite each other. That is fine for
/// synthetic fixtures; callers writing real data must de-duplicate first.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be written.
pub fn write_full_note(dir: &Path, event: &Event) -> AppResult<PathBuf> {
    let path = dir.join(encode_filename(event));
    if path.exists() {
        debug!("Overwriting existing note {:?}", path);
    }
    fs::write(&path, render_note(event))?;
    Ok(path)
}
