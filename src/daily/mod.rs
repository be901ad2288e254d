//! Daily Note rendering and the Full Note to Daily Note aggregation.
//!
//! A Daily Note holds every event of one date as a checklist line with inline
//! `[key:: value]` fields, followed by a diary section:
//!
//! ```text
//! ## Events
//! - [x] Call  [startTime:: 09:00]  [endTime:: 10:00]  [timezone:: Europe/Budapest]
//! ## Diary
//! Followed up.
//! ```
//!
//! Aggregation is a pure fold over parsed notes into a [`DailyAggregate`] that
//! the caller owns; nothing is kept in process-wide state.

use crate::constants::{
    DAILY_DIARY_HEADING, DAILY_EVENTS_HEADING, DATE_FORMAT_ISO, NOTE_FILE_EXTENSION, UNTITLED,
};
use crate::errors::{AppError, AppResult};
use crate::frontmatter::Frontmatter;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Checkbox token at the start of an event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    /// No token at all.
    Absent,
    /// `[ ]`
    Open,
    /// `[x]`
    Done,
}

impl Checkbox {
    pub fn token(self) -> &'static str {
        match self {
            Checkbox::Absent => "",
            Checkbox::Open => "[ ]",
            Checkbox::Done => "[x]",
        }
    }
}

/// How a note's `completed` field becomes a checkbox.
///
/// The converter has always left the checkbox out for notes without a
/// `completed` value while the generators always write one. Both behaviours
/// are kept; which one the plugin's parser expects has not been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckboxPolicy {
    /// Non-empty `completed` gives `[x]`, anything else gives no token.
    #[default]
    PreserveEmpty,
    /// Non-empty `completed` gives `[x]`, anything else gives `[ ]`.
    AlwaysBox,
}

impl CheckboxPolicy {
    /// Any non-empty value counts as completed, including `false`.
    pub fn checkbox_for(self, completed: Option<&str>) -> Checkbox {
        match (completed.filter(|v| !v.is_empty()), self) {
            (Some(_), _) => Checkbox::Done,
            (None, CheckboxPolicy::PreserveEmpty) => Checkbox::Absent,
            (None, CheckboxPolicy::AlwaysBox) => Checkbox::Open,
        }
    }
}

/// One event line of a Daily Note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    pub checkbox: Checkbox,
    pub title: String,
    pub start: String,
    pub end: String,
    pub end_date: Option<String>,
    pub timezone: String,
}

impl EventLine {
    /// Builds the line for a Full Note's frontmatter.
    ///
    /// Missing time and timezone fields render as empty values, `title`
    /// defaults to `Untitled`.
    pub fn from_frontmatter(fm: &Frontmatter, policy: CheckboxPolicy) -> Self {
        EventLine {
            checkbox: policy.checkbox_for(fm.get("completed")),
            title: fm.get("title").unwrap_or(UNTITLED).to_string(),
            start: fm.get("startTime").unwrap_or_default().to_string(),
            end: fm.get("endTime").unwrap_or_default().to_string(),
            end_date: fm.get_non_empty("endDate").map(str::to_string),
            timezone: fm.get("timezone").unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for EventLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} {}  [startTime:: {}]  [endTime:: {}]",
            self.checkbox.token(),
            self.title,
            self.start,
            self.end
        )?;
        if let Some(end_date) = &self.end_date {
            write!(f, "  [endDate:: {}]", end_date)?;
        }
        write!(f, "  [timezone:: {}]", self.timezone)
    }
}

/// A parsed Full Note ready to be folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullNote {
    pub source: PathBuf,
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Everything collected for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEntries {
    pub events: Vec<String>,
    pub diary: Vec<String>,
}

/// Event lines and diary bodies keyed by `YYYY-MM-DD`.
///
/// Entries are append-only; dates iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyAggregate {
    days: BTreeMap<String, DayEntries>,
}

impl DailyAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &str) -> Option<&DayEntries> {
        self.days.get(date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayEntries)> {
        self.days.iter().map(|(date, entries)| (date.as_str(), entries))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Folds one note into the aggregate and hands it back.
///
/// Notes without a non-empty `date` contribute nothing, and so do notes whose
/// `date` is not a `YYYY-MM-DD` calendar date. Dates are keyed zero-padded.
pub fn fold_note(mut aggregate: DailyAggregate, note: &FullNote, policy: CheckboxPolicy) -> DailyAggregate {
    let Some(raw) = note.frontmatter.get_non_empty("date") else {
        debug!("Skipping {:?}: no date", note.source);
        return aggregate;
    };
    let date = match NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO) {
        Ok(date) => date.format(DATE_FORMAT_ISO).to_string(),
        Err(e) => {
            warn!("Skipping {:?}: invalid date '{}': {}", note.source, raw, e);
            return aggregate;
        }
    };

    let line = EventLine::from_frontmatter(&note.frontmatter, policy);
    let day = aggregate.days.entry(date).or_default();
    day.events.push(line.to_string());

    let body = note.body.trim();
    if !body.is_empty() {
        day.diary.push(body.to_string());
    }
    aggregate
}

/// Folds all notes, in iteration order, into a fresh aggregate.
///
/// # Examples
///
/// ```
/// use calnote::daily::{aggregate, render_day, CheckboxPolicy, FullNote};
/// use calnote::frontmatter;
/// use std::path::PathBuf;
///
/// let parsed = frontmatter::parse("---\ndate: 2025-07-21\ntitle: Call\n---\nDone.");
/// let note = FullNote { source: PathBuf::from("call.md"), frontmatter: parsed.frontmatter, body: parsed.body };
///
/// let agg = aggregate(&[note], CheckboxPolicy::default());
/// let day = agg.get("2025-07-21").unwrap();
/// assert_eq!(render_day(day), "## Events\n-  Call  [startTime:: ]  [endTime:: ]  [timezone:: ]\n## Diary\nDone.\n");
/// ```
pub fn aggregate<'a, I>(notes: I, policy: CheckboxPolicy) -> DailyAggregate
where
    I: IntoIterator<Item = &'a FullNote>,
{
    notes
        .into_iter()
        .fold(DailyAggregate::new(), |agg, note| fold_note(agg, note, policy))
}

/// Renders a converted Daily Note.
pub fn render_day(entries: &DayEntries) -> String {
    let mut out = String::new();
    out.push_str(DAILY_EVENTS_HEADING);
    out.push('\n');
    for event in &entries.events {
        out.push_str(event);
        out.push('\n');
    }
    out.push_str(DAILY_DIARY_HEADING);
    out.push('\n');
    for diary in &entries.diary {
        out.push_str(diary);
        out.push('\n');
    }
    out
}

/// Renders a generated Daily Note with its events under `## {heading}`.
pub fn render_generated_day(heading: &str, events: &[EventLine]) -> String {
    let mut out = format!("## {}\n\n", heading);
    for event in events {
        out.push_str(&event.to_string());
        out.push('\n');
    }
    out.push_str("\n\n");
    out.push_str(DAILY_DIARY_HEADING);
    out.push_str("\n\n");
    out
}

/// Outcome of writing an aggregate to disk.
#[derive(Debug, Default)]
pub struct FlushReport {
    /// Files written successfully
    pub written: Vec<PathBuf>,
    /// Dates whose file could not be written, with the cause
    pub failed: Vec<(String, AppError)>,
}

/// Writes one `{date}.md` per aggregated date into `out_dir`.
///
/// # Errors
///
/// Returns `AppError::Io` only if `out_dir` cannot be created. A failure to
/// write a single date is logged and recorded in the report; the remaining
/// dates are still written.
pub fn flush(aggregate: &DailyAggregate, out_dir: &Path) -> AppResult<FlushReport> {
    fs::create_dir_all(out_dir)?;

    let mut report = FlushReport::default();
    for (date, entries) in aggregate.iter() {
        let path = out_dir.join(format!("{}{}", date, NOTE_FILE_EXTENSION));
        match fs::write(&path, render_day(entries)) {
            Ok(()) => {
                debug!("Wrote {:?}", path);
                report.written.push(path);
            }
            Err(e) => {
                warn!("Failed to write daily note {:?}: {}", path, e);
                report.failed.push((date.to_string(), e.into()));
            }
        }
    }
    Ok(report)
}
