//! Typed calendar event model.
//!
//! An [`Event`] is either a [`SingleEvent`] on a fixed date or a
//! [`RecurringEvent`] following exactly one [`Recurrence`] pattern. The
//! invariants of the Full Note format are enforced by construction: times are
//! validated when built, a timed event always ends after it starts, and a
//! recurrence can only ever carry one schedule dimension.

use crate::constants::{self, MAX_DAY_OF_MONTH, MINUTES_PER_DAY};
use crate::errors::EventError;
use crate::frontmatter::Frontmatter;
use chrono::NaiveDate;
use std::fmt;

/// Day of the week, identified by the plugin's single letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in plugin order, Sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Monday through Friday.
    pub const WORKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn code(self) -> char {
        match self {
            Weekday::Sunday => 'U',
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
            Weekday::Saturday => 'S',
        }
    }

    pub fn from_code(code: &str) -> Result<Self, EventError> {
        Weekday::ALL
            .into_iter()
            .find(|day| code.len() == 1 && code.starts_with(day.code()))
            .ok_or_else(|| EventError::UnknownWeekday(code.to_string()))
    }
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from minutes after midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, EventError> {
        if minutes < MINUTES_PER_DAY {
            Ok(TimeOfDay(minutes))
        } else {
            Err(EventError::InvalidTime(format!(
                "{:02}:{:02}",
                minutes / 60,
                minutes % 60
            )))
        }
    }

    /// Parses `HH:MM` (a single digit hour is accepted).
    pub fn parse(text: &str) -> Result<Self, EventError> {
        let invalid = || EventError::InvalidTime(text.to_string());
        let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;
        if minutes.len() != 2 || hours.is_empty() || hours.len() > 2 {
            return Err(invalid());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
        if hours >= 24 || minutes >= 60 {
            return Err(invalid());
        }
        Ok(TimeOfDay(hours * 60 + minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Whether an event spans the whole day or a time range within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    AllDay,
    Timed { start: TimeOfDay, end: TimeOfDay },
}

impl EventTiming {
    /// Builds a timed range; `end` must be strictly after `start`.
    pub fn timed(start: TimeOfDay, end: TimeOfDay) -> Result<Self, EventError> {
        if end <= start {
            return Err(EventError::EndNotAfterStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(EventTiming::Timed { start, end })
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTiming::AllDay)
    }
}

/// Day of month guarded to the range every month has.
fn checked_day_of_month(day: u32) -> Result<u8, EventError> {
    if (1..=u32::from(MAX_DAY_OF_MONTH)).contains(&day) {
        Ok(day as u8)
    } else {
        Err(EventError::DayOfMonthOutOfRange(day))
    }
}

/// The schedule of a recurring event. Exactly one dimension is ever set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// Repeats on the listed weekdays, kept in selection order.
    Weekly(Vec<Weekday>),
    /// Repeats every month on `day`.
    Monthly { day: u8 },
    /// Repeats every year on `day` of `month`.
    Yearly { month: u8, day: u8 },
}

impl Recurrence {
    pub fn weekly(days: Vec<Weekday>) -> Result<Self, EventError> {
        if days.is_empty() {
            return Err(EventError::EmptyWeekdays);
        }
        for (idx, day) in days.iter().enumerate() {
            if days[..idx].contains(day) {
                return Err(EventError::DuplicateWeekday(day.code()));
            }
        }
        Ok(Recurrence::Weekly(days))
    }

    pub fn monthly(day: u32) -> Result<Self, EventError> {
        Ok(Recurrence::Monthly {
            day: checked_day_of_month(day)?,
        })
    }

    pub fn yearly(month: u32, day: u32) -> Result<Self, EventError> {
        let month = match u8::try_from(month) {
            Ok(month) if (1..=12).contains(&month) => month,
            _ => return Err(EventError::MonthOutOfRange(month)),
        };
        Ok(Recurrence::Yearly {
            month,
            day: checked_day_of_month(day)?,
        })
    }

    /// Weekday codes joined with commas, e.g. `M,W,F`.
    pub fn weekday_codes(days: &[Weekday]) -> String {
        days.iter()
            .map(|d| d.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Joins category, subcategory and title the way the plugin expects.
///
/// # Examples
///
/// ```
/// use calnote::event::constructed_title;
///
/// assert_eq!(constructed_title(Some("Work"), Some("Team"), "Standup"), "Work - Team - Standup");
/// assert_eq!(constructed_title(Some("Work"), None, "Standup"), "Work - Standup");
/// assert_eq!(constructed_title(None, Some("Team"), "Standup"), "Standup");
/// ```
pub fn constructed_title(category: Option<&str>, subcategory: Option<&str>, title: &str) -> String {
    match (category, subcategory) {
        (Some(category), Some(sub)) => format!("{} - {} - {}", category, sub, title),
        (Some(category), None) => format!("{} - {}", category, title),
        _ => title.to_string(),
    }
}

/// An event on one fixed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleEvent {
    pub date: NaiveDate,
    pub timing: EventTiming,
    pub timezone: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub title: String,
}

/// An event repeating on a weekly, monthly or yearly schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEvent {
    pub recurrence: Recurrence,
    pub timing: EventTiming,
    pub timezone: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub title: String,
}

/// A Full Note calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Single(SingleEvent),
    Recurring(RecurringEvent),
}

impl Event {
    pub fn timing(&self) -> &EventTiming {
        match self {
            Event::Single(ev) => &ev.timing,
            Event::Recurring(ev) => &ev.timing,
        }
    }

    pub fn timezone(&self) -> &str {
        match self {
            Event::Single(ev) => &ev.timezone,
            Event::Recurring(ev) => &ev.timezone,
        }
    }

    /// The title with its category prefixes applied.
    pub fn constructed_title(&self) -> String {
        let (category, sub, title) = match self {
            Event::Single(ev) => (&ev.category, &ev.subcategory, &ev.title),
            Event::Recurring(ev) => (&ev.category, &ev.subcategory, &ev.title),
        };
        constructed_title(category.as_deref(), sub.as_deref(), title)
    }

    /// Value of the `type` frontmatter key.
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::Single(_) => "single",
            Event::Recurring(_) => "recurring",
        }
    }

    /// Builds the frontmatter mapping written into a Full Note.
    ///
    /// The title written is the constructed title, since the note file is
    /// the only place the plugin reads category prefixes from.
    pub fn to_frontmatter(&self) -> Frontmatter {
        let mut fm = Frontmatter::new();
        fm.insert("title", self.constructed_title());
        fm.insert("type", self.type_name());

        match self {
            Event::Single(ev) => {
                fm.insert("date", ev.date.format(constants::DATE_FORMAT_ISO).to_string());
            }
            Event::Recurring(ev) => match &ev.recurrence {
                Recurrence::Weekly(days) => {
                    fm.insert("daysOfWeek", format!("[{}]", Recurrence::weekday_codes(days)));
                }
                Recurrence::Monthly { day } => {
                    fm.insert("dayOfMonth", day.to_string());
                }
                Recurrence::Yearly { month, day } => {
                    fm.insert("month", month.to_string());
                    fm.insert("dayOfMonth", day.to_string());
                }
            },
        }

        match self.timing() {
            EventTiming::AllDay => fm.insert("allDay", "true"),
            EventTiming::Timed { start, end } => {
                fm.insert("allDay", "false");
                fm.insert("startTime", start.to_string());
                fm.insert("endTime", end.to_string());
            }
        }
        fm.insert("timezone", self.timezone());
        fm
    }

    /// Reads an event back from Full Note frontmatter.
    ///
    /// Category prefixes are not split out of the title: the stored title is
    /// already the constructed one.
    pub fn from_frontmatter(fm: &Frontmatter) -> Result<Self, EventError> {
        let title = fm
            .get_non_empty("title")
            .unwrap_or(constants::UNTITLED)
            .to_string();
        let timezone = fm.get("timezone").unwrap_or_default().to_string();
        let kind = fm.get_non_empty("type").unwrap_or("single");
        if !matches!(kind, "single" | "recurring") {
            return Err(EventError::InvalidField {
                field: "type",
                value: kind.to_string(),
            });
        }
        let timing = timing_from_frontmatter(fm)?;

        match kind {
            "single" => {
                let raw = fm.get_non_empty("date").ok_or(EventError::MissingField("date"))?;
                let date = NaiveDate::parse_from_str(raw, constants::DATE_FORMAT_ISO).map_err(
                    |_| EventError::InvalidField {
                        field: "date",
                        value: raw.to_string(),
                    },
                )?;
                Ok(Event::Single(SingleEvent {
                    date,
                    timing,
                    timezone,
                    category: None,
                    subcategory: None,
                    title,
                }))
            }
            _ => Ok(Event::Recurring(RecurringEvent {
                recurrence: recurrence_from_frontmatter(fm)?,
                timing,
                timezone,
                category: None,
                subcategory: None,
                title,
            })),
        }
    }
}

fn timing_from_frontmatter(fm: &Frontmatter) -> Result<EventTiming, EventError> {
    let all_day = match fm.get_non_empty("allDay") {
        None | Some("false") => false,
        Some("true") => true,
        Some(other) => {
            return Err(EventError::InvalidField {
                field: "allDay",
                value: other.to_string(),
            })
        }
    };
    if all_day {
        return Ok(EventTiming::AllDay);
    }

    let start = fm.get_non_empty("startTime");
    let end = fm.get_non_empty("endTime");
    match (start, end) {
        (Some(start), Some(end)) => {
            EventTiming::timed(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
        }
        (None, _) => Err(EventError::MissingField("startTime")),
        (_, None) => Err(EventError::MissingField("endTime")),
    }
}

fn parse_number(fm: &Frontmatter, field: &'static str) -> Result<Option<u32>, EventError> {
    fm.get_non_empty(field)
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| EventError::InvalidField {
                field,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn recurrence_from_frontmatter(fm: &Frontmatter) -> Result<Recurrence, EventError> {
    if let Some(raw) = fm.get_non_empty("daysOfWeek") {
        if let Some(other) = ["month", "dayOfMonth"]
            .into_iter()
            .find(|key| fm.get_non_empty(key).is_some())
        {
            return Err(EventError::ConflictingRecurrence(format!("daysOfWeek and {}", other)));
        }
        let inner = raw.trim_start_matches('[').trim_end_matches(']');
        let days = inner
            .split(',')
            .map(|code| code.trim().trim_matches('"').trim_matches('\''))
            .filter(|code| !code.is_empty())
            .map(Weekday::from_code)
            .collect::<Result<Vec<_>, _>>()?;
        return Recurrence::weekly(days);
    }

    let month = parse_number(fm, "month")?;
    let day = parse_number(fm, "dayOfMonth")?;
    match (month, day) {
        (Some(month), Some(day)) => Recurrence::yearly(month, day),
        (None, Some(day)) => Recurrence::monthly(day),
        (_, None) => Err(EventError::MissingField("dayOfMonth")),
    }
}
