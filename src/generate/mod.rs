//! Synthetic event generators.
//!
//! Produces randomised but schema-valid events to exercise the codec and to
//! seed the plugin's test vaults. All generators take the random source as a
//! parameter so runs can be reproduced with a seeded `StdRng`.

use crate::constants::{LATEST_END_MINUTES, MAX_DAY_OF_MONTH};
use crate::daily::{Checkbox, EventLine};
use crate::errors::EventError;
use crate::event::{
    constructed_title, EventTiming, RecurringEvent, Recurrence, SingleEvent, TimeOfDay, Weekday,
};
use chrono::NaiveDate;
use rand::Rng;

/// Timezones events are assigned to.
pub const TZ_CHOICES: &[&str] = &[
    "Europe/Budapest",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
    "Australia/Sydney",
];

/// Categories with their subcategories.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Work", &["Project Alpha", "Project Beta", "Team", "Clients"]),
    ("Personal", &["Health", "Family", "Finance", "Hobby"]),
    ("Fitness", &["Running", "Gym", "Yoga"]),
    ("Learning", &["Course", "Reading", "Practice"]),
    ("Errands", &["Shopping", "Home", "Car"]),
];

/// Event titles, without category prefixes.
pub const TITLE_TAILS: &[&str] = &[
    "Sprint Planning",
    "Daily Standup",
    "1:1",
    "Client Call",
    "Design Session",
    "Code Review",
    "Deep Work",
    "Workshop",
    "Brainstorm",
    "Morning Run",
    "Gym Session",
    "Yoga Flow",
    "Study Block",
    "Reading",
    "Grocery Run",
];

const SINGLE_START_OFFSETS: &[u16] = &[0, 15, 30, 45, 60, 90, 120];
const SINGLE_DURATIONS: &[u16] = &[30, 45, 60, 75, 90, 120, 150];
const WEEKLY_DURATIONS: &[u16] = &[30, 45, 60, 90];
const MONTHLY_DURATIONS: &[u16] = &[60, 90, 120];
const DAILY_DURATIONS: &[u16] = &[30, 45, 60, 75, 90, 120];

/// Tunables for the Full Note generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    /// Probability that a single event is all-day.
    pub all_day_weight: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            all_day_weight: crate::constants::DEFAULT_ALL_DAY_WEIGHT,
        }
    }
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn hours(h: u16) -> u16 {
    h * 60
}

/// Picks a category and one of its subcategories.
pub fn pick_category<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let (category, subs) = *pick(rng, CATEGORIES);
    (category, *pick(rng, subs))
}

/// Builds a timed range from minute offsets, clamping the end to 22:00 when
/// that still leaves the event a positive length.
fn clamped_timing(start: u16, duration: u16) -> Result<EventTiming, EventError> {
    let mut end = start + duration;
    if end > LATEST_END_MINUTES && start < LATEST_END_MINUTES {
        end = LATEST_END_MINUTES;
    }
    EventTiming::timed(TimeOfDay::from_minutes(start)?, TimeOfDay::from_minutes(end)?)
}

/// Generates a single event on `date`.
pub fn gen_single_event<R: Rng + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    options: &GeneratorOptions,
) -> Result<SingleEvent, EventError> {
    let timezone = pick(rng, TZ_CHOICES).to_string();
    let (category, sub) = pick_category(rng);
    let title = pick(rng, TITLE_TAILS).to_string();

    let timing = if rng.random_bool(options.all_day_weight.clamp(0.0, 1.0)) {
        EventTiming::AllDay
    } else {
        let start = rng.random_range(hours(7)..=hours(10)) + *pick(rng, SINGLE_START_OFFSETS);
        clamped_timing(start, *pick(rng, SINGLE_DURATIONS))?
    };

    Ok(SingleEvent {
        date,
        timing,
        timezone,
        category: Some(category.to_string()),
        subcategory: Some(sub.to_string()),
        title,
    })
}

/// Generates a recurring event: weekly 60%, monthly 25%, yearly 15%.
pub fn gen_recurring_event<R: Rng + ?Sized>(rng: &mut R) -> Result<RecurringEvent, EventError> {
    let timezone = pick(rng, TZ_CHOICES).to_string();
    let (category, sub) = pick_category(rng);
    let title = pick(rng, TITLE_TAILS).to_string();

    let roll: f64 = rng.random();
    let (recurrence, timing) = if roll < 0.6 {
        let count = rng.random_range(1..=3);
        let days = rand::seq::index::sample(rng, Weekday::WORKDAYS.len(), count)
            .iter()
            .map(|idx| Weekday::WORKDAYS[idx])
            .collect();
        let start = rng.random_range(hours(8)..=hours(11));
        (
            Recurrence::weekly(days)?,
            clamped_timing(start, *pick(rng, WEEKLY_DURATIONS))?,
        )
    } else if roll < 0.85 {
        let day = rng.random_range(1..=u32::from(MAX_DAY_OF_MONTH));
        let start = rng.random_range(hours(18)..=hours(20));
        (
            Recurrence::monthly(day)?,
            clamped_timing(start, *pick(rng, MONTHLY_DURATIONS))?,
        )
    } else {
        let month = rng.random_range(1..=12);
        let day = rng.random_range(1..=u32::from(MAX_DAY_OF_MONTH));
        let start = rng.random_range(hours(9)..=hours(17));
        (
            Recurrence::yearly(month, day)?,
            clamped_timing(start, *pick(rng, MONTHLY_DURATIONS))?,
        )
    };

    Ok(RecurringEvent {
        recurrence,
        timing,
        timezone,
        category: Some(category.to_string()),
        subcategory: Some(sub.to_string()),
        title,
    })
}

/// Generates between `min_events` and `max_events` back-to-back events for a Daily Note.
///
/// The day starts between 06:00 and 09:00 and each next block follows after a
/// gap of -15 to +60 minutes. Generation stops once a block could no longer
/// fit before 22:00. Lines come back sorted by start time.
pub fn gen_day_events<R: Rng + ?Sized>(
    rng: &mut R,
    min_events: usize,
    max_events: usize,
) -> Result<Vec<EventLine>, EventError> {
    let count = rng.random_range(min_events..=max_events.max(min_events));
    let shortest = DAILY_DURATIONS.iter().copied().min().unwrap_or(30);

    let mut blocks: Vec<(EventTiming, EventLine)> = Vec::with_capacity(count);
    let mut cursor = i32::from(rng.random_range(hours(6)..=hours(9)));
    for _ in 0..count {
        if cursor + i32::from(shortest) > i32::from(LATEST_END_MINUTES) {
            break;
        }
        let start = cursor as u16;
        let timing = clamped_timing(start, *pick(rng, DAILY_DURATIONS))?;
        let (category, sub) = pick_category(rng);
        let title = constructed_title(Some(category), Some(sub), *pick(rng, TITLE_TAILS));
        let timezone = pick(rng, TZ_CHOICES).to_string();
        let checkbox = if rng.random_bool(0.25) {
            Checkbox::Done
        } else {
            Checkbox::Open
        };

        let EventTiming::Timed { start, end } = timing else {
            continue;
        };
        blocks.push((
            timing,
            EventLine {
                checkbox,
                title,
                start: start.to_string(),
                end: end.to_string(),
                end_date: None,
                timezone,
            },
        ));
        cursor = i32::from(end.minutes()) + rng.random_range(-15..=60);
    }

    blocks.sort_by_key(|(timing, _)| match timing {
        EventTiming::Timed { start, .. } => start.minutes(),
        EventTiming::AllDay => 0,
    });
    Ok(blocks.into_iter().map(|(_, line)| line).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
    }

    #[test]
    fn test_single_events_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = GeneratorOptions::default();
        for _ in 0..500 {
            let ev = gen_single_event(&mut rng, date(), &options).unwrap();
            assert_eq!(ev.date, date());
            assert!(TZ_CHOICES.contains(&ev.timezone.as_str()));
            assert!(ev.category.is_some() && ev.subcategory.is_some());
            if let EventTiming::Timed { start, end } = ev.timing {
                assert!(end > start);
                assert!(end.minutes() <= LATEST_END_MINUTES);
                assert!(start.minutes() >= hours(7));
            }
        }
    }

    #[test]
    fn test_all_day_weight_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let always = GeneratorOptions { all_day_weight: 1.0 };
        let never = GeneratorOptions { all_day_weight: 0.0 };
        for _ in 0..50 {
            assert!(gen_single_event(&mut rng, date(), &always).unwrap().timing.is_all_day());
            assert!(!gen_single_event(&mut rng, date(), &never).unwrap().timing.is_all_day());
        }
    }

    #[test]
    fn test_recurring_events_have_one_valid_dimension() {
        let mut rng = StdRng::seed_from_u64(42);
        let (mut weekly, mut monthly, mut yearly) = (0, 0, 0);
        for _ in 0..500 {
            let ev = gen_recurring_event(&mut rng).unwrap();
            match &ev.recurrence {
                Recurrence::Weekly(days) => {
                    weekly += 1;
                    assert!((1..=3).contains(&days.len()));
                    assert!(days.iter().all(|d| Weekday::WORKDAYS.contains(d)));
                    // Construction rejects duplicates, so re-validating must succeed.
                    assert!(Recurrence::weekly(days.clone()).is_ok());
                }
                Recurrence::Monthly { day } => {
                    monthly += 1;
                    assert!((1..=MAX_DAY_OF_MONTH).contains(day));
                }
                Recurrence::Yearly { month, day } => {
                    yearly += 1;
                    assert!((1..=12).contains(month));
                    assert!((1..=MAX_DAY_OF_MONTH).contains(day));
                }
            }
            assert!(!ev.timing.is_all_day());
        }
        assert!(weekly > monthly && monthly > 0 && yearly > 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = gen_recurring_event(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = gen_recurring_event(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_day_events_sorted_and_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let lines = gen_day_events(&mut rng, 4, 8).unwrap();
            assert!(!lines.is_empty() && lines.len() <= 8);

            let starts: Vec<u16> = lines
                .iter()
                .map(|l| TimeOfDay::parse(&l.start).unwrap().minutes())
                .collect();
            assert!(starts.windows(2).all(|w| w[0] <= w[1]));

            for line in &lines {
                let start = TimeOfDay::parse(&line.start).unwrap();
                let end = TimeOfDay::parse(&line.end).unwrap();
                assert!(end > start);
                assert!(end.minutes() <= LATEST_END_MINUTES);
                assert_eq!(line.title.split(" - ").count(), 3);
                let tail = line.title.rsplit(" - ").next().unwrap();
                assert!(TITLE_TAILS.contains(&tail));
                assert_ne!(line.checkbox, Checkbox::Absent);
            }
        }
    }
}
