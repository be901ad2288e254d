use calnote::codec::{decode_filename, FilenameSchedule};
use calnote::daily::CheckboxPolicy;
use calnote::event::Event;
use calnote::frontmatter;
use calnote::generate::GeneratorOptions;
use calnote::ops::{
    convert_full_to_daily, generate_daily_note_calendar, generate_full_note_calendar,
    ConvertOptions, DailyNoteOptions, FullNoteOptions,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

mod test_helpers;
use test_helpers::file_names;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
}

fn full_options(dir: &std::path::Path) -> FullNoteOptions {
    FullNoteOptions {
        output_dir: dir.to_path_buf(),
        singles: 12,
        recurring: 6,
        start: start(),
        generator: GeneratorOptions::default(),
    }
}

#[test]
fn test_generated_full_notes_parse_back_into_events() {
    let dir = tempdir().unwrap();
    let report =
        generate_full_note_calendar(&mut StdRng::seed_from_u64(11), &full_options(dir.path()))
            .unwrap();

    for path in &report.files {
        let name = path.file_name().unwrap().to_str().unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("---\n"));

        let parsed = frontmatter::parse(&content);
        let event = Event::from_frontmatter(&parsed.frontmatter).unwrap();
        assert!(parsed.body.starts_with(&format!("# {}", event.constructed_title())));

        let decoded = decode_filename(name).unwrap();
        assert_eq!(decoded.title, event.constructed_title());
        match (&event, decoded.schedule) {
            (Event::Single(single), FilenameSchedule::Date(date)) => assert_eq!(single.date, date),
            (Event::Recurring(recurring), FilenameSchedule::Recurring(recurrence)) => {
                assert_eq!(recurring.recurrence, recurrence)
            }
            (event, schedule) => panic!("{:?} does not match {:?}", event, schedule),
        }
    }
}

#[test]
fn test_same_seed_gives_same_calendar() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    generate_full_note_calendar(&mut StdRng::seed_from_u64(3), &full_options(a.path())).unwrap();
    generate_full_note_calendar(&mut StdRng::seed_from_u64(3), &full_options(b.path())).unwrap();

    let names = file_names(a.path());
    assert_eq!(names, file_names(b.path()));
    for name in names {
        assert_eq!(
            fs::read_to_string(a.path().join(&name)).unwrap(),
            fs::read_to_string(b.path().join(&name)).unwrap()
        );
    }
}

#[test]
fn test_generated_calendar_converts_to_daily_notes() {
    let vault = tempdir().unwrap();
    let notes = vault.path().join("events_fullnote");
    let mut options = full_options(&notes);
    options.recurring = 0;
    generate_full_note_calendar(&mut StdRng::seed_from_u64(21), &options).unwrap();

    let report = convert_full_to_daily(&ConvertOptions {
        input_dir: vault.path().to_path_buf(),
        output_dir: vault.path().join("exported"),
        checkbox_policy: CheckboxPolicy::AlwaysBox,
    })
    .unwrap();

    // Twelve singles spread over six days; same-named events overwrite each other.
    let note_count = file_names(&notes).len();
    assert_eq!(report.parsed, note_count);
    assert_eq!(report.written.len(), 6);

    let mut lines = 0;
    for name in file_names(&vault.path().join("exported")) {
        let content = fs::read_to_string(vault.path().join("exported").join(name)).unwrap();
        lines += content.lines().filter(|l| l.starts_with("- [ ] ")).count();
        assert!(content.contains("\n## Diary\n# "));
        assert!(content.ends_with("Notes...\n"));
    }
    assert_eq!(lines, note_count);
}

#[test]
fn test_daily_note_calendar_format() {
    let dir = tempdir().unwrap();
    let options = DailyNoteOptions {
        output_dir: dir.path().to_path_buf(),
        days: 7,
        start: start(),
        heading: "Agenda".to_string(),
    };
    let report = generate_daily_note_calendar(&mut StdRng::seed_from_u64(4), &options).unwrap();

    assert_eq!(report.daily_notes, 7);
    assert_eq!(file_names(dir.path()).first().map(String::as_str), Some("2025-07-21.md"));
    assert_eq!(file_names(dir.path()).last().map(String::as_str), Some("2025-07-27.md"));

    for path in &report.files {
        let content = fs::read_to_string(path).unwrap();
        let (events, diary) = content.split_once("\n\n\n## Diary").unwrap();
        assert_eq!(diary, "\n\n");

        let mut lines = events.lines();
        assert_eq!(lines.next(), Some("## Agenda"));
        assert_eq!(lines.next(), Some(""));
        for line in lines {
            assert!(line.starts_with("- [ ] ") || line.starts_with("- [x] "));
            assert!(line.contains("  [startTime:: "));
            assert!(line.contains("  [endTime:: "));
            assert!(line.ends_with(']'));
        }
    }
}
