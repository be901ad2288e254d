use calnote::daily::CheckboxPolicy;
use calnote::ops::{convert_full_to_daily, export_to_txt, ConvertOptions, ExportOptions};
use std::fs;
use tempfile::tempdir;

mod test_helpers;
use test_helpers::{file_names, write_note};

#[test]
fn test_convert_vault_into_daily_notes() {
    let vault = tempdir().unwrap();
    let root = vault.path();
    fs::create_dir_all(root.join("work")).unwrap();

    write_note(
        root,
        "a-call.md",
        &[
            "date: 2025-07-21",
            "title: Call",
            "startTime: 09:00",
            "endTime: 10:00",
            "timezone: Europe/Budapest",
            "completed: true",
        ],
        "Followed up.",
    );
    write_note(
        &root.join("work"),
        "b-review.md",
        &[
            "date: 2025-07-21",
            "title: Review",
            "startTime: 14:00",
            "endTime: 15:00",
            "timezone: Europe/Budapest",
        ],
        "",
    );
    write_note(
        root,
        "c-trip.md",
        &[
            "date: 2025-07-22",
            "endDate: 2025-07-24",
            "title: Trip",
            "allDay: true",
            "timezone: Europe/London",
        ],
        "Packed.",
    );
    // Recurring definitions carry no date and are left out.
    write_note(
        root,
        "(Every M) Standup.md",
        &["title: Standup", "type: recurring", "daysOfWeek: [M]"],
        "",
    );
    fs::write(root.join("README.md"), "# Vault\n").unwrap();

    let options = ConvertOptions {
        input_dir: root.to_path_buf(),
        output_dir: root.join("exported"),
        checkbox_policy: CheckboxPolicy::PreserveEmpty,
    };
    let report = convert_full_to_daily(&options).unwrap();

    assert_eq!(report.scanned, 5);
    assert_eq!(report.parsed, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.written.len(), 2);
    assert_eq!(
        file_names(&root.join("exported")),
        vec!["2025-07-21.md", "2025-07-22.md"]
    );

    let first = fs::read_to_string(root.join("exported/2025-07-21.md")).unwrap();
    assert_eq!(
        first,
        "## Events\n\
         - [x] Call  [startTime:: 09:00]  [endTime:: 10:00]  [timezone:: Europe/Budapest]\n\
         -  Review  [startTime:: 14:00]  [endTime:: 15:00]  [timezone:: Europe/Budapest]\n\
         ## Diary\n\
         Followed up.\n"
    );

    let second = fs::read_to_string(root.join("exported/2025-07-22.md")).unwrap();
    assert!(second.contains(
        "-  Trip  [startTime:: ]  [endTime:: ]  [endDate:: 2025-07-24]  [timezone:: Europe/London]"
    ));
    assert!(second.ends_with("## Diary\nPacked.\n"));
}

#[test]
fn test_convert_twice_does_not_read_its_own_output() {
    let vault = tempdir().unwrap();
    let root = vault.path();
    write_note(
        root,
        "call.md",
        &["date: 2025-07-21", "title: Call", "completed: done"],
        "",
    );

    let options = ConvertOptions {
        input_dir: root.to_path_buf(),
        output_dir: root.join("exported"),
        checkbox_policy: CheckboxPolicy::AlwaysBox,
    };
    convert_full_to_daily(&options).unwrap();
    let report = convert_full_to_daily(&options).unwrap();

    assert_eq!(report.scanned, 1);
    let content = fs::read_to_string(root.join("exported/2025-07-21.md")).unwrap();
    assert_eq!(content.matches("Call").count(), 1);
    assert!(content.contains("- [x] Call"));
}

#[test]
fn test_convert_empty_vault_writes_nothing() {
    let vault = tempdir().unwrap();
    let options = ConvertOptions {
        input_dir: vault.path().to_path_buf(),
        output_dir: vault.path().join("exported"),
        checkbox_policy: CheckboxPolicy::default(),
    };
    let report = convert_full_to_daily(&options).unwrap();
    assert!(report.written.is_empty());
    assert!(file_names(&vault.path().join("exported")).is_empty());
}

#[test]
fn test_convert_fails_when_output_is_a_file() {
    let vault = tempdir().unwrap();
    write_note(vault.path(), "call.md", &["date: 2025-07-21"], "");
    fs::write(vault.path().join("exported"), "not a directory").unwrap();

    let options = ConvertOptions {
        input_dir: vault.path().to_path_buf(),
        output_dir: vault.path().join("exported"),
        checkbox_policy: CheckboxPolicy::default(),
    };
    assert!(convert_full_to_daily(&options).is_err());
}

#[test]
fn test_export_after_convert_skips_export_dir() {
    let vault = tempdir().unwrap();
    let root = vault.path();
    write_note(root, "call.md", &["date: 2025-07-21", "title: Call"], "");
    fs::write(root.join("LICENSE.md"), "MIT").unwrap();

    let report = export_to_txt(&ExportOptions {
        base_dir: root.to_path_buf(),
        export_dir: root.join("exported"),
    })
    .unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(file_names(&root.join("exported")), vec!["call.md.txt"]);
}

#[cfg(unix)]
#[test]
fn test_convert_continues_past_broken_links_and_bad_dates() {
    use std::os::unix::fs::symlink;

    let vault = tempdir().unwrap();
    let root = vault.path();
    let shared = tempdir().unwrap();
    write_note(shared.path(), "call.md", &["date: 2025-07-21", "title: Call"], "");
    symlink(shared.path().join("call.md"), root.join("call.md")).unwrap();
    symlink(root.join("deleted.md"), root.join("dangling.md")).unwrap();
    write_note(root, "escape.md", &["date: ../escaped", "title: Escape"], "");

    let report = convert_full_to_daily(&ConvertOptions {
        input_dir: root.to_path_buf(),
        output_dir: root.join("exported"),
        checkbox_policy: CheckboxPolicy::default(),
    })
    .unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.parsed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(file_names(&root.join("exported")), vec!["2025-07-21.md"]);
    assert!(!root.join("escaped.md").exists());
    let content = fs::read_to_string(root.join("exported/2025-07-21.md")).unwrap();
    assert!(content.contains(" Call  [startTime:: ]"));
}
