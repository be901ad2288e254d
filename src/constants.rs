//! Constants used throughout the application.
//!
//! This module contains all constants used by calnote, organized into logical
//! groups. The file formats defined here are shared with the calendar plugin
//! that consumes the generated notes, so they must not drift.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "calnote";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "Generate, convert and sync Full Note / Daily Note calendar fixtures";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default output directory for generated Full Notes.
pub const DEFAULT_FULL_NOTE_DIR: &str = "events_fullnote";
/// Default output directory for generated Daily Notes.
pub const DEFAULT_DAILY_NOTE_DIR: &str = "events_dailynote";
/// Default output directory for conversion and export.
pub const DEFAULT_EXPORT_DIR: &str = "exported";
/// Default number of single events generated.
pub const DEFAULT_SINGLE_COUNT: usize = 30;
/// Default number of recurring events generated.
pub const DEFAULT_RECURRING_COUNT: usize = 6;
/// Default number of Daily Notes generated.
pub const DEFAULT_DAY_COUNT: usize = 14;
/// Default heading the Daily Note generator writes events under.
pub const DEFAULT_DAILY_HEADING: &str = "Events";
/// Default probability that a generated single event is all-day.
pub const DEFAULT_ALL_DAY_WEIGHT: f64 = 0.2;

// Configuration Keys & Environment Variables
/// Environment variable for the adb executable used by sync.
pub const ENV_VAR_ADB: &str = "CALNOTE_ADB";
/// Environment variable for the local plugin directory watched by sync.
pub const ENV_VAR_PLUGIN_DIR: &str = "CALNOTE_PLUGIN_DIR";
/// Environment variable for the remote directory sync pushes into.
pub const ENV_VAR_REMOTE_DIR: &str = "CALNOTE_REMOTE_DIR";
/// Environment variable with a comma separated list of file names sync ignores.
pub const ENV_VAR_SYNC_EXCLUDE: &str = "CALNOTE_SYNC_EXCLUDE";
/// Environment variable for the watcher poll interval in milliseconds.
pub const ENV_VAR_POLL_INTERVAL_MS: &str = "CALNOTE_POLL_INTERVAL_MS";
/// Default adb command.
pub const DEFAULT_ADB_COMMAND: &str = "adb";
/// File names never pushed to the device.
pub const DEFAULT_SYNC_EXCLUDES: &[&str] = &[".hotreload", ".DS_Store", "Thumbs.db"];
/// Default watcher poll interval.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

// Validation
/// Characters forbidden in the push command.
pub const PUSH_COMMAND_FORBIDDEN_CHARS: &[char] = &['|', '&', ';', '$', '`', '<', '>', '\'', '"'];

// File System Parameters
/// File extension for notes.
pub const NOTE_FILE_EXTENSION: &str = ".md";
/// Suffix appended by the txt exporter.
pub const EXPORT_FILE_SUFFIX: &str = ".txt";
/// Directory names the txt exporter never descends into (besides its own output).
pub const EXPORT_SKIP_DIRS: &[&str] = &["chrono_analyser"];
/// File names the txt exporter never copies.
pub const EXPORT_SKIP_FILES: &[&str] = &["LICENSE.md", "README.md"];

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;
/// Latest end time generated events are clamped to.
pub const LATEST_END_MINUTES: u16 = 22 * 60;
/// Highest day-of-month a recurring event may use.
pub const MAX_DAY_OF_MONTH: u8 = 28;
/// Month abbreviations used by yearly recurrence descriptors.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Note Layout
/// Frontmatter delimiter line.
pub const FRONTMATTER_DELIMITER: &str = "---";
/// Heading of the events section of a converted Daily Note.
pub const DAILY_EVENTS_HEADING: &str = "## Events";
/// Heading of the diary section of a Daily Note.
pub const DAILY_DIARY_HEADING: &str = "## Diary";
/// Title used when a Full Note has none.
pub const UNTITLED: &str = "Untitled";
/// Body placeholder written into generated single event notes.
pub const SINGLE_NOTE_PLACEHOLDER: &str = "Notes...";
/// Body placeholder written into generated recurring event notes.
pub const RECURRING_NOTE_PLACEHOLDER: &str = "Recurring event note...";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "calnote";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
