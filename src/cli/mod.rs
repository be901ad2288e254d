use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DEFAULT_ALL_DAY_WEIGHT,
    DEFAULT_DAILY_HEADING, DEFAULT_DAILY_NOTE_DIR, DEFAULT_DAY_COUNT, DEFAULT_EXPORT_DIR,
    DEFAULT_FULL_NOTE_DIR, DEFAULT_RECURRING_COUNT, DEFAULT_SINGLE_COUNT, LOG_FORMAT_JSON,
    LOG_FORMAT_TEXT,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments of the calnote binary
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, default_value = LOG_FORMAT_TEXT,
          value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Full Note calendar: one note per event
    Full(FullArgs),
    /// Generate a Daily Note calendar: one note per day
    Daily(DailyArgs),
    /// Convert a Full Note vault into Daily Notes
    Convert(ConvertArgs),
    /// Copy every file of a tree flat into one directory as .txt
    Export(ExportArgs),
    /// Push plugin files to a device with adb
    Sync(SyncArgs),
}

#[derive(Args, Debug)]
pub struct FullArgs {
    /// Output directory
    #[arg(short = 'o', long, default_value = DEFAULT_FULL_NOTE_DIR)]
    pub output: PathBuf,

    /// Number of single events
    #[arg(short = 'n', long, default_value_t = DEFAULT_SINGLE_COUNT)]
    pub num: usize,

    /// Number of recurring events
    #[arg(short = 'r', long, default_value_t = DEFAULT_RECURRING_COUNT)]
    pub recurring: usize,

    /// First date (format: YYYY-MM-DD or YYYYMMDD, defaults to today)
    #[arg(short = 's', long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability that a single event is all-day
    #[arg(long, default_value_t = DEFAULT_ALL_DAY_WEIGHT, value_parser = parse_probability)]
    pub all_day_weight: f64,
}

#[derive(Args, Debug)]
pub struct DailyArgs {
    /// Output directory
    #[arg(short = 'o', long, default_value = DEFAULT_DAILY_NOTE_DIR)]
    pub output: PathBuf,

    /// Number of days
    #[arg(short = 'd', long, default_value_t = DEFAULT_DAY_COUNT)]
    pub days: usize,

    /// First date (format: YYYY-MM-DD or YYYYMMDD, defaults to today)
    #[arg(short = 's', long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Heading the events are listed under
    #[arg(short = 'H', long, default_value = DEFAULT_DAILY_HEADING)]
    pub heading: String,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Full Note vault to read
    #[arg(short = 'i', long, default_value = ".")]
    pub input: PathBuf,

    /// Directory the Daily Notes are written to
    #[arg(short = 'o', long, default_value = DEFAULT_EXPORT_DIR)]
    pub output: PathBuf,

    /// Give every line a checkbox, even when the note has no `completed` key
    #[arg(long)]
    pub always_checkbox: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Tree to export
    #[arg(short = 'b', long, default_value = ".")]
    pub base: PathBuf,

    /// Export directory
    #[arg(short = 'o', long, default_value = DEFAULT_EXPORT_DIR)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// adb executable (overrides CALNOTE_ADB)
    #[arg(long)]
    pub adb: Option<String>,

    /// Local plugin directory (overrides CALNOTE_PLUGIN_DIR)
    #[arg(long)]
    pub local: Option<String>,

    /// Plugin directory on the device (overrides CALNOTE_REMOTE_DIR)
    #[arg(long)]
    pub remote: Option<String>,

    /// Push the whole tree once instead of watching
    #[arg(long)]
    pub once: bool,

    /// Watcher poll interval in milliseconds (overrides CALNOTE_POLL_INTERVAL_MS)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    NaiveDate::from_str(date_str)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
        .map_err(|_| {
            format!(
                "invalid date '{}', expected YYYY-MM-DD or YYYYMMDD",
                date_str
            )
        })
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not between 0 and 1", value))
    }
}
