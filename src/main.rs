/*!
# calnote

Command-line entry point: parses arguments, sets up logging and dispatches to
the operation for the chosen subcommand.

## Usage

```
calnote [OPTIONS] <COMMAND>

Commands:
  full     Generate a Full Note calendar: one note per event
  daily    Generate a Daily Note calendar: one note per day
  convert  Convert a Full Note vault into Daily Notes
  export   Copy every file of a tree flat into one directory as .txt
  sync     Push plugin files to a device with adb

Options:
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
```

Logs go to stderr and honour `RUST_LOG`; completion summaries go to stdout.
*/

use calnote::cli::{CliArgs, Commands};
use calnote::config::{SyncConfig, SyncOverrides};
use calnote::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use calnote::daily::CheckboxPolicy;
use calnote::errors::AppResult;
use calnote::generate::GeneratorOptions;
use calnote::ops::{
    convert_full_to_daily, export_to_txt, generate_daily_note_calendar,
    generate_full_note_calendar, ConvertOptions, DailyNoteOptions, ExportOptions, FullNoteOptions,
};
use calnote::sync::{sync_tree, watch, AdbPush};
use chrono::Local;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

/// Initialises the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool, log_format: &str) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }
}

/// Seeded generator when a seed is given, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    let today = Local::now().date_naive();

    match args.command {
        Commands::Full(full) => {
            let options = FullNoteOptions {
                output_dir: full.output,
                singles: full.num,
                recurring: full.recurring,
                start: full.start.unwrap_or(today),
                generator: GeneratorOptions {
                    all_day_weight: full.all_day_weight,
                },
            };
            let report = generate_full_note_calendar(&mut make_rng(full.seed), &options)?;
            println!(
                "Generated {} single and {} recurring events in {}",
                report.singles,
                report.recurring,
                options.output_dir.display()
            );
        }
        Commands::Daily(daily) => {
            let options = DailyNoteOptions {
                output_dir: daily.output,
                days: daily.days,
                start: daily.start.unwrap_or(today),
                heading: daily.heading,
            };
            let report = generate_daily_note_calendar(&mut make_rng(daily.seed), &options)?;
            println!(
                "Generated {} daily notes in {}",
                report.daily_notes,
                options.output_dir.display()
            );
        }
        Commands::Convert(convert) => {
            let options = ConvertOptions {
                input_dir: convert.input,
                output_dir: convert.output,
                checkbox_policy: if convert.always_checkbox {
                    CheckboxPolicy::AlwaysBox
                } else {
                    CheckboxPolicy::PreserveEmpty
                },
            };
            let report = convert_full_to_daily(&options)?;
            println!(
                "Converted {} notes into {} daily notes in {} ({} skipped, {} failed)",
                report.parsed,
                report.written.len(),
                options.output_dir.display(),
                report.skipped,
                report.failed + report.write_failures
            );
        }
        Commands::Export(export) => {
            let options = ExportOptions {
                base_dir: export.base,
                export_dir: export.output,
            };
            let report = export_to_txt(&options)?;
            println!(
                "Export complete. {} files copied to '{}' with '.txt' appended.",
                report.copied,
                options.export_dir.display()
            );
        }
        Commands::Sync(sync) => {
            let config = SyncConfig::load(&SyncOverrides {
                adb: sync.adb,
                local_dir: sync.local,
                remote_dir: sync.remote,
                poll_interval_ms: sync.interval_ms,
            })?;
            config.validate()?;
            debug!("Sync configuration: {:?}", config);

            let pusher = AdbPush::new(config.adb.clone());
            let report = if sync.once {
                sync_tree(&pusher, &config)
            } else {
                println!(
                    "Watching {} for changes (Ctrl+C to stop)",
                    config.local_dir.display()
                );
                watch(&pusher, &config, || false)?
            };
            println!(
                "Synced {} files ({} failed, {} excluded)",
                report.pushed, report.failed, report.excluded
            );
        }
    }

    Ok(())
}

/// The main entry point for the calnote application.
///
/// Errors are logged once here, at the application boundary, and turned into
/// a non-zero exit code.
fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting calnote");
    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
