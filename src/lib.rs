/*!
# calnote

calnote produces and transforms the markdown calendars used by the Obsidian
Full Calendar plugin and its test vaults.

## Note formats

- **Full Note calendar**: one file per event, with the event's properties in a
  `---` delimited frontmatter block and its name derived from the event
  (`2025-07-21 Work - Team - Standup.md`, `(Every M,W,F) Standup.md`).
- **Daily Note calendar**: one file per date (`2025-07-21.md`) listing that
  day's events as inline-field lines under an `## Events` heading, followed
  by a `## Diary` section.

## Architecture

- `frontmatter`: leading key/value block parsing and rendering
- `event`: typed Single and Recurring events
- `codec`: Full Note file names and note bodies
- `daily`: Daily Note lines, aggregation and rendering
- `generate`: randomised events for fixtures
- `sync`: pushing plugin files to a device
- `ops`: the operations behind each CLI command
- `cli`, `config`, `constants`, `errors`: the surrounding plumbing

## Usage Example

```rust,no_run
use calnote::daily::CheckboxPolicy;
use calnote::ops::{convert_full_to_daily, ConvertOptions};
use std::path::PathBuf;

fn main() -> calnote::AppResult<()> {
    let report = convert_full_to_daily(&ConvertOptions {
        input_dir: PathBuf::from("vault"),
        output_dir: PathBuf::from("vault/exported"),
        checkbox_policy: CheckboxPolicy::default(),
    })?;
    println!("{} daily notes written", report.written.len());
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Typed Full Note file names and note rendering
pub mod codec;
/// Sync configuration loading and validation
pub mod config;
/// Application-wide constants
pub mod constants;
/// Daily Note model, aggregation and rendering
pub mod daily;
/// Error types and utilities for error handling
pub mod errors;
/// Calendar event model
pub mod event;
/// Frontmatter block parsing
pub mod frontmatter;
/// Random event generators
pub mod generate;
/// High-level operations
pub mod ops;
/// Device sync over adb
pub mod sync;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::SyncConfig;
pub use errors::{AppError, AppResult};
pub use event::Event;
