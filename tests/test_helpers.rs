#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// Creates a `Command` for the `calnote` binary with a clean environment.
/// Additional environment variables or arguments can be configured by the caller.
pub fn base_calnote_command() -> Command {
    let mut cmd = Command::cargo_bin("calnote").expect("calnote binary not built");
    configure_calnote_command(&mut cmd);
    cmd
}

/// Clears the environment so no `CALNOTE_*` or `RUST_LOG` setting leaks in.
pub fn configure_calnote_command(cmd: &mut Command) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
}

/// Writes a Full Note with the given frontmatter lines and body.
pub fn write_note(dir: &Path, name: &str, frontmatter: &[&str], body: &str) {
    let mut content = String::from("---\n");
    for line in frontmatter {
        content.push_str(line);
        content.push('\n');
    }
    content.push_str("---\n");
    content.push_str(body);
    fs::write(dir.join(name), content).unwrap();
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
