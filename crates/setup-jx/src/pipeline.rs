//! GitHub Actions runner protocol.
//!
//! The runner consumes two channels: per-step files named by `GITHUB_OUTPUT`
//! and `GITHUB_PATH`, and workflow commands (`::group::`, `::error::`, ...)
//! scanned from stdout. Everything here writes to one of those; diagnostics
//! belong on stderr via `tracing`.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

/// Record a step output as `name=value`.
///
/// Appends to the file named by `GITHUB_OUTPUT`; when the variable is absent
/// (runners predating the file interface, or local runs) the legacy
/// `::set-output` workflow command is emitted instead.
pub fn set_output(name: &str, value: &str) -> std::io::Result<()> {
    if let Some(path) = env::var_os("GITHUB_OUTPUT") {
        return append_line(Path::new(&path), &format!("{name}={value}"));
    }
    emit(&format!("::set-output name={name}::{value}"));
    Ok(())
}

/// Register `dir` on the job search path unless `PATH` already starts with it.
///
/// Best-effort: every failure is swallowed. The step output still carries the
/// full executable path, so a caller can recover without `PATH`.
pub fn add_path(dir: &Path) {
    if path_already_prefixed(dir) {
        debug!(dir = %dir.display(), "Directory already leads PATH, skipping registration");
        return;
    }
    if let Some(path_file) = env::var_os("GITHUB_PATH") {
        let _ = append_line(Path::new(&path_file), &dir.display().to_string());
    } else {
        emit(&format!("::add-path::{}", dir.display()));
    }
}

fn path_already_prefixed(dir: &Path) -> bool {
    let Ok(path) = env::var("PATH") else {
        return false;
    };
    path.starts_with(&dir.display().to_string())
}

/// Open a collapsible log group in the runner UI.
pub fn start_group(name: &str) {
    emit(&format!("::group::{name}"));
}

/// Close the most recently opened log group.
pub fn end_group() {
    emit("::endgroup::");
}

/// Report a fatal error. The runner marks the step failed and surfaces the
/// message verbatim.
pub fn error(message: &str) {
    emit(&format!("::error::{message}"));
}

/// Plain line in the step log.
pub fn info(message: &str) {
    emit(message);
}

#[allow(clippy::print_stdout)]
fn emit(line: &str) {
    println!("{line}");
}

fn append_line(file: &Path, line: &str) -> std::io::Result<()> {
    let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
    writeln!(handle, "{line}")
}
