//! tribelog-parse-worker - Ingests OCR captures of the tribe log overlay.
//!
//! Every capture file is run, in the order given, through one ingest
//! session so overlapping captures deduplicate against each other.
//!
//! Usage: tribelog-parse-worker <capture_file> [capture_file...]
//!
//! Config: `TRIBELOG_CONFIG` names a TOML file, otherwise the confy location.
//! Output: JSON to stdout with the stored records and drop statistics.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_subscriber::filter::EnvFilter;
use tribelog_core::context::{AppConfigExt, IngestSession};
use tribelog_core::state::IngestOutput;
use tribelog_core::AppConfig;
use tribelog_types::formatting::{format_count, format_pct_ratio};

/// Initialize logging. Stdout carries the JSON result, so log lines go to
/// the file named by TRIBELOG_LOG_PATH, or to stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match open_log_file(std::env::var_os("TRIBELOG_LOG_PATH")) {
        Some(file) => builder.with_ansi(false).with_writer(file).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

/// Unset or unopenable log paths fall back to stderr.
fn open_log_file(path: Option<OsString>) -> Option<File> {
    let path = path?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn load_config() -> Result<AppConfig, String> {
    match std::env::var_os("TRIBELOG_CONFIG") {
        Some(path) => AppConfig::load_from_path(Path::new(&path)).map_err(|e| e.to_string()),
        None => Ok(AppConfig::load()),
    }
}

fn main() {
    init_logging();

    let captures: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if captures.is_empty() {
        tracing::error!("Usage: tribelog-parse-worker <capture_file> [capture_file...]");
        std::process::exit(1);
    }

    let timer = std::time::Instant::now();

    match run(&captures) {
        Ok(mut output) => {
            output.elapsed_ms = timer.elapsed().as_millis();

            // Output JSON to stdout for the caller
            match output.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize output");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Ingest failed");
            std::process::exit(1);
        }
    }
}

fn run(captures: &[PathBuf]) -> Result<IngestOutput, String> {
    let config = load_config()?;
    let mut session = IngestSession::new(config).map_err(|e| e.to_string())?;
    let mut untracked = Vec::new();

    for path in captures {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let summary = session.ingest_text(&raw);
        tracing::info!(
            file = %path.display(),
            lines = summary.parse.lines,
            dropped = summary.parse.dropped(),
            inserted = summary.ingest.inserted,
            repeats = summary.ingest.repeats,
            context_rejected = summary.ingest.context_rejected,
            "Ingested capture"
        );
        untracked.extend(summary.untracked);
    }

    let totals = session.ingest_totals();
    let seen = totals.inserted + totals.repeats + totals.context_rejected;
    tracing::info!(
        stored = %format_count(session.store().len()),
        accepted = %format_pct_ratio(totals.inserted + totals.repeats, seen),
        "Finished ingest"
    );

    Ok(IngestOutput::from_session(&session, untracked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_unset_falls_back() {
        assert!(open_log_file(None).is_none());
    }

    #[test]
    fn test_log_file_unopenable_falls_back() {
        let path = OsString::from("/nonexistent-dir/tribelog/worker.log");
        assert!(open_log_file(Some(path)).is_none());
    }

    #[test]
    fn test_log_file_appends() {
        let path = std::env::temp_dir().join(format!("tribelog-worker-{}.log", std::process::id()));
        fs::write(&path, "existing\n").unwrap();

        let file = open_log_file(Some(path.clone().into_os_string()));
        assert!(file.is_some());
        drop(file);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\n");

        fs::remove_file(&path).ok();
    }
}
