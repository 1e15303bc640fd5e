//! Tracing setup: a stderr layer filtered by `LOCALIGN_LOG`, plus a plain-text
//! run log that starts receiving events once a file is attached.

use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LOCALIGN_LOG";

static RUN_LOG: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// `log_localign_YYYYMMDD.log` for today's date
pub fn run_log_name() -> String {
    format!("log_localign_{}.log", chrono::Local::now().format("%Y%m%d"))
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `LOCALIGN_LOG` wins over `-v`.
pub fn init(verbosity: u8) {
    let directive =
        std::env::var(LOG_ENV).unwrap_or_else(|_| default_directive(verbosity).to_string());
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(RunLogWriter)
        .with_ansi(false)
        .with_target(false);

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

/// Append all further events to `dir/log_localign_YYYYMMDD.log`.
pub fn attach_run_log(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(run_log_name());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    *lock_run_log() = Some(file);
    Ok(path)
}

pub fn detach_run_log() {
    if let Some(mut file) = lock_run_log().take() {
        let _ = file.flush();
    }
}

fn lock_run_log() -> MutexGuard<'static, Option<File>> {
    RUN_LOG.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Writes to the attached run log, or nowhere
#[derive(Debug, Clone, Copy)]
struct RunLogWriter;

impl Write for RunLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match lock_run_log().as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match lock_run_log().as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RunLogWriter {
    type Writer = RunLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_name() {
        let name = run_log_name();
        assert!(name.starts_with("log_localign_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "log_localign_YYYYMMDD.log".len());
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "info");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(4), "trace");
    }
}
