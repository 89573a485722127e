//! Log sink: leveled messages to a file or stderr, reconfigurable at runtime.
//!
//! Reconfiguring swaps the destination and level in place; outputs never
//! stack. Failures to open a log file fall back to `<temp dir>/Storify.log`,
//! then to stderr, so logging setup never takes the caller down.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// File name used when the requested log file is not writable.
pub const FALLBACK_LOG_FILE: &str = "Storify.log";

/// Ordered severities, lowest first.
///
/// `Critical` and `Alert` have no tracing counterpart; both filter like
/// `ERROR`, and call sites tag them with a `severity` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Alert,
}

impl LogLevel {
    /// Numeric code (100 = debug ... 550 = alert).
    pub fn code(self) -> u16 {
        match self {
            LogLevel::Debug => 100,
            LogLevel::Info => 200,
            LogLevel::Warning => 300,
            LogLevel::Error => 400,
            LogLevel::Critical => 500,
            LogLevel::Alert => 550,
        }
    }

    /// Unknown codes map to `Alert`.
    pub fn from_code(code: u16) -> Self {
        match code {
            100 => LogLevel::Debug,
            200 => LogLevel::Info,
            300 => LogLevel::Warning,
            400 => LogLevel::Error,
            500 => LogLevel::Critical,
            _ => LogLevel::Alert,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
        }
    }

    /// Tracing filter for this level. `Error`, `Critical` and `Alert` all
    /// collapse to `ERROR`: a sink set to `Alert` still emits every
    /// `error!` event, tagged or not.
    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical | LogLevel::Alert => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts names ("warning", "WARN") or numeric codes ("300").
/// Anything unrecognized becomes `Alert`.
impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u16>() {
            return Ok(LogLevel::from_code(code));
        }
        let level = match s.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            "critical" => LogLevel::Critical,
            _ => LogLevel::Alert,
        };
        Ok(level)
    }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    File(PathBuf),
}

impl fmt::Display for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogDestination::Stderr => f.write_str("stderr"),
            LogDestination::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Keeps a writable file as-is, otherwise substitutes the temp-dir fallback.
pub fn resolve_destination(dest: &LogDestination) -> LogDestination {
    match dest {
        LogDestination::Stderr => LogDestination::Stderr,
        LogDestination::File(path) if open_append(path).is_ok() => {
            LogDestination::File(path.clone())
        }
        LogDestination::File(_) => {
            LogDestination::File(std::env::temp_dir().join(FALLBACK_LOG_FILE))
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Writer that is either a file or stderr (used when file clone fails).
pub(crate) enum FileOrStderr {
    File(File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Shared, swappable output. `None` means stderr.
#[derive(Clone, Default)]
pub(crate) struct SinkWriter {
    file: Arc<Mutex<Option<File>>>,
}

impl SinkWriter {
    /// Points the writer at `dest` (after fallback resolution) and returns
    /// where it actually ended up.
    pub(crate) fn point_to(&self, dest: &LogDestination) -> LogDestination {
        let (file, actual) = match resolve_destination(dest) {
            LogDestination::Stderr => (None, LogDestination::Stderr),
            LogDestination::File(path) => match open_append(&path) {
                Ok(f) => (Some(f), LogDestination::File(path)),
                Err(_) => (None, LogDestination::Stderr),
            },
        };
        let mut guard = self.file.lock().unwrap_or_else(|e| e.into_inner());
        *guard = file;
        actual
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        let guard = self.file.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(f) => f
                .try_clone()
                .map(FileOrStderr::File)
                .unwrap_or(FileOrStderr::Stderr),
            None => FileOrStderr::Stderr,
        }
    }
}

/// Installed log sink. Holds the handles needed to reconfigure it.
pub struct LogSink {
    writer: SinkWriter,
    filter: reload::Handle<LevelFilter, Registry>,
    level: LogLevel,
    destination: LogDestination,
}

impl LogSink {
    /// Installs the global subscriber. `RUST_LOG`, when set, narrows output further.
    /// Levels above `Error` filter as `Error` (see [`LogLevel::as_level_filter`]).
    /// Fails only if a global subscriber is already installed.
    pub fn install(level: LogLevel, dest: &LogDestination) -> Result<LogSink> {
        let writer = SinkWriter::default();
        let destination = writer.point_to(dest);
        let (filter, handle) = reload::Layer::new(level.as_level_filter());
        let env_filter = EnvFilter::try_from_default_env().ok();

        tracing_subscriber::registry()
            .with(filter)
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer.clone())
                    .with_ansi(false),
            )
            .try_init()?;

        let sink = LogSink {
            writer,
            filter: handle,
            level,
            destination,
        };
        sink.announce();
        Ok(sink)
    }

    /// Replaces the destination and level of the running sink.
    pub fn reconfigure(&mut self, level: LogLevel, dest: &LogDestination) {
        self.destination = self.writer.point_to(dest);
        if let Err(e) = self.filter.reload(level.as_level_filter()) {
            tracing::warn!("could not change log level: {}", e);
        }
        self.level = level;
        self.announce();
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn destination(&self) -> &LogDestination {
        &self.destination
    }

    fn announce(&self) {
        tracing::info!("Setting logfile to: {}", self.destination);
        tracing::info!(
            "Setting log level to: {}({})",
            self.level.code(),
            self.level.name()
        );
    }
}
