//! Logging and tracing setup for generation runs
//!
//! Console output goes to stderr so JSON written to stdout by `--print-config`
//! stays clean. A run can additionally keep a JSON log under a log directory,
//! rolled daily, which records every phase span with its timing.

use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

type InitResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// File name prefix of run logs
pub const RUN_LOG_PREFIX: &str = "generation";

/// How chatty a run is on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    #[default]
    Quiet,
    /// Phase progress with span timings
    Verbose,
    /// Per-home and per-resident detail
    Debug,
}

impl Verbosity {
    /// Pick the verbosity from the `--verbose` and `--debug` flags; debug wins
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        match (verbose, debug) {
            (_, true) => Verbosity::Debug,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Quiet,
        }
    }

    /// Level for the crate's own events
    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

/// Console line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the crate's own events
    pub level: Level,
    /// Console line format
    pub format: LogFormat,
    /// Directory for the JSON run log; `None` disables it
    pub log_directory: Option<PathBuf>,
    /// Emit a timing event when each phase span closes
    pub phase_timings: bool,
    /// Colored console output
    pub ansi: bool,
    /// Filter directive overriding `RUST_LOG` and the level
    pub filter: Option<String>,
}

/// Keeps the non-blocking writers flushing until dropped
#[must_use = "dropping the guard stops background log flushing"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_verbosity(Verbosity::default())
    }
}

impl LoggingConfig {
    /// Configuration for a console verbosity; anything above quiet also
    /// reports phase timings
    pub fn for_verbosity(verbosity: Verbosity) -> Self {
        Self {
            level: verbosity.level(),
            format: LogFormat::Pretty,
            log_directory: None,
            phase_timings: verbosity != Verbosity::Quiet,
            ansi: true,
            filter: None,
        }
    }

    /// Switch the console to JSON lines
    pub fn with_json_format(mut self) -> Self {
        self.format = LogFormat::Json;
        self.ansi = false;
        self
    }

    /// Also keep a JSON run log in `directory`
    pub fn with_log_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Use an explicit filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Directive used when neither `RUST_LOG` nor an explicit filter is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.phase_timings {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber
    ///
    /// Fails instead of panicking when a subscriber is already installed.
    pub fn init(self) -> InitResult<LoggingGuard> {
        let env_filter = match &self.filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive())),
        };

        let mut guards = Vec::new();

        let run_log = match &self.log_directory {
            Some(directory) => {
                let (writer, guard) = non_blocking(rolling::daily(directory, RUN_LOG_PREFIX));
                guards.push(guard);
                Some(fmt::layer().json().with_writer(writer).with_span_events(FmtSpan::CLOSE))
            }
            None => None,
        };

        let (console_writer, console_guard) = non_blocking(io::stderr());
        guards.push(console_guard);

        let (json_console, pretty_console) = match self.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .json()
                    .with_writer(console_writer)
                    .with_span_events(self.span_events());
                (Some(layer), None)
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .with_writer(console_writer)
                    .with_target(false)
                    .with_ansi(self.ansi)
                    .with_span_events(self.span_events());
                (None, Some(layer))
            }
        };

        Registry::default()
            .with(env_filter)
            .with(run_log)
            .with(json_console)
            .with(pretty_console)
            .try_init()?;

        info!(
            level = %self.level,
            format = ?self.format,
            run_log = ?self.log_directory,
            "logging initialized"
        );
        Ok(LoggingGuard { _guards: guards })
    }
}

/// Span wrapping one generation phase
#[macro_export]
macro_rules! phase_span {
    ($name:expr) => {
        tracing::info_span!("phase", phase = $name, component = "generation")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Debug);
    }

    #[test]
    fn test_quiet_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.phase_timings);
        assert!(config.log_directory.is_none());
        assert!(config.ansi);
    }

    #[test]
    fn test_builder() {
        let config = LoggingConfig::for_verbosity(Verbosity::Debug)
            .with_json_format()
            .with_log_directory("logs")
            .with_filter("care_history_simulator=trace");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.phase_timings);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.ansi);
        assert_eq!(config.log_directory, Some(PathBuf::from("logs")));
        assert_eq!(config.filter.as_deref(), Some("care_history_simulator=trace"));
    }

    #[test]
    fn test_without_ansi_keeps_pretty_format() {
        let config = LoggingConfig::for_verbosity(Verbosity::Verbose).without_ansi();
        assert!(!config.ansi);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, Level::INFO);
    }

    #[test]
    fn test_default_directive_targets_crate() {
        let config = LoggingConfig::for_verbosity(Verbosity::Verbose);
        assert_eq!(config.default_directive(), "care_history_simulator=INFO");
    }
}
