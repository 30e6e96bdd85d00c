//! Minimal logger.
//!
//! Prints `[elapsed LEVEL] message` to stderr with an elapsed-time prefix.
//! Install it once at startup via `init_with_level`, usually after mapping
//! a command-line verbosity word through `parse_verbose_level`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Verbosity words accepted on the command line, least to most verbose.
pub const VERBOSE_LEVELS: [&str; 6] = ["fatal", "error", "warning", "info", "debug", "trace"];

#[derive(Debug, Error, Clone, PartialEq)]
#[error("unknown verbosity level '{word}', expected one of: fatal, error, warning, info, debug, trace")]
pub struct UnknownVerboseLevel {
    pub word: String,
}

/// Map a verbosity word onto a `log` level filter.
///
/// `fatal` has no `log` counterpart and collapses into `Error`. Matching is
/// ASCII-case-insensitive.
pub fn parse_verbose_level(word: &str) -> Result<LevelFilter, UnknownVerboseLevel> {
    match word.to_ascii_lowercase().as_str() {
        "fatal" | "error" => Ok(LevelFilter::Error),
        "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(UnknownVerboseLevel {
            word: word.to_string(),
        }),
    }
}

/// The verbosity word a `log` level is rendered as.
fn level_word(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[{elapsed:7.3}s {:>7}] {}",
            level_word(record.level()),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the simple logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber instead of the plain logger.
///
/// `level` seeds the filter when `RUST_LOG` is unset, so the command-line
/// verbosity keeps working in both logging modes.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_words_map_onto_level_filters() {
        assert_eq!(parse_verbose_level("fatal"), Ok(LevelFilter::Error));
        assert_eq!(parse_verbose_level("error"), Ok(LevelFilter::Error));
        assert_eq!(parse_verbose_level("warning"), Ok(LevelFilter::Warn));
        assert_eq!(parse_verbose_level("info"), Ok(LevelFilter::Info));
        assert_eq!(parse_verbose_level("debug"), Ok(LevelFilter::Debug));
        assert_eq!(parse_verbose_level("trace"), Ok(LevelFilter::Trace));
    }

    #[test]
    fn verbosity_matching_ignores_ascii_case() {
        assert_eq!(parse_verbose_level("INFO"), Ok(LevelFilter::Info));
        assert_eq!(parse_verbose_level("Warning"), Ok(LevelFilter::Warn));
    }

    #[test]
    fn unknown_verbosity_words_are_rejected() {
        let err = parse_verbose_level("chatty").unwrap_err();
        assert_eq!(err.word, "chatty");
    }

    #[test]
    fn every_advertised_word_parses() {
        for word in VERBOSE_LEVELS {
            assert!(parse_verbose_level(word).is_ok());
        }
    }

    #[test]
    fn levels_render_as_verbosity_words() {
        assert_eq!(level_word(Level::Warn), "warning");
        for level in [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            assert!(VERBOSE_LEVELS.contains(&level_word(level)));
        }
    }
}
