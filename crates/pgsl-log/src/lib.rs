//! Leveled logging for the PGSL front end.
//!
//! The crate keeps a single process-wide logger with an atomic level filter.
//! Messages go to stderr and carry the module path of the call site, so
//! validation and emission traces can be followed without a subscriber setup.
//!
//! The level defaults to [`Level::Warn`] and can be changed with
//! [`set_level`], [`set_level_from_str`] or the `PGSL_LOG` environment
//! variable through [`init_from_env`].
//!
//! # Example
//!
//! ```
//! use pgsl_log::{debug, info, Level};
//!
//! pgsl_log::set_level(Level::Debug);
//!
//! let declarations = 3;
//! info!("validating document with {} declarations", declarations);
//! debug!("scope depth {}", 2);
//! ```

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV: &str = "PGSL_LOG";

/// Severity of a log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures the caller has to act on
    Error = 0,
    /// Suspicious but recoverable situations
    Warn = 1,
    /// Session level summaries
    Info = 2,
    /// Per scope and per declaration detail
    Debug = 3,
    /// Per node detail
    Trace = 4,
}

impl Level {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log level: {}", self.input)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

/// Process-wide logger state.
pub struct Logger {
    level: AtomicU8,
    colors: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colors: AtomicBool::new(true),
        }
    }

    /// Sets the most verbose level that is still written.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current level filter.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Enables or disables ANSI colours in the level tag.
    pub fn set_colors(&self, enabled: bool) {
        self.colors.store(enabled, Ordering::SeqCst);
    }

    /// Whether a message at `level` passes the filter.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    fn format(&self, level: Level, target: &str, args: Arguments) -> String {
        if self.colors.load(Ordering::Relaxed) {
            format!("{}[{level}]\x1b[0m {target}: {args}", level.color_code())
        } else {
            format!("[{level}] {target}: {args}")
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at [`Level::Warn`] on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the global level filter.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Parses `s` and sets the global level filter.
///
/// ```
/// pgsl_log::set_level_from_str("debug").unwrap();
/// assert!(pgsl_log::set_level_from_str("loud").is_err());
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Applies `PGSL_LOG` if it is set.
///
/// Returns the level that was applied, or `None` when the variable is absent.
/// An unparsable value is reported as an error and leaves the level alone.
pub fn init_from_env() -> Result<Option<Level>, ParseLevelError> {
    match std::env::var(LOG_ENV) {
        Ok(value) => {
            let level: Level = value.parse()?;
            set_level(level);
            Ok(Some(level))
        }
        Err(_) => Ok(None),
    }
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }
    eprintln!("{}", logger.format(level, target, args));
}

/// Logs at an explicit level.
///
/// ```
/// use pgsl_log::{log, Level};
///
/// log!(level: Level::Info, "emitted {} bytes", 128);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("error".parse(), Ok(Level::Error));
        assert_eq!("Warning".parse(), Ok(Level::Warn));
        assert_eq!(" TRACE ".parse(), Ok(Level::Trace));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_parse_error_display() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: verbose");
    }

    #[test]
    fn test_logger_filtering() {
        let logger = Logger::new(Level::Info);
        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));

        logger.set_level(Level::Trace);
        assert!(logger.enabled(Level::Trace));
        assert_eq!(logger.level(), Level::Trace);
    }

    #[test]
    fn test_format_without_colors() {
        let logger = Logger::new(Level::Info);
        logger.set_colors(false);
        let line = logger.format(Level::Info, "pgsl::session", format_args!("ok {}", 1));
        assert_eq!(line, "[INFO] pgsl::session: ok 1");
    }

    #[test]
    fn test_format_with_colors() {
        let logger = Logger::new(Level::Info);
        let line = logger.format(Level::Error, "t", format_args!("x"));
        assert!(line.starts_with("\x1b[31m[ERROR]"));
    }

    #[test]
    fn test_macros_expand() {
        info!("info {}", 1);
        trace!("trace {:?}", [1, 2]);
    }
}
