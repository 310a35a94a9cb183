//! Event severity levels.
//!
//! Severities are totally ordered from least to most severe. The burst filter
//! throttles events at or below its threshold and lets anything more severe
//! through untouched.

use crate::domain::config::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Severity of a log event, ordered from least to most severe.
///
/// Unlike `tracing::Level`, where more verbose levels compare as greater,
/// `Severity` orders `Trace < Debug < Info < Warn < Error`.
///
/// # Example
/// ```
/// use tracing_burst::Severity;
///
/// assert!(Severity::Error > Severity::Warn);
/// assert!(Severity::Debug < Severity::Info);
/// assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Very verbose diagnostics
    Trace,
    /// Debugging output
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    #[default]
    Warn,
    /// Errors
    Error,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Upper-case name of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            _ => Err(ConfigError::UnknownSeverity(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        Severity::from(&level)
    }
}

impl From<&tracing::Level> for Severity {
    fn from(level: &tracing::Level) -> Self {
        if *level == tracing::Level::TRACE {
            Severity::Trace
        } else if *level == tracing::Level::DEBUG {
            Severity::Debug
        } else if *level == tracing::Level::INFO {
            Severity::Info
        } else if *level == tracing::Level::WARN {
            Severity::Warn
        } else {
            Severity::Error
        }
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }
}
