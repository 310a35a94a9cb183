//! Burst filter configuration and its validation.
//!
//! A `BurstConfig` can only be obtained through validation, so a filter built
//! from one never sees a zero recovery interval.

use crate::domain::severity::Severity;
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

/// Error returned when burst filter configuration is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Recovery interval must be at least one second
    ZeroRecoveryInterval,
    /// Recovery interval must be a whole number of seconds
    FractionalRecoveryInterval(Duration),
    /// A numeric parameter was negative
    NegativeValue {
        /// Parameter name
        param: String,
    },
    /// A numeric parameter could not be parsed
    InvalidNumber {
        /// Parameter name
        param: String,
        /// Offending value
        value: String,
    },
    /// Severity name not recognized
    UnknownSeverity(String),
    /// Parameter name not recognized
    UnknownParam(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRecoveryInterval => {
                write!(f, "recovery interval must be greater than 0 seconds")
            }
            ConfigError::FractionalRecoveryInterval(interval) => {
                write!(
                    f,
                    "recovery interval must be a whole number of seconds, got {:?}",
                    interval
                )
            }
            ConfigError::NegativeValue { param } => {
                write!(f, "{} must not be negative", param)
            }
            ConfigError::InvalidNumber { param, value } => {
                write!(f, "{} must be an integer, got {:?}", param, value)
            }
            ConfigError::UnknownSeverity(name) => write!(f, "unknown severity {:?}", name),
            ConfigError::UnknownParam(name) => write!(f, "unknown parameter {:?}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated burst filter configuration.
///
/// # Example
/// ```
/// use tracing_burst::{BurstConfig, Severity};
/// use std::time::Duration;
///
/// let config = BurstConfig::new(Severity::Info, 10, Duration::from_secs(6), 100).unwrap();
/// assert_eq!(config.recovery_interval(), Duration::from_secs(6));
///
/// // The same settings written as host parameters
/// let parsed = BurstConfig::from_params([
///     ("level", "INFO"),
///     ("burstRecoveryAmount", "10"),
///     ("burstRecoveryInterval", "6"),
///     ("maxBurst", "100"),
/// ])
/// .unwrap();
/// assert_eq!(parsed, config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstConfig {
    threshold: Severity,
    recovery_amount: u64,
    recovery_interval: NonZeroU64,
    max_burst: u64,
}

impl BurstConfig {
    /// Validate and create a configuration.
    ///
    /// # Arguments
    /// * `threshold` - Events at or below this severity are throttled
    /// * `recovery_amount` - Tokens restored per recovery interval
    /// * `recovery_interval` - Whole, non-zero number of seconds
    /// * `max_burst` - Bucket capacity
    ///
    /// # Errors
    /// Returns `ConfigError` if the recovery interval is zero or not a whole
    /// number of seconds.
    pub fn new(
        threshold: Severity,
        recovery_amount: u64,
        recovery_interval: Duration,
        max_burst: u64,
    ) -> Result<Self, ConfigError> {
        if recovery_interval.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalRecoveryInterval(recovery_interval));
        }
        let recovery_interval = NonZeroU64::new(recovery_interval.as_secs())
            .ok_or(ConfigError::ZeroRecoveryInterval)?;

        Ok(Self {
            threshold,
            recovery_amount,
            recovery_interval,
            max_burst,
        })
    }

    /// Build a configuration from textual name/value parameters.
    ///
    /// Recognized names are `level`, `recovery_amount`, `recovery_interval`
    /// (seconds) and `max_burst`, plus the camelCase aliases
    /// `burstRecoveryAmount`, `burstRecoveryInterval` and `maxBurst`. Later
    /// occurrences override earlier ones. Missing parameters default to a
    /// `WARN` threshold and zero for the numbers, so `recovery_interval` must
    /// be given.
    ///
    /// # Errors
    /// Returns `ConfigError` for unknown names, unparseable or negative
    /// numbers, unknown severities, and a missing or zero interval.
    pub fn from_params<'a, I>(params: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut threshold = Severity::default();
        let mut recovery_amount = 0;
        let mut recovery_interval = 0;
        let mut max_burst = 0;

        for (name, value) in params {
            match name.trim() {
                "level" | "threshold" => threshold = value.parse()?,
                "recovery_amount" | "burstRecoveryAmount" => {
                    recovery_amount = parse_count("recovery_amount", value)?
                }
                "recovery_interval" | "burstRecoveryInterval" => {
                    recovery_interval = parse_count("recovery_interval", value)?
                }
                "max_burst" | "maxBurst" => max_burst = parse_count("max_burst", value)?,
                other => return Err(ConfigError::UnknownParam(other.to_string())),
            }
        }

        Self::new(
            threshold,
            recovery_amount,
            Duration::from_secs(recovery_interval),
            max_burst,
        )
    }

    /// Severity threshold; anything more severe bypasses the bucket.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Tokens restored per recovery interval.
    pub fn recovery_amount(&self) -> u64 {
        self.recovery_amount
    }

    /// Recovery interval.
    pub fn recovery_interval(&self) -> Duration {
        Duration::from_secs(self.recovery_interval.get())
    }

    /// Recovery interval in whole seconds.
    pub fn recovery_interval_secs(&self) -> NonZeroU64 {
        self.recovery_interval
    }

    /// Maximum burst, i.e. the bucket capacity.
    pub fn max_burst(&self) -> u64 {
        self.max_burst
    }
}

fn parse_count(param: &str, value: &str) -> Result<u64, ConfigError> {
    let parsed: i128 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            param: param.to_string(),
            value: value.to_string(),
        })?;

    if parsed < 0 {
        return Err(ConfigError::NegativeValue {
            param: param.to_string(),
        });
    }

    u64::try_from(parsed).map_err(|_| ConfigError::InvalidNumber {
        param: param.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = BurstConfig::new(Severity::Info, 10, Duration::from_secs(6), 100).unwrap();
        assert_eq!(config.threshold(), Severity::Info);
        assert_eq!(config.recovery_amount(), 10);
        assert_eq!(config.recovery_interval(), Duration::from_secs(6));
        assert_eq!(config.recovery_interval_secs().get(), 6);
        assert_eq!(config.max_burst(), 100);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = BurstConfig::new(Severity::Info, 10, Duration::ZERO, 100);
        assert_eq!(result, Err(ConfigError::ZeroRecoveryInterval));
    }

    #[test]
    fn test_fractional_interval_rejected() {
        let interval = Duration::from_millis(1_500);
        let result = BurstConfig::new(Severity::Info, 10, interval, 100);
        assert_eq!(result, Err(ConfigError::FractionalRecoveryInterval(interval)));

        let sub_second = Duration::from_millis(500);
        assert!(BurstConfig::new(Severity::Info, 10, sub_second, 100).is_err());
    }

    #[test]
    fn test_zero_amount_and_burst_allowed() {
        assert!(BurstConfig::new(Severity::Info, 0, Duration::from_secs(1), 0).is_ok());
    }

    #[test]
    fn test_from_params_snake_case() {
        let config = BurstConfig::from_params([
            ("level", "debug"),
            ("recovery_amount", "5"),
            ("recovery_interval", "2"),
            ("max_burst", "20"),
        ])
        .unwrap();

        assert_eq!(
            config,
            BurstConfig::new(Severity::Debug, 5, Duration::from_secs(2), 20).unwrap()
        );
    }

    #[test]
    fn test_from_params_defaults() {
        let config = BurstConfig::from_params([("recovery_interval", "1")]).unwrap();
        assert_eq!(config.threshold(), Severity::Warn);
        assert_eq!(config.recovery_amount(), 0);
        assert_eq!(config.max_burst(), 0);
    }

    #[test]
    fn test_from_params_missing_interval() {
        let result = BurstConfig::from_params([("level", "INFO"), ("maxBurst", "100")]);
        assert_eq!(result, Err(ConfigError::ZeroRecoveryInterval));
    }

    #[test]
    fn test_from_params_negative_values() {
        for name in ["recovery_amount", "recovery_interval", "max_burst"] {
            let result = BurstConfig::from_params([("recovery_interval", "1"), (name, "-1")]);
            assert_eq!(
                result,
                Err(ConfigError::NegativeValue {
                    param: name.to_string()
                }),
                "{name}"
            );
        }
    }

    #[test]
    fn test_from_params_invalid_number() {
        let result = BurstConfig::from_params([("maxBurst", "lots")]);
        assert_eq!(
            result,
            Err(ConfigError::InvalidNumber {
                param: "max_burst".to_string(),
                value: "lots".to_string(),
            })
        );

        let too_big = "340282366920938463463374607431768211455";
        assert!(matches!(
            BurstConfig::from_params([("maxBurst", too_big)]),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_from_params_unknown_param() {
        let result = BurstConfig::from_params([("burst", "10")]);
        assert_eq!(result, Err(ConfigError::UnknownParam("burst".to_string())));
    }

    #[test]
    fn test_from_params_unknown_severity() {
        let result = BurstConfig::from_params([("level", "LOUD"), ("recovery_interval", "1")]);
        assert_eq!(result, Err(ConfigError::UnknownSeverity("LOUD".to_string())));
    }

    #[test]
    fn test_from_params_last_wins() {
        let config = BurstConfig::from_params([
            ("recovery_interval", "1"),
            ("max_burst", "1"),
            ("maxBurst", "7"),
        ])
        .unwrap();
        assert_eq!(config.max_burst(), 7);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::ZeroRecoveryInterval.to_string(),
            "recovery interval must be greater than 0 seconds"
        );
        assert_eq!(
            ConfigError::NegativeValue {
                param: "max_burst".to_string()
            }
            .to_string(),
            "max_burst must not be negative"
        );
    }
}
