//! Configuration structures for the visitor pass manager
//!
//! This module contains the system configuration (OTP policy, simulated
//! store latency, operation timeout) with file loading, CLI merging, and
//! validation.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Simulated store latency per operation class, in milliseconds
///
/// The in-memory store stands in for a network-backed service; these delays
/// model the round trips the placeholder API layer simulated. Tests disable
/// them entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencyProfile {
    /// Whether any artificial latency is applied at all
    pub enabled: bool,
    /// Delay before a registration submission commits
    pub submit_ms: u64,
    /// Delay before list/get reads return
    pub read_ms: u64,
    /// Delay before a status transition commits
    pub transition_ms: u64,
    /// Delay before a pass-code lookup returns
    pub lookup_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        // Defaults mirror the delays the placeholder transport used
        Self { enabled: true, submit_ms: 1000, read_ms: 600, transition_ms: 500, lookup_ms: 700 }
    }
}

impl LatencyProfile {
    /// A profile with all delays disabled, for tests and dry runs
    pub fn disabled() -> Self {
        Self { enabled: false, submit_ms: 0, read_ms: 0, transition_ms: 0, lookup_ms: 0 }
    }

    /// A uniform profile applying the same delay to every operation
    pub fn uniform(ms: u64) -> Self {
        Self { enabled: ms > 0, submit_ms: ms, read_ms: ms, transition_ms: ms, lookup_ms: ms }
    }
}

/// Configuration for the visitor pass manager
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    /// How long an issued OTP stays valid, in seconds
    pub otp_ttl_secs: i64,

    /// Failed verification attempts allowed before the OTP is invalidated
    pub otp_max_attempts: u32,

    /// How long an unfinished registration session is retained, in seconds
    pub session_ttl_secs: i64,

    /// Simulated latency applied by the store
    pub latency: LatencyProfile,

    /// Ceiling on any single store call before it fails as retryable, in
    /// milliseconds
    pub op_timeout_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            otp_ttl_secs: 300,
            otp_max_attempts: 3,
            session_ttl_secs: 900,
            latency: LatencyProfile::default(),
            op_timeout_ms: 5000,
        }
    }
}

impl SystemConfig {
    /// Validate the configuration, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.otp_ttl_secs <= 0 {
            return Err(ConfigValidationError::InvalidOtpTtl(self.otp_ttl_secs));
        }
        if self.otp_max_attempts == 0 {
            return Err(ConfigValidationError::InvalidOtpAttempts);
        }
        if self.session_ttl_secs < self.otp_ttl_secs {
            return Err(ConfigValidationError::SessionShorterThanOtp {
                session_secs: self.session_ttl_secs,
                otp_secs: self.otp_ttl_secs,
            });
        }
        if self.op_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        let slowest = self
            .latency
            .submit_ms
            .max(self.latency.read_ms)
            .max(self.latency.transition_ms)
            .max(self.latency.lookup_ms);
        if self.latency.enabled && slowest >= self.op_timeout_ms {
            return Err(ConfigValidationError::LatencyExceedsTimeout {
                latency_ms: slowest,
                timeout_ms: self.op_timeout_ms,
            });
        }
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let config: SystemConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Build the effective configuration from CLI arguments
    ///
    /// Layering, highest priority first: CLI flags, configuration file,
    /// defaults.
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(ms) = args.latency_ms {
            config.latency = LatencyProfile::uniform(ms);
        }
        if args.no_latency {
            config.latency = LatencyProfile::disabled();
        }
        if let Some(secs) = args.otp_ttl_secs {
            config.otp_ttl_secs = secs;
        }

        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn print_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Validation errors for the system configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// OTP validity window is not positive
    #[error("OTP TTL must be greater than 0 seconds, got {0}")]
    InvalidOtpTtl(i64),

    /// No verification attempts would be allowed
    #[error("OTP max attempts must be at least 1")]
    InvalidOtpAttempts,

    /// Session would expire before its OTP
    #[error("Session TTL ({session_secs}s) must not be shorter than OTP TTL ({otp_secs}s)")]
    SessionShorterThanOtp {
        /// Configured session TTL in seconds
        session_secs: i64,
        /// Configured OTP TTL in seconds
        otp_secs: i64,
    },

    /// Operation timeout is zero
    #[error("Operation timeout must be greater than 0 ms")]
    InvalidTimeout,

    /// Simulated latency would always trip the timeout
    #[error("Simulated latency ({latency_ms}ms) must stay below the operation timeout ({timeout_ms}ms)")]
    LatencyExceedsTimeout {
        /// Slowest configured latency in milliseconds
        latency_ms: u64,
        /// Configured operation timeout in milliseconds
        timeout_ms: u64,
    },
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "visitor-pass-manager",
    version,
    about = "Visitor pass manager - registration, approval, and QR check-in/out lifecycle",
    long_about = "Runs the visitor lifecycle demo: pre-registration with OTP verification, \
admin approval, security check-in/out by pass code, and an analytics summary.

EXAMPLES:
    # Run the demo with default settings
    visitor-pass-manager

    # Use a configuration file
    visitor-pass-manager --config config.json

    # Run without simulated store latency
    visitor-pass-manager --no-latency

    # Generate a configuration template
    visitor-pass-manager --print-config > my-config.json

    # Validate configuration without running
    visitor-pass-manager --config my-config.json --dry-run"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Uniform simulated store latency in milliseconds
    #[arg(
        long,
        help = "Uniform simulated store latency in milliseconds",
        long_help = "Apply the same artificial delay to every store operation, overriding the per-operation profile."
    )]
    pub latency_ms: Option<u64>,

    /// Disable simulated store latency entirely
    #[arg(long, help = "Disable simulated store latency")]
    pub no_latency: bool,

    /// OTP validity window in seconds
    #[arg(long, help = "OTP validity window in seconds")]
    pub otp_ttl_secs: Option<i64>,

    /// Skip seeding the store with demo visitors and employees
    #[arg(long, help = "Start from an empty store instead of demo data")]
    pub no_seed: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running the demo
    #[arg(long, help = "Validate configuration without running")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SystemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.otp_ttl_secs, 300);
        assert_eq!(config.otp_max_attempts, 3);
    }

    #[test]
    fn test_invalid_otp_ttl_rejected() {
        let config = SystemConfig { otp_ttl_secs: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOtpTtl(0))));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = SystemConfig { otp_max_attempts: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOtpAttempts)));
    }

    #[test]
    fn test_session_shorter_than_otp_rejected() {
        let config =
            SystemConfig { otp_ttl_secs: 600, session_ttl_secs: 300, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SessionShorterThanOtp { .. })
        ));
    }

    #[test]
    fn test_latency_exceeding_timeout_rejected() {
        let config = SystemConfig {
            latency: LatencyProfile::uniform(6000),
            op_timeout_ms: 5000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::LatencyExceedsTimeout { .. })
        ));

        // Disabled latency never trips the check regardless of values
        let config = SystemConfig {
            latency: LatencyProfile { enabled: false, ..LatencyProfile::uniform(6000) },
            op_timeout_ms: 5000,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SystemConfig::default();
        let json = config.print_json().unwrap();
        let back: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_file_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let config = SystemConfig { otp_ttl_secs: 120, ..Default::default() };
        write!(file, "{}", config.print_json().unwrap()).unwrap();

        let loaded = SystemConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.otp_ttl_secs, 120);
    }

    #[test]
    fn test_missing_config_file() {
        let result = SystemConfig::from_file("/nonexistent/config.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cli_overrides_file_and_defaults() {
        let args = CliArgs::parse_from([
            "visitor-pass-manager",
            "--latency-ms",
            "50",
            "--otp-ttl-secs",
            "60",
        ]);
        let config = SystemConfig::from_cli_args(&args).unwrap();
        assert_eq!(config.latency, LatencyProfile::uniform(50));
        assert_eq!(config.otp_ttl_secs, 60);

        let args = CliArgs::parse_from(["visitor-pass-manager", "--no-latency"]);
        let config = SystemConfig::from_cli_args(&args).unwrap();
        assert!(!config.latency.enabled);
    }
}
