//! Error types and handling
//!
//! This module contains the error taxonomy for the visitor pass manager. No
//! error here is fatal to the process: every failure is recovered at the
//! workflow boundary and surfaced to the initiating actor with enough
//! context (current state, attempted transition) to decide the next action.

use crate::types::{ConfigValidationError, VisitorStatus};
use thiserror::Error;

/// Errors that can occur across the visitor lifecycle
#[derive(Debug, Error)]
pub enum VisitorError {
    /// Registration form failed validation; lists every offending field
    #[error("Validation failed, missing or malformed fields: {}", missing.join(", "))]
    Validation {
        /// Names of the fields that were missing or malformed
        missing: Vec<String>,
    },

    /// OTP did not match the code issued for this session
    #[error("Invalid OTP ({attempts_remaining} attempts remaining)")]
    InvalidOtp {
        /// Attempts left before the challenge is invalidated
        attempts_remaining: u32,
    },

    /// OTP validity window has elapsed
    #[error("OTP expired, request a new code")]
    ExpiredOtp,

    /// No pending OTP challenge exists for this email
    #[error("No pending verification for {0}")]
    OtpNotFound(String),

    /// Record lookup by id failed
    #[error("No record found for {0}")]
    NotFound(String),

    /// Status transition guard rejected the change
    #[error("Cannot {attempted} a visitor whose status is {current}")]
    InvalidTransition {
        /// The record's current (possibly just-committed) status
        current: VisitorStatus,
        /// The transition that was attempted, e.g. "approve"
        attempted: String,
    },

    /// Actor role is not permitted to perform this transition
    #[error("{actor} is not authorized to {attempted}")]
    Unauthorized {
        /// The actor role that made the attempt
        actor: String,
        /// The transition that was attempted
        attempted: String,
    },

    /// A store call exceeded its deadline; safe to retry
    #[error("Store operation '{operation}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the operation that timed out
        operation: String,
        /// The deadline that was exceeded, in milliseconds
        timeout_ms: u64,
    },

    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigValidationError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VisitorError {
    /// Create a validation error from the offending field names
    pub fn validation(missing: Vec<String>) -> Self {
        Self::Validation { missing }
    }

    /// Create a not-found error for a record id
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Create an invalid-transition error carrying the committed status
    pub fn invalid_transition(current: VisitorStatus, attempted: impl Into<String>) -> Self {
        Self::InvalidTransition { current, attempted: attempted.into() }
    }

    /// Create an unauthorized-actor error
    pub fn unauthorized(actor: impl Into<String>, attempted: impl Into<String>) -> Self {
        Self::Unauthorized { actor: actor.into(), attempted: attempted.into() }
    }

    /// Create a timeout error for a store operation
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout { operation: operation.into(), timeout_ms }
    }

    /// Check if this error is recoverable by the initiating actor
    ///
    /// Everything except a bad configuration is: the user corrects input,
    /// re-reads current status, requests a fresh OTP, or retries the call.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VisitorError::Configuration(_))
    }

    /// Check if retrying the same call unchanged may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, VisitorError::Timeout { .. })
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            VisitorError::Validation { .. } => "Validation",
            VisitorError::InvalidOtp { .. }
            | VisitorError::ExpiredOtp
            | VisitorError::OtpNotFound(_) => "Verification",
            VisitorError::NotFound(_) => "Lookup",
            VisitorError::InvalidTransition { .. } | VisitorError::Unauthorized { .. } => {
                "Lifecycle"
            }
            VisitorError::Timeout { .. } => "Transport",
            VisitorError::Configuration(_) => "Configuration",
            VisitorError::Serialization(_) => "Serialization",
        }
    }
}

/// Result type for visitor lifecycle operations
pub type VisitorResult<T> = Result<T, VisitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = VisitorError::validation(vec!["email".to_string(), "phone".to_string()]);
        assert_eq!(err.to_string(), "Validation failed, missing or malformed fields: email, phone");
        assert_eq!(err.category(), "Validation");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_transition_reports_current_status() {
        let err = VisitorError::invalid_transition(VisitorStatus::Pending, "check in");
        assert_eq!(err.to_string(), "Cannot check in a visitor whose status is Pending");
        assert_eq!(err.category(), "Lifecycle");
    }

    #[test]
    fn test_unauthorized_error() {
        let err = VisitorError::unauthorized("Security", "approve");
        assert_eq!(err.to_string(), "Security is not authorized to approve");
        assert_eq!(err.category(), "Lifecycle");
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = VisitorError::timeout("create_visitor", 5000);
        assert!(err.is_retryable());
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "Transport");
        assert_eq!(err.to_string(), "Store operation 'create_visitor' timed out after 5000ms");
    }

    #[test]
    fn test_only_configuration_is_unrecoverable() {
        let err: VisitorError = ConfigValidationError::InvalidTimeout.into();
        assert!(!err.is_recoverable());
        assert!(!err.is_retryable());
        assert_eq!(err.category(), "Configuration");

        assert!(VisitorError::ExpiredOtp.is_recoverable());
        assert!(VisitorError::not_found("VIS-999").is_recoverable());
        assert!(!VisitorError::ExpiredOtp.is_retryable());
    }

    #[test]
    fn test_verification_error_categories() {
        assert_eq!(VisitorError::InvalidOtp { attempts_remaining: 2 }.category(), "Verification");
        assert_eq!(VisitorError::ExpiredOtp.category(), "Verification");
        assert_eq!(VisitorError::OtpNotFound("a@b.com".to_string()).category(), "Verification");
    }
}
