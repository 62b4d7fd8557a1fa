//! Visitor Pass Manager
//!
//! A visitor-management core modeling the full lifecycle of a facility
//! visit: pre-registration with OTP identity verification, admin approval,
//! QR pass-code check-in/out at the gate, and dashboard analytics.
//!
//! # Overview
//!
//! Every visit is one record moving through a guarded state machine:
//! `Pending` → `Approved`/`Rejected` → `CheckedIn` → `CheckedOut`. Records
//! live in an asynchronous in-memory store that simulates the latency of a
//! network-backed service; status changes commit through a per-record
//! compare-and-set so concurrent transitions serialize cleanly.
//!
//! ## Key Features
//!
//! - **Registration Workflow**: form validation, one-time-password
//!   challenge, and pass issuance, with identity verification kept
//!   independent from admin approval
//! - **Lifecycle Engine**: actor-guarded transitions (Admin
//!   approves/rejects, Security checks in/out) over an optimistic
//!   per-record commit
//! - **QR Lookup**: read-only resolution from a scanned pass code to its
//!   visitor record
//! - **Analytics**: pure, clock-free aggregation of dashboard figures from
//!   a store snapshot
//! - **Configurable Runtime**: latency profile, OTP policy, and operation
//!   timeouts layered from defaults, file, and CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use visitor_pass_manager::RegistrationForm;
//!
//! let form = RegistrationForm {
//!     full_name: "Jane Doe".to_string(),
//!     email: "jane@example.com".to_string(),
//!     phone: "+1555000111".to_string(),
//!     purpose: "Partner sync".to_string(),
//!     visit_type: "Guest".to_string(),
//!     whom_to_meet: "Sarah Johnson".to_string(),
//!     visit_date: "2025-01-10".to_string(),
//!     visit_time: "09:00".to_string(),
//! };
//!
//! let details = form.validate()?;
//! assert_eq!(details.email, "jane@example.com");
//! # Ok::<(), visitor_pass_manager::VisitorError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, status/visit-type enums, and configuration
//! - [`store`]: record types, the async in-memory store, and demo seeding
//! - [`registration`]: form validation, OTP challenges, and the workflow
//! - [`lifecycle`]: the actor-guarded status transition engine
//! - [`lookup`]: QR pass-code resolution
//! - [`analytics`]: dashboard aggregation
//! - [`notify`]: the outbound notification boundary
//! - [`logging`]: tracing subscriber configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod analytics;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod lookup;
pub mod notify;
pub mod registration;
pub mod store;
pub mod types;

// Core types and identifiers
pub use types::{
    CliArgs,
    ConfigError,
    ConfigValidationError,
    EmployeeId,
    LatencyProfile,
    PassCode,
    SystemConfig,
    VisitType,
    VisitorId,
    VisitorStatus,
};

// Errors
pub use error::{VisitorError, VisitorResult};

// Store and records
pub use store::{
    seed_demo_data, EmployeeRecord, EmployeeUpdate, NewEmployee, VisitorDetails, VisitorRecord,
    VisitorStore,
};

// Registration
pub use registration::{
    IssuedPass, OtpChallengeStore, RegistrationForm, RegistrationSession, RegistrationWorkflow,
    VerificationState,
};

// Lifecycle
pub use lifecycle::{Actor, Transition, TransitionEngine};

// Lookup and analytics
pub use analytics::{summarize, AnalyticsSnapshot, DailyCount, MonthlyCount, TypeCount};
pub use lookup::QrLookup;

// Notifications and logging
pub use logging::LoggingConfig;
pub use notify::{Notifier, TracingNotifier};
