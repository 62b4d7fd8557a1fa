//! Core types and identifiers for the visitor pass manager
//!
//! This module contains the fundamental types used throughout the system:
//!
//! - **Identifiers**: sequence-based ids for visitors and employees, and the
//!   QR-encodable pass code
//! - **Enums**: the closed visit-type set and the visitor status state
//!   machine
//! - **Configuration**: system configuration with validation and CLI support

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
