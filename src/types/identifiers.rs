//! Identifier and pass-code types for the visitor pass manager
//!
//! This module contains the sequence-based identifier types for visitors and
//! employees, and the QR-encodable pass code presented at check-in/out.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a visitor record
///
/// Identifiers are assigned monotonically by the store and rendered with a
/// `VIS-` prefix, zero-padded to three digits (`VIS-001`, `VIS-042`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisitorId(pub u32);

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VIS-{:03}", self.0)
    }
}

impl FromStr for VisitorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("VIS-").ok_or_else(|| format!("Invalid visitor id: {}", s))?;
        digits
            .parse::<u32>()
            .map(VisitorId)
            .map_err(|_| format!("Invalid visitor id: {}", s))
    }
}

impl Serialize for VisitorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VisitorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// QR-encodable pass code bound to exactly one visitor record
///
/// A pass code is allocated together with the visitor id at submission time
/// and never changes. It is the token presented (scanned or typed) at
/// check-in and check-out, rendered `QR-VIS-###`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassCode(pub u32);

impl PassCode {
    /// Derive the pass code paired with a visitor id
    pub fn for_visitor(id: VisitorId) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for PassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QR-VIS-{:03}", self.0)
    }
}

impl FromStr for PassCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits =
            s.strip_prefix("QR-VIS-").ok_or_else(|| format!("Invalid pass code: {}", s))?;
        digits
            .parse::<u32>()
            .map(PassCode)
            .map_err(|_| format!("Invalid pass code: {}", s))
    }
}

impl Serialize for PassCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PassCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Unique identifier for an employee directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMP-{:03}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("EMP-").ok_or_else(|| format!("Invalid employee id: {}", s))?;
        digits
            .parse::<u32>()
            .map(EmployeeId)
            .map_err(|_| format!("Invalid employee id: {}", s))
    }
}

impl Serialize for EmployeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
