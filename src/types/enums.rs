//! Enumeration types for the visitor pass manager
//!
//! This module contains the closed set of visit types a visitor can register
//! under and the visitor status enumeration that drives the lifecycle state
//! machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of visit a visitor registers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitType {
    /// Vendor or supplier visit
    Vendors,
    /// General business visit
    Business,
    /// Courier or package delivery
    #[serde(rename = "Delivery Partner")]
    DeliveryPartner,
    /// Scheduled meeting with an employee
    Meeting,
    /// Candidate interview
    Interview,
    /// Personal guest
    Guest,
    /// On-site contractor
    Contractor,
}

impl VisitType {
    /// All visit types, in display order
    pub const ALL: [VisitType; 7] = [
        VisitType::Vendors,
        VisitType::Business,
        VisitType::DeliveryPartner,
        VisitType::Meeting,
        VisitType::Interview,
        VisitType::Guest,
        VisitType::Contractor,
    ];
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitType::Vendors => write!(f, "Vendors"),
            VisitType::Business => write!(f, "Business"),
            VisitType::DeliveryPartner => write!(f, "Delivery Partner"),
            VisitType::Meeting => write!(f, "Meeting"),
            VisitType::Interview => write!(f, "Interview"),
            VisitType::Guest => write!(f, "Guest"),
            VisitType::Contractor => write!(f, "Contractor"),
        }
    }
}

impl FromStr for VisitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vendors" | "vendor" => Ok(VisitType::Vendors),
            "business" => Ok(VisitType::Business),
            "delivery partner" | "deliverypartner" | "delivery" => Ok(VisitType::DeliveryPartner),
            "meeting" => Ok(VisitType::Meeting),
            "interview" => Ok(VisitType::Interview),
            "guest" => Ok(VisitType::Guest),
            "contractor" => Ok(VisitType::Contractor),
            _ => Err(format!("Unknown visit type: {}", s)),
        }
    }
}

/// Lifecycle status of a visitor record
///
/// Transitions are monotonic along the graph below; `Rejected` and
/// `CheckedOut` are terminal and nothing ever returns to `Pending`.
///
/// ```text
/// Pending ──► Approved ──► CheckedIn ──► CheckedOut
///    │
///    └──────► Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    /// Awaiting admin approval (initial state)
    Pending,
    /// Approved by an admin, not yet on site
    Approved,
    /// Rejected by an admin (terminal)
    Rejected,
    /// On site, checked in by security
    CheckedIn,
    /// Departed, checked out by security (terminal)
    CheckedOut,
}

impl VisitorStatus {
    /// Check whether a direct transition to `next` is legal
    pub fn can_transition_to(self, next: VisitorStatus) -> bool {
        matches!(
            (self, next),
            (VisitorStatus::Pending, VisitorStatus::Approved)
                | (VisitorStatus::Pending, VisitorStatus::Rejected)
                | (VisitorStatus::Approved, VisitorStatus::CheckedIn)
                | (VisitorStatus::CheckedIn, VisitorStatus::CheckedOut)
        )
    }

    /// Check whether this status admits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, VisitorStatus::Rejected | VisitorStatus::CheckedOut)
    }
}

impl fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitorStatus::Pending => write!(f, "Pending"),
            VisitorStatus::Approved => write!(f, "Approved"),
            VisitorStatus::Rejected => write!(f, "Rejected"),
            VisitorStatus::CheckedIn => write!(f, "Checked In"),
            VisitorStatus::CheckedOut => write!(f, "Checked Out"),
        }
    }
}

impl FromStr for VisitorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(VisitorStatus::Pending),
            "approved" => Ok(VisitorStatus::Approved),
            "rejected" => Ok(VisitorStatus::Rejected),
            "checked in" | "checked_in" | "checkedin" => Ok(VisitorStatus::CheckedIn),
            "checked out" | "checked_out" | "checkedout" => Ok(VisitorStatus::CheckedOut),
            _ => Err(format!("Unknown visitor status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_type_display() {
        assert_eq!(VisitType::DeliveryPartner.to_string(), "Delivery Partner");
        assert_eq!(VisitType::Guest.to_string(), "Guest");
    }

    #[test]
    fn test_visit_type_from_str() {
        assert_eq!("guest".parse::<VisitType>().unwrap(), VisitType::Guest);
        assert_eq!("delivery partner".parse::<VisitType>().unwrap(), VisitType::DeliveryPartner);
        assert_eq!("deliverypartner".parse::<VisitType>().unwrap(), VisitType::DeliveryPartner);
        assert_eq!("vendor".parse::<VisitType>().unwrap(), VisitType::Vendors);

        assert!("tourist".parse::<VisitType>().is_err());
    }

    #[test]
    fn test_visit_type_serde_wire_form() {
        let json = serde_json::to_string(&VisitType::DeliveryPartner).unwrap();
        assert_eq!(json, "\"Delivery Partner\"");
        let back: VisitType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VisitType::DeliveryPartner);
    }

    #[test]
    fn test_status_serde_wire_form() {
        let json = serde_json::to_string(&VisitorStatus::CheckedIn).unwrap();
        assert_eq!(json, "\"checked_in\"");
        let back: VisitorStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VisitorStatus::CheckedIn);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("checked_in".parse::<VisitorStatus>().unwrap(), VisitorStatus::CheckedIn);
        assert_eq!("Checked Out".parse::<VisitorStatus>().unwrap(), VisitorStatus::CheckedOut);
        assert!("archived".parse::<VisitorStatus>().is_err());
    }

    #[test]
    fn test_legal_transitions() {
        use VisitorStatus::*;

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
    }

    #[test]
    fn test_illegal_transitions() {
        use VisitorStatus::*;

        // The approval gate cannot be bypassed
        assert!(!Pending.can_transition_to(CheckedIn));
        // Nothing returns to Pending
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Pending));
        // Terminal states admit nothing
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!CheckedOut.can_transition_to(CheckedIn));
        // Re-applying the current state is not a transition
        assert!(!Approved.can_transition_to(Approved));
    }

    #[test]
    fn test_terminal_states() {
        assert!(VisitorStatus::Rejected.is_terminal());
        assert!(VisitorStatus::CheckedOut.is_terminal());
        assert!(!VisitorStatus::Pending.is_terminal());
        assert!(!VisitorStatus::Approved.is_terminal());
        assert!(!VisitorStatus::CheckedIn.is_terminal());
    }
}
