//! Record types owned by the visitor store
//!
//! This module contains the visitor record (one visit request/pass), the
//! employee directory entry, and the payload types the store accepts for
//! creation and patching.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EmployeeId, PassCode, VisitType, VisitorId, VisitorStatus};

/// Validated visitor-supplied details, immutable after submission
///
/// Produced by form validation; the store combines these with an allocated
/// id, pass code, and timestamps to publish a full [`VisitorRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorDetails {
    /// Visitor's full name
    pub full_name: String,
    /// Contact email, also the OTP challenge key
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Stated purpose of the visit
    pub purpose: String,
    /// Category of visit
    pub visit_type: VisitType,
    /// Employee the visitor is meeting (denormalized name snapshot)
    pub whom_to_meet: String,
    /// Calendar day of the visit
    pub visit_date: NaiveDate,
    /// Scheduled time of the visit
    pub visit_time: NaiveTime,
}

/// One visit request/pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorRecord {
    /// Unique, monotonically assigned identifier
    pub id: VisitorId,
    /// Visitor's full name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Stated purpose of the visit
    pub purpose: String,
    /// Category of visit
    pub visit_type: VisitType,
    /// Employee the visitor is meeting (denormalized name snapshot; not
    /// reconciled if the employee record is later deleted)
    pub whom_to_meet: String,
    /// Calendar day of the visit
    pub visit_date: NaiveDate,
    /// Scheduled time of the visit
    pub visit_time: NaiveTime,
    /// Lifecycle status driving all workflow logic
    pub status: VisitorStatus,
    /// The QR-encodable token presented at check-in/out; assigned at
    /// creation, unique, immutable
    pub pass_code: PassCode,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VisitorRecord {
    /// Assemble a record from validated details and allocated identity
    ///
    /// New records always start `Pending`.
    pub fn new(id: VisitorId, details: VisitorDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: details.full_name,
            email: details.email,
            phone: details.phone,
            purpose: details.purpose,
            visit_type: details.visit_type,
            whom_to_meet: details.whom_to_meet,
            visit_date: details.visit_date,
            visit_time: details.visit_time,
            status: VisitorStatus::Pending,
            pass_code: PassCode::for_visitor(id),
            created_at,
        }
    }
}

/// Employee directory entry a visitor can be registered against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier
    pub id: EmployeeId,
    /// Employee's full name
    pub full_name: String,
    /// Work email
    pub email: String,
    /// Work phone, if any
    pub phone: Option<String>,
    /// Department name
    pub department: String,
    /// Job title
    pub designation: String,
    /// Whether the employee receives visitor notifications
    pub notifications_enabled: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an employee directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Employee's full name
    pub full_name: String,
    /// Work email
    pub email: String,
    /// Work phone, if any
    pub phone: Option<String>,
    /// Department name
    pub department: String,
    /// Job title
    pub designation: String,
    /// Whether the employee receives visitor notifications
    pub notifications_enabled: bool,
}

/// Partial update payload for an employee directory entry
///
/// Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New full name
    pub full_name: Option<String>,
    /// New work email
    pub email: Option<String>,
    /// New work phone
    pub phone: Option<String>,
    /// New department
    pub department: Option<String>,
    /// New job title
    pub designation: Option<String>,
    /// New notification preference
    pub notifications_enabled: Option<bool>,
}

impl EmployeeUpdate {
    /// Apply the patch to an existing record
    pub fn apply_to(&self, record: &mut EmployeeRecord) {
        if let Some(name) = &self.full_name {
            record.full_name = name.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
        if let Some(department) = &self.department {
            record.department = department.clone();
        }
        if let Some(designation) = &self.designation {
            record.designation = designation.clone();
        }
        if let Some(enabled) = self.notifications_enabled {
            record.notifications_enabled = enabled;
        }
    }
}
