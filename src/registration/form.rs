//! Registration form validation
//!
//! The form arrives from the presentation layer as raw strings; validation
//! collects every missing or malformed field into a single error so the
//! visitor can correct the whole submission at once.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{VisitorError, VisitorResult};
use crate::store::records::VisitorDetails;
use crate::types::VisitType;

/// Raw pre-registration form as submitted by the visitor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Visitor's full name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Stated purpose of the visit
    pub purpose: String,
    /// Visit type, e.g. "Guest" or "Delivery Partner"
    pub visit_type: String,
    /// Name of the employee being visited
    pub whom_to_meet: String,
    /// Visit day, ISO `YYYY-MM-DD`
    pub visit_date: String,
    /// Visit time, `HH:MM`
    pub visit_time: String,
}

impl RegistrationForm {
    /// Validate the form, producing immutable visitor details
    ///
    /// Every required field must be non-empty; `visit_type`, `visit_date`,
    /// and `visit_time` must also parse. All offending field names are
    /// reported together in one [`VisitorError::Validation`].
    pub fn validate(&self) -> VisitorResult<VisitorDetails> {
        let mut missing = Vec::new();

        let required = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("visit_type", &self.visit_type),
            ("whom_to_meet", &self.whom_to_meet),
            ("visit_date", &self.visit_date),
            ("visit_time", &self.visit_time),
            ("purpose", &self.purpose),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name.to_string());
            }
        }

        if !self.email.trim().is_empty() && !self.email.contains('@') {
            missing.push("email".to_string());
        }

        let visit_type = self.visit_type.parse::<VisitType>();
        if !self.visit_type.trim().is_empty() && visit_type.is_err() {
            missing.push("visit_type".to_string());
        }

        let visit_date = NaiveDate::parse_from_str(self.visit_date.trim(), "%Y-%m-%d");
        if !self.visit_date.trim().is_empty() && visit_date.is_err() {
            missing.push("visit_date".to_string());
        }

        let visit_time = NaiveTime::parse_from_str(self.visit_time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(self.visit_time.trim(), "%H:%M:%S"));
        if !self.visit_time.trim().is_empty() && visit_time.is_err() {
            missing.push("visit_time".to_string());
        }

        if !missing.is_empty() {
            return Err(VisitorError::validation(missing));
        }

        // All parses succeeded above or the field would be listed
        let (visit_type, visit_date, visit_time) = match (visit_type, visit_date, visit_time) {
            (Ok(t), Ok(d), Ok(tm)) => (t, d, tm),
            _ => return Err(VisitorError::validation(vec!["form".to_string()])),
        };

        Ok(VisitorDetails {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            visit_type,
            whom_to_meet: self.whom_to_meet.trim().to_string(),
            visit_date,
            visit_time,
        })
    }
}
