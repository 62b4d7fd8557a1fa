//! QR pass code lookup
//!
//! Resolves a scanned pass code back to its visitor record. Lookup is
//! strictly read-only: scanning never changes a record's status, it only
//! tells the gate what the record currently says. Check-in remains a
//! separate, explicitly authorized transition.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::VisitorResult;
use crate::store::records::VisitorRecord;
use crate::store::visitor_store::VisitorStore;
use crate::types::PassCode;

/// Read-only resolver from scanned pass codes to visitor records
#[derive(Debug)]
pub struct QrLookup {
    store: Arc<VisitorStore>,
}

impl QrLookup {
    /// Create a resolver over the given store
    pub fn new(store: Arc<VisitorStore>) -> Self {
        Self { store }
    }

    /// Resolve a parsed pass code to its record, if one holds it
    pub async fn resolve(&self, code: PassCode) -> VisitorResult<Option<VisitorRecord>> {
        self.store.find_by_pass_code(code).await
    }

    /// Resolve a raw scanned string
    ///
    /// Pass codes are injective (one per record), so at most one record can
    /// match. A string that is not even shaped like a pass code resolves to
    /// `None` the same as a well-formed but unissued code; the scanner
    /// cannot tell the difference and should not have to.
    #[instrument(skip(self))]
    pub async fn resolve_scan(&self, scanned: &str) -> VisitorResult<Option<VisitorRecord>> {
        let code = match scanned.trim().parse::<PassCode>() {
            Ok(code) => code,
            Err(_) => {
                debug!(scanned, "scanned string is not a pass code");
                return Ok(None);
            }
        };
        self.resolve(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::VisitorDetails;
    use crate::types::{VisitType, VisitorStatus};
    use chrono::{NaiveDate, NaiveTime};

    fn details(name: &str) -> VisitorDetails {
        VisitorDetails {
            full_name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            phone: "+1234567890".to_string(),
            purpose: "Meeting".to_string(),
            visit_type: VisitType::Business,
            whom_to_meet: "Mike Wilson".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            visit_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_scan_resolves_to_the_issuing_record() {
        let store = Arc::new(VisitorStore::without_latency());
        let record = store.create_visitor(details("Alice")).await.unwrap();
        let lookup = QrLookup::new(store);

        let found = lookup.resolve_scan(&record.pass_code.to_string()).await.unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert_eq!(found.full_name, "Alice");
    }

    #[tokio::test]
    async fn test_codes_are_injective_across_records() {
        let store = Arc::new(VisitorStore::without_latency());
        let a = store.create_visitor(details("Alice")).await.unwrap();
        let b = store.create_visitor(details("Bob")).await.unwrap();
        let lookup = QrLookup::new(store);

        let hit_a = lookup.resolve(a.pass_code).await.unwrap().unwrap();
        let hit_b = lookup.resolve(b.pass_code).await.unwrap().unwrap();
        assert_eq!(hit_a.id, a.id);
        assert_eq!(hit_b.id, b.id);
        assert_ne!(hit_a.id, hit_b.id);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_codes_resolve_to_none() {
        let store = Arc::new(VisitorStore::without_latency());
        store.create_visitor(details("Alice")).await.unwrap();
        let lookup = QrLookup::new(store);

        assert!(lookup.resolve_scan("QR-VIS-999").await.unwrap().is_none());
        assert!(lookup.resolve_scan("not a code").await.unwrap().is_none());
        assert!(lookup.resolve_scan("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_does_not_change_status() {
        let store = Arc::new(VisitorStore::without_latency());
        let record = store.create_visitor(details("Alice")).await.unwrap();
        let lookup = QrLookup::new(store.clone());

        lookup.resolve(record.pass_code).await.unwrap();
        lookup.resolve(record.pass_code).await.unwrap();

        let after = store.get_visitor(record.id).await.unwrap();
        assert_eq!(after.status, VisitorStatus::Pending);
    }
}
