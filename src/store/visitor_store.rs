//! In-memory visitor store
//!
//! The store is the single source of truth for visitor records and the
//! employee directory. All mutation flows through here; the registration
//! workflow creates records and the transition engine changes status via
//! the per-record compare-and-set below. Reads hand out cloned snapshots
//! and never block writers beyond the read guard itself.
//!
//! Every operation is asynchronous and may suspend on a configured
//! simulated latency, standing in for the network round trips of a real
//! backend. A per-call deadline converts an unresponsive operation into a
//! retryable [`VisitorError::Timeout`] instead of hanging.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::error::{VisitorError, VisitorResult};
use crate::store::records::{
    EmployeeRecord, EmployeeUpdate, NewEmployee, VisitorDetails, VisitorRecord,
};
use crate::types::{EmployeeId, LatencyProfile, PassCode, SystemConfig, VisitorId, VisitorStatus};

/// Async in-memory store for visitor and employee records
#[derive(Debug)]
pub struct VisitorStore {
    visitors: RwLock<BTreeMap<VisitorId, VisitorRecord>>,
    employees: RwLock<BTreeMap<EmployeeId, EmployeeRecord>>,
    next_visitor_id: AtomicU32,
    next_employee_id: AtomicU32,
    latency: LatencyProfile,
    op_timeout: Duration,
}

impl VisitorStore {
    /// Create an empty store using the given configuration
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            visitors: RwLock::new(BTreeMap::new()),
            employees: RwLock::new(BTreeMap::new()),
            next_visitor_id: AtomicU32::new(1),
            next_employee_id: AtomicU32::new(1),
            latency: config.latency.clone(),
            op_timeout: Duration::from_millis(config.op_timeout_ms),
        }
    }

    /// Create an empty store with no simulated latency, for tests
    pub fn without_latency() -> Self {
        let config = SystemConfig { latency: LatencyProfile::disabled(), ..Default::default() };
        Self::new(&config)
    }

    /// Simulate the transport delay for one operation class
    async fn pace(&self, ms: u64) {
        if self.latency.enabled && ms > 0 {
            sleep(Duration::from_millis(ms)).await;
        }
    }

    /// Run a store operation under the configured deadline
    ///
    /// An overrun is reported as a retryable timeout rather than hanging
    /// the caller indefinitely.
    async fn with_deadline<T, F>(&self, operation: &str, fut: F) -> VisitorResult<T>
    where
        F: Future<Output = VisitorResult<T>>,
    {
        match timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(VisitorError::timeout(operation, self.op_timeout.as_millis() as u64)),
        }
    }

    // ── Visitor records ──────────────────────────────────────────────

    /// Create a new visitor record from validated details
    ///
    /// Allocates the next id and its paired pass code, then publishes the
    /// fully-built record in one insert; no partially-written record is
    /// ever visible to readers.
    pub async fn create_visitor(&self, details: VisitorDetails) -> VisitorResult<VisitorRecord> {
        self.with_deadline("create_visitor", async {
            self.pace(self.latency.submit_ms).await;

            let id = VisitorId(self.next_visitor_id.fetch_add(1, Ordering::SeqCst));
            let record = VisitorRecord::new(id, details, Utc::now());

            let mut visitors = self.visitors.write().await;
            visitors.insert(id, record.clone());
            info!(visitor = %id, pass_code = %record.pass_code, "visitor record created");
            Ok(record)
        })
        .await
    }

    /// List all visitor records in id order
    pub async fn list_visitors(&self) -> VisitorResult<Vec<VisitorRecord>> {
        self.with_deadline("list_visitors", async {
            self.pace(self.latency.read_ms).await;
            let visitors = self.visitors.read().await;
            Ok(visitors.values().cloned().collect())
        })
        .await
    }

    /// Fetch one visitor record by id
    pub async fn get_visitor(&self, id: VisitorId) -> VisitorResult<VisitorRecord> {
        self.with_deadline("get_visitor", async {
            self.pace(self.latency.read_ms).await;
            let visitors = self.visitors.read().await;
            visitors.get(&id).cloned().ok_or_else(|| VisitorError::not_found(id))
        })
        .await
    }

    /// Find the visitor record holding a pass code, if any
    ///
    /// Exact match only; `None` for unknown codes so callers can tell "not
    /// found" apart from a hard failure.
    pub async fn find_by_pass_code(&self, code: PassCode) -> VisitorResult<Option<VisitorRecord>> {
        self.with_deadline("find_by_pass_code", async {
            self.pace(self.latency.lookup_ms).await;
            let visitors = self.visitors.read().await;
            Ok(visitors.values().find(|v| v.pass_code == code).cloned())
        })
        .await
    }

    /// Atomically transition a record's status, guarded by the expected
    /// current status
    ///
    /// The check and the write happen inside a single write-lock critical
    /// section with no suspension point, so of two racing transitions on
    /// the same record exactly one commits; the loser observes the
    /// committed status in the returned [`VisitorError::InvalidTransition`].
    /// `attempted` labels the operation for that error message.
    pub async fn transition_status(
        &self,
        id: VisitorId,
        expected: VisitorStatus,
        next: VisitorStatus,
        attempted: &str,
    ) -> VisitorResult<VisitorRecord> {
        self.with_deadline("transition_status", async {
            self.pace(self.latency.transition_ms).await;

            let mut visitors = self.visitors.write().await;
            let record = visitors.get_mut(&id).ok_or_else(|| VisitorError::not_found(id))?;

            if record.status != expected {
                debug!(
                    visitor = %id,
                    current = %record.status,
                    attempted,
                    "transition rejected by status guard"
                );
                return Err(VisitorError::invalid_transition(record.status, attempted));
            }

            record.status = next;
            info!(visitor = %id, from = %expected, to = %next, "status transition committed");
            Ok(record.clone())
        })
        .await
    }

    // ── Employee directory ───────────────────────────────────────────

    /// Create a new employee directory entry
    pub async fn create_employee(&self, new: NewEmployee) -> VisitorResult<EmployeeRecord> {
        self.with_deadline("create_employee", async {
            self.pace(self.latency.submit_ms).await;

            let id = EmployeeId(self.next_employee_id.fetch_add(1, Ordering::SeqCst));
            let record = EmployeeRecord {
                id,
                full_name: new.full_name,
                email: new.email,
                phone: new.phone,
                department: new.department,
                designation: new.designation,
                notifications_enabled: new.notifications_enabled,
                created_at: Utc::now(),
            };

            let mut employees = self.employees.write().await;
            employees.insert(id, record.clone());
            info!(employee = %id, "employee record created");
            Ok(record)
        })
        .await
    }

    /// List all employee directory entries in id order
    pub async fn list_employees(&self) -> VisitorResult<Vec<EmployeeRecord>> {
        self.with_deadline("list_employees", async {
            self.pace(self.latency.read_ms).await;
            let employees = self.employees.read().await;
            Ok(employees.values().cloned().collect())
        })
        .await
    }

    /// Fetch one employee directory entry by id
    pub async fn get_employee(&self, id: EmployeeId) -> VisitorResult<EmployeeRecord> {
        self.with_deadline("get_employee", async {
            self.pace(self.latency.read_ms).await;
            let employees = self.employees.read().await;
            employees.get(&id).cloned().ok_or_else(|| VisitorError::not_found(id))
        })
        .await
    }

    /// Apply a partial update to an employee directory entry
    pub async fn update_employee(
        &self,
        id: EmployeeId,
        patch: EmployeeUpdate,
    ) -> VisitorResult<EmployeeRecord> {
        self.with_deadline("update_employee", async {
            self.pace(self.latency.submit_ms).await;

            let mut employees = self.employees.write().await;
            let record = employees.get_mut(&id).ok_or_else(|| VisitorError::not_found(id))?;
            patch.apply_to(record);
            info!(employee = %id, "employee record updated");
            Ok(record.clone())
        })
        .await
    }

    /// Delete an employee directory entry
    ///
    /// Existing visitor records keep their denormalized `whom_to_meet`
    /// snapshot; deletion does not cascade.
    pub async fn delete_employee(&self, id: EmployeeId) -> VisitorResult<()> {
        self.with_deadline("delete_employee", async {
            self.pace(self.latency.submit_ms).await;

            let mut employees = self.employees.write().await;
            employees.remove(&id).ok_or_else(|| VisitorError::not_found(id))?;
            info!(employee = %id, "employee record deleted");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::types::VisitType;

    fn details(name: &str, email: &str) -> VisitorDetails {
        VisitorDetails {
            full_name: name.to_string(),
            email: email.to_string(),
            phone: "+1234567890".to_string(),
            purpose: "Meeting".to_string(),
            visit_type: VisitType::Guest,
            whom_to_meet: "Sarah Johnson".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            visit_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_monotonic_ids_and_unique_pass_codes() {
        let store = VisitorStore::without_latency();

        let a = store.create_visitor(details("A", "a@x.com")).await.unwrap();
        let b = store.create_visitor(details("B", "b@x.com")).await.unwrap();

        assert!(a.id < b.id);
        assert_ne!(a.pass_code, b.pass_code);
        assert_eq!(a.status, VisitorStatus::Pending);
        assert_eq!(b.status, VisitorStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_and_list_visitors() {
        let store = VisitorStore::without_latency();
        let created = store.create_visitor(details("A", "a@x.com")).await.unwrap();

        let fetched = store.get_visitor(created.id).await.unwrap();
        assert_eq!(fetched.full_name, "A");

        let all = store.list_visitors().await.unwrap();
        assert_eq!(all.len(), 1);

        let missing = store.get_visitor(VisitorId(999)).await;
        assert!(matches!(missing, Err(VisitorError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_pass_code_is_exact() {
        let store = VisitorStore::without_latency();
        let created = store.create_visitor(details("A", "a@x.com")).await.unwrap();

        let found = store.find_by_pass_code(created.pass_code).await.unwrap();
        assert_eq!(found.unwrap().id, created.id);

        let unknown = store.find_by_pass_code(PassCode(999)).await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_transition_guard_rejects_stale_expectation() {
        let store = VisitorStore::without_latency();
        let record = store.create_visitor(details("A", "a@x.com")).await.unwrap();

        let approved = store
            .transition_status(record.id, VisitorStatus::Pending, VisitorStatus::Approved, "approve")
            .await
            .unwrap();
        assert_eq!(approved.status, VisitorStatus::Approved);

        // The same guard no longer holds; the error reports the committed status
        let err = store
            .transition_status(record.id, VisitorStatus::Pending, VisitorStatus::Rejected, "reject")
            .await
            .unwrap_err();
        match err {
            VisitorError::InvalidTransition { current, .. } => {
                assert_eq!(current, VisitorStatus::Approved);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transition_on_unknown_record() {
        let store = VisitorStore::without_latency();
        let err = store
            .transition_status(VisitorId(42), VisitorStatus::Pending, VisitorStatus::Approved, "approve")
            .await
            .unwrap_err();
        assert!(matches!(err, VisitorError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_employee_crud_round_trip() {
        let store = VisitorStore::without_latency();

        let created = store
            .create_employee(NewEmployee {
                full_name: "Sarah Johnson".to_string(),
                email: "sarah.j@company.com".to_string(),
                phone: None,
                department: "Sales".to_string(),
                designation: "Sales Manager".to_string(),
                notifications_enabled: true,
            })
            .await
            .unwrap();
        assert_eq!(created.id, EmployeeId(1));

        let patched = store
            .update_employee(
                created.id,
                EmployeeUpdate { department: Some("Marketing".to_string()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(patched.department, "Marketing");

        store.delete_employee(created.id).await.unwrap();
        assert!(store.list_employees().await.unwrap().is_empty());

        let err = store.delete_employee(created.id).await.unwrap_err();
        assert!(matches!(err, VisitorError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_call_becomes_retryable_timeout() {
        // Latency deliberately beyond the deadline; built directly to skip
        // the config validation that normally forbids this
        let config = SystemConfig {
            latency: LatencyProfile::uniform(10_000),
            op_timeout_ms: 100,
            ..Default::default()
        };
        let store = VisitorStore::new(&config);

        let err = store.list_visitors().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, VisitorError::Timeout { .. }));
    }
}
