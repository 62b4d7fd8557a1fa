//! Demo data seeding
//!
//! Seeds the store with a small set of visitors in assorted lifecycle
//! states and an employee directory, for the demo binary and dashboards.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::error::VisitorResult;
use crate::store::records::{NewEmployee, VisitorDetails};
use crate::store::visitor_store::VisitorStore;
use crate::types::{VisitType, VisitorStatus};

/// Seed the store with demo visitors and employees
///
/// Visit dates land on the supplied `today` so the analytics dashboard has
/// same-day data to show.
pub async fn seed_demo_data(store: &VisitorStore, today: NaiveDate) -> VisitorResult<()> {
    let employees = [
        NewEmployee {
            full_name: "Sarah Johnson".to_string(),
            email: "sarah.j@company.com".to_string(),
            phone: Some("+1234567800".to_string()),
            department: "Sales".to_string(),
            designation: "Sales Manager".to_string(),
            notifications_enabled: true,
        },
        NewEmployee {
            full_name: "Mike Wilson".to_string(),
            email: "mike.w@company.com".to_string(),
            phone: Some("+1234567801".to_string()),
            department: "Operations".to_string(),
            designation: "Operations Lead".to_string(),
            notifications_enabled: true,
        },
        NewEmployee {
            full_name: "David Lee".to_string(),
            email: "david.l@company.com".to_string(),
            phone: None,
            department: "Engineering".to_string(),
            designation: "Engineering Manager".to_string(),
            notifications_enabled: false,
        },
    ];
    for employee in employees {
        store.create_employee(employee).await?;
    }

    // An approved visitor awaiting arrival
    let approved = store
        .create_visitor(VisitorDetails {
            full_name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone: "+1234567890".to_string(),
            purpose: "Product Demo".to_string(),
            visit_type: VisitType::Business,
            whom_to_meet: "Sarah Johnson".to_string(),
            visit_date: today,
            visit_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
        })
        .await?;
    store
        .transition_status(approved.id, VisitorStatus::Pending, VisitorStatus::Approved, "approve")
        .await?;

    // A delivery partner already on site
    let on_site = store
        .create_visitor(VisitorDetails {
            full_name: "Emily Davis".to_string(),
            email: "emily.d@company.com".to_string(),
            phone: "+1234567891".to_string(),
            purpose: "Delivery Package".to_string(),
            visit_type: VisitType::DeliveryPartner,
            whom_to_meet: "Mike Wilson".to_string(),
            visit_date: today,
            visit_time: NaiveTime::from_hms_opt(14, 30, 0).expect("valid time"),
        })
        .await?;
    store
        .transition_status(on_site.id, VisitorStatus::Pending, VisitorStatus::Approved, "approve")
        .await?;
    store
        .transition_status(on_site.id, VisitorStatus::Approved, VisitorStatus::CheckedIn, "check in")
        .await?;

    // An interview candidate still awaiting approval
    store
        .create_visitor(VisitorDetails {
            full_name: "Robert Chen".to_string(),
            email: "robert.c@tech.com".to_string(),
            phone: "+1234567892".to_string(),
            purpose: "Interview - Senior Developer".to_string(),
            visit_type: VisitType::Interview,
            whom_to_meet: "David Lee".to_string(),
            visit_date: today,
            visit_time: NaiveTime::from_hms_opt(11, 0, 0).expect("valid time"),
        })
        .await?;

    info!("store seeded with demo visitors and employees");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_seed_produces_expected_states() {
        let store = VisitorStore::without_latency();
        let today = Utc::now().date_naive();
        seed_demo_data(&store, today).await.unwrap();

        let visitors = store.list_visitors().await.unwrap();
        assert_eq!(visitors.len(), 3);

        let statuses: Vec<VisitorStatus> = visitors.iter().map(|v| v.status).collect();
        assert!(statuses.contains(&VisitorStatus::Approved));
        assert!(statuses.contains(&VisitorStatus::CheckedIn));
        assert!(statuses.contains(&VisitorStatus::Pending));

        assert_eq!(store.list_employees().await.unwrap().len(), 3);
    }
}
