//! Analytics aggregation
//!
//! Pure summarization over a snapshot of visitor records. The aggregator
//! never touches the store or the wall clock: the caller passes the record
//! slice and the reference date, which keeps every figure reproducible in
//! tests and makes "today" an explicit input rather than an ambient one.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::records::VisitorRecord;
use crate::types::{VisitType, VisitorStatus};

/// Visitor count for one visit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    /// The visit category
    pub visit_type: VisitType,
    /// Number of records in that category
    pub count: usize,
}

/// Visitor count for one calendar day of the trailing week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// The calendar day
    pub date: NaiveDate,
    /// Short weekday label, e.g. "Mon"
    pub weekday: String,
    /// Number of visits scheduled on that day
    pub count: usize,
}

/// Visitor count for one month of the reference year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Short month label, e.g. "Jan"
    pub month: String,
    /// Number of visits scheduled in that month
    pub count: usize,
}

/// Aggregated dashboard figures computed from one store snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// All visitor records, regardless of status or date
    pub total_visitors: usize,
    /// Records still awaiting an admin decision
    pub pending_approvals: usize,
    /// Records approved (and not yet checked in) with a visit scheduled today
    pub approved_today: usize,
    /// Records currently checked in with a visit scheduled today
    pub checked_in_today: usize,
    /// Size of the employee directory
    pub total_employees: usize,
    /// Per-category breakdown, in declaration order, zero counts included
    pub by_visit_type: Vec<TypeCount>,
    /// Trailing seven days ending today, oldest first
    pub daily_trend: Vec<DailyCount>,
    /// The twelve months of the reference year, January first
    pub monthly_trend: Vec<MonthlyCount>,
}

/// Summarize a snapshot of records against the reference date `today`
pub fn summarize(
    records: &[VisitorRecord],
    employee_count: usize,
    today: NaiveDate,
) -> AnalyticsSnapshot {
    let pending_approvals =
        records.iter().filter(|r| r.status == VisitorStatus::Pending).count();
    let approved_today = records
        .iter()
        .filter(|r| r.status == VisitorStatus::Approved && r.visit_date == today)
        .count();
    let checked_in_today = records
        .iter()
        .filter(|r| r.status == VisitorStatus::CheckedIn && r.visit_date == today)
        .count();

    let by_visit_type = VisitType::ALL
        .iter()
        .map(|&visit_type| TypeCount {
            visit_type,
            count: records.iter().filter(|r| r.visit_type == visit_type).count(),
        })
        .collect();

    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    let mut per_month: HashMap<u32, usize> = HashMap::new();
    for record in records {
        *per_day.entry(record.visit_date).or_default() += 1;
        if record.visit_date.year() == today.year() {
            *per_month.entry(record.visit_date.month()).or_default() += 1;
        }
    }

    let daily_trend = (0..7)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(back)))
        .map(|date| DailyCount {
            date,
            weekday: date.format("%a").to_string(),
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let monthly_trend = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(today.year(), month, 1))
        .map(|first| MonthlyCount {
            month: first.format("%b").to_string(),
            count: per_month.get(&first.month()).copied().unwrap_or(0),
        })
        .collect();

    AnalyticsSnapshot {
        total_visitors: records.len(),
        pending_approvals,
        approved_today,
        checked_in_today,
        total_employees: employee_count,
        by_visit_type,
        daily_trend,
        monthly_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::VisitorDetails;
    use crate::types::{PassCode, VisitorId};
    use chrono::{NaiveTime, Utc};

    fn record(
        id: u32,
        status: VisitorStatus,
        visit_type: VisitType,
        visit_date: NaiveDate,
    ) -> VisitorRecord {
        let mut r = VisitorRecord::new(
            VisitorId(id),
            VisitorDetails {
                full_name: format!("Visitor {}", id),
                email: format!("v{}@x.com", id),
                phone: "+1234567890".to_string(),
                purpose: "Meeting".to_string(),
                visit_type,
                whom_to_meet: "Sarah Johnson".to_string(),
                visit_date,
                visit_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            },
            Utc::now(),
        );
        r.status = status;
        r
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let snapshot = summarize(&[], 0, today);

        assert_eq!(snapshot.total_visitors, 0);
        assert_eq!(snapshot.pending_approvals, 0);
        assert_eq!(snapshot.approved_today, 0);
        assert_eq!(snapshot.daily_trend.len(), 7);
        assert!(snapshot.daily_trend.iter().all(|d| d.count == 0));
        assert_eq!(snapshot.monthly_trend.len(), 12);
        assert_eq!(snapshot.by_visit_type.len(), VisitType::ALL.len());
    }

    #[test]
    fn test_todays_statuses_count_into_separate_buckets() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let records = vec![
            record(1, VisitorStatus::Approved, VisitType::Business, today),
            record(2, VisitorStatus::Approved, VisitType::Guest, today),
            record(3, VisitorStatus::Approved, VisitType::Meeting, today),
            record(4, VisitorStatus::CheckedIn, VisitType::Vendors, today),
            record(5, VisitorStatus::CheckedIn, VisitType::Guest, today),
            record(6, VisitorStatus::Rejected, VisitType::Guest, today),
        ];

        let snapshot = summarize(&records, 3, today);
        assert_eq!(snapshot.total_visitors, 6);
        assert_eq!(snapshot.approved_today, 3);
        assert_eq!(snapshot.checked_in_today, 2);
        assert_eq!(snapshot.pending_approvals, 0);
        assert_eq!(snapshot.total_employees, 3);
    }

    #[test]
    fn test_approved_on_another_day_is_not_approved_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let records = vec![
            record(1, VisitorStatus::Approved, VisitType::Guest, yesterday),
            record(2, VisitorStatus::Pending, VisitType::Guest, today),
        ];

        let snapshot = summarize(&records, 0, today);
        assert_eq!(snapshot.approved_today, 0);
        assert_eq!(snapshot.pending_approvals, 1);
    }

    #[test]
    fn test_visit_type_breakdown_covers_every_category() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let records = vec![
            record(1, VisitorStatus::Pending, VisitType::DeliveryPartner, today),
            record(2, VisitorStatus::Pending, VisitType::DeliveryPartner, today),
            record(3, VisitorStatus::Pending, VisitType::Interview, today),
        ];

        let snapshot = summarize(&records, 0, today);
        let count_of = |t: VisitType| {
            snapshot.by_visit_type.iter().find(|c| c.visit_type == t).unwrap().count
        };
        assert_eq!(count_of(VisitType::DeliveryPartner), 2);
        assert_eq!(count_of(VisitType::Interview), 1);
        assert_eq!(count_of(VisitType::Contractor), 0);
    }

    #[test]
    fn test_daily_trend_covers_trailing_week_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let records = vec![
            record(1, VisitorStatus::Pending, VisitType::Guest, today),
            record(2, VisitorStatus::Pending, VisitType::Guest, today),
            record(3, VisitorStatus::Pending, VisitType::Guest, today.pred_opt().unwrap()),
            // Outside the window
            record(4, VisitorStatus::Pending, VisitType::Guest,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        ];

        let snapshot = summarize(&records, 0, today);
        assert_eq!(snapshot.daily_trend.len(), 7);
        assert_eq!(snapshot.daily_trend[0].date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        assert_eq!(snapshot.daily_trend[6].date, today);
        assert_eq!(snapshot.daily_trend[6].count, 2);
        assert_eq!(snapshot.daily_trend[5].count, 1);
        assert_eq!(snapshot.daily_trend[6].weekday, "Fri");
    }

    #[test]
    fn test_monthly_trend_is_scoped_to_the_reference_year() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let records = vec![
            record(1, VisitorStatus::Pending, VisitType::Guest,
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()),
            record(2, VisitorStatus::Pending, VisitType::Guest,
                NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()),
            record(3, VisitorStatus::Pending, VisitType::Guest,
                NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
        ];

        let snapshot = summarize(&records, 0, today);
        assert_eq!(snapshot.monthly_trend.len(), 12);
        assert_eq!(snapshot.monthly_trend[0].month, "Jan");
        assert_eq!(snapshot.monthly_trend[0].count, 1);
        assert_eq!(snapshot.monthly_trend[5].month, "Jun");
        // The 2024 visit does not leak into this year's series
        assert_eq!(snapshot.monthly_trend[5].count, 1);
    }
}
