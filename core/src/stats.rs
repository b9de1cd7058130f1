//! Stats engine: revenue, refund and visit aggregation for the dashboard.
//!
//! RULES:
//!   - Every function here is pure: records in, numbers out. No clock reads.
//!   - Refunded records never count toward revenue or visit counts.
//!   - Revenue only sums positive amounts.
//!   - Bucketed outputs follow the catalog's `ALL` order.

use crate::{
    catalog::{Bucket, Category, VisitSource},
    period::ReportPeriod,
    record::{sum_amounts, CustomerVisitRecord},
    types::{Amount, Count},
};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the default daily revenue series.
pub const DEFAULT_DAILY_WINDOW: usize = 7;

/// Longest daily revenue series a report config may ask for.
pub const MAX_DAILY_WINDOW: usize = 366;

// ── Output types ─────────────────────────────────────────────────────────────

/// Summary-card figures for one reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub total_revenue: Amount,
    pub total_refund: Amount,
    pub customer_count: Count,
    pub consult_count: Count,
    pub net_revenue: Amount,
}

/// One named bucket of a breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotal<K, V> {
    pub name: K,
    pub value: V,
}

/// One point of the daily revenue trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Short `M/D` label, e.g. `1/5`.
    pub label: String,
    pub revenue: Amount,
}

/// Per-category row of the treatment-records view. Zero rows are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub customer_count: Count,
    pub revenue: Amount,
}

/// Visit count for one catalog procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureCount {
    pub procedure: &'static str,
    pub count: Count,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Revenue, refund and visit figures for records inside `period` at `reference`.
pub fn compute_period_stats(
    records: &[CustomerVisitRecord],
    period: ReportPeriod,
    reference: NaiveDate,
) -> PeriodStats {
    let in_period = || {
        records
            .iter()
            .filter(move |r| r.date.is_some_and(|date| period.contains(date, reference)))
    };

    let total_revenue = sum_amounts(in_period().map(CustomerVisitRecord::revenue));
    let total_refund = sum_amounts(in_period().map(CustomerVisitRecord::refund));
    let customer_count = in_period().filter(|r| r.counts_as_visit()).count() as Count;
    let consult_count = in_period()
        .filter(|r| r.counts_as_visit() && r.category == Some(Category::Consultation))
        .count() as Count;

    PeriodStats {
        total_revenue,
        total_refund,
        customer_count,
        consult_count,
        net_revenue: total_revenue.saturating_sub(total_refund),
    }
}

/// Revenue per category, catalog order, zero totals omitted.
pub fn compute_category_revenue(
    records: &[CustomerVisitRecord],
) -> Vec<BucketTotal<Category, Amount>> {
    Category::ALL
        .iter()
        .map(|&category| BucketTotal {
            name: category,
            value: sum_amounts(
                records
                    .iter()
                    .filter(|r| r.category == Some(category))
                    .map(CustomerVisitRecord::revenue),
            ),
        })
        .filter(|bucket| bucket.value != 0)
        .collect()
}

/// Fixed-length daily revenue series ending at `reference`, oldest first.
///
/// The series holds `window_days` entries unless it would reach back past
/// `NaiveDate::MIN`; days before the first representable date are left out.
/// Callers bound `window_days` (see `ReportConfig::daily_window`).
pub fn compute_daily_revenue(
    records: &[CustomerVisitRecord],
    reference: NaiveDate,
    window_days: usize,
) -> Vec<DailyRevenue> {
    (0..window_days)
        .rev()
        .filter_map(|back| reference.checked_sub_days(Days::new(back as u64)))
        .map(|date| DailyRevenue {
            date,
            label: day_label(date),
            revenue: sum_amounts(
                records
                    .iter()
                    .filter(|r| r.date == Some(date))
                    .map(CustomerVisitRecord::revenue),
            ),
        })
        .collect()
}

/// Visit count per acquisition source, catalog order, zero counts omitted.
pub fn compute_source_stats(records: &[CustomerVisitRecord]) -> Vec<BucketTotal<VisitSource, Count>> {
    VisitSource::ALL
        .iter()
        .map(|&source| BucketTotal {
            name: source,
            value: records
                .iter()
                .filter(|r| r.visit_source == Some(source) && r.counts_as_visit())
                .count() as Count,
        })
        .filter(|bucket| bucket.value > 0)
        .collect()
}

/// Visit count and revenue for every category, zeros included.
pub fn compute_category_summary(records: &[CustomerVisitRecord]) -> Vec<CategorySummary> {
    Category::ALL
        .iter()
        .map(|&category| {
            let visits = || {
                records
                    .iter()
                    .filter(move |r| r.category == Some(category) && r.counts_as_visit())
            };
            CategorySummary {
                category,
                customer_count: visits().count() as Count,
                revenue: sum_amounts(visits().map(CustomerVisitRecord::revenue)),
            }
        })
        .collect()
}

/// Visit count for each procedure on `category`'s list, list order, zeros included.
pub fn compute_procedure_counts(
    records: &[CustomerVisitRecord],
    category: Category,
) -> Vec<ProcedureCount> {
    category
        .procedures()
        .iter()
        .map(|&procedure| ProcedureCount {
            procedure,
            count: records
                .iter()
                .filter(|r| r.procedure.as_deref() == Some(procedure) && r.counts_as_visit())
                .count() as Count,
        })
        .collect()
}

fn day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_label_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(day_label(date), "1/5");
    }
}
