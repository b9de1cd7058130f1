//! Dashboard report: everything the dashboard screen renders for one
//! reference date, computed in one call.

use crate::{
    catalog::{Category, VisitSource},
    config::ReportConfig,
    period::ReportPeriod,
    record::CustomerVisitRecord,
    stats::{
        compute_category_revenue, compute_daily_revenue, compute_period_stats,
        compute_source_stats, BucketTotal, DailyRevenue, PeriodStats,
    },
    types::{Amount, Count},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub reference_date: NaiveDate,
    pub period: ReportPeriod,
    pub record_count: usize,
    pub stats: PeriodStats,
    pub category_revenue: Vec<BucketTotal<Category, Amount>>,
    pub daily_revenue: Vec<DailyRevenue>,
    pub source_stats: Vec<BucketTotal<VisitSource, Count>>,
}

/// Period stats follow `period`; the breakdowns cover the whole snapshot,
/// and the trend covers `config.daily_window()` days ending at `reference`.
pub fn build_dashboard_report(
    records: &[CustomerVisitRecord],
    period: ReportPeriod,
    reference: NaiveDate,
    config: &ReportConfig,
) -> DashboardReport {
    DashboardReport {
        reference_date: reference,
        period,
        record_count: records.len(),
        stats: compute_period_stats(records, period, reference),
        category_revenue: compute_category_revenue(records),
        daily_revenue: compute_daily_revenue(records, reference, config.daily_window()),
        source_stats: compute_source_stats(records),
    }
}
