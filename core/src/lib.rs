//! Reporting core for the clinic dashboard.
//!
//! The backend owns the records; this crate turns a snapshot of them into
//! the numbers the dashboard shows. Aggregation is pure and never fails;
//! only the loaders around it (`config`, `snapshot`) touch the filesystem.

pub mod catalog;
pub mod config;
pub mod error;
pub mod name_generator;
pub mod period;
pub mod phone;
pub mod record;
pub mod report;
pub mod rng;
pub mod sample;
pub mod schedule;
pub mod search;
pub mod snapshot;
pub mod stats;
pub mod types;

pub use catalog::{Bucket, Category, CustomerGrade, PaymentMethod, PaymentStatus, VisitSource};
pub use config::ReportConfig;
pub use error::{ClinicError, ClinicResult};
pub use period::ReportPeriod;
pub use phone::format_phone_input;
pub use record::CustomerVisitRecord;
pub use report::{build_dashboard_report, DashboardReport};
pub use schedule::appointments_on;
pub use search::{filter_customers, sort_newest_first, CustomerFilter};
pub use snapshot::RecordSnapshot;
pub use stats::{
    compute_category_revenue, compute_category_summary, compute_daily_revenue,
    compute_period_stats, compute_procedure_counts, compute_source_stats, BucketTotal,
    CategorySummary, DailyRevenue, PeriodStats, ProcedureCount,
};
