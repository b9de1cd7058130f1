//! Customer list search and ordering.

use crate::{
    catalog::{Category, PaymentStatus},
    record::CustomerVisitRecord,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// The customer list's filter bar. Empty/`None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
}

impl CustomerFilter {
    pub fn matches(&self, record: &CustomerVisitRecord) -> bool {
        self.matches_search(record)
            && self.category.map_or(true, |c| record.category == Some(c))
            && self.status.map_or(true, |s| record.payment_status == Some(s))
    }

    /// Case-sensitive substring match on name, phone or procedure.
    fn matches_search(&self, record: &CustomerVisitRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        [&record.name, &record.phone, &record.procedure]
            .into_iter()
            .flatten()
            .any(|field| field.contains(self.search.as_str()))
    }
}

/// Records matching every active filter, input order preserved.
pub fn filter_customers<'a>(
    records: &'a [CustomerVisitRecord],
    search: &str,
    category: Option<Category>,
    status: Option<PaymentStatus>,
) -> Vec<&'a CustomerVisitRecord> {
    let filter = CustomerFilter {
        search: search.to_string(),
        category,
        status,
    };
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Stable sort, newest date first; undated records go last.
pub fn sort_newest_first(records: &mut [CustomerVisitRecord]) {
    records.sort_by_key(|r| (r.date.is_none(), Reverse(r.date)));
}
