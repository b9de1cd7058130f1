//! Reporting periods and their date-window rules.

use crate::error::{ClinicError, ClinicResult};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Days back from the reference date covered by `ReportPeriod::Week`.
pub const WEEK_LOOKBACK_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// The reference calendar day only.
    Day,
    /// Rolling window `[reference - 7 days, reference]`, both ends inclusive.
    /// Not aligned to calendar weeks.
    Week,
    /// The reference date's calendar month and year.
    #[default]
    Month,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 3] = [Self::Day, Self::Week, Self::Month];

    /// Whether `date` falls inside this period anchored at `reference`.
    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Self::Day => date == reference,
            Self::Week => {
                let start = reference
                    .checked_sub_days(Days::new(WEEK_LOOKBACK_DAYS))
                    .unwrap_or(NaiveDate::MIN);
                start <= date && date <= reference
            }
            Self::Month => date.year() == reference.year() && date.month() == reference.month(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day   => "day",
            Self::Week  => "week",
            Self::Month => "month",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = ClinicError;

    fn from_str(s: &str) -> ClinicResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ClinicError::UnknownLabel {
                kind: "period",
                label: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_is_a_rolling_eight_day_inclusive_window() {
        let reference = d(2024, 3, 10);
        assert!(ReportPeriod::Week.contains(d(2024, 3, 3), reference));
        assert!(ReportPeriod::Week.contains(reference, reference));
        assert!(!ReportPeriod::Week.contains(d(2024, 3, 2), reference));
        assert!(!ReportPeriod::Week.contains(d(2024, 3, 11), reference));
    }

    #[test]
    fn month_requires_same_year() {
        let reference = d(2024, 3, 10);
        assert!(ReportPeriod::Month.contains(d(2024, 3, 31), reference));
        assert!(!ReportPeriod::Month.contains(d(2023, 3, 10), reference));
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("week".parse::<ReportPeriod>().unwrap(), ReportPeriod::Week);
        assert!("fortnight".parse::<ReportPeriod>().is_err());
    }
}
