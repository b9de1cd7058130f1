//! Daily appointment schedule.

use crate::record::CustomerVisitRecord;
use chrono::{NaiveDate, NaiveTime};
use std::cmp::Ordering;

/// Records dated `date` that carry an appointment slot, earliest slot first.
///
/// Slots that do not parse as `HH:MM` / `HH:MM:SS` sort after parsed ones,
/// by their text. Ties keep input order.
pub fn appointments_on(records: &[CustomerVisitRecord], date: NaiveDate) -> Vec<&CustomerVisitRecord> {
    let mut booked: Vec<(&CustomerVisitRecord, &str, Option<NaiveTime>)> = records
        .iter()
        .filter(|r| r.date == Some(date))
        .filter_map(|r| {
            let slot = r.appointment_time.as_deref()?.trim();
            (!slot.is_empty()).then(|| (r, slot, parse_slot(slot)))
        })
        .collect();

    booked.sort_by(|(_, a_text, a_time), (_, b_text, b_time)| match (a_time, b_time) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a_text.cmp(b_text),
    });

    booked.into_iter().map(|(r, _, _)| r).collect()
}

fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(slot, "%H:%M:%S"))
        .ok()
}
