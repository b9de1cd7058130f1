//! The customer-visit record, as the dashboard backend stores it.
//!
//! RULE: Decoding a record never fails on field content.
//! A missing, null or unrecognised value decodes as `None`, and every
//! aggregation treats `None` as "contributes nothing". Only a document that
//! is not a JSON object at all is rejected.

use crate::{
    catalog::{Bucket, Category, CustomerGrade, PaymentMethod, PaymentStatus, VisitSource},
    types::{Amount, RecordId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format of `date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVisitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub id: Option<RecordId>,

    // ── Identity ───────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub phone: Option<String>,

    // ── Service ────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::known")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub procedure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::known")]
    pub visit_source: Option<VisitSource>,

    // ── Payment ────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::known")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::known")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::amount")]
    pub amount: Option<Amount>,

    // ── Scheduling ─────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub appointment_time: Option<String>,

    // ── Descriptive (never aggregated) ─────────────
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub staff_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub staff_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub staff_position: Option<String>,
    /// Stored verbatim so grades outside the catalog survive a round trip.
    /// Use `customer_grade()` for the typed view.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub before_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub after_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    pub updated_by: Option<String>,
}

impl CustomerVisitRecord {
    /// True when the record is flagged as a refund.
    pub fn is_refund(&self) -> bool {
        self.payment_status == Some(PaymentStatus::Refunded)
    }

    /// Contribution to revenue: the amount when positive and not refunded.
    pub fn revenue(&self) -> Amount {
        match self.amount {
            Some(amount) if amount > 0 && !self.is_refund() => amount,
            _ => 0,
        }
    }

    /// Contribution to refunds: `|amount|` for refunded records, else 0.
    pub fn refund(&self) -> Amount {
        if self.is_refund() {
            self.amount.unwrap_or(0).saturating_abs()
        } else {
            0
        }
    }

    /// Whether the record counts as a customer visit (anything not refunded).
    pub fn counts_as_visit(&self) -> bool {
        !self.is_refund()
    }

    /// The grade as a catalog value, if it is one of the known tiers.
    pub fn customer_grade(&self) -> Option<CustomerGrade> {
        self.grade.as_deref().and_then(CustomerGrade::from_label)
    }

    /// Decode a single backend document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Sum amounts without overflowing.
pub(crate) fn sum_amounts<I: IntoIterator<Item = Amount>>(amounts: I) -> Amount {
    amounts.into_iter().fold(0, Amount::saturating_add)
}

/// Field decoders that map bad values to `None` instead of failing.
mod lenient {
    use super::DATE_FORMAT;
    use crate::types::Amount;
    use chrono::NaiveDate;
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn known<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };
        match serde_json::from_value::<T>(value.clone()) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => {
                log::debug!("ignoring unrecognised value {value}");
                Ok(None)
            }
        }
    }

    pub fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn amount<'de, D>(d: D) -> Result<Option<Amount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as Amount)
            }),
            Some(Value::String(s)) => parse_int_prefix(&s),
            _ => None,
        })
    }

    pub fn date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => parse_date(&s),
            _ => None,
        })
    }

    /// `YYYY-MM-DD`, optionally followed by a time part (`T...`).
    pub(super) fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        let day = s.split_once('T').map_or(s, |(day, _)| day);
        let parsed = NaiveDate::parse_from_str(day, DATE_FORMAT).ok();
        if parsed.is_none() {
            log::debug!("ignoring unparseable date {s:?}");
        }
        parsed
    }

    /// Leading-integer parse: optional sign then digits, rest ignored.
    /// `"12000원"` → 12000, `"abc"` → None.
    pub(super) fn parse_int_prefix(s: &str) -> Option<Amount> {
        let s = s.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return None;
        }
        let magnitude: Amount = digits[..end].parse().ok()?;
        Some(if negative { -magnitude } else { magnitude })
    }
}

/// Parse a `YYYY-MM-DD` date the way record decoding does.
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    lenient::parse_date(s)
}

#[cfg(test)]
mod tests {
    use super::lenient::parse_int_prefix;
    use super::*;

    #[test]
    fn int_prefix_matches_leading_integer_semantics() {
        assert_eq!(parse_int_prefix("150000"), Some(150_000));
        assert_eq!(parse_int_prefix("  -3000"), Some(-3000));
        assert_eq!(parse_int_prefix("12000원"), Some(12_000));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("원"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn refund_contribution_is_absolute() {
        let r = CustomerVisitRecord {
            payment_status: Some(PaymentStatus::Refunded),
            amount: Some(-50_000),
            ..Default::default()
        };
        assert_eq!(r.refund(), 50_000);
        assert_eq!(r.revenue(), 0);
        assert!(!r.counts_as_visit());
    }

    #[test]
    fn missing_amount_contributes_nothing() {
        let r = CustomerVisitRecord {
            payment_status: Some(PaymentStatus::Refunded),
            ..Default::default()
        };
        assert_eq!(r.refund(), 0);
        assert_eq!(CustomerVisitRecord::default().revenue(), 0);
    }

    #[test]
    fn sum_saturates_instead_of_overflowing() {
        assert_eq!(sum_amounts([Amount::MAX, 1]), Amount::MAX);
    }
}
