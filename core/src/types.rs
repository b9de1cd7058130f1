//! Shared primitive types used across the reporting core.

/// Currency amount in the clinic's minor-less unit (KRW). Signed: refund
/// records may carry negative values.
pub type Amount = i64;

/// Backend document identifier for a customer-visit record.
pub type RecordId = String;

/// Number of records in a bucket.
pub type Count = u64;
