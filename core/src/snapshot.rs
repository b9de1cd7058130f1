//! Record snapshots: the record collection as exported from the backend.
//!
//! A snapshot file is either a bare JSON array of records or an object
//! `{ "exportedAt": "...", "records": [...] }`. The engine only ever sees
//! the decoded `Vec<CustomerVisitRecord>`; a newer snapshot simply replaces
//! an older one.

use crate::{
    error::{ClinicError, ClinicResult},
    record::CustomerVisitRecord,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub records: Vec<CustomerVisitRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Bare(Vec<CustomerVisitRecord>),
    Wrapped(RecordSnapshot),
}

impl RecordSnapshot {
    pub fn new(records: Vec<CustomerVisitRecord>) -> Self {
        Self { exported_at: None, records }
    }

    /// Decode either accepted snapshot shape.
    pub fn from_json(json: &str) -> ClinicResult<Self> {
        Ok(match serde_json::from_str::<SnapshotFile>(json)? {
            SnapshotFile::Bare(records) => Self::new(records),
            SnapshotFile::Wrapped(snapshot) => snapshot,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> ClinicResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ClinicError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        log::info!(
            "Loaded {} records from {}",
            snapshot.records.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn to_json(&self) -> ClinicResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
