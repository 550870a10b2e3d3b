//! History persistence
//!
//! The history is a flat, append-only list of timestamped occupancy
//! snapshots. It is loaded whole, extended by one record and written back.

mod json;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

pub(crate) use json::JsonFileStore;

/// One occupancy snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Record {
    /// ISO-8601 with offset, e.g. "2024-01-01T10:00:00.123456+01:00"
    pub(crate) timestamp: String,
    /// Payload exactly as returned by the booking site
    pub(crate) data: Value,
}

impl Record {
    pub(crate) fn new(timestamp: impl Into<String>, data: Value) -> Self {
        Record {
            timestamp: timestamp.into(),
            data,
        }
    }
}

/// Records in fetch order
pub(crate) type History = Vec<Record>;

/// Backing storage for the history
pub(crate) trait Store {
    /// Read the full history; a store with nothing persisted yields an empty one
    fn load(&self) -> Result<History, StoreError>;

    /// Replace the persisted history with `history`
    fn save(&self, history: &History) -> Result<(), StoreError>;
}

/// Append one record and persist. Returns the new history length.
pub(crate) fn append_record<S: Store + ?Sized>(
    store: &S,
    record: Record,
) -> Result<usize, StoreError> {
    let mut history = store.load()?;
    history.push(record);
    store.save(&history)?;
    Ok(history.len())
}
