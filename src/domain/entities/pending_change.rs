use crate::domain::entities::JobRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        };
        write!(f, "{label}")
    }
}

/// One queued local mutation awaiting replay against the remote store.
///
/// Entries are appended by the record store and never mutated in place; for a
/// delete, `record` carries the record that was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    pub kind: ChangeKind,
    pub record: JobRecord,
    pub timestamp: DateTime<Utc>,
}

impl PendingChange {
    pub fn new(kind: ChangeKind, record: JobRecord) -> Self {
        Self {
            kind,
            record,
            timestamp: Utc::now(),
        }
    }
}
