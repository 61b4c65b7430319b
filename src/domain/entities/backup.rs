use crate::domain::entities::JobRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written into every snapshot; restore rejects anything else.
pub const BACKUP_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub schema_version: String,
    pub created_at: DateTime<Utc>,
    pub origin_device: String,
    pub app_version: String,
}

/// The local state gathered by the caller for backup: the record collection
/// plus the last-sync marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BackupPayload {
    pub jobs: Vec<JobRecord>,
    pub last_sync: Option<DateTime<Utc>>,
}

/// One full versioned snapshot as stored in the remote blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub metadata: BackupMetadata,
    pub payload: BackupPayload,
}

/// Cheap summary of the remote backup, answered without deserializing the
/// business payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupInfo {
    pub last_updated: DateTime<Utc>,
    pub size: u64,
    pub device: String,
    pub app_version: String,
}
