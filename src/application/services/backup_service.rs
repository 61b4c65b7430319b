use crate::application::ports::{BackupBlobStore, IdentityProvider};
use crate::domain::entities::{
    BackupInfo, BackupMetadata, BackupPayload, BackupSnapshot, BACKUP_SCHEMA_VERSION,
};
use crate::shared::error::AppError;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Fixed blob name: exactly one backup per identity, overwritten in place.
pub const BACKUP_FILENAME: &str = "jobflow_backup.json";

/// User-initiated backup and restore against the identity's private blob
/// namespace. Unlike background sync, every failure here is surfaced to the
/// caller as a typed error.
pub struct BackupService {
    blobs: Arc<dyn BackupBlobStore>,
    identity: Arc<dyn IdentityProvider>,
    origin_device: String,
    app_version: String,
}

/// Header shape for [`BackupService::backup_info`]: deserializes snapshot
/// metadata only, leaving the business payload untouched.
#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    metadata: BackupMetadata,
}

impl BackupService {
    pub fn new(
        blobs: Arc<dyn BackupBlobStore>,
        identity: Arc<dyn IdentityProvider>,
        origin_device: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            blobs,
            identity,
            origin_device: origin_device.into(),
            app_version: app_version.into(),
        }
    }

    /// Serializes the payload into a versioned snapshot and creates or
    /// overwrites the identity's single backup blob.
    pub async fn create_backup(&self, payload: BackupPayload) -> Result<(), AppError> {
        self.require_identity().await?;

        let snapshot = BackupSnapshot {
            metadata: BackupMetadata {
                schema_version: BACKUP_SCHEMA_VERSION.to_string(),
                created_at: Utc::now(),
                origin_device: self.origin_device.clone(),
                app_version: self.app_version.clone(),
            },
            payload,
        };
        let content = serde_json::to_vec(&snapshot)?;

        match self.blobs.find_blob(BACKUP_FILENAME).await? {
            Some(existing) => self.blobs.update_blob(&existing.id, &content).await?,
            None => {
                self.blobs.create_blob(BACKUP_FILENAME, &content).await?;
            }
        }

        info!(
            records = snapshot.payload.jobs.len(),
            size = content.len(),
            "Backup uploaded"
        );
        Ok(())
    }

    /// Downloads the snapshot, or `None` when no backup exists. The caller
    /// merges the result (see `RecordStore::merge_records`); local records
    /// always win over restored ones sharing the same id.
    pub async fn restore_backup(&self) -> Result<Option<BackupSnapshot>, AppError> {
        self.require_identity().await?;

        let Some(blob) = self.blobs.find_blob(BACKUP_FILENAME).await? else {
            return Ok(None);
        };
        let content = self.blobs.read_content(&blob.id).await?;

        let value: serde_json::Value = serde_json::from_slice(&content)
            .map_err(|err| AppError::InvalidBackup(format!("Not valid JSON: {err}")))?;
        match value
            .get("metadata")
            .and_then(|metadata| metadata.get("schema_version"))
            .and_then(|version| version.as_str())
        {
            Some(BACKUP_SCHEMA_VERSION) => {}
            Some(other) => {
                return Err(AppError::InvalidBackup(format!(
                    "Unrecognized schema version: {other}"
                )));
            }
            None => {
                return Err(AppError::InvalidBackup(
                    "Snapshot has no schema version".to_string(),
                ));
            }
        }

        let snapshot: BackupSnapshot = serde_json::from_value(value)
            .map_err(|err| AppError::InvalidBackup(err.to_string()))?;
        Ok(Some(snapshot))
    }

    /// Metadata-only lookup: blob modified time and size, plus the snapshot
    /// header. The record payload is never deserialized.
    pub async fn backup_info(&self) -> Result<Option<BackupInfo>, AppError> {
        self.require_identity().await?;

        let Some(blob) = self.blobs.find_blob(BACKUP_FILENAME).await? else {
            return Ok(None);
        };
        let metadata = self.blobs.read_metadata(&blob.id).await?;
        let content = self.blobs.read_content(&blob.id).await?;
        let header: SnapshotHeader = serde_json::from_slice(&content)
            .map_err(|err| AppError::InvalidBackup(err.to_string()))?;

        Ok(Some(BackupInfo {
            last_updated: metadata.modified_at,
            size: metadata.size,
            device: header.metadata.origin_device,
            app_version: header.metadata.app_version,
        }))
    }

    async fn require_identity(&self) -> Result<(), AppError> {
        match self.identity.current().await? {
            Some(_) => Ok(()),
            None => Err(AppError::Unauthorized("Not authenticated".to_string())),
        }
    }
}
