use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    pub id: String,
    pub name: String,
    pub modified_at: DateTime<Utc>,
    pub size: u64,
}

/// Whole-file blob storage inside the identity's private remote namespace.
#[async_trait]
pub trait BackupBlobStore: Send + Sync {
    /// Exact-name lookup; `None` when no blob with that name exists.
    async fn find_blob(&self, name: &str) -> Result<Option<BlobMetadata>, AppError>;
    async fn create_blob(&self, name: &str, content: &[u8]) -> Result<BlobMetadata, AppError>;
    async fn update_blob(&self, id: &str, content: &[u8]) -> Result<(), AppError>;
    async fn read_content(&self, id: &str) -> Result<Vec<u8>, AppError>;
    async fn read_metadata(&self, id: &str) -> Result<BlobMetadata, AppError>;
}
