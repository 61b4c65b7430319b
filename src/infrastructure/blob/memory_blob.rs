use crate::application::ports::{BackupBlobStore, BlobMetadata};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

struct StoredBlob {
    metadata: BlobMetadata,
    content: Vec<u8>,
}

/// In-memory blob namespace for tests.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, StoredBlob>>,
    next_id: AtomicU64,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BackupBlobStore for InMemoryBlobStore {
    async fn find_blob(&self, name: &str) -> Result<Option<BlobMetadata>, AppError> {
        Ok(self
            .blobs
            .read()
            .await
            .values()
            .find(|blob| blob.metadata.name == name)
            .map(|blob| blob.metadata.clone()))
    }

    async fn create_blob(&self, name: &str, content: &[u8]) -> Result<BlobMetadata, AppError> {
        let id = format!("blob-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let metadata = BlobMetadata {
            id: id.clone(),
            name: name.to_string(),
            modified_at: Utc::now(),
            size: content.len() as u64,
        };
        self.blobs.write().await.insert(
            id,
            StoredBlob {
                metadata: metadata.clone(),
                content: content.to_vec(),
            },
        );
        Ok(metadata)
    }

    async fn update_blob(&self, id: &str, content: &[u8]) -> Result<(), AppError> {
        let mut blobs = self.blobs.write().await;
        let blob = blobs
            .get_mut(id)
            .ok_or_else(|| AppError::Remote(format!("No blob with id {id}")))?;
        blob.content = content.to_vec();
        blob.metadata.size = content.len() as u64;
        blob.metadata.modified_at = Utc::now();
        Ok(())
    }

    async fn read_content(&self, id: &str) -> Result<Vec<u8>, AppError> {
        self.blobs
            .read()
            .await
            .get(id)
            .map(|blob| blob.content.clone())
            .ok_or_else(|| AppError::Remote(format!("No blob with id {id}")))
    }

    async fn read_metadata(&self, id: &str) -> Result<BlobMetadata, AppError> {
        self.blobs
            .read()
            .await
            .get(id)
            .map(|blob| blob.metadata.clone())
            .ok_or_else(|| AppError::Remote(format!("No blob with id {id}")))
    }
}
