use crate::domain::entities::JobRecord;
use crate::domain::value_objects::JobId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// The per-identity remote record endpoint, reduced to the four verbs the
/// sync engine needs. Adapters own the wire representation; this trait speaks
/// domain records only.
#[async_trait]
pub trait RemoteJobStore: Send + Sync {
    async fn insert_record(&self, record: &JobRecord) -> Result<(), AppError>;
    async fn update_record(&self, record: &JobRecord) -> Result<(), AppError>;
    async fn delete_record(&self, id: &JobId) -> Result<(), AppError>;
    /// Full canonical collection, ordered by creation.
    async fn list_records(&self) -> Result<Vec<JobRecord>, AppError>;
}
