use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable local persistence: string keys to serialized payloads.
///
/// The record store is the only caller; a failed write must surface as an
/// error rather than losing state silently.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
    async fn remove_many(&self, keys: &[&str]) -> Result<(), AppError>;
}
