use crate::application::ports::RemoteJobStore;
use crate::domain::entities::JobRecord;
use crate::domain::value_objects::JobId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Insertion-ordered in-memory remote store. Reference semantics for the
/// port: insert is upsert-shaped on the id (a replayed create replaces the
/// existing row), updates and deletes of missing rows are silent no-ops
/// (mirroring filtered PATCH/DELETE against a REST store).
#[derive(Default)]
pub struct InMemoryJobStore {
    records: RwLock<Vec<JobRecord>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<JobRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RemoteJobStore for InMemoryJobStore {
    async fn insert_record(&self, record: &JobRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }
        Ok(())
    }

    async fn update_record(&self, record: &JobRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) {
            *existing = record.clone();
        }
        Ok(())
    }

    async fn delete_record(&self, id: &JobId) -> Result<(), AppError> {
        self.records
            .write()
            .await
            .retain(|existing| &existing.id != id);
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<JobRecord>, AppError> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::JobDraft;
    use crate::domain::value_objects::JobStatus;
    use chrono::NaiveDate;

    fn record(company: &str) -> JobRecord {
        JobDraft {
            company: company.into(),
            role: "Engineer".into(),
            location: "Remote".into(),
            salary: None,
            url: None,
            notes: None,
            contact_person: None,
            contact_email: None,
            date_applied: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            follow_up_date: None,
            status: JobStatus::Applied,
            tags: None,
        }
        .into_record(JobId::generate())
    }

    #[tokio::test]
    async fn replayed_insert_replaces_instead_of_conflicting() {
        let store = InMemoryJobStore::new();
        let mut job = record("Acme");
        store.insert_record(&job).await.unwrap();

        job.status = JobStatus::Interviewing;
        store.insert_record(&job).await.unwrap();

        let records = store.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, JobStatus::Interviewing);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows_are_noops() {
        let store = InMemoryJobStore::new();
        store.update_record(&record("Ghost")).await.unwrap();
        store.delete_record(&JobId::generate()).await.unwrap();
        assert!(store.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryJobStore::new();
        let first = record("First");
        let second = record("Second");
        store.insert_record(&first).await.unwrap();
        store.insert_record(&second).await.unwrap();
        assert_eq!(store.list_records().await.unwrap(), vec![first, second]);
    }
}
