use crate::application::ports::KeyValueStore;
use crate::domain::entities::{BackupPayload, ChangeKind, JobDraft, JobRecord, PendingChange};
use crate::domain::value_objects::JobId;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub const JOBS_KEY: &str = "jobtracker_jobs";
pub const PENDING_CHANGES_KEY: &str = "jobtracker_pending_changes";
pub const LAST_SYNC_KEY: &str = "jobtracker_last_sync";

#[derive(Debug, Default, Clone)]
struct LocalState {
    jobs: Vec<JobRecord>,
    pending: Vec<PendingChange>,
    last_sync: Option<DateTime<Utc>>,
}

/// Owner of the on-device record collection, the pending-change log and the
/// last-sync marker.
///
/// Every mutation is write-then-confirm: the new state is persisted through
/// the key-value port before the in-memory view is swapped, so a `Storage`
/// error leaves the observable collection unchanged. The pending log is
/// persisted before the collection and exposed to the sync engine only as an
/// append/drain interface.
pub struct RecordStore {
    kv: Arc<dyn KeyValueStore>,
    state: RwLock<LocalState>,
}

impl RecordStore {
    /// Loads persisted state; absent keys start empty, corrupt payloads fail.
    pub async fn load(kv: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let jobs = match kv.get(JOBS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let pending = match kv.get(PENDING_CHANGES_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let last_sync = match kv.get(LAST_SYNC_KEY).await? {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|err| AppError::Serialization(err.to_string()))?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        debug!(
            jobs = jobs.len(),
            pending = pending.len(),
            "Record store loaded"
        );

        Ok(Self {
            kv,
            state: RwLock::new(LocalState {
                jobs,
                pending,
                last_sync,
            }),
        })
    }

    pub async fn list_records(&self) -> Vec<JobRecord> {
        self.state.read().await.jobs.clone()
    }

    pub async fn create_record(&self, draft: JobDraft) -> Result<JobRecord, AppError> {
        draft.validate()?;

        let mut state = self.state.write().await;
        let record = draft.into_record(JobId::generate());

        let mut jobs = state.jobs.clone();
        jobs.push(record.clone());
        let mut pending = state.pending.clone();
        pending.push(PendingChange::new(ChangeKind::Create, record.clone()));

        // The log goes down first: a failure between the two writes must
        // never leave a durable record that no queued change will replay.
        self.persist_pending(&pending).await?;
        self.persist_jobs(&jobs).await?;
        state.jobs = jobs;
        state.pending = pending;

        debug!(id = %record.id, "Record created");
        Ok(record)
    }

    pub async fn update_record(&self, record: JobRecord) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let Some(index) = state.jobs.iter().position(|job| job.id == record.id) else {
            return Err(AppError::NotFound(format!("No record with id {}", record.id)));
        };

        let mut jobs = state.jobs.clone();
        jobs[index] = record.clone();
        let mut pending = state.pending.clone();
        pending.push(PendingChange::new(ChangeKind::Update, record));

        self.persist_pending(&pending).await?;
        self.persist_jobs(&jobs).await?;
        state.jobs = jobs;
        state.pending = pending;
        Ok(())
    }

    /// Idempotent: deleting an absent id succeeds without queueing anything.
    pub async fn delete_record(&self, id: &JobId) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let Some(index) = state.jobs.iter().position(|job| &job.id == id) else {
            return Ok(());
        };

        let mut jobs = state.jobs.clone();
        let removed = jobs.remove(index);
        let mut pending = state.pending.clone();
        pending.push(PendingChange::new(ChangeKind::Delete, removed));

        self.persist_pending(&pending).await?;
        self.persist_jobs(&jobs).await?;
        state.jobs = jobs;
        state.pending = pending;
        Ok(())
    }

    /// Full local reset: records, pending log and sync marker. Irreversible.
    pub async fn clear_all(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        self.kv
            .remove_many(&[JOBS_KEY, PENDING_CHANGES_KEY, LAST_SYNC_KEY])
            .await?;
        *state = LocalState::default();
        Ok(())
    }

    /// Queued changes in append order.
    pub async fn pending_changes(&self) -> Vec<PendingChange> {
        self.state.read().await.pending.clone()
    }

    /// Removes the first `count` entries after they were applied remotely.
    /// A partially failed drain commits only its applied prefix.
    pub async fn commit_drained(&self, count: usize) -> Result<(), AppError> {
        if count == 0 {
            return Ok(());
        }
        let mut state = self.state.write().await;
        let pending: Vec<PendingChange> = state.pending.iter().skip(count).cloned().collect();
        self.persist_pending(&pending).await?;
        state.pending = pending;
        Ok(())
    }

    /// Overwrites the local collection with the remote canonical state.
    pub async fn replace_all(&self, records: Vec<JobRecord>) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        self.persist_jobs(&records).await?;
        state.jobs = records;
        Ok(())
    }

    /// Merges restored records, keeping the local copy wherever an id already
    /// exists; only genuinely new ids are inserted. Returns how many were
    /// added. Merged records are not queued as pending changes: they came
    /// from the user's own backup and the next pull reconciles them.
    pub async fn merge_records(&self, restored: Vec<JobRecord>) -> Result<usize, AppError> {
        let mut state = self.state.write().await;
        let mut jobs = state.jobs.clone();
        let mut added = 0;
        for record in restored {
            if !jobs.iter().any(|job| job.id == record.id) {
                jobs.push(record);
                added += 1;
            }
        }
        if added > 0 {
            self.persist_jobs(&jobs).await?;
            state.jobs = jobs;
        }
        debug!(added, "Restored records merged");
        Ok(added)
    }

    pub async fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_sync
    }

    pub async fn set_last_sync(&self, at: DateTime<Utc>) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        self.kv.set(LAST_SYNC_KEY, &at.to_rfc3339()).await?;
        state.last_sync = Some(at);
        Ok(())
    }

    /// Gathers the backup seam: the full collection plus the sync marker.
    pub async fn snapshot_payload(&self) -> BackupPayload {
        let state = self.state.read().await;
        BackupPayload {
            jobs: state.jobs.clone(),
            last_sync: state.last_sync,
        }
    }

    async fn persist_jobs(&self, jobs: &[JobRecord]) -> Result<(), AppError> {
        let raw = serde_json::to_string(jobs)?;
        self.kv.set(JOBS_KEY, &raw).await
    }

    async fn persist_pending(&self, pending: &[PendingChange]) -> Result<(), AppError> {
        let raw = serde_json::to_string(pending)?;
        self.kv.set(PENDING_CHANGES_KEY, &raw).await
    }
}
