use crate::application::ports::{IdentityProvider, RemoteJobStore};
use crate::application::services::RecordStore;
use crate::domain::entities::{ChangeKind, PendingChange};
use crate::shared::error::AppError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What a reconciliation pass did. Sync is best-effort: failures are reported
/// through this value and the log, never as an error to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed { drained: usize },
    SkippedOffline,
    AlreadyRunning,
    Failed,
}

/// Cancelable periodic schedule returned by [`SyncService::start_periodic`].
/// Dropping the handle stops the loop.
pub struct SyncScheduleHandle {
    task: JoinHandle<()>,
    scheduled: Arc<AtomicBool>,
}

impl SyncScheduleHandle {
    pub fn stop(self) {}
}

impl Drop for SyncScheduleHandle {
    fn drop(&mut self) {
        self.task.abort();
        self.scheduled.store(false, Ordering::SeqCst);
    }
}

/// Reconciles local state with the remote record store: drains the pending
/// change log in append order, then pulls the canonical collection.
///
/// Last-pull-wins by design; this is a single-user offline-tolerant tracker,
/// not a multi-writer system.
pub struct SyncService {
    records: Arc<RecordStore>,
    remote: Arc<dyn RemoteJobStore>,
    identity: Arc<dyn IdentityProvider>,
    in_flight: Arc<Mutex<()>>,
    scheduled: Arc<AtomicBool>,
}

impl SyncService {
    pub fn new(
        records: Arc<RecordStore>,
        remote: Arc<dyn RemoteJobStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            records,
            remote,
            identity,
            in_flight: Arc::new(Mutex::new(())),
            scheduled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// One reconciliation pass. Concurrent calls collapse: while a pass is in
    /// flight, further calls return [`SyncOutcome::AlreadyRunning`] without
    /// touching the queue, so the log can never be drained twice at once.
    pub async fn sync_now(&self) -> SyncOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("Sync pass already in flight, skipping");
            return SyncOutcome::AlreadyRunning;
        };

        match self.run_pass().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Sync pass failed");
                SyncOutcome::Failed
            }
        }
    }

    async fn run_pass(&self) -> Result<SyncOutcome, AppError> {
        match self.identity.current().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("No authenticated identity, skipping sync");
                return Ok(SyncOutcome::SkippedOffline);
            }
            Err(err) => {
                debug!(error = %err, "Identity unavailable, skipping sync");
                return Ok(SyncOutcome::SkippedOffline);
            }
        }

        let pending = self.records.pending_changes().await;
        let total = pending.len();
        let mut applied = 0;

        for change in &pending {
            if let Err(err) = self.replay(change).await {
                // Entries already applied stay drained; the rest wait for
                // the next attempt.
                warn!(
                    error = %err,
                    applied,
                    remaining = total - applied,
                    "Drain aborted, keeping unapplied changes queued"
                );
                self.records.commit_drained(applied).await?;
                return Ok(SyncOutcome::Failed);
            }
            applied += 1;
        }
        self.records.commit_drained(applied).await?;

        let canonical = self.remote.list_records().await?;
        self.records.replace_all(canonical).await?;
        self.records.set_last_sync(Utc::now()).await?;

        info!(drained = applied, "Sync pass completed");
        Ok(SyncOutcome::Completed { drained: applied })
    }

    async fn replay(&self, change: &PendingChange) -> Result<(), AppError> {
        match change.kind {
            ChangeKind::Create => self.remote.insert_record(&change.record).await,
            ChangeKind::Update => self.remote.update_record(&change.record).await,
            ChangeKind::Delete => self.remote.delete_record(&change.record.id).await,
        }
    }

    /// Starts a repeating timer driving [`sync_now`](Self::sync_now). At most
    /// one schedule per service; stop (or drop) the returned handle before
    /// starting another.
    pub fn start_periodic(&self, interval: Duration) -> Result<SyncScheduleHandle, AppError> {
        if self.scheduled.swap(true, Ordering::SeqCst) {
            return Err(AppError::Validation(
                "Periodic sync is already scheduled".to_string(),
            ));
        }

        let service = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately; skip it
            // so the first pass happens one interval after scheduling.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let outcome = service.sync_now().await;
                debug!(?outcome, "Periodic sync pass");
            }
        });

        Ok(SyncScheduleHandle {
            task,
            scheduled: self.scheduled.clone(),
        })
    }
}

impl Clone for SyncService {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            remote: self.remote.clone(),
            identity: self.identity.clone(),
            in_flight: self.in_flight.clone(),
            scheduled: self.scheduled.clone(),
        }
    }
}
