#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use jobflow_core::application::ports::{
    Identity, IdentityProvider, KeyValueStore, RemoteJobStore,
};
use jobflow_core::domain::entities::{JobDraft, JobRecord};
use jobflow_core::domain::value_objects::{JobId, JobStatus};
use jobflow_core::infrastructure::storage::InMemoryKeyValueStore;
use jobflow_core::shared::error::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

pub fn draft(company: &str) -> JobDraft {
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
}

pub fn record(company: &str) -> JobRecord {
    draft(company).into_record(JobId::generate())
}

/// Identity provider returning a fixed answer.
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn signed_in() -> Self {
        Self {
            identity: Some(Identity {
                user_id: "user-1".into(),
                access_token: "test-token".into(),
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current(&self) -> Result<Option<Identity>, AppError> {
        Ok(self.identity.clone())
    }
}

/// Remote store with failure injection and an op log: fails the Nth mutating
/// call when told to, and records every applied mutation so tests can assert
/// nothing is replayed twice.
#[derive(Default)]
pub struct ScriptedJobStore {
    records: RwLock<Vec<JobRecord>>,
    ops: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail_on_call: Mutex<Option<usize>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<JobRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Makes the `n`th mutating call (1-based, counted across the store's
    /// lifetime) fail with a remote error.
    pub async fn fail_on_call(&self, n: usize) {
        *self.fail_on_call.lock().await = Some(n);
    }

    pub async fn clear_failure(&self) {
        *self.fail_on_call.lock().await = None;
    }

    /// Adds latency to every call, to hold a sync pass open.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.lock().await = Some(delay);
    }

    pub async fn ops(&self) -> Vec<String> {
        self.ops.lock().await.clone()
    }

    async fn gate(&self) -> Result<(), AppError> {
        if let Some(delay) = *self.delay.lock().await {
            tokio::time::sleep(delay).await;
        }
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_on_call.lock().await == Some(call) {
            return Err(AppError::Remote(format!("Injected failure on call {call}")));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteJobStore for ScriptedJobStore {
    async fn insert_record(&self, record: &JobRecord) -> Result<(), AppError> {
        self.gate().await?;
        let mut records = self.records.write().await;
        // Upsert-shaped like the real adapter, so a replayed create after a
        // failed drain commit lands on the same row.
        if let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }
        self.ops.lock().await.push(format!("create:{}", record.id));
        Ok(())
    }

    async fn update_record(&self, record: &JobRecord) -> Result<(), AppError> {
        self.gate().await?;
        let mut records = self.records.write().await;
        if let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) {
            *existing = record.clone();
        }
        self.ops.lock().await.push(format!("update:{}", record.id));
        Ok(())
    }

    async fn delete_record(&self, id: &JobId) -> Result<(), AppError> {
        self.gate().await?;
        self.records
            .write()
            .await
            .retain(|existing| &existing.id != id);
        self.ops.lock().await.push(format!("delete:{id}"));
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<JobRecord>, AppError> {
        if let Some(delay) = *self.delay.lock().await {
            tokio::time::sleep(delay).await;
        }
        Ok(self.records.read().await.clone())
    }
}

/// Key-value store whose writes can be switched to fail, either wholesale or
/// for a single key, for exercising the write-then-confirm contract.
#[derive(Default)]
pub struct FailingKeyValueStore {
    inner: InMemoryKeyValueStore,
    fail_writes: AtomicBool,
    fail_key: Mutex<Option<String>>,
}

impl FailingKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fails writes to one key only; other keys keep succeeding.
    pub async fn fail_key(&self, key: Option<&str>) {
        *self.fail_key.lock().await = key.map(str::to_string);
    }
}

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst)
            || self.fail_key.lock().await.as_deref() == Some(key)
        {
            return Err(AppError::Storage("Injected write failure".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Injected write failure".to_string()));
        }
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Injected write failure".to_string()));
        }
        self.inner.remove_many(keys).await
    }
}
