use crate::application::ports::{IdentityProvider, RemoteJobStore};
use crate::domain::entities::JobRecord;
use crate::domain::value_objects::JobId;
use crate::infrastructure::remote::mappers::{record_from_row, row_from_record};
use crate::infrastructure::remote::rows::RemoteJobRow;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const TABLE: &str = "jobs";

/// PostgREST-style adapter for the remote record store. Row-level security
/// on the remote side scopes every call to the authenticated identity.
pub struct HttpJobStore {
    client: Client,
    base_url: String,
    api_key: String,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpJobStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppError> {
        let base_url: String = base_url.into();
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            identity,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    async fn authorized(&self, method: Method, url: String) -> Result<RequestBuilder, AppError> {
        let identity = self
            .identity
            .current()
            .await?
            .ok_or_else(|| AppError::Unauthorized("No access token available".to_string()))?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(identity.access_token))
    }

    async fn check(&self, response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                format!("Remote store rejected credentials: {body}"),
            )),
            _ => Err(AppError::Remote(format!(
                "Remote store returned {status}: {body}"
            ))),
        }
    }
}

#[async_trait]
impl RemoteJobStore for HttpJobStore {
    async fn insert_record(&self, record: &JobRecord) -> Result<(), AppError> {
        let row = row_from_record(record);
        // merge-duplicates makes the insert an upsert on the primary key, so
        // replaying an already-applied create is safe.
        let request = self
            .authorized(Method::POST, self.table_url())
            .await?
            .header("Prefer", "return=minimal, resolution=merge-duplicates")
            .json(&row);
        self.check(request.send().await?).await?;
        Ok(())
    }

    async fn update_record(&self, record: &JobRecord) -> Result<(), AppError> {
        let row = row_from_record(record);
        let url = format!("{}?id=eq.{}", self.table_url(), record.id);
        let request = self
            .authorized(Method::PATCH, url)
            .await?
            .header("Prefer", "return=minimal")
            .json(&row);
        self.check(request.send().await?).await?;
        Ok(())
    }

    async fn delete_record(&self, id: &JobId) -> Result<(), AppError> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);
        let request = self.authorized(Method::DELETE, url).await?;
        self.check(request.send().await?).await?;
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<JobRecord>, AppError> {
        let url = format!("{}?select=*&order=created_at.asc", self.table_url());
        let request = self.authorized(Method::GET, url).await?;
        let response = self.check(request.send().await?).await?;
        let rows: Vec<RemoteJobRow> = response.json().await?;
        rows.into_iter().map(record_from_row).collect()
    }
}
