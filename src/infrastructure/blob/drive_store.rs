use crate::application::ports::{BackupBlobStore, BlobMetadata, IdentityProvider};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MIME_TYPE: &str = "application/json";
const FILE_FIELDS: &str = "id,name,modifiedTime,size";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    modified_time: Option<DateTime<Utc>>,
    /// Drive reports sizes as decimal strings.
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

impl DriveFile {
    fn into_metadata(self) -> BlobMetadata {
        BlobMetadata {
            id: self.id,
            name: self.name,
            modified_at: self.modified_time.unwrap_or_else(Utc::now),
            size: self
                .size
                .and_then(|size| size.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Blob storage in the Drive v3 application-data folder: a remote namespace
/// private to this app and the authenticated user.
pub struct DriveBlobStore {
    client: Client,
    identity: Arc<dyn IdentityProvider>,
    files_url: String,
    upload_url: String,
}

impl DriveBlobStore {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Result<Self, AppError> {
        Self::with_base_url(identity, "https://www.googleapis.com")
    }

    /// Base-url override for tests against a stub server.
    pub fn with_base_url(
        identity: Arc<dyn IdentityProvider>,
        base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let base_url: String = base_url.into();
        let base = base_url.trim_end_matches('/');
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            identity,
            files_url: format!("{base}/drive/v3/files"),
            upload_url: format!("{base}/upload/drive/v3/files"),
        })
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
                format!("Blob store rejected credentials: {body}"),
            )),
            _ => Err(AppError::Remote(format!(
                "Blob store returned {status}: {body}"
            ))),
        }
    }

    fn upload_form(metadata: serde_json::Value, content: &[u8]) -> Result<Form, AppError> {
        let metadata_part = Part::text(metadata.to_string())
            .mime_str(MIME_TYPE)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        let file_part = Part::bytes(content.to_vec())
            .mime_str(MIME_TYPE)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        Ok(Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part))
    }
}

#[async_trait]
impl BackupBlobStore for DriveBlobStore {
    async fn find_blob(&self, name: &str) -> Result<Option<BlobMetadata>, AppError> {
        let query = format!("name='{name}' and 'appDataFolder' in parents");
        let fields = format!("files({FILE_FIELDS})");
        let request = self
            .authorized(Method::GET, self.files_url.clone())
            .await?
            .query(&[
                ("q", query.as_str()),
                ("spaces", "appDataFolder"),
                ("fields", fields.as_str()),
            ]);
        let response = self.check(request.send().await?).await?;
        let listing: DriveFileList = response.json().await?;
        Ok(listing.files.into_iter().next().map(DriveFile::into_metadata))
    }

    async fn create_blob(&self, name: &str, content: &[u8]) -> Result<BlobMetadata, AppError> {
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": MIME_TYPE,
            "parents": ["appDataFolder"],
        });
        let url = format!(
            "{}?uploadType=multipart&fields={FILE_FIELDS}",
            self.upload_url
        );
        let request = self
            .authorized(Method::POST, url)
            .await?
            .multipart(Self::upload_form(metadata, content)?);
        let response = self.check(request.send().await?).await?;
        let file: DriveFile = response.json().await?;
        Ok(file.into_metadata())
    }

    async fn update_blob(&self, id: &str, content: &[u8]) -> Result<(), AppError> {
        let metadata = serde_json::json!({ "mimeType": MIME_TYPE });
        let url = format!("{}/{id}?uploadType=multipart", self.upload_url);
        let request = self
            .authorized(Method::PATCH, url)
            .await?
            .multipart(Self::upload_form(metadata, content)?);
        self.check(request.send().await?).await?;
        Ok(())
    }

    async fn read_content(&self, id: &str) -> Result<Vec<u8>, AppError> {
        let url = format!("{}/{id}?alt=media", self.files_url);
        let request = self.authorized(Method::GET, url).await?;
        let response = self.check(request.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn read_metadata(&self, id: &str) -> Result<BlobMetadata, AppError> {
        let url = format!("{}/{id}?fields={FILE_FIELDS}", self.files_url);
        let request = self.authorized(Method::GET, url).await?;
        let response = self.check(request.send().await?).await?;
        let file: DriveFile = response.json().await?;
        Ok(file.into_metadata())
    }
}
