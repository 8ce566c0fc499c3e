//! Client for the external letter record store.
//!
//! The store owns persistence, signature uploads, and PDF rendering; this
//! service only consumes its REST surface. Every operation is a single
//! request with an explicit timeout and no automatic retry: a failed action
//! stays failed until the user re-invokes it.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::letter::models::{Company, Letter, LetterPayload};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the letter store, loaded from the environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("STORE_BASE_URL")
            .map_err(|_| anyhow::anyhow!("STORE_BASE_URL must be set"))?;

        let timeout_secs = match std::env::var("STORE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("STORE_TIMEOUT_SECS must be a number of seconds"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found in store")]
    NotFound,
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("store responded with status {0}")]
    Status(StatusCode),
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Standard response mapping for handlers proxying a store operation:
    /// a missing record stays a 404, everything else is reported as an
    /// upstream failure with no local state touched.
    pub fn error_response(&self, not_found_message: &str) -> actix_web::HttpResponse {
        match self {
            StoreError::NotFound => actix_web::HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found(not_found_message)),
            _ => actix_web::HttpResponse::BadGateway()
                .json(crate::ErrorResponse::new("StoreUnavailable", &self.to_string())),
        }
    }
}

/// REST surface of the letter store consumed by this service.
#[async_trait]
pub trait LetterStore: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;
    async fn get_company(&self, id: Uuid) -> Result<Company, StoreError>;
    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError>;
    async fn get_letter(&self, id: Uuid) -> Result<Letter, StoreError>;
    async fn create_letter(&self, payload: &LetterPayload) -> Result<Letter, StoreError>;
    async fn update_letter(&self, id: Uuid, payload: &LetterPayload)
        -> Result<Letter, StoreError>;
    async fn delete_letter(&self, id: Uuid) -> Result<(), StoreError>;
    async fn download_pdf(&self, id: Uuid) -> Result<Vec<u8>, StoreError>;
    async fn upload_signature(
        &self,
        data: Vec<u8>,
        filename: String,
        content_type: String,
    ) -> Result<String, StoreError>;
}

#[derive(Debug, Deserialize)]
struct SignatureUploadResponse {
    signature: String,
}

/// reqwest-backed store client.
pub struct HttpLetterStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLetterStore {
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("surat-menyurat-gateway/0.3")
            .build()
            .expect("Failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(status: StatusCode) -> Result<(), StoreError> {
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        Err(StoreError::Status(status))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::check_status(response.status())?;
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LetterStore for HttpLetterStore {
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        self.get_json("/companies").await
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, StoreError> {
        self.get_json(&format!("/companies/{}", id)).await
    }

    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError> {
        self.get_json("/letters").await
    }

    async fn get_letter(&self, id: Uuid) -> Result<Letter, StoreError> {
        self.get_json(&format!("/letters/{}", id)).await
    }

    async fn create_letter(&self, payload: &LetterPayload) -> Result<Letter, StoreError> {
        let response = self
            .client
            .post(self.url("/letters"))
            .json(payload)
            .send()
            .await?;
        Self::check_status(response.status())?;
        response
            .json::<Letter>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update_letter(
        &self,
        id: Uuid,
        payload: &LetterPayload,
    ) -> Result<Letter, StoreError> {
        let response = self
            .client
            .put(self.url(&format!("/letters/{}", id)))
            .json(payload)
            .send()
            .await?;
        Self::check_status(response.status())?;
        response
            .json::<Letter>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete_letter(&self, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.url(&format!("/letters/{}", id)))
            .send()
            .await?;
        Self::check_status(response.status())
    }

    async fn download_pdf(&self, id: Uuid) -> Result<Vec<u8>, StoreError> {
        let response = self
            .client
            .get(self.url(&format!("/letters/{}/pdf", id)))
            .send()
            .await?;
        Self::check_status(response.status())?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn upload_signature(
        &self,
        data: Vec<u8>,
        filename: String,
        content_type: String,
    ) -> Result<String, StoreError> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str(&content_type)
            .map_err(|e| StoreError::Decode(format!("invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload-signature"))
            .multipart(form)
            .send()
            .await?;
        Self::check_status(response.status())?;
        let body = response
            .json::<SignatureUploadResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(body.signature)
    }
}
