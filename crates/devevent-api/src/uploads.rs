// Image host client
//
// The event create flow receives the cover image as a multipart file
// part, pushes the bytes to the external image host, and substitutes the
// returned URL into the event's `image` field before validation. Upload
// failures are not retried; they fail the whole request.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ImageStoreConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image host rejected upload with status {0}")]
    Rejected(u16),
    #[error("image host response carried no url")]
    MissingUrl,
}

/// Receives a binary blob, returns a public URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, UploadError>;
}

/// Production store: multipart POST to the configured upload endpoint,
/// URL read from the JSON response (`secure_url`, falling back to `url`).
pub struct HttpImageStore {
    client: reqwest::Client,
    config: ImageStoreConfig,
}

impl HttpImageStore {
    pub fn new(config: ImageStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, UploadError> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", "devevent");
        if let Some(preset) = &self.config.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(UploadError::MissingUrl)
    }
}
