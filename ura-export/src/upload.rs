//! Upload collaborator for share mode.
//!
//! The exporter hands the zip archive to an [`Uploader`] and gets back a
//! public URL. [`HttpUploader`] (feature `upload`) posts the archive as a
//! multipart form to a file host that answers with the URL as plain text.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::UploadError;

/// An archive ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    /// File name presented to the host, e.g. `my-project.zip`.
    pub file_name: String,
    /// MIME type of the archive.
    pub content_type: String,
    /// Archive bytes.
    pub data: Vec<u8>,
}

impl UploadPayload {
    /// Create a payload.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Archive bytes as standard base64.
    #[must_use]
    pub fn data_base64(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// Archive as a `data:` URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data_base64())
    }
}

/// Publishes an archive and returns its public URL.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload the payload.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] if the host cannot be reached or does not
    /// answer with a URL.
    async fn upload(&self, payload: UploadPayload) -> Result<String, UploadError>;
}

#[cfg(feature = "upload")]
pub use http::{HttpUploader, RetryConfig, DEFAULT_UPLOAD_URL};

#[cfg(feature = "upload")]
mod http {
    use async_trait::async_trait;
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;
    use tracing::warn;
    use url::Url;

    use super::{UploadPayload, Uploader};
    use crate::error::UploadError;

    /// Default file host endpoint.
    pub const DEFAULT_UPLOAD_URL: &str = "https://catbox.moe/user/api.php";

    const MAX_BODY_IN_ERROR: usize = 200;

    /// Retry with exponential backoff.
    #[derive(Debug, Clone)]
    pub struct RetryConfig {
        /// Maximum number of attempts, including the first.
        pub max_attempts: u32,
        /// Delay before the first retry in milliseconds.
        pub initial_delay_ms: u64,
        /// Upper bound on any delay in milliseconds.
        pub max_delay_ms: u64,
    }

    impl Default for RetryConfig {
        fn default() -> Self {
            Self {
                max_attempts: 3,
                initial_delay_ms: 250,
                max_delay_ms: 4_000,
            }
        }
    }

    impl RetryConfig {
        /// No retries.
        #[must_use]
        pub const fn none() -> Self {
            Self {
                max_attempts: 1,
                initial_delay_ms: 0,
                max_delay_ms: 0,
            }
        }

        /// Delay before retrying after the given attempt (0-indexed).
        #[must_use]
        pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
            self.initial_delay_ms
                .saturating_mul(1_u64 << attempt.min(16))
                .min(self.max_delay_ms)
        }
    }

    /// Uploads archives to a multipart file host.
    #[derive(Debug, Clone)]
    pub struct HttpUploader {
        http: Client,
        endpoint: Url,
        retry: RetryConfig,
    }

    impl HttpUploader {
        /// Create an uploader for the given endpoint with default retries.
        ///
        /// # Errors
        ///
        /// Returns [`UploadError::InvalidUrl`] if the URL is malformed or not
        /// HTTP(S), [`UploadError::Http`] if the client fails to build.
        pub fn new(endpoint: impl AsRef<str>) -> Result<Self, UploadError> {
            Self::with_retry_config(endpoint, RetryConfig::default())
        }

        /// Create an uploader with a custom retry policy.
        ///
        /// # Errors
        ///
        /// See [`HttpUploader::new`].
        pub fn with_retry_config(
            endpoint: impl AsRef<str>,
            retry: RetryConfig,
        ) -> Result<Self, UploadError> {
            let endpoint = Url::parse(endpoint.as_ref())
                .map_err(|e| UploadError::InvalidUrl(e.to_string()))?;
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(UploadError::InvalidUrl(format!(
                    "unsupported scheme: {}",
                    endpoint.scheme()
                )));
            }

            let http = Client::builder()
                .user_agent(concat!("ura-export/", env!("CARGO_PKG_VERSION")))
                .build()?;

            Ok(Self {
                http,
                endpoint,
                retry,
            })
        }

        /// The endpoint archives are posted to.
        #[must_use]
        pub fn endpoint(&self) -> &Url {
            &self.endpoint
        }

        async fn attempt(&self, payload: &UploadPayload) -> Result<String, UploadError> {
            let part = Part::bytes(payload.data.clone())
                .file_name(payload.file_name.clone())
                .mime_str(&payload.content_type)?;
            let form = Form::new()
                .text("reqtype", "fileupload")
                .part("fileToUpload", part);

            let response = self
                .http
                .post(self.endpoint.clone())
                .multipart(form)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(UploadError::Rejected {
                    status: status.as_u16(),
                    body: truncate(body.trim()),
                });
            }

            let hosted = body.trim();
            if !hosted.starts_with("http") {
                return Err(UploadError::UnexpectedResponse(truncate(hosted)));
            }
            Url::parse(hosted).map_err(|e| UploadError::UnexpectedResponse(e.to_string()))?;
            Ok(hosted.to_string())
        }
    }

    #[async_trait]
    impl Uploader for HttpUploader {
        async fn upload(&self, payload: UploadPayload) -> Result<String, UploadError> {
            let max_attempts = self.retry.max_attempts.max(1);
            let mut attempt = 0;
            loop {
                match self.attempt(&payload).await {
                    Ok(url) => return Ok(url),
                    Err(error) if error.is_retryable() && attempt + 1 < max_attempts => {
                        let delay = self.retry.delay_for_attempt(attempt);
                        warn!(
                            "Upload of {} failed (attempt {}/{}), retrying in {}ms: {}",
                            payload.file_name,
                            attempt + 1,
                            max_attempts,
                            delay,
                            error
                        );
                        tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                        attempt += 1;
                    }
                    Err(error) => return Err(error),
                }
            }
        }
    }

    fn truncate(body: &str) -> String {
        body.chars().take(MAX_BODY_IN_ERROR).collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_encodings() {
        let payload = UploadPayload::new("a.zip", "application/zip", b"PK".to_vec());
        assert_eq!(payload.data_base64(), "UEs=");
        assert_eq!(payload.data_url(), "data:application/zip;base64,UEs=");
    }
}
