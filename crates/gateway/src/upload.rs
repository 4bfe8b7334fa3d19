//! Image upload client
//!
//! Image fields hold a URL string. Choosing a file posts it as a
//! multipart `file` part to the upload action; the server answers with
//! `[{"url": "<relative path>"}]` and the bound value becomes
//! `{base_url}/{relative path}`.

use serde::Deserialize;
use serde_json::Value;
use smallcrud_core::config::UploadConfig;
use smallcrud_core::{CrudError, CrudResult, TypeDescriptor};
use std::path::Path;
use tracing::info;

/// Upload target for an image field
///
/// `type.data.action` overrides the configured action.
pub fn resolve_action(ty: &TypeDescriptor, config: &UploadConfig) -> String {
    ty.data()
        .and_then(|data| data.get("action"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| config.action())
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    url: String,
}

/// Posts image files to the upload service
#[derive(Debug, Clone)]
pub struct ImageUploader {
    client: reqwest::Client,
    action: String,
    config: UploadConfig,
}

impl ImageUploader {
    /// Create an uploader for one image field
    pub fn for_field(ty: &TypeDescriptor, config: &UploadConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            action: resolve_action(ty, config),
            config: config.clone(),
        }
    }

    /// URL files are posted to
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Upload raw bytes and return the URL to bind
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> CrudResult<String> {
        info!(action = %self.action, file = file_name, size = bytes.len(), "Uploading image");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.action)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CrudError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrudError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let files: Vec<UploadedFile> = response
            .json()
            .await
            .map_err(|e| CrudError::malformed("upload", e.to_string()))?;
        self.bound_url(&files)
    }

    /// Read a file from disk and upload it
    pub async fn upload_path(&self, path: &Path) -> CrudResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CrudError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        self.upload(name, bytes).await
    }

    fn bound_url(&self, files: &[UploadedFile]) -> CrudResult<String> {
        files
            .first()
            .map(|f| self.config.file_url(&f.url))
            .ok_or_else(|| CrudError::malformed("upload", "empty file list"))
    }
}

// ============================================================================
// Upload slot
// ============================================================================

/// Single-file state of an image input (limit 1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSlot {
    url: Option<String>,
}

impl UploadSlot {
    /// Maximum number of files
    pub const LIMIT: usize = 1;

    /// Slot reflecting the current bound value
    pub fn from_value(value: Option<&Value>) -> Self {
        let url = value
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { url }
    }

    /// Current file URL
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Check whether a new upload may start
    pub fn can_accept(&self) -> bool {
        self.url.is_none()
    }

    /// Store the URL of a completed upload
    pub fn accept(&mut self, url: String) -> CrudResult<()> {
        if !self.can_accept() {
            return Err(CrudError::with_context(
                "upload",
                format!("only {} file allowed", Self::LIMIT),
            ));
        }
        self.url = Some(url);
        Ok(())
    }

    /// Remove the current file
    pub fn clear(&mut self) {
        self.url = None;
    }

    /// Value to bind into the form
    pub fn to_value(&self) -> Value {
        Value::String(self.url.clone().unwrap_or_default())
    }
}
