//! File Operations for image fields
//!
//! Native file picking through `rfd`, followed by the multipart upload of
//! the chosen file.

use rfd::AsyncFileDialog;
use smallcrud_core::{CrudConfig, CrudError, CrudResult, TypeDescriptor};
use smallcrud_gateway::{ImageUploader, UploadSlot};
use std::path::PathBuf;

// ============================================================================
// File Filter Constants
// ============================================================================

/// Extensions offered by the image picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Display name for the image filter
pub const IMAGE_FILTER_NAME: &str = "Images";

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Open a file dialog to select one image
///
/// Returns None if the dialog was cancelled.
pub async fn show_image_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Select Image")
        .add_filter(IMAGE_FILTER_NAME, IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

// ============================================================================
// Upload
// ============================================================================

/// Pick an image and upload it into `slot`
///
/// A full slot rejects the upload before the dialog opens. Returns the new
/// slot state; cancelling the dialog yields `CrudError::Cancelled`.
pub async fn pick_and_upload(
    ty: &TypeDescriptor,
    config: &CrudConfig,
    slot: &UploadSlot,
) -> CrudResult<UploadSlot> {
    if !slot.can_accept() {
        return Err(CrudError::with_context(
            "upload",
            format!("only {} file allowed", UploadSlot::LIMIT),
        ));
    }

    let path = show_image_dialog().await.ok_or(CrudError::Cancelled)?;
    let uploader = ImageUploader::for_field(ty, &config.upload);
    let url = uploader.upload_path(&path).await?;

    let mut next = slot.clone();
    next.accept(url)?;
    Ok(next)
}
