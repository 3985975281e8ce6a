//! Browser side of ingestion: read a dropped or picked file into state.
//!
//! Classification is pure ([`blurpad_core::DropEvent`]); this module
//! adds the asynchronous parts: reading the file bytes, holding the
//! loading indicator for its minimum duration, and auto-dismissing
//! error notifications.

use std::time::Duration;

use blurpad_core::{
    CandidateFile, CoreError, DropEvent, IngestDecision, Settings, UploadedImage, UploaderState,
};
use dioxus::html::FileData;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

/// Errors that can occur while reading an uploaded file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The browser failed to read the file.
    #[error("failed to read file: {0}")]
    Read(String),

    /// The bytes could not be encoded for display.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Describe a browser file for classification.
#[must_use]
pub fn candidate(file: &FileData) -> CandidateFile {
    CandidateFile::new(file.name(), file.content_type())
}

/// Read `file` and encode it as a `data:` URL image.
///
/// This is the only suspension point in the upload flow.
///
/// # Errors
///
/// Returns [`ReadError::Read`] if the browser read fails, or
/// [`ReadError::Core`] if the file is empty.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
pub async fn read_uploaded(file: &FileData, mime: &str) -> Result<UploadedImage, ReadError> {
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| ReadError::Read(e.to_string()))?;
    Ok(UploadedImage::from_bytes(&bytes, mime)?)
}

/// Handle one drop or pick event.
///
/// Rejections show a notification and leave the current image alone.
/// An accepted file starts an upload: the loading flag goes up, the
/// bytes are read in a spawned task, and the flag comes down once the
/// read is done and the minimum display time has passed. Must be called
/// from within a Dioxus event handler.
pub fn ingest_files(mut state: Signal<UploaderState>, files: Vec<FileData>, settings: &Settings) {
    let candidates: Vec<CandidateFile> = files.iter().map(candidate).collect();
    let event = DropEvent::partition(candidates.iter().cloned());

    let accepted = match event.classify() {
        IngestDecision::Ignore => return,
        IngestDecision::Reject(message) => {
            let id = state.write().reject(message);
            arm_notification_timeout(state, id, settings.notification_timeout());
            return;
        }
        IngestDecision::Read(accepted) => accepted,
    };

    let Some(file) = first_image(files, &candidates) else {
        return;
    };
    let mime = accepted.mime().unwrap_or_default();

    let ticket = state.write().begin_ingest();
    let min_loading = millis(settings.loading_min_duration());
    let notification_timeout = settings.notification_timeout();

    spawn(async move {
        TimeoutFuture::new(min_loading).await;
        state.write().min_loading_elapsed(ticket);
    });

    spawn(async move {
        match read_uploaded(&file, &mime).await {
            Ok(image) => {
                state.write().complete_ingest(ticket, image);
            }
            Err(e) => {
                log::warn!("upload {} failed: {e}", ticket.generation());
                let failed = state.write().fail_ingest(ticket, format!("{e}"));
                if let Some(id) = failed {
                    arm_notification_timeout(state, id, notification_timeout);
                }
            }
        }
    });
}

/// Dismiss notification `id` after `timeout`, unless it was replaced or
/// dismissed first.
pub fn arm_notification_timeout(mut state: Signal<UploaderState>, id: u64, timeout: Duration) {
    let ms = millis(timeout);
    spawn(async move {
        TimeoutFuture::new(ms).await;
        state.write().expire_notification(id);
    });
}

/// The file paired with the first image candidate; this is the one
/// [`DropEvent::partition`] accepts.
fn first_image<T>(files: Vec<T>, candidates: &[CandidateFile]) -> Option<T> {
    files
        .into_iter()
        .zip(candidates)
        .find_map(|(file, c)| c.is_image().then_some(file))
}

/// Timer delay in milliseconds, saturating at `u32::MAX`.
fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
