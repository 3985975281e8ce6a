//! blurpad-io: Browser I/O and Dioxus component library.
//!
//! Handles file reading, canvas rasterization, Blob downloads, and
//! provides the UI components for the blurpad web application.

pub mod canvas;
pub mod components;
pub mod download;
pub mod ingest;

pub use canvas::CanvasRasterizer;
pub use components::{
    BlurPreview, BlurSlider, DropZone, ExportButton, LoadingIndicator, PREVIEW_IMAGE_ID, Snackbar,
};
pub use ingest::ingest_files;
