//! blurpad-core: Pure upload, blur, and export logic (sans-IO).
//!
//! Models a single-image blur tool as data flowing one way:
//! file -> encoded image -> preview with display-time blur ->
//! (on export) native-resolution raster -> PNG bytes.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and plain state structs. All browser/filesystem
//! interaction lives in `blurpad-io` and `blurpad-cli`.

pub mod blur;
pub mod export;
pub mod ingest;
pub mod raster;
pub mod settings;
pub mod state;
pub mod types;

pub use export::{DisplayGeometry, ExportPlan, export_radius, plan_export};
pub use ingest::{CandidateFile, DropEvent, IngestDecision, UNSUPPORTED_FILE_TYPE};
pub use raster::{Rasterizer, SoftwareRasterizer};
pub use settings::Settings;
pub use state::{Notification, Ticket, UploaderState};
pub use types::{BlurLevel, CoreError, Dimensions, UploadedImage};
