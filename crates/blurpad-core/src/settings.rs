//! Tunable timings and names.
//!
//! Every field has a default matching the browser app's behavior, so
//! `Settings::default()` is the normal configuration. The CLI can
//! override fields from a JSON file; missing fields keep their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum time the loading indicator stays up after an upload
    /// starts, in milliseconds. Avoids a flash for fast reads.
    pub loading_min_duration_ms: u64,

    /// How long an error notification stays visible before it
    /// dismisses itself, in milliseconds.
    pub notification_timeout_ms: u64,

    /// Filename offered for the exported PNG.
    pub export_filename: String,
}

impl Settings {
    /// Default for [`loading_min_duration_ms`](Self::loading_min_duration_ms).
    pub const DEFAULT_LOADING_MIN_DURATION_MS: u64 = 1000;

    /// Default for [`notification_timeout_ms`](Self::notification_timeout_ms).
    pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 6000;

    /// Default for [`export_filename`](Self::export_filename).
    pub const DEFAULT_EXPORT_FILENAME: &'static str = "blurred-image.png";

    /// [`loading_min_duration_ms`](Self::loading_min_duration_ms) as a `Duration`.
    #[must_use]
    pub const fn loading_min_duration(&self) -> Duration {
        Duration::from_millis(self.loading_min_duration_ms)
    }

    /// [`notification_timeout_ms`](Self::notification_timeout_ms) as a `Duration`.
    #[must_use]
    pub const fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loading_min_duration_ms: Self::DEFAULT_LOADING_MIN_DURATION_MS,
            notification_timeout_ms: Self::DEFAULT_NOTIFICATION_TIMEOUT_MS,
            export_filename: Self::DEFAULT_EXPORT_FILENAME.to_owned(),
        }
    }
}
