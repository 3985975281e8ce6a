//! Export planning: turn the on-screen blur into a native-resolution one.
//!
//! The preview is usually shown scaled down, so a blur of `N` display
//! pixels covers more than `N` source pixels. Exporting at native size
//! multiplies the radius by the display-to-native scale factor. When the
//! two axes scale differently the smaller factor is used, which keeps
//! the exported blur from being over-amplified.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::state::UploaderState;
use crate::types::{BlurLevel, Dimensions};

/// MIME type of exported files.
pub const EXPORT_MIME: &str = "image/png";

/// Natural and on-screen sizes of the preview element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Native pixel size of the decoded image.
    pub natural: Dimensions,
    /// Size the element is currently rendered at.
    pub client: Dimensions,
}

impl DisplayGeometry {
    /// Geometry for an image shown at its native size.
    #[must_use]
    pub const fn native(natural: Dimensions) -> Self {
        Self {
            natural,
            client: natural,
        }
    }

    /// `min(natural.width / client.width, natural.height / client.height)`.
    ///
    /// Returns `None` when any side is zero, i.e. the image is not
    /// loaded or not laid out yet.
    #[must_use]
    pub fn scale_factor(&self) -> Option<f64> {
        if self.natural.is_empty() || self.client.is_empty() {
            return None;
        }
        let scale_x = f64::from(self.natural.width) / f64::from(self.client.width);
        let scale_y = f64::from(self.natural.height) / f64::from(self.client.height);
        Some(scale_x.min(scale_y))
    }
}

/// Blur radius in native pixels for `level` display pixels at `scale`.
#[must_use]
pub fn export_radius(level: BlurLevel, scale: f64) -> f64 {
    f64::from(level.get()) * scale
}

/// Everything a rasterizer needs to produce the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    /// Output size: the source's native dimensions.
    pub dimensions: Dimensions,
    /// Blur radius in native pixels.
    pub radius: f64,
    /// Display-to-native scale factor the radius was derived from.
    pub scale: f64,
    /// Download filename.
    pub filename: String,
    /// Output MIME type.
    pub mime: String,
}

impl ExportPlan {
    /// Canvas filter string, e.g. `blur(20px)`.
    #[must_use]
    pub fn filter_css(&self) -> String {
        format!("blur({}px)", self.radius)
    }
}

/// Plan an export of the current state.
///
/// Returns `None` (nothing to do) when export is not offered or the
/// preview geometry is unusable.
#[must_use]
pub fn plan_export(
    state: &UploaderState,
    geometry: DisplayGeometry,
    settings: &Settings,
) -> Option<ExportPlan> {
    if !state.can_export() {
        log::debug!("export skipped: no image or no blur");
        return None;
    }
    let Some(scale) = geometry.scale_factor() else {
        log::debug!("export skipped: preview not laid out ({geometry:?})");
        return None;
    };
    let radius = export_radius(state.blur(), scale);
    log::info!(
        "export planned at {} with radius {radius}px (scale {scale})",
        geometry.natural
    );
    Some(ExportPlan {
        dimensions: geometry.natural,
        radius,
        scale,
        filename: settings.export_filename.clone(),
        mime: EXPORT_MIME.to_owned(),
    })
}
