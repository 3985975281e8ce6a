//! Export button: rasterize the preview and download it.

use blurpad_core::{Rasterizer, Settings, UploaderState, plan_export};
use dioxus::prelude::*;

use crate::canvas::{self, CanvasRasterizer};
use crate::components::preview::PREVIEW_IMAGE_ID;
use crate::download;

/// Props for the [`ExportButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ExportButtonProps {
    /// Uploader state to export from.
    state: Signal<UploaderState>,
    /// Export filename and related settings.
    settings: Settings,
}

/// "Download Blurred Image" button.
///
/// Renders nothing unless an image is present with a non-zero blur.
/// Clicking measures the preview, draws it at natural size with the
/// scaled blur, and downloads the PNG. A preview that is not mounted or
/// not loaded makes the click a no-op.
#[component]
pub fn ExportButton(props: ExportButtonProps) -> Element {
    let mut export_error = use_signal(|| Option::<String>::None);
    let state = props.state;

    if !state.read().can_export() {
        return rsx! {};
    }

    let on_click = {
        let settings = props.settings.clone();
        move |_| {
            let Some((element, geometry)) = canvas::measure(PREVIEW_IMAGE_ID) else {
                log::debug!("export skipped: preview not mounted");
                return;
            };
            let Some(plan) = plan_export(&state.read(), geometry, &settings) else {
                return;
            };
            let outcome = CanvasRasterizer
                .rasterize(&element, &plan)
                .map_err(|e| e.to_string())
                .and_then(|bytes| {
                    download::trigger_download(&bytes, &plan.filename, &plan.mime)
                        .map_err(|e| e.to_string())
                });
            match outcome {
                Ok(()) => export_error.set(None),
                Err(e) => {
                    log::warn!("export failed: {e}");
                    export_error.set(Some(format!("Download failed: {e}")));
                }
            }
        }
    };

    rsx! {
        div { class: "row-center column",
            button {
                class: "btn btn-primary",
                onclick: on_click,
                "Download Blurred Image"
            }
            if let Some(ref err) = export_error() {
                p { class: "text-error", "{err}" }
            }
        }
    }
}
