//! Dioxus UI components for blurpad.
//!
//! Provides the drop zone, loading indicator, blur slider, preview,
//! export button, and error snackbar.

mod drop_zone;
mod export;
mod preview;
mod slider;
mod snackbar;

pub use drop_zone::DropZone;
pub use export::ExportButton;
pub use preview::{BlurPreview, PREVIEW_IMAGE_ID};
pub use slider::BlurSlider;
pub use snackbar::Snackbar;

use dioxus::prelude::*;

/// Spinner shown while an upload is being read.
#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "row-center",
            div { class: "spinner", role: "progressbar", aria_label: "Loading" }
        }
    }
}
