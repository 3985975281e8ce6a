//! Blurred image preview.

use blurpad_core::{BlurLevel, UploadedImage};
use dioxus::prelude::*;

/// DOM id of the inline preview `<img>`; export measures this element.
pub const PREVIEW_IMAGE_ID: &str = "blurpad-preview";

/// Props for the [`BlurPreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct BlurPreviewProps {
    /// Image to show.
    image: UploadedImage,
    /// Display blur.
    blur: BlurLevel,
    /// Fired by the "Remove Image" button.
    on_remove: EventHandler<()>,
}

/// The uploaded image with a CSS `blur()` filter and a remove button.
///
/// The filter is display-only; the image data is never modified. The
/// frame caps the height to the viewport, so the image is often shown
/// smaller than its natural size. Clicking it opens a full-viewport
/// overlay with the same filter; clicking the overlay or pressing
/// Escape closes it.
#[component]
pub fn BlurPreview(props: BlurPreviewProps) -> Element {
    let mut zoomed = use_signal(|| false);
    let filter = props.blur.css_filter();
    let src = props.image.data_url().to_owned();

    rsx! {
        div { class: "preview-frame",
            img {
                id: PREVIEW_IMAGE_ID,
                src: "{src}",
                alt: "Uploaded",
                class: "preview-image",
                style: "filter: {filter};",
                onclick: move |_| zoomed.set(true),
            }
        }
        if zoomed() {
            div {
                class: "zoom-overlay",
                role: "dialog",
                aria_label: "Zoomed preview",
                tabindex: "0",
                onmounted: move |e| async move {
                    // Focus so Escape reaches the overlay.
                    let _ = e.set_focus(true).await;
                },
                onclick: move |_| zoomed.set(false),
                onkeydown: move |e| {
                    if closes_zoom(&e.key()) {
                        zoomed.set(false);
                    }
                },
                img {
                    src: "{src}",
                    alt: "Uploaded, zoomed",
                    class: "zoom-image",
                    style: "filter: {filter};",
                }
            }
        }
        div { class: "row-center",
            button {
                class: "btn btn-secondary",
                onclick: move |_| props.on_remove.call(()),
                "Remove Image"
            }
        }
    }
}

fn closes_zoom(key: &Key) -> bool {
    *key == Key::Escape
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_zoom() {
        assert!(closes_zoom(&Key::Escape));
    }

    #[test]
    fn other_keys_keep_zoom_open() {
        assert!(!closes_zoom(&Key::Enter));
        assert!(!closes_zoom(&Key::Character("z".into())));
    }
}
