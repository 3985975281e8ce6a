//! Drag-and-drop zone with a hidden file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Called with every file from a drop or pick event. Filtering
    /// happens downstream.
    on_files: EventHandler<Vec<FileData>>,
}

/// A dashed card that accepts a dropped image or opens the picker on
/// click.
///
/// The picker is restricted to `image/*` and a single file; drops are
/// passed through unfiltered.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let mut dragging = use_signal(|| false);

    let handle_change = move |evt: FormEvent| {
        props.on_files.call(evt.files());
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        props.on_files.call(evt.files());
    };

    let zone_class = if dragging() {
        "drop-zone drop-zone-active"
    } else {
        "drop-zone"
    };

    rsx! {
        label {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: "image/*",
                multiple: false,
                class: "hidden",
                onchange: handle_change,
            }

            if dragging() {
                p { class: "drop-zone-title drop-zone-title-active", "Drop the image here..." }
            } else {
                Icon { width: 50, height: 50, icon: LdUpload, class: "drop-zone-icon" }
                p { class: "drop-zone-title",
                    "Drag & drop an image here, or click to select one"
                }
            }
        }
    }
}
