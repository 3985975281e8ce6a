use blurpad_core::{BlurLevel, Settings, UploaderState};
use blurpad_io::{
    BlurPreview, BlurSlider, DropZone, ExportButton, LoadingIndicator, Snackbar, ingest_files,
};
use dioxus::html::FileData;
use dioxus::prelude::*;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Holds the single [`UploaderState`] signal and wires it to the drop
/// zone, preview, slider, export button, and snackbar.
fn app() -> Element {
    let mut state = use_signal(UploaderState::new);
    let settings = use_hook(Settings::default);

    let on_files = {
        let settings = settings.clone();
        move |files: Vec<FileData>| ingest_files(state, files, &settings)
    };

    let on_blur = move |level: BlurLevel| {
        state.write().set_blur(level);
    };

    let on_remove = move |()| state.write().remove();

    let on_dismiss = move |()| state.write().dismiss_notification();

    let (loading, blur, notification, visible_image) = {
        let current = state.read();
        (
            current.is_loading(),
            current.blur(),
            current.notification().cloned(),
            current.image().filter(|_| current.preview_visible()).cloned(),
        )
    };

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { class: "title", "blurpad" }
                p { class: "subtitle", "Blur an image in your browser and download the result" }
            }

            main { class: "uploader",
                DropZone { on_files: on_files }

                if loading {
                    LoadingIndicator {}
                }

                if let Some(image) = visible_image {
                    div { class: "editor fade-in",
                        BlurSlider { value: blur, on_change: on_blur }
                        BlurPreview {
                            image: image,
                            blur: blur,
                            on_remove: on_remove,
                        }
                        ExportButton { state: state, settings: settings.clone() }
                    }
                }
            }

            Snackbar {
                notification: notification,
                on_dismiss: on_dismiss,
            }
        }
    }
}
