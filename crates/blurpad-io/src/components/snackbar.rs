//! Error snackbar for rejected uploads.

use blurpad_core::Notification;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

/// Props for the [`Snackbar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SnackbarProps {
    /// Notification to show; `None` renders nothing.
    notification: Option<Notification>,
    /// Fired by the close button.
    on_dismiss: EventHandler<()>,
}

/// Bottom-centered error alert with a close button.
///
/// Clicking elsewhere on the page does not dismiss it; only the close
/// button or the auto-dismiss timer does.
#[component]
pub fn Snackbar(props: SnackbarProps) -> Element {
    let Some(notification) = props.notification else {
        return rsx! {};
    };

    rsx! {
        div { class: "snackbar", role: "alert",
            span { class: "snackbar-message", "{notification.message}" }
            button {
                class: "snackbar-close",
                aria_label: "Close",
                onclick: move |_| props.on_dismiss.call(()),
                Icon { width: 18, height: 18, icon: LdX }
            }
        }
    }
}
