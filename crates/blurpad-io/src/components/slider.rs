//! Blur intensity slider.

use blurpad_core::BlurLevel;
use dioxus::prelude::*;

/// Props for the [`BlurSlider`] component.
#[derive(Props, Clone, PartialEq)]
pub struct BlurSliderProps {
    /// Current level.
    value: BlurLevel,
    /// Fired on every slider movement.
    on_change: EventHandler<BlurLevel>,
}

/// Labeled range input over `0..=20` in whole pixels.
#[component]
pub fn BlurSlider(props: BlurSliderProps) -> Element {
    let value = props.value.get();
    let max = BlurLevel::MAX.get();

    rsx! {
        div { class: "blur-slider",
            label { r#for: "blur-slider", class: "blur-slider-label", "Blur: {props.value}" }
            input {
                r#type: "range",
                id: "blur-slider",
                min: "0",
                max: "{max}",
                step: "1",
                value: "{value}",
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => props.on_change.call(BlurLevel::saturating(v)),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("slider parse failure: {err:?} from {:?}", e.value())
                                    .into(),
                            );
                        }
                    }
                },
            }
        }
    }
}
