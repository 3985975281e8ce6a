//! Canvas rasterizer: bake the preview blur into a native-size PNG.
//!
//! The preview `<img>` is looked up by id and measured (natural vs.
//! rendered size). [`CanvasRasterizer`] then draws it onto a fresh
//! offscreen canvas at natural size with `ctx.filter` set to the plan's
//! scaled blur, and reads the result back as PNG bytes. The filter is
//! applied by the browser at draw time, so the output matches whatever
//! the browser's own `blur()` implementation produces.

use blurpad_core::{CoreError, Dimensions, DisplayGeometry, ExportPlan, Rasterizer, UploadedImage};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Errors from measuring or drawing the preview.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A browser API call returned an error or an object was missing.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The canvas output could not be turned back into bytes.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Find the preview image `element_id` and measure it.
///
/// Returns `None` when the element is missing, is not an `<img>`, has
/// not finished loading, or is not laid out. Export treats that as
/// nothing to do.
#[must_use]
pub fn measure(element_id: &str) -> Option<(HtmlImageElement, DisplayGeometry)> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(element_id)?
        .dyn_into::<HtmlImageElement>()
        .ok()?;
    if !element.complete() {
        return None;
    }
    let geometry = DisplayGeometry {
        natural: Dimensions::new(element.natural_width(), element.natural_height()),
        client: Dimensions::new(
            u32::try_from(element.client_width()).unwrap_or(0),
            u32::try_from(element.client_height()).unwrap_or(0),
        ),
    };
    geometry.scale_factor().map(|_| (element, geometry))
}

/// Rasterizes through an offscreen `<canvas>` 2D context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasRasterizer;

impl Rasterizer for CanvasRasterizer {
    type Source = HtmlImageElement;
    type Error = CanvasError;

    fn rasterize(
        &self,
        source: &HtmlImageElement,
        plan: &ExportPlan,
    ) -> Result<Vec<u8>, CanvasError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CanvasError::JsError("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|e| CanvasError::JsError(format!("failed to cast canvas: {e:?}")))?;
        canvas.set_width(plan.dimensions.width);
        canvas.set_height(plan.dimensions.height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| CanvasError::JsError("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|e| CanvasError::JsError(format!("failed to cast context: {e:?}")))?;

        ctx.set_filter(&plan.filter_css());
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            source,
            0.0,
            0.0,
            f64::from(plan.dimensions.width),
            f64::from(plan.dimensions.height),
        )?;

        let data_url = canvas.to_data_url_with_type(&plan.mime)?;
        let bytes = UploadedImage::from_data_url(&data_url)?.decode_bytes()?;
        log::debug!(
            "canvas rasterized {} with {} -> {} bytes",
            plan.dimensions,
            plan.filter_css(),
            bytes.len()
        );
        Ok(bytes)
    }
}
