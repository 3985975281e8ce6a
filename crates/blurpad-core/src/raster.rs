//! Rasterizers: bake an [`ExportPlan`]'s blur into PNG bytes.
//!
//! The [`Rasterizer`] trait is the seam between planning (pure) and
//! drawing (host-specific). In the browser the canvas 2D context draws
//! with its own `filter` implementation; [`SoftwareRasterizer`] is the
//! native equivalent used by the CLI and by tests.

use image::ImageEncoder;

use crate::blur;
use crate::export::ExportPlan;
use crate::types::{CoreError, Dimensions, UploadedImage};

/// Draws a source image at native size with the plan's blur applied and
/// encodes the result.
pub trait Rasterizer {
    /// What the rasterizer draws from.
    type Source: ?Sized;
    /// Failure type.
    type Error;

    /// Produce the encoded export for `source`.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see each rasterizer.
    fn rasterize(&self, source: &Self::Source, plan: &ExportPlan) -> Result<Vec<u8>, Self::Error>;
}

/// CPU rasterizer built on `image` + `imageproc`.
///
/// Output is deterministic: the same source and plan always produce
/// byte-identical PNGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareRasterizer;

impl Rasterizer for SoftwareRasterizer {
    type Source = UploadedImage;
    type Error = CoreError;

    fn rasterize(&self, source: &UploadedImage, plan: &ExportPlan) -> Result<Vec<u8>, CoreError> {
        let bytes = source.decode_bytes()?;
        rasterize_bytes(&bytes, plan)
    }
}

/// Decode `bytes`, blur by `plan.radius`, and encode as PNG.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] if `bytes` is empty,
/// [`CoreError::ImageDecode`] if decoding fails,
/// [`CoreError::DimensionMismatch`] if the decoded size differs from
/// `plan.dimensions`, or [`CoreError::PngEncode`] if encoding fails.
pub fn rasterize_bytes(bytes: &[u8], plan: &ExportPlan) -> Result<Vec<u8>, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let actual = Dimensions::new(rgba.width(), rgba.height());
    if actual != plan.dimensions {
        return Err(CoreError::DimensionMismatch {
            expected: plan.dimensions,
            actual,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let radius = plan.radius as f32;
    let blurred = blur::blur_radius(&rgba, radius);
    encode_png(&blurred)
}

/// Read the native dimensions of encoded image bytes without a full
/// decode.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] or [`CoreError::ImageDecode`].
pub fn probe_dimensions(bytes: &[u8]) -> Result<Dimensions, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::ImageDecode(image::ImageError::IoError(e)))?;
    let (width, height) = reader.into_dimensions()?;
    Ok(Dimensions::new(width, height))
}

/// Encode an RGBA image as PNG bytes.
///
/// # Errors
///
/// Returns [`CoreError::PngEncode`] if encoding fails.
pub fn encode_png(image: &image::RgbaImage) -> Result<Vec<u8>, CoreError> {
    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoreError::PngEncode(e.to_string()))?;
    Ok(png)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::export::EXPORT_MIME;

    fn checker_png(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(w, h, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        });
        encode_png(&img).unwrap()
    }

    fn plan(w: u32, h: u32, radius: f64) -> ExportPlan {
        ExportPlan {
            dimensions: Dimensions::new(w, h),
            radius,
            scale: 1.0,
            filename: "blurred-image.png".into(),
            mime: EXPORT_MIME.into(),
        }
    }

    #[test]
    fn output_keeps_native_dimensions() {
        let src = UploadedImage::from_bytes(&checker_png(24, 16), "image/png").unwrap();
        let out = SoftwareRasterizer.rasterize(&src, &plan(24, 16, 2.0)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (24, 16));
    }

    #[test]
    fn output_is_blurred() {
        let png = checker_png(16, 16);
        let out = rasterize_bytes(&png, &plan(16, 16, 3.0)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
        let has_gray = decoded.pixels().any(|p| p.0[0] > 20 && p.0[0] < 235);
        assert!(has_gray, "expected intermediate values after blur");
    }

    #[test]
    fn repeated_export_is_byte_identical() {
        let src = UploadedImage::from_bytes(&checker_png(20, 20), "image/png").unwrap();
        let p = plan(20, 20, 4.0);
        let a = SoftwareRasterizer.rasterize(&src, &p).unwrap();
        let b = SoftwareRasterizer.rasterize(&src, &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_plan_is_rejected() {
        let err = rasterize_bytes(&checker_png(8, 8), &plan(9, 8, 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_and_corrupt_inputs() {
        assert!(matches!(
            rasterize_bytes(&[], &plan(1, 1, 1.0)),
            Err(CoreError::EmptyInput)
        ));
        assert!(matches!(
            rasterize_bytes(&[0xFF, 0x00, 0x12], &plan(1, 1, 1.0)),
            Err(CoreError::ImageDecode(_))
        ));
    }

    #[test]
    fn probe_reads_header_dimensions() {
        assert_eq!(
            probe_dimensions(&checker_png(33, 7)).unwrap(),
            Dimensions::new(33, 7)
        );
    }
}
