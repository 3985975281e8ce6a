//! Shared types for blurpad.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Blur intensity in display pixels, bounded to `0..=20`.
///
/// The value is the radius handed to a CSS `blur()` filter on the
/// preview. It can never be negative or exceed [`BlurLevel::MAX`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BlurLevel(u8);

impl BlurLevel {
    /// No blur.
    pub const ZERO: Self = Self(0);

    /// Largest accepted blur level.
    pub const MAX: Self = Self(20);

    /// Create a blur level, rejecting values above [`BlurLevel::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BlurOutOfRange`] if `value > 20`.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX.0 {
            return Err(CoreError::BlurOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Convert a raw slider value into a blur level.
    ///
    /// Rounds to the nearest integer and clamps into `0..=20`.
    /// `NaN` maps to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // Clamped into 0..=20 first, so the cast cannot truncate.
        Self(value.round().clamp(0.0, f64::from(Self::MAX.0)) as u8)
    }

    /// The blur radius in display pixels.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns `true` when no blur is applied.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// CSS filter value for the preview, e.g. `blur(5px)`.
    #[must_use]
    pub fn css_filter(self) -> String {
        format!("blur({}px)", self.0)
    }
}

impl TryFrom<u8> for BlurLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for BlurLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for BlurLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either side is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A user-selected image, held as an embeddable `data:` URL.
///
/// Created once a file passes ingestion, replaced wholesale on the next
/// upload, and dropped on removal. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    mime: String,
    data_url: String,
}

impl UploadedImage {
    /// Encode raw file bytes as a base64 `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyInput`] if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::EmptyInput);
        }
        let mime = mime.trim().to_ascii_lowercase();
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        Ok(Self { mime, data_url })
    }

    /// Parse an existing `data:` URL (base64 form only).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedDataUrl`] if the string is not a
    /// base64 `data:` URL or its payload does not decode.
    pub fn from_data_url(data_url: &str) -> Result<Self, CoreError> {
        let (mime, payload) = split_data_url(data_url)?;
        if payload.is_empty() {
            return Err(CoreError::EmptyInput);
        }
        STANDARD
            .decode(payload)
            .map_err(|e| CoreError::MalformedDataUrl(e.to_string()))?;
        Ok(Self {
            mime: mime.to_ascii_lowercase(),
            data_url: data_url.to_owned(),
        })
    }

    /// The MIME type the image was uploaded with.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The `data:` URL, suitable for an `<img src>`.
    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Decode the `data:` URL payload back into the original file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedDataUrl`] if the payload is not
    /// valid base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let (_, payload) = split_data_url(&self.data_url)?;
        STANDARD
            .decode(payload)
            .map_err(|e| CoreError::MalformedDataUrl(e.to_string()))
    }
}

/// Split `data:<mime>;base64,<payload>` into `(mime, payload)`.
fn split_data_url(url: &str) -> Result<(&str, &str), CoreError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::MalformedDataUrl("missing `data:` prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::MalformedDataUrl("missing `,` separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CoreError::MalformedDataUrl("only base64 payloads are supported".into()))?;
    Ok((mime, payload))
}

/// Errors produced by blurpad's pure logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A blur level above the maximum was requested.
    #[error("blur level {0} is out of range (0-20)")]
    BlurOutOfRange(u8),

    /// The input bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the source image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    /// A `data:` URL could not be parsed.
    #[error("malformed data URL: {0}")]
    MalformedDataUrl(String),

    /// The decoded source does not match the dimensions the export was
    /// planned for.
    #[error("source is {actual}, export was planned for {expected}")]
    DimensionMismatch {
        /// Dimensions recorded in the export plan.
        expected: Dimensions,
        /// Dimensions of the decoded source.
        actual: Dimensions,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn blur_level_accepts_full_range() {
        for v in 0..=20 {
            assert_eq!(BlurLevel::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn blur_level_rejects_above_max() {
        assert!(matches!(
            BlurLevel::new(21),
            Err(CoreError::BlurOutOfRange(21))
        ));
    }

    #[rstest]
    #[case::negative(-3.0, 0)]
    #[case::nan(f64::NAN, 0)]
    #[case::rounds_down(4.4, 4)]
    #[case::rounds_up(4.6, 5)]
    #[case::over_max(99.0, 20)]
    #[case::infinite(f64::INFINITY, 20)]
    fn blur_level_saturating(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(BlurLevel::saturating(raw).get(), expected);
    }

    #[rstest]
    #[case(0, "blur(0px)")]
    #[case(7, "blur(7px)")]
    #[case(20, "blur(20px)")]
    fn css_filter_radius_equals_level(#[case] level: u8, #[case] css: &str) {
        assert_eq!(BlurLevel::new(level).unwrap().css_filter(), css);
    }

    #[test]
    fn blur_level_deserialize_validates() {
        let ok: BlurLevel = serde_json::from_str("12").unwrap();
        assert_eq!(ok.get(), 12);
        assert!(serde_json::from_str::<BlurLevel>("21").is_err());
    }

    #[test]
    fn data_url_encodes_and_decodes() {
        let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        let img = UploadedImage::from_bytes(&bytes, "Image/PNG").unwrap();
        assert_eq!(img.mime(), "image/png");
        assert!(img.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(img.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn empty_bytes_rejected() {
        assert!(matches!(
            UploadedImage::from_bytes(&[], "image/png"),
            Err(CoreError::EmptyInput)
        ));
    }

    #[rstest]
    #[case::no_prefix("image/png;base64,AAAA")]
    #[case::no_comma("data:image/png;base64")]
    #[case::not_base64("data:image/png,hello")]
    #[case::bad_payload("data:image/png;base64,@@@")]
    fn malformed_data_urls(#[case] url: &str) {
        assert!(matches!(
            UploadedImage::from_data_url(url),
            Err(CoreError::MalformedDataUrl(_))
        ));
    }

    #[test]
    fn from_data_url_round_trips() {
        let original = UploadedImage::from_bytes(b"hello", "image/gif").unwrap();
        let parsed = UploadedImage::from_data_url(original.data_url()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn dimensions_display_and_empty() {
        assert_eq!(Dimensions::new(2000, 1000).to_string(), "2000x1000");
        assert!(Dimensions::new(0, 5).is_empty());
        assert!(!Dimensions::new(1, 1).is_empty());
    }
}
