//! Upload classification: decide what to do with a drop or pick event.
//!
//! A file picker filtered to `image/*` with `multiple = false` hands
//! over at most one accepted file plus a list of rejected ones. The
//! browser drop path has no such filter, so [`DropEvent::partition`]
//! applies the same rules to raw candidates. [`DropEvent::classify`]
//! then turns the event into a single [`IngestDecision`].
//!
//! Only the declared MIME type (or, failing that, the extension) is
//! checked. File contents are not sniffed; a forged extension passes.

use serde::{Deserialize, Serialize};

/// Message shown when an upload is rejected for its type.
pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type. Please upload an image.";

/// Extension to MIME type table used when the browser reports no type.
const EXTENSION_MIME: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
];

/// A file offered by the user, before its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// File name as reported by the browser or filesystem.
    pub name: String,
    /// MIME type reported by the browser, if any.
    pub content_type: Option<String>,
}

impl CandidateFile {
    /// Create a candidate with an optional declared MIME type.
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.filter(|t| !t.trim().is_empty()),
        }
    }

    /// The effective MIME type: the declared one, or a guess from the
    /// extension.
    #[must_use]
    pub fn mime(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase())
            .or_else(|| mime_from_extension(&self.name).map(str::to_owned))
    }

    /// Whether the file passes the `image/*` filter.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime().is_some_and(|m| is_image_mime(&m))
    }
}

/// Whether `mime` matches `image/*`.
#[must_use]
pub fn is_image_mime(mime: &str) -> bool {
    mime.split_once('/').is_some_and(|(kind, sub)| {
        kind.trim().eq_ignore_ascii_case("image") && !sub.trim().is_empty()
    })
}

/// Guess a MIME type from a file name's extension.
#[must_use]
pub fn mime_from_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    EXTENSION_MIME
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|&(_, mime)| mime)
}

/// One drop or pick event after the `image/*` filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropEvent {
    /// Files that passed the filter. Holds at most one entry when built
    /// via [`partition`](Self::partition).
    pub accepted: Vec<CandidateFile>,
    /// Files that failed the filter.
    pub rejected: Vec<CandidateFile>,
}

impl DropEvent {
    /// Split raw candidates the way a single-file `image/*` picker does.
    ///
    /// The first image is accepted; later images are discarded silently.
    /// Every non-image lands in `rejected`.
    #[must_use]
    pub fn partition(files: impl IntoIterator<Item = CandidateFile>) -> Self {
        let mut event = Self::default();
        for file in files {
            if !file.is_image() {
                event.rejected.push(file);
            } else if event.accepted.is_empty() {
                event.accepted.push(file);
            } else {
                log::debug!("discarding extra dropped file {:?}", file.name);
            }
        }
        event
    }

    /// Decide what the event means for the uploader.
    ///
    /// Any rejection wins over accepted files: the event is refused as a
    /// whole and the current image stays in place.
    #[must_use]
    pub fn classify(&self) -> IngestDecision {
        if !self.rejected.is_empty() {
            return IngestDecision::Reject(UNSUPPORTED_FILE_TYPE);
        }
        self.accepted
            .first()
            .map_or(IngestDecision::Ignore, |file| {
                IngestDecision::Read(file.clone())
            })
    }
}

/// Outcome of classifying a [`DropEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestDecision {
    /// Read this file and make it the current image.
    Read(CandidateFile),
    /// Show this message; leave the current image untouched.
    Reject(&'static str),
    /// Nothing was offered.
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn file(name: &str, ty: Option<&str>) -> CandidateFile {
        CandidateFile::new(name, ty.map(str::to_owned))
    }

    #[rstest]
    #[case::png_declared("a.bin", Some("image/png"), true)]
    #[case::upper_case("a.bin", Some("IMAGE/JPEG"), true)]
    #[case::text_declared("a.png", Some("text/plain"), false)]
    #[case::guessed("photo.JPG", None, true)]
    #[case::blank_type_falls_back("photo.webp", Some(""), true)]
    #[case::txt("notes.txt", None, false)]
    #[case::no_extension("README", None, false)]
    #[case::bare_image_type("x", Some("image/"), false)]
    fn image_filter(#[case] name: &str, #[case] ty: Option<&str>, #[case] expected: bool) {
        assert_eq!(file(name, ty).is_image(), expected);
    }

    #[test]
    fn txt_drop_is_rejected_with_message() {
        let event = DropEvent::partition([file("notes.txt", Some("text/plain"))]);
        assert!(event.accepted.is_empty());
        assert_eq!(event.classify(), IngestDecision::Reject(UNSUPPORTED_FILE_TYPE));
    }

    #[test]
    fn only_first_image_is_accepted() {
        let event = DropEvent::partition([
            file("one.png", None),
            file("two.png", None),
            file("three.gif", None),
        ]);
        assert_eq!(event.accepted, vec![file("one.png", None)]);
        assert!(event.rejected.is_empty());
        assert_eq!(
            event.classify(),
            IngestDecision::Read(file("one.png", None))
        );
    }

    #[test]
    fn rejection_wins_over_accepted() {
        let event = DropEvent::partition([file("one.png", None), file("two.pdf", None)]);
        assert_eq!(event.accepted.len(), 1);
        assert_eq!(event.rejected.len(), 1);
        assert_eq!(event.classify(), IngestDecision::Reject(UNSUPPORTED_FILE_TYPE));
    }

    #[test]
    fn empty_event_is_ignored() {
        assert_eq!(DropEvent::default().classify(), IngestDecision::Ignore);
    }

    #[test]
    fn declared_type_preferred_over_extension() {
        assert_eq!(
            file("x.png", Some("image/webp")).mime().as_deref(),
            Some("image/webp")
        );
        assert_eq!(file("x.png", None).mime().as_deref(), Some("image/png"));
    }
}
