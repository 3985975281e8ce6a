//! blurpad-cli: run the upload -> blur -> export path on local files.
//!
//! Applies the same ingestion rules, state transitions, and scale-factor
//! export planning as the web app, then rasterizes with the software
//! rasterizer instead of a browser canvas.
//!
//! # Usage
//!
//! ```text
//! blurpad-cli photo.jpg --blur 5 --display 500x250
//! ```
//!
//! writes `blurred-image.png` at the photo's native resolution with the
//! blur a 500x250 preview would have shown.

use std::path::{Path, PathBuf};

use blurpad_core::raster::probe_dimensions;
use blurpad_core::{
    BlurLevel, CandidateFile, CoreError, Dimensions, DisplayGeometry, DropEvent, ExportPlan,
    IngestDecision, Rasterizer, Settings, SoftwareRasterizer, UNSUPPORTED_FILE_TYPE,
    UploadedImage, UploaderState, plan_export,
};
use clap::Parser;

/// Blur an image the way the blurpad preview shows it and export it at
/// native resolution.
#[derive(Debug, Parser)]
#[command(name = "blurpad-cli", version)]
pub struct Args {
    /// Input image path.
    pub input: PathBuf,

    /// Blur level in display pixels (0-20).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=20))]
    pub blur: u8,

    /// Size the preview is displayed at, as "WxH". Defaults to the
    /// image's native size (scale factor 1).
    #[arg(long, value_name = "WxH", value_parser = parse_dimensions)]
    pub display: Option<Dimensions>,

    /// Output path. Defaults to the configured export filename
    /// (`blurred-image.png`) in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON settings file; missing fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the export plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Errors from a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input is not an image.
    #[error("{0}")]
    Unsupported(&'static str),

    /// Blur is zero, so there is nothing to export.
    #[error("blur level is 0; nothing to export (pass --blur 1..=20)")]
    NothingToExport,

    /// Reading or writing a file failed.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`].
    #[error("invalid settings in {path}: {source}")]
    Settings {
        /// Settings file.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },

    /// Decoding, blurring, or encoding failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Unsupported(_) => 2,
            _ => 1,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Report {
    /// The plan that was rasterized.
    pub plan: ExportPlan,
    /// Where the PNG was written.
    pub output: PathBuf,
}

/// Parse `"WxH"` (e.g. `500x250`) into [`Dimensions`].
///
/// # Errors
///
/// Returns a message if the format is wrong or either side is zero.
pub fn parse_dimensions(s: &str) -> Result<Dimensions, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let width: u32 = w
        .trim()
        .parse()
        .map_err(|e| format!("invalid width '{w}': {e}"))?;
    let height: u32 = h
        .trim()
        .parse()
        .map_err(|e| format!("invalid height '{h}': {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("display size must be non-zero, got {width}x{height}"));
    }
    Ok(Dimensions::new(width, height))
}

/// Load settings from `path`, or defaults when `None`.
///
/// # Errors
///
/// Returns [`CliError::Io`] or [`CliError::Settings`].
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Settings {
        path: path.to_owned(),
        source,
    })
}

/// Run the full upload -> blur -> export path.
///
/// # Errors
///
/// See [`CliError`].
pub fn run(args: &Args) -> Result<Report, CliError> {
    let settings = load_settings(args.config.as_deref())?;

    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = match DropEvent::partition([CandidateFile::new(name, None)]).classify() {
        IngestDecision::Read(file) => file,
        IngestDecision::Reject(message) => return Err(CliError::Unsupported(message)),
        IngestDecision::Ignore => return Err(CliError::Unsupported(UNSUPPORTED_FILE_TYPE)),
    };

    let bytes = std::fs::read(&args.input).map_err(|source| CliError::Io {
        path: args.input.clone(),
        source,
    })?;
    let natural = probe_dimensions(&bytes)?;
    log::info!("loaded {} ({natural}, {} bytes)", args.input.display(), bytes.len());

    let mut state = UploaderState::new();
    let ticket = state.begin_ingest();
    let image = UploadedImage::from_bytes(&bytes, &file.mime().unwrap_or_default())?;
    state.complete_ingest(ticket, image);
    state.min_loading_elapsed(ticket);
    state.set_blur(BlurLevel::new(args.blur)?);

    let geometry = DisplayGeometry {
        natural,
        client: args.display.unwrap_or(natural),
    };
    let plan = plan_export(&state, geometry, &settings).ok_or(CliError::NothingToExport)?;

    let source = state.image().ok_or(CliError::NothingToExport)?;
    let png = SoftwareRasterizer.rasterize(source, &plan)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&plan.filename));
    std::fs::write(&output, &png).map_err(|source| CliError::Io {
        path: output.clone(),
        source,
    })?;
    log::info!("wrote {} ({} bytes)", output.display(), png.len());

    Ok(Report { plan, output })
}
