//! Integration tests: run the CLI path against files in a temp directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use blurpad_cli::{Args, CliError, parse_dimensions, run};
use blurpad_core::{Dimensions, UNSUPPORTED_FILE_TYPE};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

fn args(input: PathBuf, blur: u8, output: PathBuf) -> Args {
    Args {
        input,
        blur,
        display: None,
        output: Some(output),
        config: None,
        json: false,
    }
}

#[test]
fn exports_native_size_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", 40, 20);
    let out = dir.path().join("out.png");

    let mut a = args(input, 5, out.clone());
    a.display = Some(Dimensions::new(10, 5));
    let report = run(&a).unwrap();

    assert_eq!(report.output, out);
    assert_eq!(report.plan.dimensions, Dimensions::new(40, 20));
    assert!((report.plan.radius - 20.0).abs() < f64::EPSILON);

    let written = image::open(&out).unwrap();
    assert_eq!((written.width(), written.height()), (40, 20));
}

#[test]
fn text_file_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "hello").unwrap();
    let out = dir.path().join("out.png");

    let err = run(&args(input, 5, out.clone())).unwrap_err();
    assert!(matches!(err, CliError::Unsupported(msg) if msg == UNSUPPORTED_FILE_TYPE));
    assert_eq!(err.exit_code(), 2);
    assert!(!out.exists());
}

#[test]
fn zero_blur_has_nothing_to_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", 8, 8);
    let out = dir.path().join("out.png");

    let err = run(&args(input, 0, out.clone())).unwrap_err();
    assert!(matches!(err, CliError::NothingToExport));
    assert_eq!(err.exit_code(), 1);
    assert!(!out.exists());
}

#[test]
fn repeated_runs_write_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", 16, 16);
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");

    run(&args(input.clone(), 7, first.clone())).unwrap();
    run(&args(input, 7, second.clone())).unwrap();
    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}

#[test]
fn settings_file_overrides_export_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", 8, 8);
    let config = dir.path().join("settings.json");
    std::fs::write(&config, r#"{ "export_filename": "custom.png" }"#).unwrap();

    let mut a = args(input, 2, dir.path().join("unused.png"));
    a.config = Some(config);
    let report = run(&a).unwrap();
    assert_eq!(report.plan.filename, "custom.png");
}

#[test]
fn bad_settings_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", 8, 8);
    let config = dir.path().join("settings.json");
    std::fs::write(&config, "{ not json").unwrap();

    let mut a = args(input, 2, dir.path().join("out.png"));
    a.config = Some(config);
    assert!(matches!(run(&a), Err(CliError::Settings { .. })));
}

#[test]
fn display_size_parsing() {
    assert_eq!(parse_dimensions("500x250").unwrap(), Dimensions::new(500, 250));
    assert_eq!(parse_dimensions("20X10").unwrap(), Dimensions::new(20, 10));
    assert!(parse_dimensions("500").is_err());
    assert!(parse_dimensions("0x10").is_err());
    assert!(parse_dimensions("ax10").is_err());
}
