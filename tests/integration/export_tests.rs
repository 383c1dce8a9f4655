//! Export integration tests.
//!
//! Tests verify that regions read from a slide encode to PNG without loss
//! and to valid JPEG.

use std::path::Path;

use wsi_region::{OutputFormat, RegionEncoder};

use super::test_utils::sample_source;

#[test]
fn test_region_to_png_roundtrip() {
    let slide = sample_source().open("sample.svs").unwrap();
    let region = slide.read_rgba_region(0, 0, 0, 8, 6).unwrap();

    let png = RegionEncoder::new()
        .encode(&region, OutputFormat::Png)
        .unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();

    assert_eq!(decoded.dimensions(), (8, 6));
    assert_eq!(decoded.as_raw().as_slice(), region.as_bytes());
}

#[test]
fn test_region_to_jpeg() {
    let slide = sample_source().open("sample.svs").unwrap();
    let region = slide.read_rgba_region(1, 0, 0, 4, 3).unwrap();

    let jpeg = RegionEncoder::with_jpeg_quality(95)
        .encode(&region, OutputFormat::Jpeg)
        .unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();

    assert_eq!(decoded.dimensions(), (4, 3));
    // Flat gray survives JPEG within a small tolerance
    for p in decoded.pixels() {
        for c in p.0 {
            assert!((i16::from(c) - 90).abs() <= 3, "channel {}", c);
        }
    }
}

#[test]
fn test_write_to_file() {
    let slide = sample_source().open("sample.svs").unwrap();
    let region = slide.read_rgba_region(0, 2, 2, 3, 3).unwrap();

    let path = std::env::temp_dir().join(format!("wsi-region-test-{}.png", std::process::id()));
    let written = RegionEncoder::new().write_to_file(&region, &path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(on_disk.len(), written);

    let decoded = image::load_from_memory(&on_disk).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw().as_slice(), region.as_bytes());
}

#[test]
fn test_write_unsupported_extension() {
    let slide = sample_source().open("sample.svs").unwrap();
    let region = slide.read_rgba_region(0, 0, 0, 1, 1).unwrap();

    let result = RegionEncoder::new().write_to_file(&region, Path::new("region.gif"));
    assert!(result.is_err());
}
