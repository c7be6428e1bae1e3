//! End-to-end checks of the direct path after the grab: selection, crop,
//! and PNG saving into a scratch directory.

use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use regionshot::capture::{crop, ensure_captured, output};
use regionshot::{CaptureError, CaptureRect, DevicePixelRatio};

fn fake_screen() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(400, 300, Rgba([10, 20, 30, 255]));
    img.put_pixel(20, 40, Rgba([255, 0, 0, 255]));
    img
}

#[test]
fn selected_region_is_saved_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("Pictures");

    let image = crop::select_output(
        fake_screen(),
        CaptureRect::new(10, 20, 30, 40),
        DevicePixelRatio::new(2.0),
    );
    let path = output::save_image(&image, &out_dir).unwrap();

    assert!(path.starts_with(&out_dir));
    assert_eq!(path.extension().unwrap(), "png");
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("screenshot-"));
    // screenshot-YYYYMMDD-HHMMSS.png
    assert_eq!(name.len(), "screenshot-".len() + 15 + ".png".len());

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (60, 80));
    assert_eq!(*saved.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
}

#[test]
fn empty_selection_saves_full_screen() {
    let dir = tempfile::tempdir().unwrap();
    let image = crop::select_output(
        fake_screen(),
        CaptureRect::default(),
        DevicePixelRatio::IDENTITY,
    );
    let path = output::save_image(&image, dir.path()).unwrap();
    let saved = image::open(&path).unwrap();
    assert_eq!((saved.width(), saved.height()), (400, 300));
}

#[test]
fn saves_in_the_same_second_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let first_at = day.and_hms_milli_opt(12, 0, 0, 100).unwrap();
    let second_at = day.and_hms_milli_opt(12, 0, 0, 900).unwrap();

    let first = output::save_image_at(&RgbaImage::new(8, 8), dir.path(), first_at).unwrap();
    let second = output::save_image_at(&RgbaImage::new(16, 4), dir.path(), second_at).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    let saved = image::open(&second).unwrap();
    assert_eq!((saved.width(), saved.height()), (16, 4));
}

#[test]
fn empty_grab_never_reaches_the_save_step() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("never");

    let result = ensure_captured(RgbaImage::new(0, 0))
        .and_then(|image| output::save_image(&image, &out_dir));

    assert!(matches!(result, Err(CaptureError::CaptureFailed(_))));
    assert!(!out_dir.exists());
}

#[test]
fn unwritable_output_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = output::save_image(&RgbaImage::new(2, 2), &blocker.join("sub"));
    assert!(matches!(result, Err(CaptureError::OutputDir { .. })));
}
