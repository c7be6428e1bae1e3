//! Pure region cropping: the user's logical selection in, pixels out.

use image::RgbaImage;
use log::{info, warn};

use super::{CaptureRect, DevicePixelRatio};

/// Crops the full-screen grab to a logical selection.
///
/// The selection is scaled by `ratio` once and clamped to the image bounds.
/// Returns `None` when the selection is empty or lies entirely outside the
/// image; callers save the full screen in that case.
pub fn crop_to_selection(
    full: &RgbaImage,
    selection: CaptureRect,
    ratio: DevicePixelRatio,
) -> Option<RgbaImage> {
    if selection.is_empty() {
        return None;
    }

    let physical = selection.scaled(ratio);
    let (img_width, img_height) = (i64::from(full.width()), i64::from(full.height()));

    let left = i64::from(physical.x).clamp(0, img_width);
    let top = i64::from(physical.y).clamp(0, img_height);
    let right = (i64::from(physical.x) + i64::from(physical.width)).clamp(0, img_width);
    let bottom = (i64::from(physical.y) + i64::from(physical.height)).clamp(0, img_height);

    if right <= left || bottom <= top {
        warn!(
            "Selection {:?} lies outside the {}x{} grab",
            physical, img_width, img_height
        );
        return None;
    }

    let cropped = image::imageops::crop_imm(
        full,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    )
    .to_image();

    Some(cropped)
}

/// Image to save for a finished selection: the crop, or the full screen
/// when there is nothing to crop.
pub fn select_output(full: RgbaImage, selection: CaptureRect, ratio: DevicePixelRatio) -> RgbaImage {
    match crop_to_selection(&full, selection, ratio) {
        Some(cropped) => {
            info!(
                "Cropped selection {:?} (ratio {}) to {}x{}",
                selection,
                ratio.value(),
                cropped.width(),
                cropped.height()
            );
            cropped
        }
        None => {
            info!("No selection, keeping full screen");
            full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const MARKER: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn screen(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn identity_ratio_crops_selection_exactly() {
        let mut full = screen(100, 100);
        full.put_pixel(10, 20, MARKER);
        let cropped =
            crop_to_selection(&full, CaptureRect::new(10, 20, 30, 40), DevicePixelRatio::IDENTITY)
                .unwrap();
        assert_eq!(cropped.dimensions(), (30, 40));
        assert_eq!(*cropped.get_pixel(0, 0), MARKER);
    }

    #[test]
    fn double_ratio_crops_scaled_rect() {
        let mut full = screen(200, 200);
        full.put_pixel(20, 40, MARKER);
        let cropped =
            crop_to_selection(&full, CaptureRect::new(10, 20, 30, 40), DevicePixelRatio::new(2.0))
                .unwrap();
        assert_eq!(cropped.dimensions(), (60, 80));
        assert_eq!(*cropped.get_pixel(0, 0), MARKER);
    }

    #[test]
    fn empty_selection_keeps_full_screen() {
        let full = screen(64, 48);
        assert!(crop_to_selection(&full, CaptureRect::default(), DevicePixelRatio::IDENTITY).is_none());
        let out = select_output(full, CaptureRect::new(5, 5, 0, 0), DevicePixelRatio::IDENTITY);
        assert_eq!(out.dimensions(), (64, 48));
    }

    #[test]
    fn selection_is_clamped_to_image() {
        let full = screen(100, 100);
        let cropped =
            crop_to_selection(&full, CaptureRect::new(80, -10, 50, 30), DevicePixelRatio::IDENTITY)
                .unwrap();
        assert_eq!(cropped.dimensions(), (20, 20));
    }

    #[test]
    fn selection_outside_image_falls_back_to_full_screen() {
        let full = screen(100, 100);
        let out = select_output(full, CaptureRect::new(150, 150, 10, 10), DevicePixelRatio::IDENTITY);
        assert_eq!(out.dimensions(), (100, 100));
    }
}
