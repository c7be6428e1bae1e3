//! Full-screen grab of the primary monitor using the `xcap` crate.
//!
//! Used on macOS and Windows. On macOS the calling process needs the Screen
//! Recording permission, and the terminal has to be restarted after granting
//! it before grabs stop coming back empty.

use image::RgbaImage;
use log::{info, warn};
use xcap::Monitor;

use super::{ensure_captured, DevicePixelRatio};
use crate::error::CaptureError;

/// A full-screen grab plus the ratio needed to map overlay coordinates onto it
pub struct ScreenGrab {
    pub image: RgbaImage,
    pub pixel_ratio: DevicePixelRatio,
}

/// Captures the primary monitor.
///
/// Falls back to the first monitor when none reports itself as primary.
pub fn grab_primary_screen() -> Result<ScreenGrab, CaptureError> {
    let monitors = Monitor::all()
        .map_err(|e| CaptureError::CaptureFailed(format!("failed to enumerate monitors: {e}")))?;

    let primary_index = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
        .unwrap_or(0);
    let monitor = monitors
        .into_iter()
        .nth(primary_index)
        .ok_or(CaptureError::NoPrimaryScreen)?;

    let scale = monitor.scale_factor().unwrap_or_else(|e| {
        warn!("Could not read monitor scale factor ({}), assuming 1.0", e);
        1.0
    });
    let pixel_ratio = DevicePixelRatio::new(f64::from(scale));

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
    let image = ensure_captured(image)?;

    info!(
        "Grabbed primary screen: {}x{} px, device pixel ratio {}",
        image.width(),
        image.height(),
        pixel_ratio.value()
    );

    Ok(ScreenGrab { image, pixel_ratio })
}
