// capture/mod.rs - Screen Capture Module
//
// Shared capture types plus the platform-specific grab implementations.
// Linux goes through the screenshot portal, macOS/Windows grab the
// primary monitor directly.

pub mod crop;
pub mod output;
pub mod portal;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(any(target_os = "macos", target_os = "windows"))]
pub mod screen;

use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

use crate::error::CaptureError;

/// A point in logical screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen region to capture.
///
/// A rectangle with zero width or height means "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of two corners, whatever the drag direction was
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Map logical coordinates to physical pixels.
    /// Each component is multiplied once and truncated toward zero.
    pub fn scaled(&self, ratio: DevicePixelRatio) -> Self {
        let r = ratio.value();
        Self {
            x: (f64::from(self.x) * r) as i32,
            y: (f64::from(self.y) * r) as i32,
            width: (f64::from(self.width) * r) as u32,
            height: (f64::from(self.height) * r) as u32,
        }
    }
}

/// Scale between logical UI coordinates and physical pixels (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePixelRatio(f64);

impl DevicePixelRatio {
    pub const IDENTITY: Self = Self(1.0);

    /// Non-finite values and values below 1 fall back to 1
    pub fn new(ratio: f64) -> Self {
        if ratio.is_finite() && ratio >= 1.0 {
            Self(ratio)
        } else {
            Self::IDENTITY
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for DevicePixelRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Image written by us
    Saved(PathBuf),
    /// Image written by the portal, reported as a URI
    PortalUri(String),
}

impl fmt::Display for CaptureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOutcome::Saved(path) => write!(f, "{}", path.display()),
            CaptureOutcome::PortalUri(uri) => f.write_str(uri),
        }
    }
}

/// Reject a null grab. A zero-sized image usually means the OS denied
/// screen recording.
pub fn ensure_captured(image: RgbaImage) -> Result<RgbaImage, CaptureError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CaptureError::CaptureFailed(format!(
            "grabbed image is empty ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized_in_every_direction() {
        let expected = CaptureRect::new(10, 20, 30, 40);
        let a = Point::new(10, 20);
        let b = Point::new(40, 60);
        assert_eq!(CaptureRect::from_corners(a, b), expected);
        assert_eq!(CaptureRect::from_corners(b, a), expected);
        assert_eq!(
            CaptureRect::from_corners(Point::new(40, 20), Point::new(10, 60)),
            expected
        );
        assert_eq!(
            CaptureRect::from_corners(Point::new(10, 60), Point::new(40, 20)),
            expected
        );
    }

    #[test]
    fn same_corner_gives_empty_rect() {
        let rect = CaptureRect::from_corners(Point::new(5, 5), Point::new(5, 5));
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn flat_rect_is_empty() {
        assert!(CaptureRect::new(0, 0, 100, 0).is_empty());
        assert!(!CaptureRect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn scaling_by_two() {
        let rect = CaptureRect::new(10, 20, 30, 40).scaled(DevicePixelRatio::new(2.0));
        assert_eq!(rect, CaptureRect::new(20, 40, 60, 80));
    }

    #[test]
    fn scaling_by_identity_is_a_no_op() {
        let rect = CaptureRect::new(-7, 13, 301, 99);
        assert_eq!(rect.scaled(DevicePixelRatio::IDENTITY), rect);
    }

    #[test]
    fn fractional_scaling_truncates() {
        let rect = CaptureRect::new(3, 5, 7, 9).scaled(DevicePixelRatio::new(1.5));
        assert_eq!(rect, CaptureRect::new(4, 7, 10, 13));
    }

    #[test]
    fn ratio_never_drops_below_one() {
        assert_eq!(DevicePixelRatio::new(0.5), DevicePixelRatio::IDENTITY);
        assert_eq!(DevicePixelRatio::new(f64::NAN), DevicePixelRatio::IDENTITY);
        assert_eq!(DevicePixelRatio::new(2.0).value(), 2.0);
    }

    #[test]
    fn empty_grab_is_capture_failure() {
        let result = ensure_captured(RgbaImage::new(0, 0));
        assert!(matches!(result, Err(CaptureError::CaptureFailed(_))));
    }

    #[test]
    fn non_empty_grab_passes_through() {
        let image = ensure_captured(RgbaImage::new(4, 3)).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
    }

    #[test]
    fn outcome_prints_bare_value() {
        let saved = CaptureOutcome::Saved(PathBuf::from("/tmp/shot.png"));
        assert_eq!(saved.to_string(), "/tmp/shot.png");
        let uri = CaptureOutcome::PortalUri("file:///tmp/x.png".into());
        assert_eq!(uri.to_string(), "file:///tmp/x.png");
    }
}
