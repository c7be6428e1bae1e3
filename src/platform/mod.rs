// platform/mod.rs - Capture Dispatcher
//
// Picks the capture path for the running operating system once at startup:
// - Linux:          screenshot portal over D-Bus (the desktop captures and saves)
// - macOS/Windows:  direct grab, optional region overlay, crop, save as PNG
// Anything else is a startup error.

use std::path::Path;

use log::info;

use crate::app::Config;
use crate::capture::CaptureOutcome;
use crate::error::CaptureError;

/// The two ways this tool can take a screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePath {
    /// Ask xdg-desktop-portal; it shows its own UI and stores the file
    Portal { interactive: bool },
    /// Grab the primary monitor ourselves
    Direct { interactive: bool },
}

impl CapturePath {
    /// Choose a path for an OS name as reported by `std::env::consts::OS`
    pub fn select(os: &str, interactive: bool) -> Result<Self, CaptureError> {
        match os {
            "linux" => Ok(CapturePath::Portal { interactive }),
            "macos" | "windows" => Ok(CapturePath::Direct { interactive }),
            other => Err(CaptureError::UnsupportedPlatform(other.to_owned())),
        }
    }

    /// Choose a path for the host we are running on
    pub fn for_host(interactive: bool) -> Result<Self, CaptureError> {
        Self::select(std::env::consts::OS, interactive)
    }

    /// Run the selected path to completion
    pub fn run(self, config: &Config) -> Result<CaptureOutcome, CaptureError> {
        match self {
            CapturePath::Portal { interactive } => portal_capture(interactive),
            CapturePath::Direct { interactive } => direct_capture(interactive, &config.output_dir),
        }
    }
}

/// Take one screenshot according to `config`
pub fn capture(config: &Config) -> Result<CaptureOutcome, CaptureError> {
    let path = CapturePath::for_host(config.interactive)?;
    info!("Capture path: {:?}", path);
    path.run(config)
}

#[cfg(target_os = "linux")]
fn portal_capture(interactive: bool) -> Result<CaptureOutcome, CaptureError> {
    crate::capture::linux::request_screenshot(interactive).map(CaptureOutcome::PortalUri)
}

#[cfg(not(target_os = "linux"))]
fn portal_capture(_interactive: bool) -> Result<CaptureOutcome, CaptureError> {
    Err(CaptureError::UnsupportedPlatform(format!(
        "{} (the screenshot portal is Linux-only)",
        std::env::consts::OS
    )))
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn direct_capture(interactive: bool, output_dir: &Path) -> Result<CaptureOutcome, CaptureError> {
    use crate::capture::{crop, output, screen};

    // Grab before the overlay exists so it never ends up in the image
    let grab = screen::grab_primary_screen()?;

    let image = if interactive {
        let selection = crate::ui::pick_region()?;
        crop::select_output(grab.image, selection, grab.pixel_ratio)
    } else {
        grab.image
    };

    output::save_image(&image, output_dir).map(CaptureOutcome::Saved)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn direct_capture(_interactive: bool, _output_dir: &Path) -> Result<CaptureOutcome, CaptureError> {
    Err(CaptureError::UnsupportedPlatform(format!(
        "{} (direct capture needs macOS or Windows)",
        std::env::consts::OS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_uses_the_portal() {
        assert_eq!(
            CapturePath::select("linux", true).unwrap(),
            CapturePath::Portal { interactive: true }
        );
    }

    #[test]
    fn macos_and_windows_grab_directly() {
        for os in ["macos", "windows"] {
            assert_eq!(
                CapturePath::select(os, false).unwrap(),
                CapturePath::Direct { interactive: false }
            );
        }
    }

    #[test]
    fn unknown_platform_fails_fast() {
        match CapturePath::select("freebsd", true) {
            Err(CaptureError::UnsupportedPlatform(os)) => assert_eq!(os, "freebsd"),
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
    }

    #[test]
    fn host_is_supported() {
        let path = CapturePath::for_host(true);
        if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
            assert!(path.is_ok());
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn direct_path_is_unavailable_on_linux() {
        let config = Config::new(false, std::env::temp_dir());
        let result = CapturePath::Direct { interactive: false }.run(&config);
        assert!(matches!(result, Err(CaptureError::UnsupportedPlatform(_))));
    }
}
