// error.rs - Capture Errors
//
// Every failure of a run ends up as one of these. None are retried.

use std::path::PathBuf;

use crate::capture::portal::PortalStatus;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No D-Bus session bus ({0}). Is xdg-desktop-portal running?")]
    NoDisplayBus(String),

    #[error("Screenshot portal rejected the request: {0}")]
    PortalCallRejected(String),

    #[error("Screenshot portal: {status}")]
    PortalResponseError { status: PortalStatus },

    #[error("Screenshot portal reported success but returned no file URI")]
    PortalMissingUri,

    #[error("No primary screen found")]
    NoPrimaryScreen,

    #[error("Screen grab failed: {0} (macOS: grant Screen Recording permission to your terminal, then restart it)")]
    CaptureFailed(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Region selector failed: {0}")]
    Overlay(String),

    #[error("Failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl CaptureError {
    /// True when the user dismissed the portal dialog
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            CaptureError::PortalResponseError {
                status: PortalStatus::Cancelled
            }
        )
    }
}
