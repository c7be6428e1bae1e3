//! regionshot - Screenshot Library
//!
//! Captures the primary screen or a user-dragged region. Linux goes through
//! the xdg-desktop-portal Screenshot interface; macOS and Windows grab the
//! screen directly and show a selection overlay.

pub mod app;
pub mod capture;
pub mod constants;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod ui;

// Re-export commonly used types
pub use app::Config;
pub use capture::{CaptureOutcome, CaptureRect, DevicePixelRatio, Point};
pub use error::CaptureError;
pub use platform::{capture, CapturePath};
