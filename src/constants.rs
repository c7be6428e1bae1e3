// constants.rs - Application-wide Constants
//
// Centralized constants for overlay colors, portal names and output naming.

/// Region selector overlay colors (RGBA, 0.0..=1.0, premultiplied)
pub mod colors {
    /// Dimming layer over everything outside the selection (black, alpha 80/255)
    pub const DIM: [f32; 4] = [0.0, 0.0, 0.0, 80.0 / 255.0];
    /// Selection outline
    pub const OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Region selector overlay geometry
pub mod overlay {
    /// Outline stroke width in logical pixels
    pub const OUTLINE_WIDTH: f32 = 2.0;
    /// Overlay size used when no monitor can be queried
    pub const FALLBACK_WIDTH: u32 = 1920;
    pub const FALLBACK_HEIGHT: u32 = 1080;
    /// Window title (never shown, the overlay is frameless)
    pub const TITLE: &str = "regionshot selection";
}

/// xdg-desktop-portal names
pub mod portal {
    pub const DESTINATION: &str = "org.freedesktop.portal.Desktop";
    pub const PATH: &str = "/org/freedesktop/portal/desktop";
    pub const SCREENSHOT_INTERFACE: &str = "org.freedesktop.portal.Screenshot";
    pub const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";
    pub const SCREENSHOT_METHOD: &str = "Screenshot";
    pub const RESPONSE_SIGNAL: &str = "Response";
    /// Prefix of request object paths: `<prefix>/<sender>/<token>`
    pub const REQUEST_PATH_PREFIX: &str = "/org/freedesktop/portal/desktop/request";
}

/// Output file naming
pub mod output {
    /// Folder under the home directory used by default
    pub const DEFAULT_DIR_NAME: &str = "Pictures";
    pub const FILE_PREFIX: &str = "screenshot";
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
    pub const EXTENSION: &str = "png";
}
