// app/config.rs - Run Configuration
//
// Built once in main and handed to the capture dispatcher.

use std::path::PathBuf;

use crate::constants::output;

/// Capture interactively unless told otherwise
pub const INTERACTIVE_DEFAULT: bool = true;

/// Settings for a single screenshot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Let the user pick a region (overlay or portal dialog) instead of
    /// grabbing the whole screen silently
    pub interactive: bool,
    /// Where the direct capture path writes its PNG files
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interactive: INTERACTIVE_DEFAULT,
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    pub fn new(interactive: bool, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            interactive,
            output_dir: output_dir.into(),
        }
    }
}

/// `~/Pictures`, or `./Pictures` when there is no home directory
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(output::DEFAULT_DIR_NAME)
}
