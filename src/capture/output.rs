//! Output naming and PNG saving.
//!
//! Paths are `<dir>/screenshot-YYYYMMDD-HHMMSS.png`. Two saves in the same
//! second get the same path and the second one overwrites the first.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::{ImageFormat, RgbaImage};
use log::info;

use crate::constants::output;
use crate::error::CaptureError;

/// Output path for a save happening at `at` (local wall-clock time)
pub fn output_path(dir: &Path, at: NaiveDateTime) -> PathBuf {
    let stamp = at.format(output::TIMESTAMP_FORMAT);
    dir.join(format!("{}-{}.{}", output::FILE_PREFIX, stamp, output::EXTENSION))
}

/// Save `image` as PNG into `dir`, named after the current time.
pub fn save_image(image: &RgbaImage, dir: &Path) -> Result<PathBuf, CaptureError> {
    save_image_at(image, dir, Local::now().naive_local())
}

/// Save `image` as PNG into `dir`, named after `at`.
/// Creates `dir` if it does not exist.
pub fn save_image_at(
    image: &RgbaImage,
    dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, CaptureError> {
    std::fs::create_dir_all(dir).map_err(|source| CaptureError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = output_path(dir, at);
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| CaptureError::Encode {
            path: path.clone(),
            source,
        })?;

    info!(
        "Saved {}x{} screenshot to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn path_follows_naming_pattern() {
        let path = output_path(Path::new("/home/me/Pictures"), at(9, 5, 7, 0));
        assert_eq!(
            path,
            PathBuf::from("/home/me/Pictures/screenshot-20261019-090507.png")
        );
    }

    #[test]
    fn same_second_collides() {
        let dir = Path::new("/tmp/out");
        assert_eq!(output_path(dir, at(23, 59, 58, 10)), output_path(dir, at(23, 59, 58, 990)));
        assert_ne!(output_path(dir, at(23, 59, 58, 990)), output_path(dir, at(23, 59, 59, 0)));
    }
}
