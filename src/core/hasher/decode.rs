//! Image file loading for callers that start from a path.
//!
//! Decoding is not part of the hashing pipeline; this is a thin wrapper over
//! the image crate so the CLI and tests have one place that maps its errors.

use crate::error::{PhashError, Result};
use image::{DynamicImage, ImageError};
use std::path::Path;

/// Decode the image at `path`, guessing the format from its contents
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let reader = image::ImageReader::open(path).map_err(|e| PhashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = reader.with_guessed_format().map_err(|e| PhashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    reader.decode().map_err(|e| match e {
        ImageError::IoError(source) => PhashError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => PhashError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_io_error() {
        let result = open_image(Path::new("/nonexistent/photo.png"));
        assert!(matches!(result, Err(PhashError::Io { .. })));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"this is not a valid image file").unwrap();
        drop(file);

        let result = open_image(&path);
        assert!(matches!(result, Err(PhashError::Decode { .. })));
    }

    #[test]
    fn png_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::from_pixel(5, 3, image::Rgb([9, 8, 7]))
            .save(&path)
            .unwrap();

        let decoded = open_image(&path).unwrap();
        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 3);
    }
}
