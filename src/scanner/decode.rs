//! Image decoding with classified failures.
//!
//! Wraps the `image` crate so that every way a file can fail to become a
//! pixel grid maps onto a [`FileErrorKind`].

use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};

use super::{FileErrorKind, FileFailure};

/// Open and decode the image at `path`.
///
/// The format is guessed from the file contents, not the extension.
///
/// # Errors
///
/// Returns a [`FileFailure`] classified as:
/// - `FileAccess` if the file is missing or unreadable due to permissions
/// - `UnreadableImage` if the bytes are not a supported, well-formed image,
///   including streams that end early
/// - `Unexpected` for anything else (decoder limits, other I/O errors)
pub fn decode_image(path: &Path) -> Result<DynamicImage, FileFailure> {
    let reader = ImageReader::open(path)
        .map_err(|e| FileFailure::from_io(path, &e))?
        .with_guessed_format()
        .map_err(|e| FileFailure::from_io(path, &e))?;

    reader.decode().map_err(|e| classify_image_error(path, e))
}

fn classify_image_error(path: &Path, err: ImageError) -> FileFailure {
    match err {
        ImageError::Decoding(_) | ImageError::Unsupported(_) => {
            FileFailure::new(path, FileErrorKind::UnreadableImage, err.to_string())
        }
        // Decoders report truncated or garbled streams as I/O errors
        ImageError::IoError(ref io_err)
            if matches!(
                io_err.kind(),
                std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData
            ) =>
        {
            FileFailure::new(path, FileErrorKind::UnreadableImage, err.to_string())
        }
        ImageError::IoError(ref io_err) => FileFailure::from_io(path, io_err),
        _ => FileFailure::new(path, FileErrorKind::Unexpected, err.to_string()),
    }
}
