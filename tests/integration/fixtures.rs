use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Write a 100x100 single-color PNG.
pub fn solid(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(100, 100, Rgb(color))
        .save(&path)
        .unwrap();
    path
}

/// Write a 64x64 black and white checkerboard with `cell`-pixel squares.
pub fn checkerboard(dir: &Path, name: &str, cell: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(64, 64, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    img.save(&path).unwrap();
    path
}

/// Write bytes no decoder recognizes under an image extension.
pub fn corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not image data").unwrap();
    path
}
