//! Color-distribution hash.
//!
//! The structural pHash only sees luminance, so two solid images of
//! different colors can hash identically. This module adds a compact summary
//! of the color distribution:
//!
//! | slot  | value                                        |
//! |-------|----------------------------------------------|
//! | 0     | fraction of black pixels                     |
//! | 1     | fraction of gray (unsaturated) pixels        |
//! | 2..8  | hue histogram of faint colors (6 bins)       |
//! | 8..14 | hue histogram of bright colors (6 bins)      |
//!
//! Each slot is quantized to [`BIN_BITS`] bits and packed MSB-first, giving a
//! 42-bit signature in the low bits of a `u64`. Hue bins are relative to the
//! number of colored (non-black, non-gray) pixels.

use image::DynamicImage;

/// Bits per quantized slot.
pub const BIN_BITS: u32 = 3;

/// Number of hue bins per saturation class.
pub const HUE_BINS: usize = 6;

/// Number of significant bits in a color hash.
pub const COLOR_HASH_BITS: u32 = (2 + 2 * HUE_BINS as u32) * BIN_BITS;

/// Pixels darker than this count as black.
const BLACK_LUMA: u8 = 32;
/// Non-black pixels less saturated than this count as gray.
const GRAY_SATURATION: u8 = 85;
/// Splits colored pixels into faint (below) and bright (above).
const BRIGHT_SATURATION: u8 = 170;

/// Compute the color-distribution hash of an image.
///
/// Total over any decoded image; an empty image hashes to `0`.
#[must_use]
pub fn color_hash(image: &DynamicImage) -> u64 {
    let rgb = image.to_rgb8();
    let total = u64::from(rgb.width()) * u64::from(rgb.height());

    let mut black = 0u64;
    let mut gray = 0u64;
    let mut colored = 0u64;
    let mut faint = [0u64; HUE_BINS];
    let mut bright = [0u64; HUE_BINS];

    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        if luma(r, g, b) < BLACK_LUMA {
            black += 1;
            continue;
        }
        let (hue, saturation) = hue_saturation(r, g, b);
        if saturation < GRAY_SATURATION {
            gray += 1;
            continue;
        }
        colored += 1;
        let bin = hue_bin(hue);
        // Saturation exactly on the split lands in neither histogram.
        if saturation < BRIGHT_SATURATION {
            faint[bin] += 1;
        } else if saturation > BRIGHT_SATURATION {
            bright[bin] += 1;
        }
    }

    let total = total.max(1);
    let colored = colored.max(1);

    let mut hash = 0u64;
    let slots = [quantize(black, total), quantize(gray, total)]
        .into_iter()
        .chain(faint.iter().map(|&n| quantize(n, colored)))
        .chain(bright.iter().map(|&n| quantize(n, colored)));
    for slot in slots {
        hash = (hash << BIN_BITS) | slot;
    }
    hash
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounded to nearest.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16;
    l.min(255) as u8
}

/// Hue and saturation, both scaled to `0..=255`.
fn hue_saturation(r: u8, g: u8, b: u8) -> (u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0, 0);
    }

    let chroma = f32::from(max - min);
    let saturation = chroma / f32::from(max);
    let rc = f32::from(max - r) / chroma;
    let gc = f32::from(max - g) / chroma;
    let bc = f32::from(max - b) / chroma;

    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (h / 6.0 + 1.0) % 1.0;

    (to_byte(h), to_byte(saturation))
}

fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).clamp(0.0, 255.0) as u8
}

/// Equal-width bins over `0..=255`; the top edge belongs to the last bin.
fn hue_bin(hue: u8) -> usize {
    (usize::from(hue) * HUE_BINS / 255).min(HUE_BINS - 1)
}

fn quantize(count: u64, of: u64) -> u64 {
    let max = (1u64 << BIN_BITS) - 1;
    (count * (1 << BIN_BITS) / of).min(max)
}
