//! Two-part image fingerprints.
//!
//! A [`Fingerprint`] pairs a structural pHash with a color-distribution
//! hash. Two images are duplicates only when both halves match exactly;
//! there is no distance or tolerance.

use std::fmt;
use std::path::Path;

use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::{color, decode, FileFailure};

/// Width and height of the pHash grid (64 bits total).
pub const STRUCTURAL_HASH_SIZE: u32 = 8;

/// Composite duplicate key: structural hash plus color hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    structural: u64,
    color: u64,
}

impl Fingerprint {
    /// Build a fingerprint from its two components.
    #[must_use]
    pub const fn new(structural: u64, color: u64) -> Self {
        Self { structural, color }
    }

    /// The pHash half.
    #[must_use]
    pub const fn structural(&self) -> u64 {
        self.structural
    }

    /// The color-distribution half.
    #[must_use]
    pub const fn color(&self) -> u64 {
        self.color
    }

    /// Structural hash as 16 lowercase hex digits.
    #[must_use]
    pub fn structural_hex(&self) -> String {
        format!("{:016x}", self.structural)
    }

    /// Color hash as 16 lowercase hex digits.
    #[must_use]
    pub fn color_hex(&self) -> String {
        format!("{:016x}", self.color)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}:{:016x}", self.structural, self.color)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Fingerprint", 2)?;
        state.serialize_field("structural", &self.structural_hex())?;
        state.serialize_field("color", &self.color_hex())?;
        state.end()
    }
}

/// Computes [`Fingerprint`]s for decoded images.
///
/// Holds only the configured pHash hasher; safe to share across workers.
pub struct Fingerprinter {
    hasher: image_hasher::Hasher,
}

impl Fingerprinter {
    /// Create a fingerprinter using an 8x8 DCT median hash.
    #[must_use]
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_size(STRUCTURAL_HASH_SIZE, STRUCTURAL_HASH_SIZE)
            .hash_alg(HashAlg::Median)
            .preproc_dct()
            .to_hasher();
        Self { hasher }
    }

    /// Fingerprint an already decoded image.
    #[must_use]
    pub fn fingerprint(&self, image: &DynamicImage) -> Fingerprint {
        Fingerprint::new(self.structural_hash(image), color::color_hash(image))
    }

    /// Compute only the structural half.
    #[must_use]
    pub fn structural_hash(&self, image: &DynamicImage) -> u64 {
        let hash = self.hasher.hash_image(image);
        hash.as_bytes()
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
    }

    /// Decode the file at `path` and fingerprint it.
    ///
    /// # Errors
    ///
    /// Returns the classified [`FileFailure`] from decoding.
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, FileFailure> {
        let image = decode::decode_image(path)?;
        Ok(self.fingerprint(&image))
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
