//! Chaos-keyed position selection.
//!
//! A [`ChaosSeed`] alone (plus the image dimensions) determines every pixel
//! position that carries a payload bit. The key is derived from a user secret
//! with [`derive_key`], the start point is either given explicitly or taken
//! from [`crate::media::image::feature_point::locate`].
//!
//! The maps are a deterministic shuffler, not a CSPRNG.

mod positions;

pub use positions::{generate, Position};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Tag written into the metadata for the cat-map plus logistic-map walk.
pub const ALGORITHM_ARNOLD_LOGISTIC: &str = "arnold_logistic";

/// Version of the position walk.
pub const CHAOS_VERSION: &str = "1.0";

/// Derives the chaos key from a secret: the first 32 bits of SHA-256, big-endian.
pub fn derive_key(secret: &str) -> u64 {
    let digest = Sha256::digest(secret.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as u64
}

/// Everything the position walk depends on, apart from the image dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosSeed {
    pub x0: u32,
    pub y0: u32,
    pub key: u64,
    #[serde(rename = "algorithm")]
    pub algorithm_tag: String,
    pub version: String,
}

impl ChaosSeed {
    pub fn new(x0: u32, y0: u32, key: u64) -> Self {
        Self {
            x0,
            y0,
            key,
            algorithm_tag: ALGORITHM_ARNOLD_LOGISTIC.to_string(),
            version: CHAOS_VERSION.to_string(),
        }
    }

    /// Same start point and tags, different key.
    pub fn with_key(&self, key: u64) -> Self {
        Self {
            key,
            ..self.clone()
        }
    }

    /// Regenerates the position sequence for an image of the given size.
    pub fn positions(&self, count: usize, width: u32, height: u32) -> crate::Result<Vec<Position>> {
        generate(self.x0, self.y0, self.key, count, width, height)
    }
}

/// Tuning constants of the walk, all derived from the key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosParams {
    /// logistic map rate, within `[3.7, 3.8)`
    pub r: f64,
    /// logistic map start value, within `[0, 1)`
    pub logistic_x0: f64,
    /// cat-map applications per step, within `1..=10`
    pub arnold_iterations: u32,
}

impl ChaosParams {
    pub fn from_key(key: u64) -> Self {
        Self {
            r: 3.7 + (key % 1000) as f64 / 10000.0,
            logistic_x0: (key % 10000) as f64 / 10000.0,
            arnold_iterations: ((key / 10000) % 10) as u32 + 1,
        }
    }
}
