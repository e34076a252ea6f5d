use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::error;

use crate::chaos::Position;
use crate::error::ChaosmarkError;
use crate::media::image::{feature_point, LsbCodec};
use crate::result::Result;

/// a carrier image for steganography, always 8 bit per channel
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Carrier {
    /// Decodes a PNG byte stream.
    ///
    /// 8 bit RGB and RGBA are kept as they are, palette images arrive as one
    /// of those from the decoder. 8 bit gray and gray with alpha are widened
    /// to RGBA, so the output of an embed is RGBA for them. Deeper samples
    /// (16 bit, float) are `UnsupportedMedia`.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
            error!("Error decoding image: {e}");
            ChaosmarkError::InvalidImageMedia
        })?;

        Ok(match image {
            DynamicImage::ImageRgb8(i) => Self::Rgb(i),
            DynamicImage::ImageRgba8(i) => Self::Rgba(i),
            other @ (DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_)) => {
                Self::Rgba(other.to_rgba8())
            }
            other => {
                error!("Unsupported sample layout {:?}", other.color());
                return Err(ChaosmarkError::UnsupportedMedia);
            }
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Carrier::Rgb(i) => i.dimensions(),
            Carrier::Rgba(i) => i.dimensions(),
        }
    }

    pub fn channel_count(&self) -> u8 {
        match self {
            Carrier::Rgb(_) => 3,
            Carrier::Rgba(_) => 4,
        }
    }

    /// Start point derived from the image texture
    pub fn feature_point(&self) -> Position {
        match self {
            Carrier::Rgb(i) => feature_point::locate(i),
            Carrier::Rgba(i) => feature_point::locate(i),
        }
    }

    pub fn embed_bits(&mut self, bits: &[bool], positions: &[Position], channel: u8) -> Result<()> {
        match self {
            Carrier::Rgb(i) => LsbCodec::embed(i, bits, positions, channel),
            Carrier::Rgba(i) => LsbCodec::embed(i, bits, positions, channel),
        }
    }

    pub fn extract_bits(&self, positions: &[Position], channel: u8) -> Result<Vec<bool>> {
        match self {
            Carrier::Rgb(i) => LsbCodec::extract(i, positions, channel),
            Carrier::Rgba(i) => LsbCodec::extract(i, positions, channel),
        }
    }

    /// Encodes the carrier as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        match self {
            Carrier::Rgb(i) => i.write_to(&mut buf, ImageFormat::Png),
            Carrier::Rgba(i) => i.write_to(&mut buf, ImageFormat::Png),
        }
        .map_err(|e| {
            error!("Error saving image: {e}");
            ChaosmarkError::ImageEncodingError
        })?;

        Ok(buf.into_inner())
    }
}

impl From<RgbImage> for Carrier {
    fn from(image: RgbImage) -> Self {
        Self::Rgb(image)
    }
}

impl From<RgbaImage> for Carrier {
    fn from(image: RgbaImage) -> Self {
        Self::Rgba(image)
    }
}
