use image::{ImageBuffer, Pixel};
use log::warn;

use crate::chaos::Position;
use crate::error::ChaosmarkError;
use crate::media::primitives::{HideBit, UnveilBit};
use crate::result::Result;

/// Places single bits into the least significant bit of one color channel,
/// at caller supplied pixel positions.
pub struct LsbCodec;

impl LsbCodec {
    /// Writes `bits[i]` into `positions[i]` on the given channel.
    ///
    /// Nothing is modified unless every used position lies inside the image
    /// and the channel exists. Only the designated channel's LSB changes.
    pub fn embed<P>(
        image: &mut ImageBuffer<P, Vec<u8>>,
        bits: &[bool],
        positions: &[Position],
        channel: u8,
    ) -> Result<()>
    where
        P: Pixel<Subpixel = u8>,
    {
        ensure_channel::<P>(channel)?;
        if positions.len() < bits.len() {
            return Err(ChaosmarkError::NotEnoughPositions {
                bits: bits.len(),
                positions: positions.len(),
            });
        }

        let (width, height) = image.dimensions();
        if let Some(&(x, y)) = positions[..bits.len()]
            .iter()
            .find(|(x, y)| *x >= width || *y >= height)
        {
            return Err(ChaosmarkError::PositionOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        for (&bit, &(x, y)) in bits.iter().zip(positions) {
            let sample = &mut image.get_pixel_mut(x, y).channels_mut()[channel as usize];
            sample.hide_bit(bit);
        }

        Ok(())
    }

    /// Reads one bit per position from the given channel.
    ///
    /// Positions outside of the image yield `false`.
    pub fn extract<P>(
        image: &ImageBuffer<P, Vec<u8>>,
        positions: &[Position],
        channel: u8,
    ) -> Result<Vec<bool>>
    where
        P: Pixel<Subpixel = u8>,
    {
        ensure_channel::<P>(channel)?;
        let (width, height) = image.dimensions();

        Ok(positions
            .iter()
            .map(|&(x, y)| {
                if x < width && y < height {
                    image.get_pixel(x, y).channels()[channel as usize].unveil_bit()
                } else {
                    warn!("position ({x}, {y}) is outside of the image, reading 0");
                    false
                }
            })
            .collect())
    }
}

fn ensure_channel<P: Pixel>(channel: u8) -> Result<()> {
    if channel >= P::CHANNEL_COUNT {
        return Err(ChaosmarkError::InvalidChannel {
            channel,
            channels: P::CHANNEL_COUNT,
        });
    }
    Ok(())
}
