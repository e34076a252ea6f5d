//! Content dependent start point for the position walk.
//!
//! The start point is the centre of the most textured square window of the
//! image, where texture is the sum of absolute horizontal and vertical first
//! differences of the grayscale image.

use image::{ImageBuffer, Pixel};

use crate::chaos::Position;

const MAX_WINDOW: u32 = 16;

/// Locates the centre of the window with the highest texture energy.
///
/// The result is clamped to `[1, dim - 2]` on both axes, so it never lies on
/// the image border. Ties are resolved in favour of the first window in
/// row-major order.
pub fn locate<P>(image: &ImageBuffer<P, Vec<u8>>) -> Position
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let window = MAX_WINDOW.min(width / 4).min(height / 4);
    if window == 0 {
        return (clamp_axis(width / 2, width), clamp_axis(height / 2, height));
    }

    let energy = texture_energy(image);
    let table = SummedArea::new(&energy, width as usize, height as usize);
    let stride = (window / 4).max(1) as usize;

    let mut best = (0, 0);
    let mut best_energy = f64::NEG_INFINITY;
    for y in (0..=(height - window)).step_by(stride) {
        for x in (0..=(width - window)).step_by(stride) {
            let e = table.window_sum(x as usize, y as usize, window as usize);
            if e > best_energy {
                best_energy = e;
                best = (x, y);
            }
        }
    }

    (
        clamp_axis(best.0 + window / 2, width),
        clamp_axis(best.1 + window / 2, height),
    )
}

fn clamp_axis(v: u32, dim: u32) -> u32 {
    if dim < 3 {
        v.min(dim.saturating_sub(1))
    } else {
        v.clamp(1, dim - 2)
    }
}

/// mean of the color channels, alpha is not part of the texture
fn grayscale<P>(image: &ImageBuffer<P, Vec<u8>>) -> Vec<f64>
where
    P: Pixel<Subpixel = u8>,
{
    let color_channels = match P::CHANNEL_COUNT {
        2 | 4 => P::CHANNEL_COUNT as usize - 1,
        n => n as usize,
    };
    image
        .pixels()
        .map(|p| {
            let sum: u32 = p.channels()[..color_channels]
                .iter()
                .map(|&c| c as u32)
                .sum();
            sum as f64 / color_channels as f64
        })
        .collect()
}

/// `|dx| + |dy|` per pixel, the last column and row repeat their neighbour
fn texture_energy<P>(image: &ImageBuffer<P, Vec<u8>>) -> Vec<f64>
where
    P: Pixel<Subpixel = u8>,
{
    let (w, h) = (image.width() as usize, image.height() as usize);
    let gray = grayscale(image);
    let at = |x: usize, y: usize| gray[y * w + x];

    let mut energy = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            let gx = if w < 2 {
                0.0
            } else {
                let x = x.min(w - 2);
                (at(x + 1, y) - at(x, y)).abs()
            };
            let gy = if h < 2 {
                0.0
            } else {
                let y = y.min(h - 2);
                (at(x, y + 1) - at(x, y)).abs()
            };
            energy[y * w + x] = gx + gy;
        }
    }
    energy
}

struct SummedArea {
    sums: Vec<f64>,
    stride: usize,
}

impl SummedArea {
    fn new(values: &[f64], width: usize, height: usize) -> Self {
        let stride = width + 1;
        let mut sums = vec![0.0; stride * (height + 1)];
        for y in 0..height {
            let mut row = 0.0;
            for x in 0..width {
                row += values[y * width + x];
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self { sums, stride }
    }

    fn window_sum(&self, x: usize, y: usize, size: usize) -> f64 {
        let at = |x: usize, y: usize| self.sums[y * self.stride + x];
        at(x + size, y + size) - at(x, y + size) - at(x + size, y) + at(x, y)
    }
}
