use std::collections::HashSet;

use log::debug;

use super::ChaosParams;
use crate::error::ChaosmarkError;
use crate::result::Result;

/// A pixel coordinate `(x, y)`.
pub type Position = (u32, u32);

/// Generates `count` pairwise distinct pixel positions.
///
/// The walk starts at `(x0, y0)`. Each step applies the cat map
/// `x' = (2x + y) mod width`, `y' = (x + y) mod height` a key-dependent number
/// of times, then shifts the coordinate by two logistic-map driven offsets in
/// `[-5, 4]`. Coordinates already visited are skipped but the walk continues
/// from them. When the logistic sequence (`4 * count` values) runs dry, the
/// remaining positions are taken in raster order (`y` outer, `x` inner).
///
/// The cat map uses one modulus per axis, so on non-square images it is not a
/// bijection. Existing artifacts depend on exactly this walk.
pub fn generate(
    x0: u32,
    y0: u32,
    key: u64,
    count: usize,
    width: u32,
    height: u32,
) -> Result<Vec<Position>> {
    let available = width as usize * height as usize;
    if count > available {
        return Err(ChaosmarkError::CapacityExceeded {
            required: count,
            available,
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }
    if x0 >= width || y0 >= height {
        return Err(ChaosmarkError::StartOutOfBounds {
            x: x0,
            y: y0,
            width,
            height,
        });
    }

    let params = ChaosParams::from_key(key);
    debug!(
        "chaos walk from ({x0}, {y0}) on {width}x{height}: r={}, logistic_x0={}, arnold_iterations={}",
        params.r, params.logistic_x0, params.arnold_iterations
    );

    let mut visited: HashSet<Position> = HashSet::with_capacity(count);
    let mut positions = Vec::with_capacity(count);
    visited.insert((x0, y0));
    positions.push((x0, y0));

    let sequence = logistic_sequence(params.r, params.logistic_x0, 4 * count);
    let (w, h) = (width as u64, height as u64);
    let (mut x, mut y) = (x0 as u64, y0 as u64);

    for pair in sequence.chunks_exact(2) {
        if positions.len() >= count {
            break;
        }
        for _ in 0..params.arnold_iterations {
            let next_x = (2 * x + y) % w;
            let next_y = (x + y) % h;
            x = next_x;
            y = next_y;
        }
        x = (x as i64 + offset(pair[0])).rem_euclid(w as i64) as u64;
        y = (y as i64 + offset(pair[1])).rem_euclid(h as i64) as u64;

        let candidate = (x as u32, y as u32);
        if visited.insert(candidate) {
            positions.push(candidate);
        }
    }

    if positions.len() < count {
        debug!(
            "chaos walk yielded {} of {count} positions, filling in raster order",
            positions.len()
        );
        'raster: for y in 0..height {
            for x in 0..width {
                if positions.len() >= count {
                    break 'raster;
                }
                if visited.insert((x, y)) {
                    positions.push((x, y));
                }
            }
        }
    }

    if positions.len() < count {
        return Err(ChaosmarkError::CapacityExceeded {
            required: count,
            available: positions.len(),
        });
    }

    Ok(positions)
}

/// `len` iterates of `x_{n+1} = r * x_n * (1 - x_n)`, beginning with `x_1`.
fn logistic_sequence(r: f64, x0: f64, len: usize) -> Vec<f64> {
    let mut x = x0;
    (0..len)
        .map(|_| {
            x = r * x * (1.0 - x);
            x
        })
        .collect()
}

/// Maps a logistic value in `[0, 1)` onto an offset in `[-5, 4]`.
fn offset(v: f64) -> i64 {
    ((v * 10.0).floor() as i64 - 5).clamp(-5, 4)
}
