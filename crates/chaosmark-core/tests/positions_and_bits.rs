use std::collections::HashSet;

use chaosmark_core::chaos::{derive_key, generate};
use chaosmark_core::media::payload::{bits_from_str, bits_to_string};
use chaosmark_core::{Carrier, ChaosmarkError};
use image::{Rgb, RgbImage};
use proptest::prelude::*;
use tempfile::tempdir;

fn patterned_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 31 + y * 7) as u8, (x * 3 + y * 17) as u8, (x ^ y) as u8])
    })
}

prop_compose! {
    fn image_and_start()(width in 1u32..=12, height in 1u32..=12)
        (x0 in 0..width, y0 in 0..height, width in Just(width), height in Just(height))
        -> (u32, u32, u32, u32) {
        (width, height, x0, y0)
    }
}

proptest! {
    #[test]
    fn positions_are_deterministic_and_distinct(
        (width, height, x0, y0) in image_and_start(),
        key in 0u64..=u32::MAX as u64,
        fill in 0.0f64..=1.0,
    ) {
        let count = ((width * height) as f64 * fill).floor() as usize;
        let first = generate(x0, y0, key, count, width, height).unwrap();
        let second = generate(x0, y0, key, count, width, height).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), count);
        let distinct: HashSet<_> = first.iter().collect();
        prop_assert_eq!(distinct.len(), count);
        prop_assert!(first.iter().all(|&(x, y)| x < width && y < height));
        if count > 0 {
            prop_assert_eq!(first[0], (x0, y0));
        }
    }

    #[test]
    fn bits_survive_embed_and_extract(
        (width, height, x0, y0) in image_and_start(),
        key in 0u64..=u32::MAX as u64,
        random_bits in prop::collection::vec(any::<bool>(), 144),
        fill in 0.0f64..=1.0,
        channel in 0u8..3,
    ) {
        let capacity = (width * height) as usize;
        let count = ((capacity as f64 * fill).ceil() as usize).clamp(1, capacity);
        let bits = random_bits[..count].to_vec();
        let positions = generate(x0, y0, key, bits.len(), width, height).unwrap();

        let mut carrier = Carrier::from(patterned_image(width, height));
        carrier.embed_bits(&bits, &positions, channel).unwrap();

        prop_assert_eq!(carrier.extract_bits(&positions, channel).unwrap(), bits);
    }
}

#[test]
fn capacity_boundary_is_exact() {
    let full = generate(2, 3, 99, 30, 6, 5).unwrap();
    assert_eq!(full.len(), 30);
    assert_eq!(full.iter().collect::<HashSet<_>>().len(), 30);

    assert!(matches!(
        generate(2, 3, 99, 31, 6, 5),
        Err(ChaosmarkError::CapacityExceeded {
            required: 31,
            available: 30
        })
    ));
}

#[test]
fn eight_bits_on_a_16x16_image_round_trip_through_a_file() {
    let dir = tempdir().unwrap();
    let original = patterned_image(16, 16);
    let bits = bits_from_str("10110011").unwrap();
    let key = derive_key("secret");

    let positions = generate(8, 8, key, bits.len(), 16, 16).unwrap();
    assert_eq!(positions.len(), 8);
    assert_eq!(positions[0], (8, 8));
    assert_eq!(positions.iter().collect::<HashSet<_>>().len(), 8);

    let mut carrier = Carrier::from(original.clone());
    carrier.embed_bits(&bits, &positions, 0).unwrap();

    let Carrier::Rgb(stego) = &carrier else {
        panic!("an RGB carrier stays RGB");
    };
    let mut changed_red = 0;
    for (a, b) in original.pixels().zip(stego.pixels()) {
        assert_eq!(a[0] >> 1, b[0] >> 1);
        assert_eq!((a[1], a[2]), (b[1], b[2]));
        if a[0] != b[0] {
            changed_red += 1;
        }
    }
    assert!(changed_red <= 8);

    let file = dir.path().join("stego.png");
    std::fs::write(&file, carrier.to_png_bytes().unwrap()).unwrap();
    let reloaded = Carrier::from_png_bytes(&std::fs::read(&file).unwrap()).unwrap();
    let unveiled = reloaded.extract_bits(&positions, 0).unwrap();
    assert_eq!(bits_to_string(&unveiled), "10110011");
}

#[test]
fn start_point_outside_the_image_is_rejected() {
    assert!(matches!(
        generate(16, 0, 1, 4, 16, 16),
        Err(ChaosmarkError::StartOutOfBounds { x: 16, y: 0, .. })
    ));
}
