use criterion::{criterion_group, criterion_main, Criterion};
use chaosmark_core::chaos::{derive_key, generate};
use chaosmark_core::media::payload::bytes_to_bits;
use chaosmark_core::Carrier;
use image::{Rgb, RgbImage};

pub fn image_embedding(c: &mut Criterion) {
    let plain_image = RgbImage::from_fn(512, 512, |x, y| {
        Rgb([(x ^ y) as u8, (x * 3) as u8, (y * 5) as u8])
    });
    let bits = bytes_to_bits(&[0xA5; 1024]).expect("Cannot split payload into bits");
    let positions = generate(256, 256, derive_key("bench"), bits.len(), 512, 512)
        .expect("Cannot generate positions");

    c.bench_function("Image Embedding", |b| {
        let mut carrier = Carrier::from(plain_image.clone());

        b.iter(|| {
            carrier
                .embed_bits(&bits, &positions, 0)
                .expect("Cannot embed bits");
        })
    });

    c.bench_function("Image Extraction", |b| {
        let carrier = Carrier::from(plain_image.clone());

        b.iter(|| {
            carrier
                .extract_bits(&positions, 0)
                .expect("Cannot extract bits")
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
