use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stegano_dwt::{BlockTransform, DwtDecoder, DwtEncoder, Raster, StegoConfig};

fn gradient(width: u32, height: u32) -> Raster {
    let samples = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) * 255 / (width + height - 2)) as u8))
        .collect();
    Raster::new(width, height, 255, samples).expect("Cannot build cover raster")
}

pub fn block_transform(c: &mut Criterion) {
    c.bench_function("Haar 8x8 forward + inverse", |b| {
        let mut transform = BlockTransform::new(8).expect("Cannot build transform");
        let mut block: Vec<f64> = (0..64).map(|i| (i * 3 % 256) as f64).collect();

        b.iter(|| {
            transform.forward(black_box(&mut block));
            transform.inverse(black_box(&mut block));
        })
    });
}

pub fn embed_extract(c: &mut Criterion) {
    let cover = gradient(512, 512);
    let secret = Raster::new(63, 64, 255, (0..4032).map(|i| (i % 251) as u8).collect())
        .expect("Cannot build secret raster");
    let config = StegoConfig::default().with_random_blocks(true).with_seed(42);

    c.bench_function("DWT Embedding", |b| {
        let encoder = DwtEncoder::new(config.clone());
        b.iter(|| {
            encoder
                .embed(black_box(&cover), black_box(&secret))
                .expect("Cannot embed secret")
        })
    });

    let stego = DwtEncoder::new(config.clone())
        .embed(&cover, &secret)
        .expect("Cannot embed secret");
    c.bench_function("DWT Extraction", |b| {
        let decoder = DwtDecoder::new(config.clone());
        b.iter(|| {
            decoder
                .extract(black_box(&stego), None)
                .expect("Cannot extract secret")
        })
    });
}

criterion_group!(benches, block_transform, embed_extract);
criterion_main!(benches);
