use criterion::{criterion_group, criterion_main, Criterion};
use rusterimg::{pack_dataset, ColorRole, MemoryDataset, ReadOptions, SampleType};

const SIZE: (usize, usize) = (1024, 1024);

fn rgb_dataset(sample_type: SampleType) -> MemoryDataset {
    let samples: Vec<f64> = (0..SIZE.0 * SIZE.1).map(|idx| (idx % 251) as f64).collect();
    [ColorRole::Red, ColorRole::Green, ColorRole::Blue]
        .into_iter()
        .fold(MemoryDataset::new(SIZE.0, SIZE.1), |dataset, role| {
            dataset.with_band(sample_type.clone(), role, samples.clone())
        })
}

fn bench_pack_rgba(c: &mut Criterion) {
    let dataset = rgb_dataset(SampleType::UInt8);
    let options = ReadOptions::default();
    c.bench_function("pack_rgb_to_rgba_u8", |b| {
        b.iter(|| pack_dataset(&dataset, "bench", &options).unwrap())
    });
}

fn bench_pack_rgb(c: &mut Criterion) {
    let dataset = rgb_dataset(SampleType::Float32);
    let options = ReadOptions::default().with_rgb_to_rgba(false);
    c.bench_function("pack_rgb_f32", |b| {
        b.iter(|| pack_dataset(&dataset, "bench", &options).unwrap())
    });
}

criterion_group!(benches, bench_pack_rgba, bench_pack_rgb);
criterion_main!(benches);
