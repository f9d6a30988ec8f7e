use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricebook::{
    convert::{convert, ConversionQuery},
    index::LatestPriceIndex,
    observation::PriceObservation,
};

fn sample_feed(records: usize, currencies: usize) -> Vec<PriceObservation> {
    let start = Utc::now();
    (0..records)
        .map(|i| {
            PriceObservation::new(
                format!("CUR{:03}", i % currencies),
                1.0 + (i % 997) as f64 * 0.01,
                start + Duration::seconds(i as i64),
            )
        })
        .collect()
}

fn benchmark_build_index(c: &mut Criterion) {
    let feed = sample_feed(10_000, 100);

    c.bench_function("build_index_10k", |b| {
        b.iter(|| {
            let index = LatestPriceIndex::from_observations(black_box(feed.clone()));
            black_box(index.len())
        });
    });
}

fn benchmark_convert(c: &mut Criterion) {
    let index = LatestPriceIndex::from_observations(sample_feed(10_000, 100));

    c.bench_function("convert_1000", |b| {
        b.iter(|| {
            for i in 0..1000usize {
                let query = ConversionQuery::new(
                    format!("CUR{:03}", i % 100),
                    format!("CUR{:03}", (i + 7) % 100),
                    black_box(125.5),
                );
                let _ = black_box(convert(&index, &query));
            }
        });
    });
}

fn benchmark_available_currencies(c: &mut Criterion) {
    let index = LatestPriceIndex::from_observations(sample_feed(10_000, 1_000));

    c.bench_function("available_currencies_1k", |b| {
        b.iter(|| black_box(index.available_currencies()));
    });
}

criterion_group!(
    benches,
    benchmark_build_index,
    benchmark_convert,
    benchmark_available_currencies
);
criterion_main!(benches);
