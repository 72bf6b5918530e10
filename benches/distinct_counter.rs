use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use distinct_counter::{ExactCounter, HyperLogLog};

/// Insert and estimate operations are benchmarked against cardinalities
/// ranging from 0 to `MAX_CARDINALITY` with cardinality doubled with every
/// iteration as [0, 1, 2, ..., N].
const MAX_CARDINALITY: usize = 1 << 16;
const ERROR_RATE: f64 = 0.02;

criterion_group!(benches, benchmark);
criterion_main!(benches);

fn benchmark(c: &mut Criterion) {
    let cardinalities: Vec<usize> = std::iter::once(0)
        .chain((0..).map(|c| 1 << c))
        .take_while(|&c| c <= MAX_CARDINALITY)
        .collect();

    let mut group = c.benchmark_group("insert");
    for &cardinality in &cardinalities {
        let items = synthetic_addresses(cardinality);
        group.throughput(Throughput::Elements(cardinality.max(1) as u64));
        group.bench_with_input(
            BenchmarkId::new("hyperloglog", cardinality),
            &items,
            |b, items| {
                b.iter(|| {
                    let mut estimator: HyperLogLog = HyperLogLog::new(ERROR_RATE).unwrap();
                    for item in items {
                        estimator.insert(item);
                    }
                    black_box(estimator.estimate())
                })
            },
        );
        group.bench_with_input(BenchmarkId::new("exact", cardinality), &items, |b, items| {
            b.iter(|| {
                let mut counter = ExactCounter::new();
                for item in items {
                    counter.insert(item);
                }
                black_box(counter.count())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(1));
    for &cardinality in &cardinalities {
        let mut estimator: HyperLogLog = HyperLogLog::new(ERROR_RATE).unwrap();
        for item in &synthetic_addresses(cardinality) {
            estimator.insert(item);
        }
        group.bench_with_input(
            BenchmarkId::new("hyperloglog", cardinality),
            &estimator,
            |b, estimator| b.iter(|| black_box(estimator.estimate())),
        );
    }
    group.finish();
}

fn synthetic_addresses(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|_| {
            format!(
                "{}.{}.{}.{}",
                rng.gen::<u8>(),
                rng.gen::<u8>(),
                rng.gen::<u8>(),
                rng.gen::<u8>()
            )
        })
        .collect()
}
