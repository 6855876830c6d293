use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rgs_partitions::{
    AllPartitions, ExactPartitions, RangePartitions, RepairedExactPartitions, SmallAllPartitions,
};

fn bench_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("all");

    // 678570 partitions
    group.bench_function("vec_usize_11", |b| {
        b.iter(|| {
            let mut s = AllPartitions::first(11);
            while s.increment() {
                black_box(s.get());
            }
        })
    });

    group.bench_function("arrayvec_u8_11", |b| {
        b.iter(|| {
            let mut s = SmallAllPartitions::try_first(11).unwrap();
            while s.increment() {
                black_box(s.get());
            }
        })
    });
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact");

    // k close to n is where retrying visits the most rejected states
    for (n, k) in [(11, 5), (11, 9)] {
        group.bench_function(format!("retry_{}_{}", n, k), |b| {
            b.iter(|| {
                let mut s = ExactPartitions::first(n, k).unwrap();
                while s.increment() {
                    black_box(s.get());
                }
            })
        });

        group.bench_function(format!("repair_{}_{}", n, k), |b| {
            b.iter(|| {
                let mut s = RepairedExactPartitions::first(n, k).unwrap();
                while s.increment() {
                    black_box(s.get());
                }
            })
        });
    }
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");

    group.bench_function("11_4_6", |b| {
        b.iter(|| {
            let mut s = RangePartitions::first(11, 4, 6).unwrap();
            while s.increment() {
                black_box(s.get());
            }
        })
    });
}

criterion_group!(benches, bench_all, bench_exact, bench_range);
criterion_main!(benches);
