use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tonbo_runtime_filter::{ColumnType, FilterOptions, MinMaxFilter, RuntimeFilter, ValueRef};

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for len in [1_024usize, 65_536] {
        let mut rng = fastrand::Rng::with_seed(7);
        let values: Vec<i64> = (0..len).map(|_| rng.i64(..)).collect();

        group.bench_with_input(BenchmarkId::new("typed", len), &values, |b, values| {
            b.iter(|| {
                let mut filter = MinMaxFilter::new();
                for value in values {
                    filter.insert(Some(*value));
                }
                black_box(filter)
            })
        });
        group.bench_with_input(BenchmarkId::new("runtime", len), &values, |b, values| {
            let options = FilterOptions::default();
            b.iter(|| {
                let mut filter = RuntimeFilter::new(&ColumnType::Int64, &options);
                for value in values {
                    filter.insert(Some(ValueRef::Int64(*value)));
                }
                black_box(filter)
            })
        });
    }
    group.finish();
}

fn eval(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(11);
    let ranges: Vec<(i32, i32)> = (0..4_096)
        .map(|_| {
            let (a, b) = (rng.i32(..), rng.i32(..));
            (a.min(b), a.max(b))
        })
        .collect();
    let filter = MinMaxFilter::from_range(-1_000_000i64, 1_000_000);
    let runtime = {
        let mut filter = RuntimeFilter::new(&ColumnType::Int64, &FilterOptions::default());
        filter.insert(Some(ValueRef::Int64(-1_000_000)));
        filter.insert(Some(ValueRef::Int64(1_000_000)));
        filter
    };

    c.bench_function("eval_overlap/cast_int", |b| {
        b.iter(|| {
            ranges
                .iter()
                .filter(|(lo, hi)| {
                    filter.eval_overlap_int(
                        tonbo_runtime_filter::IntKind::Int32,
                        *lo as i64,
                        *hi as i64,
                    )
                })
                .count()
        })
    });
    c.bench_function("eval_overlap/runtime", |b| {
        b.iter(|| {
            ranges
                .iter()
                .filter(|(lo, hi)| {
                    runtime.eval_overlap(
                        &ColumnType::Int32,
                        ValueRef::Int32(*lo),
                        ValueRef::Int32(*hi),
                    )
                })
                .count()
        })
    });
    c.bench_function("compute_overlap_ratio/runtime", |b| {
        b.iter(|| {
            ranges
                .iter()
                .map(|(lo, hi)| {
                    runtime.compute_overlap_ratio(
                        &ColumnType::Int32,
                        ValueRef::Int32(*lo),
                        ValueRef::Int32(*hi),
                    )
                })
                .sum::<f32>()
        })
    });
}

fn merge(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(13);
    let partials: Vec<MinMaxFilter<i64>> = (0..256)
        .map(|_| {
            let (a, b) = (rng.i64(..), rng.i64(..));
            MinMaxFilter::from_range(a.min(b), a.max(b))
        })
        .collect();
    let messages: Vec<_> = partials.iter().map(MinMaxFilter::to_message).collect();

    c.bench_function("merge/filter", |b| {
        b.iter(|| {
            let mut merged = MinMaxFilter::new();
            for partial in &partials {
                merged.or(partial);
            }
            black_box(merged)
        })
    });
    c.bench_function("merge/message", |b| {
        b.iter(|| {
            let mut merged = tonbo_runtime_filter::FilterMessage::bottom();
            for message in &messages {
                merged.or_into(message, &ColumnType::Int64);
            }
            black_box(merged)
        })
    });
}

criterion_group!(benches, insert, eval, merge);
criterion_main!(benches);
