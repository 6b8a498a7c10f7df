//! Benchmarks for the progression hot paths: accrual, offline resolution,
//! purchase and prestige.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use idlekit_bench::{synthetic_catalog, synthetic_player};
use idlekit_core::{GameTime, UpgradeId};
use idlekit_ledger::{effective_cps_for, ProgressionLedger};
use idlekit_time::resolve_offline;

fn bench_accrual(c: &mut Criterion) {
    let mut group = c.benchmark_group("accrual");

    for size in [8u64, 64, 512] {
        let catalog = synthetic_catalog(size);
        let state = synthetic_player(&catalog, size as usize, 0.0);

        group.bench_with_input(BenchmarkId::new("effective_cps", size), &size, |b, _| {
            b.iter(|| effective_cps_for(black_box(&catalog), black_box(&state)))
        });
    }
    group.finish();
}

fn bench_offline(c: &mut Criterion) {
    let last = GameTime::from_secs(1_000_000);
    let now = GameTime::from_secs(1_086_400);

    c.bench_function("offline/resolve_day_gap", |b| {
        b.iter(|| resolve_offline(black_box(last), black_box(now), black_box(123.5)))
    });
}

fn bench_ledger_ops(c: &mut Criterion) {
    let catalog = synthetic_catalog(64);
    let ledger = ProgressionLedger::new(catalog.clone());
    let now = GameTime::from_secs(2_000_000);

    c.bench_function("ledger/purchase", |b| {
        b.iter_batched(
            || synthetic_player(&catalog, 32, 1e12),
            |mut state| ledger.purchase_upgrade(&mut state, UpgradeId::new(40), now),
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("ledger/prestige", |b| {
        b.iter_batched(
            || synthetic_player(&catalog, 32, 250_000.0),
            |mut state| ledger.prestige(&mut state, now),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_accrual, bench_offline, bench_ledger_ops);
criterion_main!(benches);
