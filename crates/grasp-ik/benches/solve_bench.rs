//! Criterion benchmarks for the per-branch solver and the searching policies.
//!
//! - `solve`: one branch, derived vs. pinned pitch.
//! - `select`: `closest_to` and `preferred_pitch` over all eight branches.
//!
//! Targets come from `sampling` so every run sees the same reachable poses.
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grasp_ik::api::{
    closest_to, draw_batch, preferred_pitch, solve, BranchSpace, KinematicModel, SampleCfg,
};

fn bench_solve(c: &mut Criterion) {
    let m = KinematicModel::default();
    let samples = draw_batch(&m, SampleCfg::default(), 42, 256);
    let mut group = c.benchmark_group("solve");
    for (label, pitch) in [("derived", None), ("pinned", Some(-0.8))] {
        group.bench_function(BenchmarkId::new("single_branch", label), |b| {
            let mut i = 0usize;
            b.iter(|| {
                let s = &samples[i % samples.len()];
                i = i.wrapping_add(1);
                black_box(solve(&m, s.branch, black_box(&s.target), pitch))
            })
        });
    }
    group.bench_function(BenchmarkId::new("all_branches", "derived"), |b| {
        let mut i = 0usize;
        b.iter(|| {
            let s = &samples[i % samples.len()];
            i = i.wrapping_add(1);
            for branch in BranchSpace::ALL {
                black_box(solve(&m, branch, black_box(&s.target), None));
            }
        })
    });
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let m = KinematicModel::default();
    let samples = draw_batch(&m, SampleCfg::default(), 7, 256);
    let reference = m.limits().center();
    let mut group = c.benchmark_group("select");
    group.bench_function("closest_to", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let s = &samples[i % samples.len()];
            i = i.wrapping_add(1);
            black_box(closest_to(&m, &reference, black_box(&s.target)))
        })
    });
    group.bench_function("preferred_pitch", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let s = &samples[i % samples.len()];
            i = i.wrapping_add(1);
            black_box(preferred_pitch(&m, -1.0, black_box(&s.target)))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_solve, bench_select);
criterion_main!(benches);
