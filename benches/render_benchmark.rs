/// Benchmark module for the spiral layout and rendering pipeline.
/// Measures projection, visual encoding and full bitmap rendering.
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitspiral::plotting::{encode, plan, render, RadiusCurve, ScaleConstants, SpiralProjector};
use gitspiral::{DayStat, ReferenceConstants, ReleaseTier, RenderConfig};

/// Ten years of daily activity with a release every 90 days
fn synthetic_days() -> Vec<DayStat> {
    let start = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap();
    (0..3650)
        .map(|i| DayStat {
            date: start + Duration::days(i),
            lines_added: ((i * 37) % 30_000) as u64,
            lines_removed: ((i * 53) % 12_000) as u64,
            is_root_commit_day: i == 0,
            release_tier: if i % 90 == 0 { ReleaseTier::Minor } else { ReleaseTier::None },
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let days = synthetic_days();
    let start = days[0].date;
    let end = days[days.len() - 1].date;

    let mut group = c.benchmark_group("layout");

    group.bench_function("project_all_days", |b| {
        let projector = SpiralProjector::new(2800, 365, start, end).unwrap();
        b.iter(|| {
            for day in &days {
                black_box(projector.project(day.date));
            }
        })
    });

    group.bench_function("encode_all_days", |b| {
        let scale = ScaleConstants::create(2800, &ReferenceConstants::default()).unwrap();
        let curve = RadiusCurve::from_breakpoints(&scale.breakpoints).unwrap();
        b.iter(|| {
            for day in &days {
                black_box(encode(day, &curve));
            }
        })
    });

    group.bench_function("plan", |b| {
        let config = RenderConfig::default();
        b.iter(|| plan(black_box(&days), &config).unwrap())
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let days = synthetic_days();
    let config = RenderConfig {
        canvas_size: 1400,
        ..RenderConfig::default()
    };

    let mut group = c.benchmark_group("render");
    group.sample_size(10);
    group.bench_function("render_1400", |b| b.iter(|| render(black_box(&days), &config).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
