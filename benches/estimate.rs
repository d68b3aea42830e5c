use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use timesheet::estimate::{estimate_hours, SessionParams};
use timesheet::model::{Author, Commit};
use timesheet::{compute_summary, EstimateConfig};

fn commits(n: usize) -> Vec<Commit> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).unwrap();
    (0..n)
        .map(|i| Commit {
            sha: format!("{i:040x}"),
            timestamp: (start + Duration::minutes((i as i64 * 37) % (60 * 24 * 90))).fixed_offset(),
            message: "work".to_string(),
            author: Author {
                name: "Dev".to_string(),
                email: format!("dev{}@example.com", i % 8),
            },
            repository: format!("repo-{}", i % 3),
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let data = commits(10_000);
    let timestamps: Vec<_> = data.iter().map(|c| c.timestamp).collect();
    let params = SessionParams::default();

    c.bench_function("estimate_hours_10k", |b| {
        b.iter(|| estimate_hours(black_box(timestamps.as_slice()), &params))
    });

    let config = EstimateConfig {
        session: params,
        email_aliases: HashMap::new(),
        authors: Vec::new(),
    };
    c.bench_function("compute_summary_10k", |b| {
        b.iter(|| compute_summary(black_box(&data), &config))
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
