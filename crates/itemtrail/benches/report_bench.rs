// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Duration};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use itemtrail::collect::CollectedCommits;
use itemtrail::output::{Report, entries, text};
use itemtrail::settings::OutputConfig;
use itemtrail_core::{CommitRecord, CommitStore, SortDirection};

/// Collected commits spread over 40 items
fn setup_collected(count: usize) -> CollectedCommits {
    let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").expect("valid date");
    let mut store = CommitStore::new();
    for i in 0..count {
        store.save(CommitRecord {
            message: format!("ITEM-{} change {i}", i % 40),
            author: format!("Author {} <author{}@example.com>", i % 10, i % 10),
            date: base + Duration::minutes((i as i64 * 37) % 5000),
            sha: format!("{i:040x}"),
            commit_url: format!("https://github.com/acme/app/commit/{i:040x}"),
            pr_url: format!("https://github.com/acme/app/pull/{}", i % 97 + 1),
            item_number: (i % 40).to_string(),
            is_merge: false,
        });
    }
    CollectedCommits::new(store, (0..40).map(|n| n.to_string()).collect())
}

fn report_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for count in [100, 1000] {
        let collected = setup_collected(count);
        let flat = OutputConfig {
            direction: SortDirection::Descending,
            run_replay: true,
            ..Default::default()
        };
        let grouped = OutputConfig {
            group_by_item: true,
            item_replay: true,
            ..flat.clone()
        };

        group.bench_with_input(BenchmarkId::new("build_flat", count), &collected, |b, c| {
            b.iter(|| Report::build(c, &flat))
        });
        group.bench_with_input(BenchmarkId::new("build_grouped", count), &collected, |b, c| {
            b.iter(|| Report::build(c, &grouped))
        });

        let report = Report::build(&collected, &grouped);
        group.bench_with_input(BenchmarkId::new("render_text", count), &report, |b, r| {
            b.iter(|| text::render(r))
        });
        group.bench_with_input(BenchmarkId::new("entry_list", count), &report, |b, r| {
            b.iter(|| entries(r))
        });
    }

    group.finish();
}

criterion_group!(benches, report_benchmarks);
criterion_main!(benches);
