//! Parse and query throughput for a roster-sized chart.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use manytypes::chart::{parse_type_chart_csv, ParseOptions};
use manytypes::{defensive_profile, effectiveness, DefendingType};

const TYPE_COUNT: usize = 30;

fn synthetic_csv() -> String {
    let names: Vec<String> = (0..TYPE_COUNT).map(|i| format!("TYPE {i}")).collect();
    let mut csv = String::new();
    csv.push_str(&",".repeat(TYPE_COUNT + 1));
    csv.push('\n');
    csv.push_str(",,");
    csv.push_str(&names.join(","));
    csv.push('\n');
    for (row, name) in names.iter().enumerate() {
        csv.push(',');
        csv.push_str(name);
        for col in 0..TYPE_COUNT {
            let value = match (row + col) % 5 {
                0 => "0",
                1 => "0.5",
                2 => "2",
                _ => "1",
            };
            csv.push(',');
            csv.push_str(value);
        }
        csv.push('\n');
    }
    csv
}

fn bench_type_chart(c: &mut Criterion) {
    let csv = synthetic_csv();
    let options = ParseOptions {
        creation_date: Some("2023-09-18".to_string()),
        ..ParseOptions::default()
    };

    let mut group = c.benchmark_group("type_chart");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_30_types", |b| {
        b.iter(|| black_box(parse_type_chart_csv(black_box(&csv), &options)))
    });

    let chart = parse_type_chart_csv(&csv, &options)
        .expect("synthetic chart parses")
        .chart;
    let defenders: Vec<DefendingType> = ["Type 3", "Type 17", "Type 3"]
        .iter()
        .map(|name| DefendingType::parse(name))
        .collect();

    group.bench_function("effectiveness_triple_type", |b| {
        b.iter(|| black_box(effectiveness(&chart, black_box("Type 11"), &defenders)))
    });

    group.bench_function("defensive_profile_triple_type", |b| {
        b.iter(|| black_box(defensive_profile(&chart, &defenders)))
    });

    group.finish();
}

criterion_group!(benches, bench_type_chart);
criterion_main!(benches);
