/// Pipeline Performance Benchmarks
///
/// Measures the in-memory stages on a synthetic OWID-sized dataset:
/// roughly 250 countries with a year of daily rows each, plus aggregates.
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use incidence_report::chart::{ChartRenderer, SvgChartRenderer};
use incidence_report::config::ReportConfig;
use incidence_report::ingest::read_observations;
use incidence_report::observation::RawObservation;
use incidence_report::pipeline::compute;
use std::fmt::Write as _;
use std::time::Duration;

fn synthetic_rows(countries: usize, days: usize) -> Vec<RawObservation> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut rows = Vec::with_capacity((countries + 2) * days);

    for c in 0..countries {
        let code = format!(
            "{}{}{}",
            (b'A' + (c / 676 % 26) as u8) as char,
            (b'A' + (c / 26 % 26) as u8) as char,
            (b'A' + (c % 26) as u8) as char
        );
        let population = 50_000.0 + (c as f64 * 7_919.0 % 97.0) * 1_000_000.0;
        for d in 0..days {
            rows.push(RawObservation {
                code: code.clone(),
                name: format!("Country {}", c),
                date: Some(start + chrono::Duration::days(d as i64)),
                new_cases: (d % 11 != 0).then_some(((c * 31 + d * 17) % 5_000) as f64),
                population: Some(population),
            });
        }
    }

    for aggregate in ["OWID_WRL", "OWID_EUR"] {
        for d in 0..days {
            rows.push(RawObservation {
                code: aggregate.to_string(),
                name: aggregate.to_string(),
                date: Some(start + chrono::Duration::days(d as i64)),
                new_cases: Some(100_000.0),
                population: Some(8e9),
            });
        }
    }

    rows
}

fn synthetic_csv(countries: usize, days: usize) -> String {
    let mut csv = String::from("iso_code,continent,location,date,new_cases,population\n");
    for row in synthetic_rows(countries, days) {
        let _ = writeln!(
            csv,
            "{},Somewhere,{},{},{},{}",
            row.code,
            row.name,
            row.date.map(|d| d.to_string()).unwrap_or_default(),
            row.new_cases.map(|v| v.to_string()).unwrap_or_default(),
            row.population.map(|v| v.to_string()).unwrap_or_default(),
        );
    }
    csv
}

/// Benchmark: filter, aggregate, rank and analyze
fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    group.measurement_time(Duration::from_secs(5));
    let config = ReportConfig::default();

    for countries in [50usize, 250] {
        let rows = synthetic_rows(countries, 365);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(countries), &rows, |b, rows| {
            b.iter(|| compute(black_box(rows), &config).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: CSV ingestion from memory
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    group.measurement_time(Duration::from_secs(5));

    let csv = synthetic_csv(250, 365);
    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.bench_function("read_250_countries", |b| {
        b.iter(|| read_observations(black_box(csv.as_bytes())).unwrap());
    });

    group.finish();
}

/// Benchmark: SVG chart rendering for a full ranking
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let computed = compute(&synthetic_rows(250, 30), &ReportConfig::default()).unwrap();
    let renderer = SvgChartRenderer::default();

    group.bench_function("svg_charts", |b| {
        b.iter(|| renderer.render(black_box(&computed.ranked), black_box(&computed.analysis)));
    });

    group.finish();
}

criterion_group!(benches, bench_compute, bench_ingest, bench_render);
criterion_main!(benches);
