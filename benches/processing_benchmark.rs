use airq_dashboard::models::{MeasurementRecord, Pollutant, Table, Variable};
use airq_dashboard::processors::{filter_by_station, CorrelationEngine, YearlyAggregator};
use airq_dashboard::utils::constants::KNOWN_STATIONS;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Hourly records for every known station over `days` days per year
fn create_test_table(years: i32, days: i64) -> Table {
    let mut records = Vec::new();

    for (s, station) in KNOWN_STATIONS.iter().enumerate() {
        for year in 2013..2013 + years {
            let base_date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
            for day in 0..days {
                for hour in 0..24 {
                    let timestamp = (base_date + chrono::Duration::days(day))
                        .and_hms_opt(hour, 0, 0)
                        .unwrap();
                    let t = (day * 24 + hour as i64) as f64;
                    let mut record = MeasurementRecord::empty(*station, timestamp)
                        .with_variable(Variable::Temperature, 10.0 + (t / 24.0).sin() * 8.0)
                        .with_variable(Variable::Pressure, 1010.0 + (t / 48.0).cos() * 5.0)
                        .with_variable(Variable::WindSpeed, 1.0 + (t % 7.0))
                        .with_pollutant(Pollutant::Pm25, 40.0 + (t % 50.0) + s as f64)
                        .with_pollutant(Pollutant::Co, 500.0 + (t % 300.0));
                    // Sparse gaps like real sensor data
                    if (t as i64) % 17 != 0 {
                        record = record.with_pollutant(Pollutant::O3, 60.0 - (t % 40.0));
                    }
                    records.push(record);
                }
            }
        }
    }

    Table::new(records)
}

fn benchmark_yearly_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("yearly_aggregation");

    for days in [30, 120] {
        let table = create_test_table(4, days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &table, |b, table| {
            let aggregator = YearlyAggregator::new();
            b.iter(|| {
                aggregator
                    .aggregate_yearly(black_box(table), &["PM2.5", "CO", "O3"])
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_correlation(c: &mut Criterion) {
    let table = create_test_table(2, 60);
    let engine = CorrelationEngine::new();

    c.bench_function("correlation_matrix", |b| {
        b.iter(|| {
            engine
                .correlate(
                    black_box(&table),
                    &["TEMP", "PRES", "wd", "WSPM"],
                    &["PM2.5", "CO", "O3"],
                )
                .unwrap()
        });
    });
}

fn benchmark_station_filter(c: &mut Criterion) {
    let table = create_test_table(2, 60);

    c.bench_function("filter_by_station", |b| {
        b.iter(|| filter_by_station(black_box(&table), "Dongsi"));
    });
}

criterion_group!(
    benches,
    benchmark_yearly_aggregation,
    benchmark_correlation,
    benchmark_station_filter
);
criterion_main!(benches);
