use chrono::{Months, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use theft_chart::api::{ViewState, YearBounds, compute_domains};
use theft_chart::core::{
    CityId, CitySeries, Margins, SeriesPoint, ValueSelector, Viewport, project_series_path,
};
use theft_chart::data::{SeriesCache, parse_series_csv};

fn synthetic_series(months: u32, population: f64) -> CitySeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start");
    let points = (0..months)
        .map(|index| {
            let date = start
                .checked_add_months(Months::new(index))
                .expect("valid month");
            let count = 200 + u64::from(index % 37) * 11;
            SeriesPoint::new(date, count, population).expect("valid point")
        })
        .collect();
    CitySeries::new(points)
}

fn loaded_state() -> (ViewState, SeriesCache) {
    let cities = ["norfolk", "buffalo", "memphis"].map(CityId::from);
    let mut cache = SeriesCache::new(cities.clone());
    let mut state = ViewState::new(YearBounds::default(), 2023).expect("valid state");
    for (index, city) in cities.iter().enumerate() {
        cache.store(city, Ok(synthetic_series(48, 2.0 + index as f64)));
        state.toggle_city(city);
    }
    (state, cache)
}

fn bench_compute_domains(c: &mut Criterion) {
    let (mut state, cache) = loaded_state();
    state.toggle_per_capita();

    c.bench_function("compute_domains_three_cities", |b| {
        b.iter(|| {
            let _ = compute_domains(black_box(&state), black_box(&cache)).expect("domains");
        })
    });
}

fn bench_project_series_path(c: &mut Criterion) {
    let (state, cache) = loaded_state();
    let plot = Viewport::new(1920, 600)
        .plot_area(Margins::default())
        .expect("valid plot");
    let scales = compute_domains(&state, &cache)
        .expect("domains")
        .scales(plot)
        .expect("scales");
    let series = synthetic_series(10_000, 3.0);

    c.bench_function("project_series_path_10k", |b| {
        b.iter(|| {
            let _ = project_series_path(
                black_box(series.points()),
                ValueSelector::RawCount,
                scales.time,
                scales.value,
            )
            .expect("path");
        })
    });
}

fn bench_parse_series_csv(c: &mut Criterion) {
    let mut body = String::from("ct,month\n");
    for index in 0..480_u32 {
        let year = 2020 + index / 12;
        let month = index % 12 + 1;
        body.push_str(&format!("{},{year}-{month:02}-01T00:00:00.000\n", 100 + index));
    }

    c.bench_function("parse_series_csv_480_rows", |b| {
        b.iter(|| {
            let _ = parse_series_csv(black_box(&body), 2.83).expect("parse");
        })
    });
}

criterion_group!(
    benches,
    bench_compute_domains,
    bench_project_series_path,
    bench_parse_series_csv
);
criterion_main!(benches);
