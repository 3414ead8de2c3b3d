use chrono::NaiveDate;
use futures::executor::block_on;
use theft_chart::ChartError;
use theft_chart::core::{CityId, ValueSelector};
use theft_chart::data::{
    CityLoad, CitySource, SeriesCache, StaticFetcher, load, load_all, parse_month,
    parse_series_csv,
};

const BODY: &str = "ct,month\n\
                    12,2020-01-01T00:00:00.000\n\
                    30,2020-02-01T00:00:00.000\n\
                    7,2020-03-01T00:00:00.000\n";

fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid date")
}

#[test]
fn csv_rows_keep_source_order_and_derive_per_capita() {
    let series = parse_series_csv(BODY, 2.0).expect("parse");
    assert_eq!(series.len(), 3);

    let points = series.points();
    assert_eq!(points[0].date, date(2020, 1));
    assert_eq!(points[1].date, date(2020, 2));
    assert_eq!(points[2].date, date(2020, 3));
    assert_eq!(points[1].raw_count, 30);
    assert_eq!(points[1].per_capita_rate, 15.0);
    assert_eq!(points[2].value(ValueSelector::PerCapita), 3.5);
}

#[test]
fn header_and_values_are_trimmed() {
    let body = "ct, month \n 4 , 2021-06-01T00:00:00.000 \n";
    let series = parse_series_csv(body, 1.0).expect("parse");
    assert_eq!(series.points()[0].raw_count, 4);
    assert_eq!(series.points()[0].date, date(2021, 6));
}

#[test]
fn malformed_count_reports_row_number() {
    let body = "ct,month\n5,2020-01-01T00:00:00.000\nabc,2020-02-01T00:00:00.000\n";
    let err = parse_series_csv(body, 1.0).expect_err("bad count must fail");
    match err {
        ChartError::Parse { row, message } => {
            assert_eq!(row, 2);
            assert!(message.contains("abc"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_month_is_rejected() {
    let body = "ct,month\n5,not-a-date\n";
    assert!(matches!(
        parse_series_csv(body, 1.0),
        Err(ChartError::Parse { row: 1, .. })
    ));
}

#[test]
fn header_only_body_is_an_empty_series() {
    let series = parse_series_csv("ct,month\n", 1.0).expect("parse");
    assert!(series.is_empty());
}

#[test]
fn non_positive_population_is_rejected() {
    assert!(parse_series_csv(BODY, 0.0).is_err());
    assert!(parse_series_csv(BODY, f64::NAN).is_err());
}

#[test]
fn month_accepts_floating_timestamp_and_plain_date() {
    assert_eq!(parse_month("2022-10-01T00:00:00.000"), Some(date(2022, 10)));
    assert_eq!(parse_month("2022-10-01T00:00:00"), Some(date(2022, 10)));
    assert_eq!(parse_month("2022-10-01"), Some(date(2022, 10)));
    assert_eq!(parse_month("October 2022"), None);
}

#[test]
fn load_fetches_and_parses_one_source() {
    let source = CitySource::new("norfolk", "Norfolk, VA", "mem://norfolk", 2.0);
    let fetcher = StaticFetcher::new().with_body("mem://norfolk", BODY);
    let series = block_on(load(&fetcher, &source)).expect("load");
    assert_eq!(series.len(), 3);
}

#[test]
fn load_all_settles_every_source_in_order() {
    let sources = vec![
        CitySource::new("norfolk", "Norfolk, VA", "mem://norfolk", 2.0),
        CitySource::new("buffalo", "Buffalo, NY", "mem://buffalo", 2.0),
        CitySource::new("memphis", "Memphis, TN", "mem://memphis", 10.0),
    ];
    let fetcher = StaticFetcher::new()
        .with_body("mem://norfolk", BODY)
        .with_failure("mem://buffalo", "connection reset")
        .with_body("mem://memphis", "ct,month\nx,2020-01-01\n");

    let results = block_on(load_all(&fetcher, &sources));
    let ids: Vec<&str> = results.iter().map(|(city, _)| city.as_str()).collect();
    assert_eq!(ids, ["norfolk", "buffalo", "memphis"]);
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(ChartError::Network { .. })));
    assert!(matches!(results[2].1, Err(ChartError::Parse { .. })));
}

#[test]
fn unregistered_url_fails_as_network_error() {
    let source = CitySource::new("norfolk", "Norfolk, VA", "mem://missing", 2.0);
    let err = block_on(load(&StaticFetcher::new(), &source)).expect_err("no body");
    assert!(matches!(err, ChartError::Network { url, .. } if url == "mem://missing"));
}

#[test]
fn cache_slots_are_written_once() {
    let mut cache = SeriesCache::new([CityId::from("norfolk"), CityId::from("buffalo")]);
    assert!(!cache.is_settled());
    assert!(matches!(cache.slot("norfolk"), Some(CityLoad::Pending)));

    let series = parse_series_csv(BODY, 1.0).expect("parse");
    assert!(cache.store(&"norfolk".into(), Ok(series.clone())));
    assert!(!cache.store(&"norfolk".into(), Ok(Default::default())));
    assert_eq!(cache.series("norfolk"), Some(&series));

    assert!(cache.store(
        &"buffalo".into(),
        Err(ChartError::InvalidData("boom".to_owned()))
    ));
    assert!(cache.series("buffalo").is_none());
    assert!(matches!(cache.slot("buffalo"), Some(CityLoad::Failed(_))));
    assert!(cache.is_settled());

    assert!(!cache.store(&"memphis".into(), Ok(series)));
    assert!(!cache.contains("memphis"));
}
