use std::time::Duration;

use theft_chart::ChartError;
use theft_chart::api::{ChartConfig, TransitionDurations, YearBounds};
use theft_chart::core::Viewport;
use theft_chart::data::CitySource;

#[test]
fn default_config_describes_three_city_chart() {
    let config = ChartConfig::default().validate().expect("valid default");
    let ids: Vec<&str> = config.cities.iter().map(|city| city.id.as_str()).collect();
    assert_eq!(ids, ["norfolk", "buffalo", "memphis"]);
    assert_eq!(config.default_city.as_str(), "buffalo");
    assert_eq!(config.viewport, Viewport::new(960, 300));
    assert_eq!(config.years, YearBounds::default());
    assert_eq!(config.initial_end_year, 2021);
    assert_eq!(config.annotations.len(), 3);
    assert_eq!(config.request_timeout(), None);
    assert_eq!(config.transitions.axis(), Duration::from_millis(750));
    assert_eq!(config.transitions.line(), Duration::from_millis(800));

    let populations: Vec<f64> = config.cities.iter().map(|city| city.population).collect();
    assert_eq!(populations, [2.38, 2.83, 11.70]);
}

#[test]
fn empty_json_object_falls_back_to_defaults() {
    let config = ChartConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, ChartConfig::default());
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let config = ChartConfig::from_json_str(
        r#"{
            "viewport": { "width": 640, "height": 240 },
            "default_city": "memphis",
            "transitions": { "axis_ms": 0, "line_ms": 0 },
            "request_timeout_ms": 5000
        }"#,
    )
    .expect("parse");
    assert_eq!(config.viewport, Viewport::new(640, 240));
    assert_eq!(config.default_city.as_str(), "memphis");
    assert_eq!(
        config.transitions,
        TransitionDurations {
            axis_ms: 0,
            line_ms: 0
        }
    );
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.cities.len(), 3);
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ChartConfig::default();
    let json = config.to_json_string().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        ChartConfig::from_json_str("{ not json"),
        Err(ChartError::Config(_))
    ));
}

#[test]
fn unknown_default_city_is_rejected() {
    let config = ChartConfig {
        default_city: "gotham".into(),
        ..ChartConfig::default()
    };
    assert!(matches!(config.validate(), Err(ChartError::Config(_))));
}

#[test]
fn duplicate_cities_are_rejected() {
    let mut config = ChartConfig::default();
    config
        .cities
        .push(CitySource::new("buffalo", "Buffalo again", "mem://dup", 1.0));
    assert!(matches!(config.validate(), Err(ChartError::Config(_))));
}

#[test]
fn non_positive_population_is_rejected() {
    let mut config = ChartConfig::default();
    config.cities[0].population = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn inverted_year_bounds_are_rejected() {
    let config = ChartConfig {
        years: YearBounds {
            start_year: 2020,
            lower_end_year: 2019,
            upper_end_year: 2023,
        },
        ..ChartConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zero_viewport_is_rejected() {
    let config = ChartConfig {
        viewport: Viewport::new(0, 300),
        ..ChartConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ChartError::InvalidViewport { width: 0, height: 300 })
    ));
}
