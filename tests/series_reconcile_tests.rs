use std::time::Duration;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use theft_chart::api::{ChartScales, SeriesRenderer, ViewState, YearBounds, compute_domains};
use theft_chart::core::{
    CityId, CitySeries, Margins, PathPoint, SeriesPoint, Viewport, path_segments,
};
use theft_chart::data::SeriesCache;
use theft_chart::render::Color;

fn monthly_series(counts: &[u64]) -> CitySeries {
    let points = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let year = 2020 + (index / 12) as i32;
            let month = (index % 12) as u32 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, 1).expect("valid date");
            SeriesPoint::new(date, *count, 2.0).expect("valid point")
        })
        .collect();
    CitySeries::new(points)
}

fn loaded_cache() -> SeriesCache {
    let mut cache = SeriesCache::new(["norfolk", "buffalo", "memphis"].map(CityId::from));
    cache.store(&"norfolk".into(), Ok(monthly_series(&[10; 48])));
    cache.store(&"buffalo".into(), Ok(monthly_series(&[40; 48])));
    cache.store(
        &"memphis".into(),
        Err(theft_chart::ChartError::InvalidData("offline".to_owned())),
    );
    cache
}

fn scales_for(state: &ViewState, cache: &SeriesCache) -> ChartScales {
    let plot = Viewport::new(960, 300)
        .plot_area(Margins::default())
        .expect("plot");
    compute_domains(state, cache)
        .expect("domains")
        .scales(plot)
        .expect("scales")
}

fn reconcile(renderer: &mut SeriesRenderer, state: &ViewState, cache: &SeriesCache) {
    renderer
        .reconcile(state, cache, scales_for(state, cache))
        .expect("reconcile");
}

#[test]
fn drawn_paths_follow_enabled_cities() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::from_millis(800));

    state.toggle_city(&"buffalo".into());
    state.toggle_city(&"norfolk".into());
    let report = renderer
        .reconcile(&state, &cache, scales_for(&state, &cache))
        .expect("reconcile");
    assert_eq!(report.created, vec![CityId::from("buffalo"), CityId::from("norfolk")]);
    let keys: Vec<&str> = renderer.drawn().keys().map(CityId::as_str).collect();
    assert_eq!(keys, ["buffalo", "norfolk"]);

    state.toggle_city(&"buffalo".into());
    let report = renderer
        .reconcile(&state, &cache, scales_for(&state, &cache))
        .expect("reconcile");
    assert_eq!(report.removed, vec![CityId::from("buffalo")]);
    assert_eq!(report.updated, vec![CityId::from("norfolk")]);
    let keys: Vec<&str> = renderer.drawn().keys().map(CityId::as_str).collect();
    assert_eq!(keys, ["norfolk"]);
}

#[test]
fn repeated_reconcile_only_updates() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::from_millis(800));
    state.toggle_city(&"norfolk".into());

    reconcile(&mut renderer, &state, &cache);
    state.shift_year(1);
    let report = renderer
        .reconcile(&state, &cache, scales_for(&state, &cache))
        .expect("reconcile");
    assert!(report.is_update_only());
    assert_eq!(renderer.drawn()["norfolk"].revision(), 1);
}

#[test]
fn unavailable_city_is_left_undrawn() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::ZERO);
    state.toggle_city(&"memphis".into());

    let report = renderer
        .reconcile(&state, &cache, scales_for(&state, &cache))
        .expect("reconcile");
    assert!(report.created.is_empty());
    assert!(renderer.drawn().is_empty());
}

#[test]
fn paths_cover_the_full_series_beyond_the_window() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::ZERO);
    state.toggle_city(&"buffalo".into());
    reconcile(&mut renderer, &state, &cache);

    let path = &renderer.drawn()["buffalo"];
    assert_eq!(path.geometry().len(), 48);
    assert_eq!(path.class_name(), "line buffalo");
    // The window max is the constant 40, so every vertex sits on the top edge.
    for point in path.geometry() {
        assert_relative_eq!(point.y, 0.0);
    }
    assert!(path.geometry()[47].x > 920.0);
    assert_eq!(path_segments(path.geometry()).len(), 47);
}

#[test]
fn colors_come_from_configuration() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let red = Color::rgb(1.0, 0.0, 0.0);
    let mut renderer =
        SeriesRenderer::new(Duration::ZERO).with_colors([(CityId::from("norfolk"), red)]);
    state.toggle_city(&"norfolk".into());
    reconcile(&mut renderer, &state, &cache);
    assert_eq!(renderer.drawn()["norfolk"].color(), red);
}

#[test]
fn retarget_eases_from_previous_geometry() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::from_millis(800));
    state.toggle_city(&"norfolk".into());
    reconcile(&mut renderer, &state, &cache);
    let before: Vec<PathPoint> = renderer.drawn()["norfolk"].geometry().to_vec();

    state.shift_year(2);
    reconcile(&mut renderer, &state, &cache);
    let path = &renderer.drawn()["norfolk"];
    let transition = path.transition().expect("transition");
    assert_eq!(transition.duration, Duration::from_millis(800));
    assert_eq!(transition.from, before);

    assert_eq!(path.geometry_at(Duration::ZERO), before);
    assert_eq!(path.geometry_at(Duration::from_secs(1)), path.geometry());

    let mid = path.geometry_at(Duration::from_millis(400));
    let expected_x = (before[5].x + path.geometry()[5].x) / 2.0;
    assert_relative_eq!(mid[5].x, expected_x, epsilon = 1e-9);
}

#[test]
fn zero_duration_retarget_has_no_transition() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::ZERO);
    state.toggle_city(&"norfolk".into());
    reconcile(&mut renderer, &state, &cache);
    reconcile(&mut renderer, &state, &cache);
    assert!(renderer.drawn()["norfolk"].transition().is_none());
}

#[test]
fn interrupted_transition_restarts_from_on_screen_geometry() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::from_millis(800));
    state.toggle_city(&"norfolk".into());
    reconcile(&mut renderer, &state, &cache);
    let initial: Vec<PathPoint> = renderer.drawn()["norfolk"].geometry().to_vec();

    state.shift_year(2);
    reconcile(&mut renderer, &state, &cache);
    let first_target: Vec<PathPoint> = renderer.drawn()["norfolk"].geometry().to_vec();
    renderer.advance(Duration::from_millis(400));
    let on_screen = renderer.drawn()["norfolk"].current_geometry();
    assert_ne!(on_screen, initial);
    assert_ne!(on_screen, first_target);

    state.shift_year(-1);
    reconcile(&mut renderer, &state, &cache);
    let path = &renderer.drawn()["norfolk"];
    let transition = path.transition().expect("transition");
    assert_eq!(transition.from, on_screen);
    assert_eq!(transition.elapsed, Duration::ZERO);
    assert_eq!(path.current_geometry(), on_screen);
}

#[test]
fn advance_finishes_transitions_at_their_target() {
    let cache = loaded_cache();
    let mut state = ViewState::new(YearBounds::default(), 2021).expect("state");
    let mut renderer = SeriesRenderer::new(Duration::from_millis(800));
    state.toggle_city(&"norfolk".into());
    reconcile(&mut renderer, &state, &cache);
    state.shift_year(1);
    reconcile(&mut renderer, &state, &cache);

    renderer.advance(Duration::from_millis(500));
    let path = &renderer.drawn()["norfolk"];
    assert_eq!(
        path.transition().expect("running").elapsed,
        Duration::from_millis(500)
    );

    renderer.advance(Duration::from_millis(500));
    let path = &renderer.drawn()["norfolk"];
    assert!(path.transition().is_none());
    assert_eq!(path.current_geometry(), path.geometry());
}
