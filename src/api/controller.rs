use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{CityId, CitySeries, PlotArea};
use crate::data::{CityLoad, SeriesCache, SeriesFetcher, load_all};
use crate::error::{ChartError, ChartResult};
use crate::extensions::AnnotationLayer;
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{FrameInputs, build_render_frame};
use super::{
    ChartConfig, ChartDomains, ControlsView, FrameStyle, ReconcileReport, SeriesRenderer,
    ViewState, compute_domains,
};

/// Axis animation between the previous and current domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransition {
    pub from: ChartDomains,
    pub to: ChartDomains,
    pub duration: Duration,
}

/// Main facade consumed by host applications.
///
/// Owns the view state, the loaded series and every derived layer. Each
/// user operation mutates the state and then runs the render pipeline
/// (domains, series reconcile, annotation projection, frame) exactly once.
pub struct ChartController<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    plot: PlotArea,
    state: ViewState,
    cache: SeriesCache,
    series: SeriesRenderer,
    annotations: AnnotationLayer,
    frame_style: FrameStyle,
    domains: Option<ChartDomains>,
    axis_transition: Option<AxisTransition>,
    last_report: ReconcileReport,
    last_frame: Option<RenderFrame>,
    render_count: u64,
}

impl<R: Renderer> ChartController<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let plot = config.viewport.plot_area(config.margins)?;
        let state = ViewState::new(config.years, config.initial_end_year)?;
        let cache = SeriesCache::new(config.cities.iter().map(|source| source.id.clone()));
        let series = SeriesRenderer::new(config.transitions.line()).with_colors(
            config
                .cities
                .iter()
                .map(|source| (source.id.clone(), source.color)),
        );
        let annotations =
            AnnotationLayer::new(config.annotations.clone(), config.annotation_style)?;

        Ok(Self {
            renderer,
            config,
            plot,
            state,
            cache,
            series,
            annotations,
            frame_style: FrameStyle::default(),
            domains: None,
            axis_transition: None,
            last_report: ReconcileReport::default(),
            last_frame: None,
            render_count: 0,
        })
    }

    #[must_use]
    pub fn with_frame_style(mut self, style: FrameStyle) -> Self {
        self.frame_style = style;
        self
    }

    /// Loads every configured city concurrently, waits for all of them to
    /// settle, then enables the default city and renders the first frame.
    ///
    /// Per-city failures leave that city unavailable and do not fail startup.
    pub async fn start<F: SeriesFetcher>(&mut self, fetcher: &F) -> ChartResult<()> {
        let results = load_all(fetcher, &self.config.cities).await;
        for (city, result) in results {
            self.cache.store(&city, result);
        }
        self.show_default_city()
    }

    /// Enables the configured default city when it loaded, then renders.
    ///
    /// Hosts that drive loading themselves call this once every slot settled.
    pub fn show_default_city(&mut self) -> ChartResult<()> {
        let default_city = self.config.default_city.clone();
        if self.cache.series(default_city.as_str()).is_some() {
            if !self.state.is_enabled(default_city.as_str()) {
                self.state.toggle_city(&default_city);
            }
        } else {
            warn!(city = %default_city, "default city unavailable; rendering empty chart");
        }
        self.render()
    }

    /// Records a settled load for hosts that fetch outside `start`.
    pub fn store_load(&mut self, city: &CityId, result: ChartResult<CitySeries>) -> bool {
        self.cache.store(city, result)
    }

    /// Toggles a city and re-renders.
    ///
    /// Enabling a city whose data is pending or failed is a no-op: state is
    /// unchanged and nothing is rendered. Returns whether the city is enabled.
    pub fn toggle_city(&mut self, city: &str) -> ChartResult<bool> {
        let Some(load) = self.cache.slot(city) else {
            return Err(ChartError::InvalidData(format!("unknown city `{city}`")));
        };
        if !self.state.is_enabled(city) && !matches!(load, CityLoad::Ready(_)) {
            warn!(city, "city data unavailable; ignoring toggle");
            return Ok(false);
        }

        let enabled = self.state.toggle_city(&CityId::from(city));
        self.render()?;
        Ok(enabled)
    }

    /// Moves the year window and re-renders. Returns the new end year.
    pub fn shift_year(&mut self, delta: i32) -> ChartResult<i32> {
        let end_year = self.state.shift_year(delta);
        self.render()?;
        Ok(end_year)
    }

    /// Flips per-capita scaling and re-renders. Returns the new flag.
    pub fn toggle_per_capita(&mut self) -> ChartResult<bool> {
        let normalized = self.state.toggle_per_capita();
        self.render()?;
        Ok(normalized)
    }

    /// External link of the annotation note under a viewport point.
    #[must_use]
    pub fn click(&self, x: f64, y: f64) -> Option<&str> {
        let (local_x, local_y) = self.plot.to_local(x, y);
        self.annotations
            .hit_test(local_x, local_y)
            .map(|annotation| annotation.external_link.as_str())
    }

    /// Ticks the line animations by `dt` of host frame time.
    pub fn advance_transitions(&mut self, dt: Duration) {
        self.series.advance(dt);
    }

    /// Runs the full pipeline against the current state.
    pub fn render(&mut self) -> ChartResult<()> {
        let domains = compute_domains(&self.state, &self.cache)?;
        let scales = domains.scales(self.plot)?;

        self.axis_transition = self
            .domains
            .filter(|previous| *previous != domains)
            .map(|previous| AxisTransition {
                from: previous,
                to: domains,
                duration: self.config.transitions.axis(),
            });

        let report = self.series.reconcile(&self.state, &self.cache, scales)?;
        let placed = self.annotations.project(scales)?;
        let frame = build_render_frame(FrameInputs {
            viewport: self.config.viewport,
            plot: self.plot,
            scales,
            drawn: self.series.drawn(),
            annotations: placed,
            style: self.frame_style,
        })?;
        self.renderer.render(&frame)?;

        self.render_count += 1;
        debug!(
            render = self.render_count,
            end_year = self.state.visible_end_year(),
            cities = self.state.enabled_cities().len(),
            per_capita = self.state.normalize_by_population(),
            value_max = domains.value_max,
            "rendered chart"
        );

        self.domains = Some(domains);
        self.last_report = report;
        self.last_frame = Some(frame);
        Ok(())
    }

    #[must_use]
    pub fn controls(&self) -> ControlsView {
        ControlsView::from_state(&self.state, &self.config.cities)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    #[must_use]
    pub fn series(&self) -> &SeriesRenderer {
        &self.series
    }

    #[must_use]
    pub fn annotations(&self) -> &AnnotationLayer {
        &self.annotations
    }

    /// Domains of the last render, `None` before the first one.
    #[must_use]
    pub fn domains(&self) -> Option<ChartDomains> {
        self.domains
    }

    /// Axis animation started by the last render; `None` when it left both
    /// domains unchanged.
    #[must_use]
    pub fn axis_transition(&self) -> Option<AxisTransition> {
        self.axis_transition
    }

    #[must_use]
    pub fn last_report(&self) -> &ReconcileReport {
        &self.last_report
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
