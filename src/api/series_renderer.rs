use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{CityId, PathPoint, project_series_path};
use crate::data::SeriesCache;
use crate::error::ChartResult;
use crate::render::Color;

use super::{ChartScales, ViewState};

/// Animation from a previous geometry to the path's current target.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTransition {
    pub from: Vec<PathPoint>,
    pub duration: Duration,
    /// Animation clock, advanced by [`SeriesRenderer::advance`].
    pub elapsed: Duration,
}

/// One series path currently on the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPath {
    class_name: String,
    color: Color,
    geometry: Vec<PathPoint>,
    transition: Option<PathTransition>,
    revision: u64,
}

impl DrawnPath {
    fn create(city: &CityId, color: Color, geometry: Vec<PathPoint>) -> Self {
        Self {
            class_name: format!("line {city}"),
            color,
            geometry,
            transition: None,
            revision: 0,
        }
    }

    /// Starts a transition toward `geometry` from whatever is currently on
    /// screen, so an interrupted animation continues without a jump.
    fn retarget(&mut self, geometry: Vec<PathPoint>, duration: Duration) {
        let from = self.current_geometry();
        self.geometry = geometry;
        self.transition = (!duration.is_zero()).then_some(PathTransition {
            from,
            duration,
            elapsed: Duration::ZERO,
        });
        self.revision += 1;
    }

    fn advance(&mut self, dt: Duration) {
        let finished = match &mut self.transition {
            Some(transition) => {
                transition.elapsed = (transition.elapsed + dt).min(transition.duration);
                transition.elapsed >= transition.duration
            }
            None => return,
        };
        if finished {
            self.transition = None;
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Target geometry in plot-local pixels.
    #[must_use]
    pub fn geometry(&self) -> &[PathPoint] {
        &self.geometry
    }

    #[must_use]
    pub fn transition(&self) -> Option<&PathTransition> {
        self.transition.as_ref()
    }

    /// Number of geometry updates since the path was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Geometry on screen at the transition's own clock.
    #[must_use]
    pub fn current_geometry(&self) -> Vec<PathPoint> {
        match &self.transition {
            Some(transition) => self.geometry_at(transition.elapsed),
            None => self.geometry.clone(),
        }
    }

    /// Geometry `elapsed` into the running transition, eased with a cubic
    /// in-out curve. Paths whose vertex count changed snap to the target.
    #[must_use]
    pub fn geometry_at(&self, elapsed: Duration) -> Vec<PathPoint> {
        let Some(transition) = &self.transition else {
            return self.geometry.clone();
        };
        if transition.from.len() != self.geometry.len() || elapsed >= transition.duration {
            return self.geometry.clone();
        }

        let t = ease_cubic_in_out(elapsed.as_secs_f64() / transition.duration.as_secs_f64());
        transition
            .from
            .iter()
            .zip(&self.geometry)
            .map(|(from, to)| from.lerp(*to, t))
            .collect()
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Structural changes made by one reconcile pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<CityId>,
    pub updated: Vec<CityId>,
    pub removed: Vec<CityId>,
}

impl ReconcileReport {
    /// True when the pass only re-targeted existing paths.
    #[must_use]
    pub fn is_update_only(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Keeps the drawn series in step with the enabled-city set.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRenderer {
    drawn: IndexMap<CityId, DrawnPath>,
    colors: IndexMap<CityId, Color>,
    line_transition: Duration,
}

impl SeriesRenderer {
    #[must_use]
    pub fn new(line_transition: Duration) -> Self {
        Self {
            drawn: IndexMap::new(),
            colors: IndexMap::new(),
            line_transition,
        }
    }

    #[must_use]
    pub fn with_colors<I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (CityId, Color)>,
    {
        self.colors = colors.into_iter().collect();
        self
    }

    #[must_use]
    pub fn drawn(&self) -> &IndexMap<CityId, DrawnPath> {
        &self.drawn
    }

    #[must_use]
    pub fn line_transition(&self) -> Duration {
        self.line_transition
    }

    /// Moves every running path transition forward by `dt`. Finished
    /// transitions are dropped.
    pub fn advance(&mut self, dt: Duration) {
        for path in self.drawn.values_mut() {
            path.advance(dt);
        }
    }

    /// Removes paths of disabled cities, re-targets paths that stay and
    /// creates paths for newly enabled cities.
    ///
    /// Paths cover each city's full series. Enabled cities without loaded data
    /// are left undrawn.
    pub fn reconcile(
        &mut self,
        state: &ViewState,
        cache: &SeriesCache,
        scales: ChartScales,
    ) -> ChartResult<ReconcileReport> {
        let mut report = ReconcileReport::default();

        let stale: Vec<CityId> = self
            .drawn
            .keys()
            .filter(|city| !state.is_enabled(city.as_str()))
            .cloned()
            .collect();
        for city in stale {
            self.drawn.shift_remove(&city);
            report.removed.push(city);
        }

        let selector = state.value_selector();
        for city in state.enabled_cities() {
            let Some(series) = cache.series(city.as_str()) else {
                warn!(city = %city, "enabled city has no loaded series; skipping path");
                continue;
            };
            let geometry =
                project_series_path(series.points(), selector, scales.time, scales.value)?;

            if let Some(path) = self.drawn.get_mut(city) {
                path.retarget(geometry, self.line_transition);
                report.updated.push(city.clone());
            } else {
                let color = self.colors.get(city).copied().unwrap_or(DEFAULT_LINE_COLOR);
                self.drawn
                    .insert(city.clone(), DrawnPath::create(city, color, geometry));
                report.created.push(city.clone());
            }
        }

        debug!(
            created = report.created.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            "reconciled series paths"
        );
        Ok(report)
    }
}

const DEFAULT_LINE_COLOR: Color = Color::rgb(0.27, 0.51, 0.71);
