use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CityId, ValueSelector, window_month_count};
use crate::error::{ChartError, ChartResult};

/// Fixed window start and the bounds the visible end year may move within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub start_year: i32,
    pub lower_end_year: i32,
    pub upper_end_year: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            start_year: 2020,
            lower_end_year: 2021,
            upper_end_year: 2023,
        }
    }
}

impl YearBounds {
    pub fn validate(self) -> ChartResult<Self> {
        if self.lower_end_year < self.start_year {
            return Err(ChartError::InvalidData(format!(
                "lower end year {} precedes start year {}",
                self.lower_end_year, self.start_year
            )));
        }
        if self.upper_end_year < self.lower_end_year {
            return Err(ChartError::InvalidData(format!(
                "upper end year {} precedes lower end year {}",
                self.upper_end_year, self.lower_end_year
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, end_year: i32) -> i32 {
        end_year.clamp(self.lower_end_year, self.upper_end_year)
    }
}

/// Mutable view selection driving every render.
///
/// Transitions are pure: control enablement, icons and titles are derived
/// separately by `ControlsView::from_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    bounds: YearBounds,
    enabled_cities: IndexSet<CityId>,
    visible_end_year: i32,
    normalize_by_population: bool,
    per_capita_unlocked: bool,
}

impl ViewState {
    /// Creates a state with no city enabled. `initial_end_year` is clamped
    /// into the configured bounds.
    pub fn new(bounds: YearBounds, initial_end_year: i32) -> ChartResult<Self> {
        let bounds = bounds.validate()?;
        let visible_end_year = bounds.clamp(initial_end_year);
        Ok(Self {
            bounds,
            enabled_cities: IndexSet::new(),
            visible_end_year,
            normalize_by_population: false,
            per_capita_unlocked: visible_end_year == bounds.upper_end_year,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }

    /// Enabled cities in the order they were enabled.
    #[must_use]
    pub fn enabled_cities(&self) -> &IndexSet<CityId> {
        &self.enabled_cities
    }

    #[must_use]
    pub fn is_enabled(&self, city: &str) -> bool {
        self.enabled_cities.contains(city)
    }

    #[must_use]
    pub fn visible_end_year(&self) -> i32 {
        self.visible_end_year
    }

    #[must_use]
    pub fn normalize_by_population(&self) -> bool {
        self.normalize_by_population
    }

    /// Whether the per-capita option has been revealed. It unlocks the first
    /// time the window reaches the upper bound and stays unlocked.
    #[must_use]
    pub fn per_capita_unlocked(&self) -> bool {
        self.per_capita_unlocked
    }

    #[must_use]
    pub fn value_selector(&self) -> ValueSelector {
        if self.normalize_by_population {
            ValueSelector::PerCapita
        } else {
            ValueSelector::RawCount
        }
    }

    /// Number of leading monthly points inside the visible window.
    #[must_use]
    pub fn visible_month_count(&self) -> usize {
        window_month_count(self.bounds.start_year, self.visible_end_year)
    }

    #[must_use]
    pub fn at_lower_bound(&self) -> bool {
        self.visible_end_year <= self.bounds.lower_end_year
    }

    #[must_use]
    pub fn at_upper_bound(&self) -> bool {
        self.visible_end_year >= self.bounds.upper_end_year
    }

    /// Removes `city` when enabled, appends it otherwise.
    ///
    /// Returns whether the city is enabled afterwards.
    pub fn toggle_city(&mut self, city: &CityId) -> bool {
        let enabled = if self.enabled_cities.shift_remove(city) {
            false
        } else {
            self.enabled_cities.insert(city.clone());
            true
        };
        trace!(city = %city, enabled, "toggle city");
        enabled
    }

    /// Moves the visible end year by `delta`, clamping silently at both bounds.
    ///
    /// Returns the resulting end year.
    pub fn shift_year(&mut self, delta: i32) -> i32 {
        self.visible_end_year = self
            .bounds
            .clamp(self.visible_end_year.saturating_add(delta));
        if self.at_upper_bound() {
            self.per_capita_unlocked = true;
        }
        trace!(delta, end_year = self.visible_end_year, "shift year");
        self.visible_end_year
    }

    /// Flips per-capita normalization. Returns the new flag.
    pub fn toggle_per_capita(&mut self) -> bool {
        self.normalize_by_population = !self.normalize_by_population;
        trace!(
            normalize = self.normalize_by_population,
            "toggle per-capita scaling"
        );
        self.normalize_by_population
    }
}
