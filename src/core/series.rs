use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::windowing::leading_points;
use crate::error::{ChartError, ChartResult};

/// Stable identifier of a configured city (`"buffalo"`, `"memphis"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(String);

impl CityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which value of a point feeds scales and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueSelector {
    #[default]
    RawCount,
    /// Count divided by the city's population divisor (per 100,000 residents
    /// with the default sources).
    PerCapita,
}

/// One month of aggregated counts for a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub raw_count: u64,
    pub per_capita_rate: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, raw_count: u64, population: f64) -> ChartResult<Self> {
        if !population.is_finite() || population <= 0.0 {
            return Err(ChartError::InvalidData(
                "population divisor must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            date,
            raw_count,
            per_capita_rate: raw_count as f64 / population,
        })
    }

    #[must_use]
    pub fn value(self, selector: ValueSelector) -> f64 {
        match selector {
            ValueSelector::RawCount => self.raw_count as f64,
            ValueSelector::PerCapita => self.per_capita_rate,
        }
    }
}

/// Monthly points for one city, kept in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CitySeries {
    points: Vec<SeriesPoint>,
}

impl CitySeries {
    #[must_use]
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest selected value among the first `month_count` points.
    ///
    /// Returns `None` for an empty window.
    #[must_use]
    pub fn max_value_in_window(&self, month_count: usize, selector: ValueSelector) -> Option<f64> {
        leading_points(&self.points, month_count)
            .iter()
            .map(|point| OrderedFloat(point.value(selector)))
            .max()
            .map(|value| value.0)
    }
}
