use chrono::{NaiveDate, NaiveDateTime};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{CityId, CitySeries, SeriesPoint};
use crate::data::SeriesFetcher;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Opaque per-city query configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySource {
    pub id: CityId,
    pub label: String,
    pub url: String,
    /// Divisor applied to raw counts for per-capita rates.
    pub population: f64,
    #[serde(default = "default_series_color")]
    pub color: Color,
}

impl CitySource {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        population: f64,
    ) -> Self {
        Self {
            id: CityId::new(id),
            label: label.into(),
            url: url.into(),
            population,
            color: default_series_color(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

fn default_series_color() -> Color {
    Color::rgb(0.27, 0.51, 0.71)
}

#[derive(Debug, Deserialize)]
struct MonthlyRow {
    ct: String,
    month: String,
}

/// Parses a `ct,month` CSV body into a city series.
///
/// Rows keep their source order. A malformed row fails the whole series with
/// `ChartError::Parse` carrying its 1-based data row number.
pub fn parse_series_csv(body: &str, population: f64) -> ChartResult<CitySeries> {
    if !population.is_finite() || population <= 0.0 {
        return Err(ChartError::InvalidData(
            "population divisor must be finite and > 0".to_owned(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut points = Vec::new();
    for (index, record) in reader.deserialize::<MonthlyRow>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|err| ChartError::Parse {
            row,
            message: err.to_string(),
        })?;
        let raw_count = record.ct.parse::<u64>().map_err(|err| ChartError::Parse {
            row,
            message: format!("count `{}`: {err}", record.ct),
        })?;
        let date = parse_month(&record.month).ok_or_else(|| ChartError::Parse {
            row,
            message: format!("month `{}` is not a calendar date", record.month),
        })?;
        points.push(SeriesPoint::new(date, raw_count, population)?);
    }

    trace!(count = points.len(), "parsed monthly rows");
    Ok(CitySeries::new(points))
}

/// Parses a Socrata floating timestamp (`2021-03-01T00:00:00.000`) or a plain
/// ISO date into its calendar date.
#[must_use]
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|timestamp| timestamp.date())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Fetches and parses one city's series.
pub async fn load<F: SeriesFetcher>(fetcher: &F, source: &CitySource) -> ChartResult<CitySeries> {
    debug!(city = %source.id, "fetching city series");
    let body = fetcher.fetch_text(&source.url).await?;
    let series = parse_series_csv(&body, source.population)?;
    debug!(city = %source.id, points = series.len(), "city series loaded");
    Ok(series)
}

/// Loads every source concurrently and waits until all of them settle.
///
/// Results come back in `sources` order, one slot per city, failures included.
pub async fn load_all<F: SeriesFetcher>(
    fetcher: &F,
    sources: &[CitySource],
) -> Vec<(CityId, ChartResult<CitySeries>)> {
    let loads = sources.iter().map(|source| async move {
        let result = load(fetcher, source).await;
        if let Err(err) = &result {
            warn!(city = %source.id, error = %err, "city series unavailable");
        }
        (source.id.clone(), result)
    });
    join_all(loads).await
}
