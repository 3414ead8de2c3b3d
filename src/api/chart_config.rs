use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{CityId, Margins, Viewport};
use crate::data::CitySource;
use crate::error::{ChartError, ChartResult};
use crate::extensions::{Annotation, AnnotationStyleConfig, default_annotations};
use crate::render::Color;

use super::YearBounds;

const NORFOLK_URL: &str = "https://data.norfolk.gov/resource/r7bn-2egr.csv?$select=count(offense) AS ct,date_trunc_ym(date_occu) as month&$where=date_extract_y(date_occu) >= 2020 AND date_extract_y(date_occu) <= 2023 AND offense = 'STOLEN VEHICLE'&$group=month&$order=month&$limit=50000";
const BUFFALO_URL: &str = "https://data.buffalony.gov/resource/d6g9-xbgu.csv?$select=count(parent_incident_type) AS ct, date_trunc_ym(incident_datetime) as month &$where=date_extract_y(incident_datetime) >= 2020 AND date_extract_y(incident_datetime) <= 2023 AND parent_incident_type = 'Theft of Vehicle'&$group=month&$order=month&$limit=50000";
const MEMPHIS_URL: &str = "https://memphisinternal.data.socrata.com/resource/ybsi-jur4.csv?$select=count(agency_crimetype_id) AS ct, date_trunc_ym(offense_date) AS month&$where=date_extract_y(offense_date) >= 2020 AND date_extract_y(offense_date) <= 2023 AND agency_crimetype_id like 'MVT/%25'&$group=month&$order=month&$limit=50000";

/// Transition lengths for animated redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDurations {
    pub axis_ms: u64,
    pub line_ms: u64,
}

impl Default for TransitionDurations {
    fn default() -> Self {
        Self {
            axis_ms: 750,
            line_ms: 800,
        }
    }
}

impl TransitionDurations {
    #[must_use]
    pub fn axis(self) -> Duration {
        Duration::from_millis(self.axis_ms)
    }

    #[must_use]
    pub fn line(self) -> Duration {
        Duration::from_millis(self.line_ms)
    }
}

/// Chart bootstrap configuration.
///
/// Serializable so hosts can keep their chart setup in a JSON file; every
/// field falls back to the stock three-city chart when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub years: YearBounds,
    #[serde(default = "default_initial_end_year")]
    pub initial_end_year: i32,
    #[serde(default = "default_city")]
    pub default_city: CityId,
    #[serde(default = "default_city_sources")]
    pub cities: Vec<CitySource>,
    #[serde(default = "default_annotations")]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub annotation_style: AnnotationStyleConfig,
    #[serde(default)]
    pub transitions: TransitionDurations,
    /// Per-request HTTP timeout; `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margins: Margins::default(),
            years: YearBounds::default(),
            initial_end_year: default_initial_end_year(),
            default_city: default_city(),
            cities: default_city_sources(),
            annotations: default_annotations(),
            annotation_style: AnnotationStyleConfig::default(),
            transitions: TransitionDurations::default(),
            request_timeout_ms: None,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::Config(format!("failed to parse chart config: {err}")))?;
        config.validate()
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::Config(format!("failed to serialize chart config: {err}")))
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport.plot_area(self.margins)?;
        self.years.validate()?;
        self.annotation_style.validate()?;

        let mut seen = HashSet::new();
        for source in &self.cities {
            if !seen.insert(source.id.as_str()) {
                return Err(ChartError::Config(format!(
                    "city `{}` is configured twice",
                    source.id
                )));
            }
            if !source.population.is_finite() || source.population <= 0.0 {
                return Err(ChartError::Config(format!(
                    "city `{}` population must be finite and > 0",
                    source.id
                )));
            }
            source.color.validate()?;
        }
        if !seen.contains(self.default_city.as_str()) {
            return Err(ChartError::Config(format!(
                "default city `{}` is not configured",
                self.default_city
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(960, 300)
}

fn default_initial_end_year() -> i32 {
    2021
}

fn default_city() -> CityId {
    CityId::from("buffalo")
}

/// Stock sources; populations are 2021 census estimates in 100,000s.
#[must_use]
pub fn default_city_sources() -> Vec<CitySource> {
    vec![
        CitySource::new("norfolk", "Norfolk, VA", NORFOLK_URL, 2.38)
            .with_color(Color::rgb(0.12, 0.47, 0.71)),
        CitySource::new("buffalo", "Buffalo, NY", BUFFALO_URL, 2.83)
            .with_color(Color::rgb(1.0, 0.50, 0.05)),
        CitySource::new("memphis", "Memphis, TN", MEMPHIS_URL, 11.70)
            .with_color(Color::rgb(0.17, 0.63, 0.17)),
    ]
}
