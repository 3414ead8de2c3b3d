use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Half-open calendar range `[start, end)` shown on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDomain {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateDomain {
    /// Builds the domain spanning January 1st of `start_year` up to, but
    /// excluding, January 1st of `end_year + 1`.
    pub fn from_years(start_year: i32, end_year: i32) -> ChartResult<Self> {
        if end_year < start_year {
            return Err(ChartError::InvalidData(format!(
                "end year {end_year} precedes start year {start_year}"
            )));
        }
        Ok(Self {
            start: year_start(start_year)?,
            end: year_start(end_year.saturating_add(1))?,
        })
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

pub(crate) fn year_start(year: i32) -> ChartResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ChartError::InvalidData(format!("year {year} is out of calendar range")))
}

/// Calendar time axis mapping dates onto `[0, width_px]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: DateDomain,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: DateDomain, width_px: f64) -> ChartResult<Self> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }
        let linear = LinearScale::new(date_to_days(domain.start), date_to_days(domain.end))?
            .with_range(0.0, width_px)?;
        Ok(Self { domain, linear })
    }

    #[must_use]
    pub fn domain(self) -> DateDomain {
        self.domain
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.linear.range().1
    }

    pub fn date_to_pixel(self, date: NaiveDate) -> ChartResult<f64> {
        self.linear.domain_to_pixel(date_to_days(date))
    }

    /// Inverse mapping, rounded to the nearest calendar day.
    pub fn pixel_to_date(self, pixel: f64) -> ChartResult<NaiveDate> {
        let days = self.linear.pixel_to_domain(pixel)?.round();
        if days < f64::from(i32::MIN) || days > f64::from(i32::MAX) {
            return Err(ChartError::InvalidData(
                "pixel maps outside calendar range".to_owned(),
            ));
        }
        NaiveDate::from_num_days_from_ce_opt(days as i32).ok_or_else(|| {
            ChartError::InvalidData("pixel maps outside calendar range".to_owned())
        })
    }
}

#[must_use]
pub fn date_to_days(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}
