use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::{DateDomain, PlotArea, TimeScale, ValueScale};
use crate::data::SeriesCache;
use crate::error::ChartResult;

use super::ViewState;

/// Axis domains derived from view state and loaded data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDomains {
    pub date: DateDomain,
    pub value_max: f64,
}

impl ChartDomains {
    #[must_use]
    pub fn value_domain(self) -> (f64, f64) {
        (0.0, self.value_max)
    }

    /// True when no enabled city contributes a positive value; the chart
    /// then renders axes and annotations only.
    #[must_use]
    pub fn is_value_empty(self) -> bool {
        self.value_max <= 0.0
    }

    pub fn scales(self, plot: PlotArea) -> ChartResult<ChartScales> {
        Ok(ChartScales {
            time: TimeScale::new(self.date, plot.width)?,
            value: ValueScale::new(self.value_max, plot.height)?,
        })
    }
}

/// Scales resolved for one render pass, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub time: TimeScale,
    pub value: ValueScale,
}

/// Recomputes both axis domains.
///
/// The date domain is `[start_year-01-01, (end_year + 1)-01-01)`. The value
/// max scans the leading `visible_month_count` points of each enabled,
/// loaded city; enabled cities without data are skipped.
pub fn compute_domains(state: &ViewState, cache: &SeriesCache) -> ChartResult<ChartDomains> {
    let date = DateDomain::from_years(state.bounds().start_year, state.visible_end_year())?;
    let window = state.visible_month_count();
    let selector = state.value_selector();

    let value_max = state
        .enabled_cities()
        .iter()
        .filter_map(|city| cache.series(city.as_str()))
        .filter_map(|series| series.max_value_in_window(window, selector))
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0);

    trace!(
        end_year = state.visible_end_year(),
        window,
        value_max,
        "computed chart domains"
    );
    Ok(ChartDomains { date, value_max })
}
