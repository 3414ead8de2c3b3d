use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, ValueScale};
use crate::error::ChartResult;

pub(super) const AXIS_TIME_TARGET_SPACING_PX: f64 = 72.0;
pub(super) const AXIS_VALUE_TARGET_SPACING_PX: f64 = 26.0;

const TIME_STEP_MONTHS: [u32; 5] = [1, 2, 3, 6, 12];

/// One labelled tick, positioned in plot-local pixels along its axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position_px: f64,
    pub label: String,
}

pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Month-start ticks across the time domain, end inclusive.
///
/// The step is the smallest of 1, 2, 3, 6 or 12 months that keeps the tick
/// count within the spacing budget. January ticks carry the year, the rest
/// the month name.
pub fn time_axis_ticks(scale: TimeScale) -> ChartResult<Vec<AxisTick>> {
    let domain = scale.domain();
    let target = axis_tick_target_count(scale.width_px(), AXIS_TIME_TARGET_SPACING_PX, 2, 24);
    let span_months = months_between(domain.start, domain.end);
    let step = TIME_STEP_MONTHS
        .into_iter()
        .find(|step| (span_months / step) as usize + 1 <= target)
        .unwrap_or(12);

    let Some(mut tick) = first_month_start_on_or_after(domain.start) else {
        return Ok(Vec::new());
    };
    let mut ticks = Vec::new();
    while tick <= domain.end {
        if tick.month0() % step == 0 {
            ticks.push(AxisTick {
                position_px: scale.date_to_pixel(tick)?,
                label: time_tick_label(tick),
            });
        }
        let Some(next) = tick.checked_add_months(Months::new(1)) else {
            break;
        };
        tick = next;
    }
    Ok(ticks)
}

fn time_tick_label(date: NaiveDate) -> String {
    if date.month() == 1 {
        date.format("%Y").to_string()
    } else {
        date.format("%B").to_string()
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month0() as i32 - start.month0() as i32;
    u32::try_from(months).unwrap_or(0)
}

fn first_month_start_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    let month_start = date.with_day(1)?;
    if month_start == date {
        Some(month_start)
    } else {
        month_start.checked_add_months(Months::new(1))
    }
}

/// Evenly spaced "nice" ticks (1, 2 or 5 times a power of ten) from zero to
/// the effective value max.
pub fn value_axis_ticks(scale: ValueScale) -> ChartResult<Vec<AxisTick>> {
    let (_, max) = scale.effective_domain();
    let target = axis_tick_target_count(scale.height_px(), AXIS_VALUE_TARGET_SPACING_PX, 2, 12);
    let step = nice_step(max, target.saturating_sub(1).max(1));
    if step <= 0.0 {
        return Ok(Vec::new());
    }

    let decimals = step_decimals(step);
    let mut ticks = Vec::new();
    let mut index = 0_u32;
    loop {
        let value = f64::from(index) * step;
        if value > max + step * 1e-9 {
            break;
        }
        ticks.push(AxisTick {
            position_px: scale.value_to_pixel(value)?,
            label: format!("{value:.decimals$}"),
        });
        index += 1;
    }
    Ok(ticks)
}

pub(super) fn nice_step(span: f64, intervals: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || intervals == 0 {
        return 0.0;
    }
    let raw = span / intervals as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn step_decimals(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil().max(0.0) as usize
    }
}
