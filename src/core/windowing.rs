use crate::core::SeriesPoint;

/// Number of monthly slots in a window running from January of `start_year`
/// through December of `end_year`. Empty when `end_year < start_year`.
#[must_use]
pub fn window_month_count(start_year: i32, end_year: i32) -> usize {
    let years = i64::from(end_year) - i64::from(start_year) + 1;
    usize::try_from(years.max(0) * 12).unwrap_or(usize::MAX)
}

/// Returns the leading `month_count` points.
///
/// The window is positional: it assumes one point per month starting at the
/// window start, so gaps or duplicate months in the source shift which dates
/// fall inside it.
#[must_use]
pub fn leading_points(points: &[SeriesPoint], month_count: usize) -> &[SeriesPoint] {
    &points[..month_count.min(points.len())]
}
