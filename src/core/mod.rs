pub mod line_series;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;
pub mod value_scale;
pub mod windowing;

pub use line_series::{LineSegment, PathPoint, path_segments, project_series_path};
pub use scale::LinearScale;
pub use series::{CityId, CitySeries, SeriesPoint, ValueSelector};
pub use time_scale::{DateDomain, TimeScale, date_to_days};
pub use types::{Margins, PlotArea, Viewport};
pub use value_scale::{EMPTY_DOMAIN_FALLBACK_MAX, ValueScale};
pub use windowing::{leading_points, window_month_count};
