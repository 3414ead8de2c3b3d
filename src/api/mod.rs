mod axis_ticks;
mod chart_config;
mod controller;
mod controls;
mod render_frame_builder;
mod scale_coordinator;
mod series_renderer;
mod view_state;

pub use axis_ticks::{AxisTick, time_axis_ticks, value_axis_ticks};
pub use chart_config::{ChartConfig, TransitionDurations, default_city_sources};
pub use controller::{AxisTransition, ChartController};
pub use controls::{
    ArrowControl, CityToggleControl, ControlsView, NEXT_ICON, NEXT_ICON_DISABLED, PREV_ICON,
    PREV_ICON_DISABLED, chart_title,
};
pub use render_frame_builder::{FrameInputs, FrameStyle, build_render_frame};
pub use scale_coordinator::{ChartDomains, ChartScales, compute_domains};
pub use series_renderer::{DrawnPath, PathTransition, ReconcileReport, SeriesRenderer};
pub use view_state::{ViewState, YearBounds};
