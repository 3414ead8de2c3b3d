//! theft-chart: interactive monthly auto-theft line chart.
//!
//! Loads per-city monthly counts from remote CSV endpoints, keeps a small
//! view state (enabled cities, visible year window, per-capita scaling) and
//! turns every state change into a backend-agnostic `RenderFrame`.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
