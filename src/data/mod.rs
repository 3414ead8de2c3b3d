//! Remote series loading.
//!
//! Every city endpoint is an opaque CSV source described by a `CitySource`.
//! Loads run concurrently and settle into a `SeriesCache`.

mod cache;
mod fetcher;
mod loader;

pub use cache::{CityLoad, SeriesCache};
pub use fetcher::{HttpFetcher, SeriesFetcher, StaticFetcher};
pub use loader::{CitySource, load, load_all, parse_month, parse_series_csv};
