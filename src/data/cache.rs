use indexmap::IndexMap;

use crate::core::{CityId, CitySeries};
use crate::error::ChartResult;

/// Load state of one city's slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CityLoad {
    Pending,
    Ready(CitySeries),
    Failed(String),
}

impl CityLoad {
    #[must_use]
    pub fn series(&self) -> Option<&CitySeries> {
        match self {
            Self::Ready(series) => Some(series),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Loaded series keyed by city, one slot per configured source.
///
/// Each slot is written once when its load settles; later writes are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCache {
    slots: IndexMap<CityId, CityLoad>,
}

impl SeriesCache {
    #[must_use]
    pub fn new<I>(cities: I) -> Self
    where
        I: IntoIterator<Item = CityId>,
    {
        Self {
            slots: cities
                .into_iter()
                .map(|city| (city, CityLoad::Pending))
                .collect(),
        }
    }

    /// Records a settled load. Returns `false` when the city is unknown or its
    /// slot already settled.
    pub fn store(&mut self, city: &CityId, result: ChartResult<CitySeries>) -> bool {
        let Some(slot) = self.slots.get_mut(city) else {
            return false;
        };
        if slot.is_settled() {
            return false;
        }
        *slot = match result {
            Ok(series) => CityLoad::Ready(series),
            Err(err) => CityLoad::Failed(err.to_string()),
        };
        true
    }

    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.slots.contains_key(city)
    }

    #[must_use]
    pub fn slot(&self, city: &str) -> Option<&CityLoad> {
        self.slots.get(city)
    }

    #[must_use]
    pub fn series(&self, city: &str) -> Option<&CitySeries> {
        self.slots.get(city).and_then(CityLoad::series)
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slots.values().all(CityLoad::is_settled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CityId, &CityLoad)> {
        self.slots.iter()
    }
}
