use serde::Serialize;

use crate::core::CityId;
use crate::data::CitySource;

use super::ViewState;

pub const PREV_ICON: &str = "img/left-dark.png";
pub const PREV_ICON_DISABLED: &str = "img/left-disabled-dark.png";
pub const NEXT_ICON: &str = "img/right-dark.png";
pub const NEXT_ICON_DISABLED: &str = "img/right-disabled-dark.png";

/// Year-step button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowControl {
    pub enabled: bool,
    pub icon: &'static str,
}

impl ArrowControl {
    fn new(enabled: bool, icon: &'static str, disabled_icon: &'static str) -> Self {
        Self {
            enabled,
            icon: if enabled { icon } else { disabled_icon },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityToggleControl {
    pub id: CityId,
    pub label: String,
    pub checked: bool,
}

/// Snapshot of every UI control derived from a `ViewState`.
///
/// Hosts apply it to their widgets after each controller operation; nothing
/// in here feeds back into chart state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub title: String,
    pub prev: ArrowControl,
    pub next: ArrowControl,
    pub per_capita_visible: bool,
    pub per_capita_checked: bool,
    pub cities: Vec<CityToggleControl>,
}

impl ControlsView {
    #[must_use]
    pub fn from_state(state: &ViewState, sources: &[CitySource]) -> Self {
        Self {
            title: chart_title(state.bounds().start_year, state.visible_end_year()),
            prev: ArrowControl::new(!state.at_lower_bound(), PREV_ICON, PREV_ICON_DISABLED),
            next: ArrowControl::new(!state.at_upper_bound(), NEXT_ICON, NEXT_ICON_DISABLED),
            per_capita_visible: state.per_capita_unlocked(),
            per_capita_checked: state.normalize_by_population(),
            cities: sources
                .iter()
                .map(|source| CityToggleControl {
                    id: source.id.clone(),
                    label: source.label.clone(),
                    checked: state.is_enabled(source.id.as_str()),
                })
                .collect(),
        }
    }
}

#[must_use]
pub fn chart_title(start_year: i32, end_year: i32) -> String {
    format!("Auto Thefts in select US Cities in {start_year}-{end_year}")
}
