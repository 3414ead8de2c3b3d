use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Resolves the plot rectangle left after subtracting axis margins.
    pub fn plot_area(self, margins: Margins) -> ChartResult<PlotArea> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        margins.validate()?;

        let width = f64::from(self.width) - margins.left - margins.right;
        let height = f64::from(self.height) - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margins leave no plot area inside {}x{} viewport",
                self.width, self.height
            )));
        }

        Ok(PlotArea {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }
}

/// Space reserved around the plot for axes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

impl Margins {
    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Plot rectangle in viewport pixels; series and annotations are laid out
/// in plot-local coordinates and translated by `left`/`top` when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn to_viewport(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.left, y + self.top)
    }

    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.left, y - self.top)
    }
}
