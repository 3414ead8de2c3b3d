use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Upper bound substituted when the value domain collapses to `[0, 0]`.
pub const EMPTY_DOMAIN_FALLBACK_MAX: f64 = 1.0;

/// Vertical value axis mapping `[0, max]` onto an inverted pixel range
/// `[height_px, 0]`.
///
/// An empty domain (no enabled series, or only zero counts) keeps `max == 0`
/// for callers while projecting through `[0, EMPTY_DOMAIN_FALLBACK_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    max: f64,
    linear: LinearScale,
}

impl ValueScale {
    pub fn new(max: f64, height_px: f64) -> ChartResult<Self> {
        if !max.is_finite() || max < 0.0 {
            return Err(ChartError::InvalidData(
                "value domain max must be finite and >= 0".to_owned(),
            ));
        }
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale height must be finite and > 0".to_owned(),
            ));
        }

        let effective_max = if max > 0.0 {
            max
        } else {
            EMPTY_DOMAIN_FALLBACK_MAX
        };
        let linear = LinearScale::new(0.0, effective_max)?.with_range(height_px, 0.0)?;
        Ok(Self { max, linear })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (0.0, self.max)
    }

    /// Domain actually used for projection and tick generation.
    #[must_use]
    pub fn effective_domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.max <= 0.0
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        self.linear.range().0
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(value)
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }
}
