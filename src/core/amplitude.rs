use serde::{Deserialize, Serialize};

use crate::core::ZoomDirection;
use crate::error::{PickerError, PickerResult};

/// Range used when a trace is flat or absent.
const FALLBACK_HALF_SPAN: f64 = 1.0;

/// Vertical range of a single axis.
///
/// Rescaling always keeps the range centered on zero amplitude, so a shifted
/// range snaps back to symmetric after the first scale step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeRange {
    min: f64,
    max: f64,
}

impl AmplitudeRange {
    pub fn new(min: f64, max: f64) -> PickerResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(PickerError::InvalidData(
                "amplitude range must be finite and non-zero".to_owned(),
            ));
        }
        Ok(Self {
            min: min.min(max),
            max: min.max(max),
        })
    }

    /// Symmetric range covering the absolute peak of `samples` plus padding.
    #[must_use]
    pub fn fit_symmetric(samples: &[f64], padding_ratio: f64) -> Self {
        let peak = samples
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .map(f64::abs)
            .fold(0.0_f64, f64::max);
        let half = if peak > 0.0 {
            peak * (1.0 + padding_ratio.max(0.0))
        } else {
            FALLBACK_HALF_SPAN
        };
        Self {
            min: -half,
            max: half,
        }
    }

    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            min: -FALLBACK_HALF_SPAN,
            max: FALLBACK_HALF_SPAN,
        }
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Rescales the span by `factor` around y = 0.
    pub fn scale_about_zero(&mut self, direction: ZoomDirection, factor: f64) -> PickerResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PickerError::InvalidData(
                "amplitude factor must be finite and > 0".to_owned(),
            ));
        }

        let half = self.span() * direction.span_multiplier(factor) / 2.0;
        if !half.is_finite() || half <= 0.0 {
            return Err(PickerError::InvalidData(
                "amplitude span collapsed".to_owned(),
            ));
        }
        self.min = -half;
        self.max = half;
        Ok(())
    }
}
