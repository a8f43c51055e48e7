use serde::{Deserialize, Serialize};

use crate::core::{PanDirection, ZoomDirection};
use crate::error::{PickerError, PickerResult};

/// Smallest visible span the window may collapse to, in seconds.
pub const MIN_VISIBLE_SPAN: f64 = 1e-9;

/// Shared time axis of one panel with separate full and visible ranges.
///
/// `full_*` tracks the fitted trace extent.
/// `visible_*` includes padding and every pan/zoom applied since.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl TimeWindow {
    /// Creates a window with matching full and visible ranges.
    pub fn new(start: f64, end: f64) -> PickerResult<Self> {
        let (start, end) = normalize_range(start, end, 1.0)?;
        Ok(Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
        })
    }

    /// Fits the window to a trace of `sample_count` samples at `sampling_rate_hz`.
    ///
    /// The trace spans `0 ..= (n - 1) / rate`; the visible range adds
    /// `padding_ratio` of that span on both sides.
    pub fn fit_to_trace(
        sample_count: usize,
        sampling_rate_hz: f64,
        padding_ratio: f64,
    ) -> PickerResult<Self> {
        if sample_count == 0 {
            return Err(PickerError::InvalidData(
                "time window cannot be fitted to an empty trace".to_owned(),
            ));
        }
        if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
            return Err(PickerError::InvalidData(
                "sampling rate must be finite and > 0".to_owned(),
            ));
        }
        if !padding_ratio.is_finite() || padding_ratio < 0.0 {
            return Err(PickerError::InvalidData(
                "window padding ratio must be finite and >= 0".to_owned(),
            ));
        }

        let last = (sample_count - 1) as f64 / sampling_rate_hz;
        let (full_start, full_end) = normalize_range(0.0, last, 1.0 / sampling_rate_hz)?;
        let span = full_end - full_start;
        Ok(Self {
            full_start,
            full_end,
            visible_start: full_start - span * padding_ratio,
            visible_end: full_end + span * padding_ratio,
        })
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.visible_end - self.visible_start
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        0.5 * (self.visible_start + self.visible_end)
    }

    /// Overrides the visible range without modifying the fitted range.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> PickerResult<()> {
        let (start, end) = normalize_range(start, end, MIN_VISIBLE_SPAN)?;
        self.visible_start = start;
        self.visible_end = end;
        Ok(())
    }

    pub fn reset_visible_range_to_full(&mut self) {
        self.visible_start = self.full_start;
        self.visible_end = self.full_end;
    }

    /// Shifts the visible range by `factor` of its current span.
    pub fn pan(&mut self, direction: PanDirection, factor: f64) -> PickerResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PickerError::InvalidData(
                "pan factor must be finite and > 0".to_owned(),
            ));
        }

        let delta = direction.sign() * self.span() * factor;
        self.visible_start += delta;
        self.visible_end += delta;
        Ok(())
    }

    /// Rescales the visible range around its midpoint.
    ///
    /// `In` divides the span by `factor`, `Out` multiplies it.
    pub fn zoom(&mut self, direction: ZoomDirection, factor: f64) -> PickerResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PickerError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }

        let center = self.midpoint();
        let target_span = (self.span() * direction.span_multiplier(factor)).max(MIN_VISIBLE_SPAN);
        self.set_visible_range(center - target_span / 2.0, center + target_span / 2.0)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> PickerResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(PickerError::InvalidData(
            "time range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
