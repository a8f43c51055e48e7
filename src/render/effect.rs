use serde::{Deserialize, Serialize};

use crate::core::{AxisIndex, DataPoint};
use crate::error::{PickerError, PickerResult};
use crate::model::Component;

/// Text drawn on an axis whose component has no waveform.
pub const NO_DATA_PLACEHOLDER: &str = "No Data";

/// Identifier of one permanent pick marker, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Evenly sampled trace starting at t = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSeries {
    pub component: Component,
    pub sampling_rate_hz: f64,
    pub samples: Vec<f64>,
}

impl TraceSeries {
    #[must_use]
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sampling_rate_hz
    }

    pub fn points(&self) -> impl Iterator<Item = DataPoint> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(self.time_at(index), *value))
    }
}

/// One drawing side effect produced by a click session.
///
/// Sessions never draw; hosts feed these to a [`super::PanelRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEffect {
    DrawSeries {
        axis: AxisIndex,
        series: TraceSeries,
    },
    DrawPlaceholder {
        axis: AxisIndex,
        text: String,
    },
    ShowCursor {
        axis: AxisIndex,
        position: DataPoint,
        label: String,
    },
    HideCursor {
        axis: AxisIndex,
    },
    AddMarker {
        axis: AxisIndex,
        handle: MarkerHandle,
        position: DataPoint,
        label: String,
    },
    RemoveMarker {
        handle: MarkerHandle,
    },
    /// Shared by every axis of the panel.
    SetTimeLimits {
        start: f64,
        end: f64,
    },
    SetAmplitudeLimits {
        axis: AxisIndex,
        min: f64,
        max: f64,
    },
    Redraw,
}

impl RenderEffect {
    pub fn validate(&self) -> PickerResult<()> {
        match self {
            Self::DrawSeries { series, .. } => {
                if !series.sampling_rate_hz.is_finite() || series.sampling_rate_hz <= 0.0 {
                    return Err(PickerError::InvalidData(
                        "series sampling rate must be finite and > 0".to_owned(),
                    ));
                }
            }
            Self::ShowCursor { position, .. } | Self::AddMarker { position, .. } => {
                if !position.is_finite() {
                    return Err(PickerError::InvalidData(
                        "annotation position must be finite".to_owned(),
                    ));
                }
            }
            Self::SetTimeLimits { start, end } => validate_limits(*start, *end, "time")?,
            Self::SetAmplitudeLimits { min, max, .. } => validate_limits(*min, *max, "amplitude")?,
            Self::DrawPlaceholder { .. }
            | Self::HideCursor { .. }
            | Self::RemoveMarker { .. }
            | Self::Redraw => {}
        }
        Ok(())
    }
}

fn validate_limits(low: f64, high: f64, name: &str) -> PickerResult<()> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(PickerError::InvalidData(format!(
            "{name} limits must be finite and increasing"
        )));
    }
    Ok(())
}
