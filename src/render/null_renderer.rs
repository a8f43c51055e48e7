use indexmap::{IndexMap, IndexSet};

use crate::core::{AxisIndex, DataPoint};
use crate::error::{PickerError, PickerResult};
use crate::render::{MarkerHandle, PanelRenderer, TraceSeries};

/// Headless renderer used by tests and scripted runs.
///
/// It keeps just enough state to observe what a real backend would show and
/// rejects effects no backend could apply, such as removing an unknown marker.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub series_axes: Vec<AxisIndex>,
    pub placeholder_axes: Vec<AxisIndex>,
    pub cursors: IndexMap<AxisIndex, (DataPoint, String)>,
    pub markers: IndexSet<MarkerHandle>,
    pub time_limits: Option<(f64, f64)>,
    pub amplitude_limits: IndexMap<AxisIndex, (f64, f64)>,
    pub redraw_count: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn live_marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn visible_cursor(&self, axis: AxisIndex) -> Option<&(DataPoint, String)> {
        self.cursors.get(&axis)
    }
}

impl PanelRenderer for NullRenderer {
    fn draw_series(&mut self, axis: AxisIndex, _series: &TraceSeries) -> PickerResult<()> {
        self.series_axes.push(axis);
        Ok(())
    }

    fn draw_placeholder(&mut self, axis: AxisIndex, _text: &str) -> PickerResult<()> {
        self.placeholder_axes.push(axis);
        Ok(())
    }

    fn set_cursor(
        &mut self,
        axis: AxisIndex,
        cursor: Option<(DataPoint, &str)>,
    ) -> PickerResult<()> {
        match cursor {
            Some((position, label)) => {
                self.cursors.insert(axis, (position, label.to_owned()));
            }
            None => {
                self.cursors.shift_remove(&axis);
            }
        }
        Ok(())
    }

    fn annotate(
        &mut self,
        _axis: AxisIndex,
        handle: MarkerHandle,
        _position: DataPoint,
        _text: &str,
    ) -> PickerResult<()> {
        if !self.markers.insert(handle) {
            return Err(PickerError::InvalidData(format!(
                "marker {} already exists",
                handle.id()
            )));
        }
        Ok(())
    }

    fn remove_annotation(&mut self, handle: MarkerHandle) -> PickerResult<()> {
        if !self.markers.shift_remove(&handle) {
            return Err(PickerError::InvalidData(format!(
                "marker {} is not displayed",
                handle.id()
            )));
        }
        Ok(())
    }

    fn set_time_limits(&mut self, start: f64, end: f64) -> PickerResult<()> {
        self.time_limits = Some((start, end));
        Ok(())
    }

    fn set_amplitude_limits(&mut self, axis: AxisIndex, min: f64, max: f64) -> PickerResult<()> {
        self.amplitude_limits.insert(axis, (min, max));
        Ok(())
    }

    fn request_redraw(&mut self) -> PickerResult<()> {
        self.redraw_count += 1;
        Ok(())
    }
}
