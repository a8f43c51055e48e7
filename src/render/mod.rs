mod effect;
mod null_renderer;

pub use effect::{MarkerHandle, NO_DATA_PLACEHOLDER, RenderEffect, TraceSeries};
pub use null_renderer::NullRenderer;

use crate::core::{AxisIndex, DataPoint};
use crate::error::PickerResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive explicit effects so drawing code stays isolated from the
/// pick model and input handling. Marker handles are allocated by the
/// session; a backend maps each handle to its own annotation object.
pub trait PanelRenderer {
    fn draw_series(&mut self, axis: AxisIndex, series: &TraceSeries) -> PickerResult<()>;

    fn draw_placeholder(&mut self, axis: AxisIndex, text: &str) -> PickerResult<()>;

    /// `None` hides the transient cursor marker of `axis`.
    fn set_cursor(&mut self, axis: AxisIndex, cursor: Option<(DataPoint, &str)>)
    -> PickerResult<()>;

    fn annotate(
        &mut self,
        axis: AxisIndex,
        handle: MarkerHandle,
        position: DataPoint,
        text: &str,
    ) -> PickerResult<()>;

    fn remove_annotation(&mut self, handle: MarkerHandle) -> PickerResult<()>;

    fn set_time_limits(&mut self, start: f64, end: f64) -> PickerResult<()>;

    fn set_amplitude_limits(&mut self, axis: AxisIndex, min: f64, max: f64) -> PickerResult<()>;

    fn request_redraw(&mut self) -> PickerResult<()>;

    /// Validates and applies effects in order, stopping at the first failure.
    fn apply(&mut self, effects: &[RenderEffect]) -> PickerResult<()> {
        for effect in effects {
            effect.validate()?;
            match effect {
                RenderEffect::DrawSeries { axis, series } => self.draw_series(*axis, series)?,
                RenderEffect::DrawPlaceholder { axis, text } => {
                    self.draw_placeholder(*axis, text)?;
                }
                RenderEffect::ShowCursor {
                    axis,
                    position,
                    label,
                } => self.set_cursor(*axis, Some((*position, label)))?,
                RenderEffect::HideCursor { axis } => self.set_cursor(*axis, None)?,
                RenderEffect::AddMarker {
                    axis,
                    handle,
                    position,
                    label,
                } => self.annotate(*axis, *handle, *position, label)?,
                RenderEffect::RemoveMarker { handle } => self.remove_annotation(*handle)?,
                RenderEffect::SetTimeLimits { start, end } => self.set_time_limits(*start, *end)?,
                RenderEffect::SetAmplitudeLimits { axis, min, max } => {
                    self.set_amplitude_limits(*axis, *min, *max)?;
                }
                RenderEffect::Redraw => self.request_redraw()?,
            }
        }
        Ok(())
    }
}
