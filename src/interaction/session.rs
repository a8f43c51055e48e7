use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::NavigationTuning;
use crate::core::{
    AmplitudeRange, AxisIndex, DataPoint, PanDirection, TimeWindow, ZoomDirection,
    format_time_label,
};
use crate::error::{PickerError, PickerResult};
use crate::interaction::{InputEvent, KeyCommand, PointerButton};
use crate::model::{
    Component, ComponentSet, EventId, PickOutcome, PickTime, StationCode, StationPick,
};
use crate::render::{MarkerHandle, NO_DATA_PLACEHOLDER, RenderEffect, TraceSeries};
use crate::sources::{Waveform, WaveformSource};

/// Identifies the (event, station) pair a session writes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub event: EventId,
    pub station: StationCode,
}

impl SessionKey {
    #[must_use]
    pub fn new(event: impl Into<EventId>, station: impl Into<StationCode>) -> Self {
        Self {
            event: event.into(),
            station: station.into(),
        }
    }
}

/// Transient cursor marker of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
struct AxisState {
    component: Component,
    has_data: bool,
    amplitude: AmplitudeRange,
    cursor: CursorState,
    markers: Vec<MarkerHandle>,
}

/// Interactive state of one (event, station) panel.
///
/// Axes share one time window; each axis has its own amplitude range,
/// cursor and permanent markers. The session never draws: every handler
/// returns the render effects the host should apply.
#[derive(Debug, Clone)]
pub struct ClickSession {
    key: SessionKey,
    axes: Vec<AxisState>,
    window: TimeWindow,
    tuning: NavigationTuning,
    next_marker_id: u64,
}

impl ClickSession {
    /// Fetches every component eagerly and lays out the panel.
    ///
    /// Components without data get a placeholder axis. Available traces are
    /// truncated to the shortest one and share the sampling rate of the first.
    /// Fails with [`PickerError::StationUnavailable`] when no component has data.
    pub fn build(
        key: SessionKey,
        components: &ComponentSet,
        source: &dyn WaveformSource,
        tuning: NavigationTuning,
    ) -> PickerResult<(Self, Vec<RenderEffect>)> {
        let tuning = tuning.validate()?;
        let mut fetched: Vec<Option<Waveform>> = Vec::with_capacity(components.len());
        for component in components.iter() {
            match source.fetch(&key.station, component) {
                Ok(waveform) if !waveform.is_empty() => fetched.push(Some(waveform)),
                Ok(_) => {
                    warn!(station = %key.station, %component, "empty waveform, axis disabled");
                    fetched.push(None);
                }
                Err(err) => {
                    warn!(station = %key.station, %component, error = %err, "axis disabled");
                    fetched.push(None);
                }
            }
        }

        let Some(sampling_rate_hz) = fetched.iter().flatten().map(|w| w.sampling_rate_hz).next()
        else {
            return Err(PickerError::StationUnavailable {
                event: key.event.to_string(),
                station: key.station.to_string(),
            });
        };
        let sample_count = fetched
            .iter()
            .flatten()
            .map(Waveform::len)
            .min()
            .unwrap_or_default();
        let window =
            TimeWindow::fit_to_trace(sample_count, sampling_rate_hz, tuning.window_padding_ratio)?;

        let mut effects = Vec::with_capacity(components.len() * 2 + 2);
        let mut axes = Vec::with_capacity(components.len());
        for (axis, (component, waveform)) in components.iter().zip(fetched).enumerate() {
            let state = match waveform {
                Some(waveform) => {
                    let mut samples = waveform.samples;
                    samples.truncate(sample_count);
                    let amplitude =
                        AmplitudeRange::fit_symmetric(&samples, tuning.window_padding_ratio);
                    let (min, max) = amplitude.bounds();
                    effects.push(RenderEffect::DrawSeries {
                        axis,
                        series: TraceSeries {
                            component: component.clone(),
                            sampling_rate_hz,
                            samples,
                        },
                    });
                    effects.push(RenderEffect::SetAmplitudeLimits { axis, min, max });
                    AxisState::new(component.clone(), true, amplitude)
                }
                None => {
                    effects.push(RenderEffect::DrawPlaceholder {
                        axis,
                        text: NO_DATA_PLACEHOLDER.to_owned(),
                    });
                    AxisState::new(component.clone(), false, AmplitudeRange::placeholder())
                }
            };
            axes.push(state);
        }

        let (start, end) = window.visible_range();
        effects.push(RenderEffect::SetTimeLimits { start, end });
        effects.push(RenderEffect::Redraw);

        info!(
            event = %key.event,
            station = %key.station,
            samples = sample_count,
            axes_with_data = axes.iter().filter(|a| a.has_data).count(),
            "click session built"
        );

        Ok((
            Self {
                key,
                axes,
                window,
                tuning,
                next_marker_id: 0,
            },
            effects,
        ))
    }

    /// Session over an explicit window without fetching data, for hosts that
    /// lay out axes themselves.
    pub fn with_window(
        key: SessionKey,
        components: &ComponentSet,
        window: TimeWindow,
        tuning: NavigationTuning,
    ) -> PickerResult<Self> {
        let tuning = tuning.validate()?;
        Ok(Self {
            key,
            axes: components
                .iter()
                .map(|c| AxisState::new(c.clone(), true, AmplitudeRange::placeholder()))
                .collect(),
            window,
            tuning,
            next_marker_id: 0,
        })
    }

    #[must_use]
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn axis_component(&self, axis: AxisIndex) -> Option<&Component> {
        self.axes.get(axis).map(|a| &a.component)
    }

    #[must_use]
    pub fn axis_has_data(&self, axis: AxisIndex) -> bool {
        self.axes.get(axis).is_some_and(|a| a.has_data)
    }

    #[must_use]
    pub fn time_window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn amplitude_range(&self, axis: AxisIndex) -> Option<AmplitudeRange> {
        self.axes.get(axis).map(|a| a.amplitude)
    }

    #[must_use]
    pub fn cursor(&self, axis: AxisIndex) -> Option<CursorState> {
        self.axes.get(axis).map(|a| a.cursor)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.axes.iter().map(|a| a.markers.len()).sum()
    }

    #[must_use]
    pub fn markers_on(&self, axis: AxisIndex) -> &[MarkerHandle] {
        self.axes
            .get(axis)
            .map(|a| a.markers.as_slice())
            .unwrap_or_default()
    }

    /// Single entry point for toolkit input.
    ///
    /// `pick` is this session's record in the registry. Rejected input yields
    /// no effects; nothing here returns an error.
    pub fn handle(&mut self, input: InputEvent, pick: &mut StationPick) -> Vec<RenderEffect> {
        match input {
            InputEvent::PointerMove { axis, position } => self.pointer_move(axis, position),
            InputEvent::PointerClick {
                axis,
                button,
                position,
            } => self.pointer_click(axis, button, position, pick),
            InputEvent::KeyPress { key, axis } => match key.command() {
                Some(KeyCommand::ClearMarkers) => self.clear_markers(),
                Some(KeyCommand::Pan(direction)) => {
                    let factor = self.tuning.pan_factor;
                    self.navigation_effects(|session| session.pan(direction, factor))
                }
                Some(KeyCommand::Zoom(direction)) => {
                    let factor = self.tuning.zoom_factor;
                    self.navigation_effects(|session| session.zoom(direction, factor))
                }
                Some(KeyCommand::ScaleAmplitude(direction)) => match axis {
                    Some(axis) if axis < self.axes.len() => {
                        let factor = self.tuning.amplitude_factor;
                        self.navigation_effects(|session| {
                            session.scale_amplitude(axis, direction, factor)
                        })
                    }
                    _ => Vec::new(),
                },
                None => {
                    debug!(?key, "ignoring unbound key");
                    Vec::new()
                }
            },
        }
    }

    /// Moves the cursor of the hovered axis and hides every other cursor.
    pub fn pointer_move(
        &mut self,
        axis: Option<AxisIndex>,
        position: Option<DataPoint>,
    ) -> Vec<RenderEffect> {
        let target = match (axis, position) {
            (Some(axis), Some(position)) if axis < self.axes.len() && position.is_finite() => {
                Some((axis, position))
            }
            _ => None,
        };

        let mut effects = Vec::new();
        for (index, state) in self.axes.iter_mut().enumerate() {
            match target {
                Some((axis, position)) if axis == index => {
                    state.cursor = CursorState {
                        visible: true,
                        x: position.x,
                        y: position.y,
                    };
                    effects.push(RenderEffect::ShowCursor {
                        axis,
                        position,
                        label: format_time_label(position.x),
                    });
                }
                _ if state.cursor.visible => {
                    state.cursor.visible = false;
                    effects.push(RenderEffect::HideCursor { axis: index });
                }
                _ => {}
            }
        }
        if !effects.is_empty() {
            effects.push(RenderEffect::Redraw);
        }
        effects
    }

    /// Commits a pick into the slot selected by `button` when that slot is unset.
    ///
    /// Set slots, unbound buttons, unknown axes and unresolved coordinates are
    /// ignored without touching `pick`.
    pub fn pointer_click(
        &mut self,
        axis: Option<AxisIndex>,
        button: PointerButton,
        position: Option<DataPoint>,
        pick: &mut StationPick,
    ) -> Vec<RenderEffect> {
        let (Some(axis), Some(position)) = (axis, position) else {
            return Vec::new();
        };
        if axis >= self.axes.len() || !position.is_finite() {
            return Vec::new();
        }
        let Some(side) = button.side() else {
            debug!(?button, "ignoring unbound button");
            return Vec::new();
        };
        let time = match PickTime::round(position.x) {
            Ok(time) => time,
            Err(err) => {
                debug!(error = %err, "ignoring click with unrepresentable time");
                return Vec::new();
            }
        };

        let component = self.axes[axis].component.clone();
        match pick.record(side, component.as_str(), time) {
            PickOutcome::Recorded(time) => {
                let handle = self.allocate_marker();
                self.axes[axis].markers.push(handle);
                debug!(
                    event = %self.key.event,
                    station = %self.key.station,
                    %side,
                    %component,
                    seconds = time.seconds(),
                    "pick recorded"
                );
                vec![
                    RenderEffect::AddMarker {
                        axis,
                        handle,
                        position,
                        label: format_time_label(time.seconds()),
                    },
                    RenderEffect::Redraw,
                ]
            }
            PickOutcome::AlreadySet(existing) => {
                debug!(
                    %side,
                    %component,
                    kept = existing.seconds(),
                    "slot already picked, click ignored"
                );
                Vec::new()
            }
            PickOutcome::UnknownComponent => {
                warn!(%component, "station record lacks component slot, click ignored");
                Vec::new()
            }
        }
    }

    /// Removes every permanent marker of the panel.
    ///
    /// Recorded picks stay in the station record and are still persisted.
    pub fn clear_markers(&mut self) -> Vec<RenderEffect> {
        let mut effects: Vec<RenderEffect> = self
            .axes
            .iter_mut()
            .flat_map(|axis| axis.markers.drain(..))
            .map(|handle| RenderEffect::RemoveMarker { handle })
            .collect();
        if !effects.is_empty() {
            effects.push(RenderEffect::Redraw);
        }
        effects
    }

    /// Shifts the shared window by `factor` of its span.
    pub fn pan(&mut self, direction: PanDirection, factor: f64) -> PickerResult<Vec<RenderEffect>> {
        self.window.pan(direction, factor)?;
        Ok(self.time_limit_effects())
    }

    /// Rescales the shared window around its midpoint.
    pub fn zoom(
        &mut self,
        direction: ZoomDirection,
        factor: f64,
    ) -> PickerResult<Vec<RenderEffect>> {
        self.window.zoom(direction, factor)?;
        Ok(self.time_limit_effects())
    }

    /// Rescales one axis's amplitude range around zero; other axes are untouched.
    pub fn scale_amplitude(
        &mut self,
        axis: AxisIndex,
        direction: ZoomDirection,
        factor: f64,
    ) -> PickerResult<Vec<RenderEffect>> {
        let state = self.axes.get_mut(axis).ok_or_else(|| {
            PickerError::InvalidData(format!("axis {axis} does not exist on this panel"))
        })?;
        state.amplitude.scale_about_zero(direction, factor)?;
        let (min, max) = state.amplitude.bounds();
        Ok(vec![
            RenderEffect::SetAmplitudeLimits { axis, min, max },
            RenderEffect::Redraw,
        ])
    }

    fn time_limit_effects(&self) -> Vec<RenderEffect> {
        let (start, end) = self.window.visible_range();
        vec![RenderEffect::SetTimeLimits { start, end }, RenderEffect::Redraw]
    }

    fn navigation_effects(
        &mut self,
        step: impl FnOnce(&mut Self) -> PickerResult<Vec<RenderEffect>>,
    ) -> Vec<RenderEffect> {
        step(self).unwrap_or_else(|err| {
            warn!(error = %err, "navigation step rejected");
            Vec::new()
        })
    }

    fn allocate_marker(&mut self) -> MarkerHandle {
        let handle = MarkerHandle::new(self.next_marker_id);
        self.next_marker_id += 1;
        handle
    }
}

impl AxisState {
    fn new(component: Component, has_data: bool, amplitude: AmplitudeRange) -> Self {
        Self {
            component,
            has_data,
            amplitude,
            cursor: CursorState::default(),
            markers: Vec::new(),
        }
    }
}
