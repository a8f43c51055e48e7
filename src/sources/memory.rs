use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{PickerError, PickerResult};
use crate::model::{Component, EventId, StationCode};
use crate::sources::{EventCatalog, EventDataLoader, EventEntry, Waveform, WaveformSource};

/// Waveforms held in memory, keyed by channel.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWaveformSource {
    channels: HashMap<(StationCode, Component), Waveform>,
}

impl InMemoryWaveformSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_channel(
        mut self,
        station: impl Into<StationCode>,
        component: impl Into<Component>,
        waveform: Waveform,
    ) -> Self {
        self.insert(station, component, waveform);
        self
    }

    pub fn insert(
        &mut self,
        station: impl Into<StationCode>,
        component: impl Into<Component>,
        waveform: Waveform,
    ) {
        self.channels
            .insert((station.into(), component.into()), waveform);
    }
}

impl WaveformSource for InMemoryWaveformSource {
    fn fetch(&self, station: &StationCode, component: &Component) -> PickerResult<Waveform> {
        self.channels
            .get(&(station.clone(), component.clone()))
            .cloned()
            .ok_or_else(|| PickerError::DataUnavailable {
                station: station.to_string(),
                component: component.to_string(),
            })
    }
}

/// Loader serving in-memory sources; events without a source fail to load.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLoader {
    sources: IndexMap<EventId, InMemoryWaveformSource>,
}

impl InMemoryEventLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event(mut self, event: impl Into<EventId>, source: InMemoryWaveformSource) -> Self {
        self.sources.insert(event.into(), source);
        self
    }
}

impl EventDataLoader for InMemoryEventLoader {
    fn open(&self, event: &EventEntry) -> PickerResult<Box<dyn WaveformSource>> {
        match self.sources.get(&event.event_id) {
            Some(source) => Ok(Box::new(source.clone())),
            None => Err(PickerError::EventLoad {
                event: event.event_id.to_string(),
                reason: format!("no waveform data under {}", event.directory.display()),
            }),
        }
    }
}

/// Fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct StaticEventCatalog {
    entries: Vec<EventEntry>,
}

impl StaticEventCatalog {
    #[must_use]
    pub fn new(entries: Vec<EventEntry>) -> Self {
        Self { entries }
    }
}

impl EventCatalog for StaticEventCatalog {
    fn list(&self) -> PickerResult<Vec<EventEntry>> {
        Ok(self.entries.clone())
    }
}
