//! Contracts for the collaborators that feed click sessions.
//!
//! Decoding waveform containers and enumerating events live outside this
//! crate; hosts plug them in through these traits.

mod csv_catalog;
mod memory;

pub use csv_catalog::{
    CatalogSelection, CsvEventCatalog, DEFAULT_METADATA_PREFIX, event_directory_name,
    metadata_file_name, parse_origin_time, parse_row_range,
};
pub use memory::{InMemoryEventLoader, InMemoryWaveformSource, StaticEventCatalog};

use std::path::PathBuf;

use crate::error::{PickerError, PickerResult};
use crate::model::{Component, EventId, StationCode};

/// Samples of one channel plus its sampling rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub sampling_rate_hz: f64,
}

impl Waveform {
    pub fn new(samples: Vec<f64>, sampling_rate_hz: f64) -> PickerResult<Self> {
        if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
            return Err(PickerError::InvalidData(
                "sampling rate must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            samples,
            sampling_rate_hz,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One event to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub event_id: EventId,
    /// Directory holding the raw waveform containers.
    pub directory: PathBuf,
    /// Channel metadata file of the event.
    pub metadata_path: PathBuf,
}

pub trait EventCatalog {
    /// Ordered, finite list of events to process.
    fn list(&self) -> PickerResult<Vec<EventEntry>>;
}

/// Opens an event's raw data.
///
/// Fails with [`PickerError::EventLoad`] when the container cannot be read;
/// the caller skips that event and continues.
pub trait EventDataLoader {
    fn open(&self, event: &EventEntry) -> PickerResult<Box<dyn WaveformSource>>;
}

pub trait WaveformSource {
    /// Fails with [`PickerError::DataUnavailable`] when the channel has no data.
    fn fetch(&self, station: &StationCode, component: &Component) -> PickerResult<Waveform>;
}
