use std::path::PathBuf;

use thiserror::Error;

pub type PickerResult<T> = Result<T, PickerError>;

#[derive(Debug, Error)]
pub enum PickerError {
    /// One station/component has no waveform; the axis is skipped.
    #[error("no waveform for {station}.{component}")]
    DataUnavailable { station: String, component: String },

    /// Every component of a station failed, so no panel can be built.
    #[error("no component of station {station} is available for event {event}")]
    StationUnavailable { event: String, station: String },

    /// The event's raw data container could not be opened.
    #[error("failed to load event {event}: {reason}")]
    EventLoad { event: String, reason: String },

    #[error("failed to parse store {}: {source}", path.display())]
    StoreParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write store {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize click table: {0}")]
    StoreSerialize(#[from] serde_json::Error),

    #[error("a save is already in progress")]
    SaveInProgress,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("event catalog error: {0}")]
    Catalog(String),
}
