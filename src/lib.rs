//! arrival-picker: interactive seismic arrival-time picking core.
//!
//! Click sessions turn pointer and key input into one-shot picks per
//! (event, station, side, component) and into render effects for a host
//! toolkit. The store merger folds each run's picks into the persisted
//! click tables without losing records from earlier runs.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod model;
pub mod render;
pub mod sources;
pub mod store;
pub mod telemetry;

pub use api::{PickerConfig, PickerRun, SessionRegistry};
pub use error::{PickerError, PickerResult};
pub use interaction::{ClickSession, InputEvent, SessionKey};
pub use model::{ClickTable, Side, StationPick};
pub use store::StoreMerger;
