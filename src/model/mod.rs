//! Click-table data model.
//!
//! A pick is addressed by (event, station, side, component). Every slot
//! accepts at most one value; later attempts report `AlreadySet`.

pub mod component;
pub mod pick;
pub mod table;

pub use component::{Component, ComponentSet};
pub use pick::{PickOutcome, PickTime, Side, SidePicks, StationPick};
pub use table::{ClickTable, EventId, StationCode, StationPicks};
