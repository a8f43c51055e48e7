use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::round_pick_time;
use crate::error::PickerResult;
use crate::model::{Component, ComponentSet};

/// Independent single-shot pick slot per component.
///
/// Conventionally `Left` is the primary phase and `Right` the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrival time in seconds, rounded to millisecond precision on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickTime(f64);

impl PickTime {
    /// Rounds `seconds` to three decimals.
    pub fn round(seconds: f64) -> PickerResult<Self> {
        round_pick_time(seconds).map(Self)
    }

    #[must_use]
    pub fn seconds(self) -> f64 {
        self.0
    }
}

/// Result of trying to commit a pick into a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Recorded(PickTime),
    /// The slot already holds a value; it is left unchanged.
    AlreadySet(PickTime),
    UnknownComponent,
}

impl PickOutcome {
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Slot value as found on disk.
///
/// Older raw click files stored each slot as a list of at most one value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSlot {
    Value(Option<PickTime>),
    Legacy(Vec<PickTime>),
}

impl From<StoredSlot> for Option<PickTime> {
    fn from(slot: StoredSlot) -> Self {
        match slot {
            StoredSlot::Value(value) => value,
            StoredSlot::Legacy(values) => values.first().copied(),
        }
    }
}

/// Component → optional pick for one side of one station.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "IndexMap<Component, StoredSlot>")]
pub struct SidePicks {
    slots: IndexMap<Component, Option<PickTime>>,
}

impl From<IndexMap<Component, StoredSlot>> for SidePicks {
    fn from(stored: IndexMap<Component, StoredSlot>) -> Self {
        Self {
            slots: stored
                .into_iter()
                .map(|(component, slot)| (component, slot.into()))
                .collect(),
        }
    }
}

impl Serialize for SidePicks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.slots.serialize(serializer)
    }
}

impl SidePicks {
    #[must_use]
    pub fn unset(components: &ComponentSet) -> Self {
        Self {
            slots: components.iter().map(|c| (c.clone(), None)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, component: &str) -> Option<PickTime> {
        self.slots.get(component).copied().flatten()
    }

    fn record(&mut self, component: &str, time: PickTime) -> PickOutcome {
        match self.slots.get_mut(component) {
            None => PickOutcome::UnknownComponent,
            Some(Some(existing)) => PickOutcome::AlreadySet(*existing),
            Some(slot @ None) => {
                *slot = Some(time);
                PickOutcome::Recorded(time)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Component, Option<PickTime>)> {
        self.slots.iter().map(|(component, slot)| (component, *slot))
    }

    #[must_use]
    pub fn recorded_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }
}

/// Both sides of one (event, station) record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationPick {
    #[serde(default)]
    pub left: SidePicks,
    #[serde(default)]
    pub right: SidePicks,
}

impl StationPick {
    #[must_use]
    pub fn unset(components: &ComponentSet) -> Self {
        Self {
            left: SidePicks::unset(components),
            right: SidePicks::unset(components),
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SidePicks {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[must_use]
    pub fn get(&self, side: Side, component: &str) -> Option<PickTime> {
        self.side(side).get(component)
    }

    /// Commits `time` into (side, component) only when the slot is unset.
    pub fn record(&mut self, side: Side, component: &str, time: PickTime) -> PickOutcome {
        match side {
            Side::Left => self.left.record(component, time),
            Side::Right => self.right.record(component, time),
        }
    }

    #[must_use]
    pub fn recorded_count(&self) -> usize {
        self.left.recorded_count() + self.right.recorded_count()
    }
}
