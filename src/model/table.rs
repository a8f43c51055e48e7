use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use crate::error::PickerResult;
use crate::model::{ComponentSet, StationPick};

/// Earthquake label, conventionally `YYYYMMDD_HHMM_<place>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Sensor deployment code, e.g. `v.skd2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationCode(String);

macro_rules! string_key {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_key!(EventId);
string_key!(StationCode);

pub type StationPicks = IndexMap<StationCode, StationPick>;

/// Event → Station → StationPick, in first-seen insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickTable {
    events: IndexMap<EventId, StationPicks>,
}

impl ClickTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, event: &str, station: &str) -> Option<&StationPick> {
        self.events.get(event)?.get(station)
    }

    pub fn get_mut(&mut self, event: &str, station: &str) -> Option<&mut StationPick> {
        self.events.get_mut(event)?.get_mut(station)
    }

    #[must_use]
    pub fn stations(&self, event: &str) -> Option<&StationPicks> {
        self.events.get(event)
    }

    #[must_use]
    pub fn contains_event(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Returns the event's station map, inserting an empty one if absent.
    pub fn ensure_event(&mut self, event: &EventId) -> &mut StationPicks {
        self.events.entry(event.clone()).or_default()
    }

    /// Returns the record for (event, station), seeding every slot unset when absent.
    pub fn seed(
        &mut self,
        event: &EventId,
        station: &StationCode,
        components: &ComponentSet,
    ) -> &mut StationPick {
        self.ensure_event(event)
            .entry(station.clone())
            .or_insert_with(|| StationPick::unset(components))
    }

    /// Replaces the record for (event, station) wholesale.
    pub fn insert(
        &mut self,
        event: EventId,
        station: StationCode,
        pick: StationPick,
    ) -> Option<StationPick> {
        self.events.entry(event).or_default().insert(station, pick)
    }

    /// Adds `(event, station)` pairs of `other` that this table lacks, keeping
    /// existing records untouched. Returns the number of pairs added.
    pub fn fill_missing_from(&mut self, other: &ClickTable) -> usize {
        let mut added = 0;
        for (event, stations) in &other.events {
            let target = self.ensure_event(event);
            for (station, pick) in stations {
                if let Entry::Vacant(slot) = target.entry(station.clone()) {
                    slot.insert(pick.clone());
                    added += 1;
                }
            }
        }
        added
    }

    /// Station-granularity merge: every pair present in `newer` replaces the
    /// local record wholesale, other pairs stay as they are.
    ///
    /// Returns the number of pairs written.
    pub fn overlay(&mut self, newer: &ClickTable) -> usize {
        let mut updated = 0;
        for (event, stations) in &newer.events {
            let target = self.ensure_event(event);
            for (station, pick) in stations {
                target.insert(station.clone(), pick.clone());
                updated += 1;
            }
        }
        updated
    }

    pub fn events(&self) -> impl Iterator<Item = (&EventId, &StationPicks)> {
        self.events.iter()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&EventId, &StationCode, &StationPick)> {
        self.events.iter().flat_map(|(event, stations)| {
            stations
                .iter()
                .map(move |(station, pick)| (event, station, pick))
        })
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.events.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Pretty JSON with two-space indentation; non-ASCII text stays unescaped.
    pub fn to_json_pretty(&self) -> PickerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
