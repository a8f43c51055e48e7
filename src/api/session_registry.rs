use tracing::debug;

use crate::interaction::SessionKey;
use crate::model::{ClickTable, ComponentSet, EventId, StationCode, StationPick};

/// Click table accumulated by the sessions of one run.
///
/// Each (event, station) record is written only by the session holding its
/// key, so no locking is involved.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    components: ComponentSet,
    table: ClickTable,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(components: ComponentSet) -> Self {
        Self {
            components,
            table: ClickTable::new(),
        }
    }

    #[must_use]
    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    /// Seeds an all-unset record for (event, station) unless one exists and
    /// returns the key the owning session writes through.
    pub fn register_session(&mut self, event: EventId, station: StationCode) -> SessionKey {
        if self.table.get(event.as_str(), station.as_str()).is_none() {
            debug!(%event, %station, "seeding station record");
        }
        self.table.seed(&event, &station, &self.components);
        SessionKey { event, station }
    }

    /// Records an event whose data was opened, even if none of its stations
    /// end up with a panel.
    pub fn ensure_event(&mut self, event: &EventId) {
        self.table.ensure_event(event);
    }

    #[must_use]
    pub fn pick(&self, key: &SessionKey) -> Option<&StationPick> {
        self.table.get(key.event.as_str(), key.station.as_str())
    }

    pub fn pick_mut(&mut self, key: &SessionKey) -> Option<&mut StationPick> {
        self.table.get_mut(key.event.as_str(), key.station.as_str())
    }

    /// Everything accumulated so far.
    ///
    /// The borrow keeps every session from writing until it is released.
    #[must_use]
    pub fn snapshot(&self) -> &ClickTable {
        &self.table
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.table.pair_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
