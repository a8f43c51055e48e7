use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{PickerError, PickerResult};
use crate::interaction::{ClickSession, InputEvent, SessionKey};
use crate::model::{ComponentSet, EventId, StationCode};
use crate::render::RenderEffect;
use crate::sources::{EventCatalog, EventDataLoader};
use crate::store::{SaveReport, StoreMerger};

use super::{PickerConfig, SessionRegistry};

/// Panel opened by [`PickerRun::run`] with the effects that lay it out.
#[derive(Debug, Clone)]
pub struct OpenedPanel {
    pub key: SessionKey,
    pub effects: Vec<RenderEffect>,
}

/// What one `run` call produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub opened: Vec<OpenedPanel>,
    /// Events whose data could not be opened.
    pub skipped_events: Vec<EventId>,
    /// Stations without any usable component, or already open.
    pub skipped_stations: Vec<SessionKey>,
}

/// Operator-facing facade: builds sessions, routes input, saves.
///
/// Owns the registry for the lifetime of one picking run.
#[derive(Debug)]
pub struct PickerRun {
    config: PickerConfig,
    components: ComponentSet,
    stations: Vec<StationCode>,
    registry: SessionRegistry,
    sessions: IndexMap<SessionKey, ClickSession>,
    merger: StoreMerger,
}

impl PickerRun {
    pub fn new(config: PickerConfig) -> PickerResult<Self> {
        config.validate()?;
        let components = config.component_set()?;
        let stations = config.station_codes();
        Ok(Self {
            registry: SessionRegistry::new(components.clone()),
            components,
            stations,
            config,
            sessions: IndexMap::new(),
            merger: StoreMerger::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn session(&self, key: &SessionKey) -> Option<&ClickSession> {
        self.sessions.get(key)
    }

    pub fn session_keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.sessions.keys()
    }

    /// Builds one panel per (event, station) listed by `catalog`.
    ///
    /// Events that fail to open and stations without data are skipped;
    /// only a failing catalog aborts the run.
    pub fn run(
        &mut self,
        catalog: &dyn EventCatalog,
        loader: &dyn EventDataLoader,
    ) -> PickerResult<RunReport> {
        let events = catalog.list()?;
        let mut report = RunReport::default();

        for entry in &events {
            let source = match loader.open(entry) {
                Ok(source) => source,
                Err(err) => {
                    warn!(event = %entry.event_id, error = %err, "skipping event");
                    report.skipped_events.push(entry.event_id.clone());
                    continue;
                }
            };
            self.registry.ensure_event(&entry.event_id);

            for station in &self.stations {
                let key = SessionKey::new(entry.event_id.clone(), station.clone());
                if self.sessions.contains_key(&key) {
                    warn!(event = %key.event, station = %key.station, "panel already open");
                    report.skipped_stations.push(key);
                    continue;
                }
                match ClickSession::build(
                    key.clone(),
                    &self.components,
                    source.as_ref(),
                    self.config.navigation,
                ) {
                    Ok((session, effects)) => {
                        let key = self
                            .registry
                            .register_session(key.event, key.station);
                        self.sessions.insert(key.clone(), session);
                        report.opened.push(OpenedPanel { key, effects });
                    }
                    Err(err) => {
                        warn!(event = %key.event, station = %key.station, error = %err, "skipping station");
                        report.skipped_stations.push(key);
                    }
                }
            }
        }

        info!(
            events = events.len(),
            opened = report.opened.len(),
            skipped_events = report.skipped_events.len(),
            "run prepared"
        );
        Ok(report)
    }

    /// Routes one input event to the session owning `key`.
    pub fn dispatch(
        &mut self,
        key: &SessionKey,
        input: InputEvent,
    ) -> PickerResult<Vec<RenderEffect>> {
        let session = self.sessions.get_mut(key).ok_or_else(|| unknown_session(key))?;
        let pick = self
            .registry
            .pick_mut(key)
            .ok_or_else(|| unknown_session(key))?;
        Ok(session.handle(input, pick))
    }

    /// Discards the panel; its recorded picks stay in the registry.
    pub fn close_session(&mut self, key: &SessionKey) -> bool {
        self.sessions.shift_remove(key).is_some()
    }

    /// Merges everything picked so far into both configured stores.
    pub fn save(&self) -> PickerResult<SaveReport> {
        self.merger
            .save(self.registry.snapshot(), &self.config.store.paths())
    }
}

fn unknown_session(key: &SessionKey) -> PickerError {
    PickerError::InvalidData(format!(
        "no open session for {} / {}",
        key.event, key.station
    ))
}
