use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PickerError, PickerResult};
use crate::model::EventId;
use crate::sources::{EventCatalog, EventEntry};

/// Network/channel prefix of the per-event channel table file.
pub const DEFAULT_METADATA_PREFIX: &str = "03_02_43";

const TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Which catalog rows to keep. Selected events are listed by origin time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogSelection {
    #[default]
    All,
    /// Inclusive origin-time window.
    DateRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    /// Half-open window of data rows, zero based, in file order.
    Rows(Range<usize>),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    time: String,
    place: String,
}

#[derive(Debug, Clone)]
struct CatalogEvent {
    /// Data row position in the file, before any sorting.
    row: usize,
    time: NaiveDateTime,
    place: String,
}

/// Earthquake list read from a CSV file with `time` and `place` columns.
///
/// Each row maps to `<base_dir>/<YYYYMMDD_HHMM_place>/` and a channel table
/// `<prefix>_<YYYYMMDD>.euc.ch` inside it.
#[derive(Debug, Clone)]
pub struct CsvEventCatalog {
    csv_path: PathBuf,
    base_dir: PathBuf,
    metadata_prefix: String,
    selection: CatalogSelection,
}

impl CsvEventCatalog {
    #[must_use]
    pub fn new(csv_path: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            base_dir: base_dir.into(),
            metadata_prefix: DEFAULT_METADATA_PREFIX.to_owned(),
            selection: CatalogSelection::All,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: CatalogSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_metadata_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata_prefix = prefix.into();
        self
    }

    fn read_events(&self) -> PickerResult<Vec<CatalogEvent>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.csv_path)
            .map_err(|e| {
                PickerError::Catalog(format!(
                    "failed to open catalog {}: {e}",
                    self.csv_path.display()
                ))
            })?;

        let mut events = Vec::new();
        for (index, record) in reader.deserialize::<CatalogRow>().enumerate() {
            let row = record.map_err(|e| {
                PickerError::Catalog(format!(
                    "malformed catalog row {} in {}: {e}",
                    index + 1,
                    self.csv_path.display()
                ))
            })?;
            match parse_origin_time(&row.time) {
                Some(time) => events.push(CatalogEvent {
                    row: index,
                    time,
                    place: row.place,
                }),
                None => warn!(
                    row = index + 1,
                    time = %row.time,
                    "skipping catalog row with unparseable origin time"
                ),
            }
        }
        events.sort_by_key(|event| event.time);
        Ok(events)
    }

    fn entry_for(&self, event: &CatalogEvent) -> EventEntry {
        let event_id = event_directory_name(event.time, &event.place);
        let directory = self.base_dir.join(&event_id);
        let metadata_path = directory.join(metadata_file_name(&self.metadata_prefix, event.time));
        EventEntry {
            event_id: EventId::new(event_id),
            directory,
            metadata_path,
        }
    }

    #[must_use]
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

impl EventCatalog for CsvEventCatalog {
    fn list(&self) -> PickerResult<Vec<EventEntry>> {
        let events = self.read_events()?;
        let selected: Vec<EventEntry> = match &self.selection {
            CatalogSelection::All => events.iter().map(|e| self.entry_for(e)).collect(),
            CatalogSelection::DateRange { from, to } => events
                .iter()
                .filter(|e| e.time >= *from && e.time <= *to)
                .map(|e| self.entry_for(e))
                .collect(),
            CatalogSelection::Rows(rows) => events
                .iter()
                .filter(|e| rows.contains(&e.row))
                .map(|e| self.entry_for(e))
                .collect(),
        };
        debug!(total = events.len(), selected = selected.len(), "catalog listed");
        Ok(selected)
    }
}

/// Parses a catalog origin time; offsets are dropped, keeping the wall clock.
#[must_use]
pub fn parse_origin_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// `YYYYMMDD_HHMM_<place>` with spaces and slashes replaced by underscores.
#[must_use]
pub fn event_directory_name(time: NaiveDateTime, place: &str) -> String {
    let place: String = place
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect();
    format!("{}_{place}", time.format("%Y%m%d_%H%M"))
}

/// Parses a `START:END` row window; either bound may be omitted.
#[must_use]
pub fn parse_row_range(raw: &str) -> Option<Range<usize>> {
    let (start, end) = raw.trim().split_once(':')?;
    let start = match start.trim() {
        "" => 0,
        value => value.parse().ok()?,
    };
    let end = match end.trim() {
        "" => usize::MAX,
        value => value.parse().ok()?,
    };
    (start <= end).then_some(start..end)
}

#[must_use]
pub fn metadata_file_name(prefix: &str, time: NaiveDateTime) -> String {
    format!("{prefix}_{}.euc.ch", time.format("%Y%m%d"))
}
