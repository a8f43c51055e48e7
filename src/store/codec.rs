use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PickerError, PickerResult};
use crate::model::ClickTable;

/// Strict load: `Ok(None)` for a missing file, an error for unreadable or
/// malformed content.
pub fn try_load_store(path: &Path) -> PickerResult<Option<ClickTable>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(PickerError::InvalidData(format!(
                "failed to read store {}: {err}",
                path.display()
            )));
        }
    };
    ClickTable::from_json_str(&raw)
        .map(Some)
        .map_err(|source| PickerError::StoreParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Lenient load used by saves: anything but a readable, well-formed store
/// yields an empty table.
#[must_use]
pub fn load_store_or_empty(path: &Path) -> ClickTable {
    match try_load_store(path) {
        Ok(Some(table)) => {
            debug!(
                path = %path.display(),
                pairs = table.pair_count(),
                "store loaded"
            );
            table
        }
        Ok(None) => {
            debug!(path = %path.display(), "store missing, starting empty");
            ClickTable::new()
        }
        Err(err) => {
            warn!(error = %err, "store unusable, starting empty");
            ClickTable::new()
        }
    }
}
