use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::error::{PickerError, PickerResult};
use crate::model::ClickTable;
use crate::store::{load_store_or_empty, write_atomic};

/// Outcome of one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// (event, station) pairs written from the new data.
    pub updated_count: usize,
    /// (event, station) pairs in the combined store.
    pub total_pairs: usize,
    pub written: Vec<PathBuf>,
}

/// Load-merge-write of click tables into one or more parallel stores.
///
/// Every store path receives the same combined table, so parallel stores
/// stay structurally identical after each save. At most one save runs at a
/// time per merger.
#[derive(Debug, Default)]
pub struct StoreMerger {
    in_flight: AtomicBool,
}

struct SaveGuard<'a>(&'a AtomicBool);

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl StoreMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `new_data` into every store in `store_paths`.
    ///
    /// Stores are loaded leniently; a missing or corrupt file counts as empty.
    /// When stores disagree, earlier paths win and pairs found only in later
    /// stores are carried over. Each (event, station) of `new_data` then
    /// replaces the loaded record wholesale. Write failures abort the save and
    /// leave `new_data` untouched for a retry.
    pub fn save<P: AsRef<Path>>(
        &self,
        new_data: &ClickTable,
        store_paths: &[P],
    ) -> PickerResult<SaveReport> {
        if store_paths.is_empty() {
            return Err(PickerError::InvalidConfig(
                "at least one store path is required".to_owned(),
            ));
        }
        let _guard = self.acquire()?;

        let mut combined = ClickTable::new();
        for (index, path) in store_paths.iter().enumerate() {
            let loaded = load_store_or_empty(path.as_ref());
            if index == 0 {
                combined = loaded;
            } else {
                let carried = combined.fill_missing_from(&loaded);
                if carried > 0 {
                    debug!(
                        path = %path.as_ref().display(),
                        carried,
                        "store held records missing from the canonical store"
                    );
                }
            }
        }

        let updated_count = combined.overlay(new_data);
        let text = combined.to_json_pretty()?;

        let mut written = Vec::with_capacity(store_paths.len());
        for path in store_paths {
            let path = path.as_ref();
            write_atomic(path, &text)?;
            written.push(path.to_path_buf());
        }

        info!(
            updated = updated_count,
            total = combined.pair_count(),
            stores = written.len(),
            "click table merged and saved"
        );
        Ok(SaveReport {
            updated_count,
            total_pairs: combined.pair_count(),
            written,
        })
    }

    fn acquire(&self) -> PickerResult<SaveGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| PickerError::SaveInProgress)?;
        Ok(SaveGuard(&self.in_flight))
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_save_is_rejected_while_guard_is_held() {
        let merger = StoreMerger::new();
        let guard = merger.acquire().expect("first acquire");
        assert!(merger.is_saving());

        let dir = tempfile::tempdir().expect("tempdir");
        let result = merger.save(&ClickTable::new(), &[dir.path().join("store.json")]);
        assert!(matches!(result, Err(PickerError::SaveInProgress)));

        drop(guard);
        assert!(!merger.is_saving());
        merger
            .save(&ClickTable::new(), &[dir.path().join("store.json")])
            .expect("save after release");
    }

    #[test]
    fn empty_path_list_is_rejected() {
        let merger = StoreMerger::new();
        let paths: [&Path; 0] = [];
        assert!(merger.save(&ClickTable::new(), &paths).is_err());
    }
}
