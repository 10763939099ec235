use std::sync::{Arc, RwLock};

use tracing::info;

use crate::table::TaxonomyTable;

/// Shared handle to the current taxonomy snapshot.
///
/// Readers take a cheap `Arc` clone and keep using it for the whole request,
/// so a refresh never changes the table under an in-flight match. Writers
/// swap the whole table at once.
#[derive(Debug)]
pub struct TaxonomyStore {
    current: RwLock<Arc<TaxonomyTable>>,
}

impl TaxonomyStore {
    pub fn new(table: TaxonomyTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<TaxonomyTable> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the snapshot. Returns the previous one.
    pub fn replace(&self, table: TaxonomyTable) -> Arc<TaxonomyTable> {
        let next = Arc::new(table);
        let stats = next.stats();
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::mem::replace(&mut *guard, next);
        info!(
            entries = stats.entries,
            households = stats.households,
            rejected = stats.rejected_entries,
            "taxonomy snapshot replaced"
        );
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::{normalize, NormalizerConfig};

    #[test]
    fn held_snapshot_survives_replace() {
        let store = TaxonomyStore::new(
            TaxonomyTable::from_json_str(
                r#"{"entries": [{"term": "butter", "category": "dairy"}]}"#,
                NormalizerConfig::default(),
            )
            .unwrap(),
        );

        let before = store.snapshot();
        let previous = store.replace(TaxonomyTable::empty(NormalizerConfig::default()));

        assert!(Arc::ptr_eq(&before, &previous));
        assert!(before.resolve(&normalize("butter"), None).is_some());
        assert!(store.snapshot().resolve(&normalize("butter"), None).is_none());
    }
}
