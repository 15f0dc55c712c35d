use std::collections::HashSet;

use contracts::shared::search_form::{FormSnapshot, SnapshotError};

use super::config::PersisterConfig;
use super::form::SearchForm;
use super::store::{KeyValueStore, StoreError};

/// Result of restoring a form on page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    StoreUnavailable,
    ReservedPath,
    NothingStored,
    /// Stored data could not be parsed; the form was left untouched.
    Malformed,
    Restored { applied: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Collect the values of all identified fields of `form`.
pub fn snapshot_of<F: SearchForm + ?Sized>(form: &F) -> FormSnapshot {
    form.fields()
        .into_iter()
        .filter_map(|field| {
            let id = field.identifier()?.to_string();
            Some((id, field.value))
        })
        .collect()
}

/// Saves and restores search form state per page path.
pub struct FormStatePersister<S> {
    store: Option<S>,
    config: PersisterConfig,
}

impl<S: KeyValueStore> FormStatePersister<S> {
    /// `store` is `None` when durable storage is unavailable; every operation is then a no-op.
    pub fn new(store: Option<S>, config: PersisterConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn config(&self) -> &PersisterConfig {
        &self.config
    }

    /// Apply the snapshot stored for `path` to the fields of `form`.
    pub fn restore<F: SearchForm + ?Sized>(&self, path: &str, form: &mut F) -> RestoreOutcome {
        let Some(store) = self.store.as_ref() else {
            return RestoreOutcome::StoreUnavailable;
        };
        if self.config.is_reserved(path) {
            return RestoreOutcome::ReservedPath;
        }

        let key = self.config.storage_key(path);
        let Some(raw) = store.get(&key) else {
            return RestoreOutcome::NothingStored;
        };

        let snapshot = match FormSnapshot::from_json(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("Ignoring stored search form state {}: {}", key, err);
                return RestoreOutcome::Malformed;
            }
        };

        // write() covers every element sharing an id
        let mut written = HashSet::new();
        for field in form.fields() {
            let Some(id) = field.identifier() else { continue };
            let Some(value) = snapshot.get(id) else { continue };
            if !field.kind.accepts(value) {
                log::debug!("Stored value for {} does not fit a {:?} field", id, field.kind);
                continue;
            }
            if written.insert(id.to_string()) {
                form.write(id, value);
            }
        }

        RestoreOutcome::Restored {
            applied: written.len(),
        }
    }

    /// Store the current field values of `form` for `path`, replacing any previous snapshot.
    ///
    /// Returns the written snapshot, or `None` when storage is unavailable.
    pub fn persist<F: SearchForm + ?Sized>(
        &mut self,
        path: &str,
        form: &F,
    ) -> Result<Option<FormSnapshot>, PersistError> {
        let Some(store) = self.store.as_mut() else {
            return Ok(None);
        };

        let snapshot = snapshot_of(form);
        let raw = snapshot.to_json()?;
        store.set(&self.config.storage_key(path), &raw)?;

        Ok(Some(snapshot))
    }

    /// Drop the snapshot stored for `path`.
    pub fn forget(&mut self, path: &str) {
        if let Some(store) = self.store.as_mut() {
            store.remove(&self.config.storage_key(path));
        }
    }
}
