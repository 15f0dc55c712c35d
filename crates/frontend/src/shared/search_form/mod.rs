//! Search form state persistence.
//!
//! The values of a page's search form are saved to `localStorage` on submit,
//! keyed by page path, and put back into the form the next time the same
//! path is loaded. Pages under `/search` are never restored.

pub mod component;
pub mod config;
pub mod dom;
pub mod form;
pub mod persister;
pub mod store;

pub use component::PersistedSearchForm;
pub use config::PersisterConfig;
pub use dom::{bind_document, DomForm};
pub use form::{FieldKind, FormField, SearchForm};
pub use persister::{snapshot_of, FormStatePersister, PersistError, RestoreOutcome};
pub use store::{KeyValueStore, LocalStorage, MemoryStore, StoreError};
