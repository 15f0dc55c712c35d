use contracts::shared::search_form::{
    is_under_prefix, storage_key_with_prefix, SEARCH_FORM_KEY_PREFIX, SEARCH_FORM_SELECTOR,
    SEARCH_PATH_PREFIX,
};

/// Settings of the search form persister.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersisterConfig {
    /// Prepended to the page path to build the storage key.
    pub key_prefix: String,
    /// Pages below this path are never restored.
    pub reserved_prefix: String,
    /// CSS selector of the server-rendered form.
    pub form_selector: String,
}

impl Default for PersisterConfig {
    fn default() -> Self {
        Self {
            key_prefix: SEARCH_FORM_KEY_PREFIX.to_string(),
            reserved_prefix: SEARCH_PATH_PREFIX.to_string(),
            form_selector: SEARCH_FORM_SELECTOR.to_string(),
        }
    }
}

impl PersisterConfig {
    pub fn storage_key(&self, path: &str) -> String {
        storage_key_with_prefix(&self.key_prefix, path)
    }

    pub fn is_reserved(&self, path: &str) -> bool {
        is_under_prefix(path, &self.reserved_prefix)
    }
}
