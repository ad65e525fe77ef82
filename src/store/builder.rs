use super::BundleStore;
use crate::error::PayloadError;
use crate::persistence::{BundleSettings, DEFAULT_NAMESPACE};
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Tunables for a [`BundleStore`]. Every field has a default, so a JSON
/// config only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Inputs per page in [`BundleStore::project_block`].
    pub page_size: usize,
    /// Metafield namespace read on restore and written on save.
    pub metafield_namespace: String,
    /// Title given to freshly created blocks.
    pub default_block_title: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            metafield_namespace: DEFAULT_NAMESPACE.to_string(),
            default_block_title: String::new(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, PayloadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PayloadError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&content)
    }
}

pub struct StoreBuilder {
    config: StoreConfig,
    settings: BundleSettings,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            settings: BundleSettings::default(),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.config.metafield_namespace = namespace.to_string();
        self
    }

    pub fn with_default_block_title(mut self, title: &str) -> Self {
        self.config.default_block_title = title.to_string();
        self
    }

    pub fn with_settings(mut self, settings: BundleSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> BundleStore {
        BundleStore::from_parts(self.config, self.settings)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
