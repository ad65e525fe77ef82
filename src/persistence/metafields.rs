use super::payload::{BundlePayload, BundleSettings, CustomOptions};
use crate::error::PayloadError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Namespace the admin extensions read and write.
pub const DEFAULT_NAMESPACE: &str = "bundle";

pub const KEY_TYPE: &str = "keyType";
pub const FABRICATION: &str = "fabrication";
pub const ADDITIONAL_KEYS: &str = "additionalKeys";
pub const CUSTOM_OPTIONS: &str = "customOptions";
pub const BLOCKS: &str = "blocks";

/// A namespaced key/value slot the host persists on the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
}

impl Metafield {
    fn new(namespace: &str, key: &str, value: String, value_type: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value,
            value_type: value_type.to_string(),
        }
    }
}

/// The host's save function for a finished payload.
///
/// The store never persists anything itself; it hands the payload to a sink.
pub trait PayloadSink {
    fn save(&mut self, payload: &BundlePayload) -> Result<(), PayloadError>;
}

impl<F> PayloadSink for F
where
    F: FnMut(&BundlePayload) -> Result<(), PayloadError>,
{
    fn save(&mut self, payload: &BundlePayload) -> Result<(), PayloadError> {
        self(payload)
    }
}

impl BundlePayload {
    /// Splits the payload into one metafield per top-level key.
    pub fn to_metafields(&self, namespace: &str) -> Result<Vec<Metafield>, PayloadError> {
        let settings = &self.settings;
        Ok(vec![
            Metafield::new(
                namespace,
                KEY_TYPE,
                settings.key_type.as_str().to_string(),
                "single_line_text_field",
            ),
            Metafield::new(
                namespace,
                FABRICATION,
                settings.fabrication.to_string(),
                "boolean",
            ),
            Metafield::new(
                namespace,
                ADDITIONAL_KEYS,
                settings.additional_keys.to_string(),
                "number_integer",
            ),
            Metafield::new(
                namespace,
                CUSTOM_OPTIONS,
                serde_json::to_string(&settings.custom_options)?,
                "json",
            ),
            Metafield::new(namespace, BLOCKS, serde_json::to_string(&self.blocks)?, "json"),
        ])
    }

    /// Rebuilds a payload from the metafields under `namespace`.
    ///
    /// Fields from other namespaces are ignored, missing keys fall back to
    /// their defaults.
    pub fn from_metafields<'a>(
        fields: impl IntoIterator<Item = &'a Metafield>,
        namespace: &str,
    ) -> Result<Self, PayloadError> {
        let values: AHashMap<String, String> = fields
            .into_iter()
            .filter(|field| field.namespace == namespace)
            .map(|field| (field.key.clone(), field.value.clone()))
            .collect();
        Self::from_values(&values)
    }

    /// Rebuilds a payload from an already namespace-filtered key/value map.
    pub fn from_values(values: &AHashMap<String, String>) -> Result<Self, PayloadError> {
        let mut settings = BundleSettings::default();

        if let Some(raw) = values.get(KEY_TYPE) {
            settings.key_type = raw.trim().parse()?;
        }
        if let Some(raw) = values.get(FABRICATION) {
            settings.fabrication = raw
                .trim()
                .parse()
                .map_err(|_| malformed(FABRICATION, format!("'{}' is not a boolean", raw)))?;
        }
        if let Some(raw) = values.get(ADDITIONAL_KEYS) {
            settings.additional_keys = raw.trim().parse().map_err(|_| {
                malformed(
                    ADDITIONAL_KEYS,
                    format!("'{}' is not a non-negative integer", raw),
                )
            })?;
        }
        if let Some(raw) = values.get(CUSTOM_OPTIONS) {
            settings.custom_options = serde_json::from_str::<CustomOptions>(raw)
                .map_err(|e| malformed(CUSTOM_OPTIONS, e.to_string()))?;
        }
        let blocks = match values.get(BLOCKS) {
            Some(raw) => {
                serde_json::from_str(raw).map_err(|e| malformed(BLOCKS, e.to_string()))?
            }
            None => Vec::new(),
        };

        for key in values.keys() {
            if ![KEY_TYPE, FABRICATION, ADDITIONAL_KEYS, CUSTOM_OPTIONS, BLOCKS].contains(&key.as_str())
            {
                debug!(key = %key, "ignoring unknown bundle metafield");
            }
        }

        Ok(Self { settings, blocks })
    }
}

fn malformed(key: &str, message: String) -> PayloadError {
    PayloadError::Metafield {
        key: key.to_string(),
        message,
    }
}
