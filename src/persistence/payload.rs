use crate::error::PayloadError;
use crate::model::Block;
use crate::model::price::leading_integer;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether every key in the bundle is the same or keys are cut individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    #[default]
    Same,
    Custom,
}

impl KeyType {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::Same => "same",
            KeyType::Custom => "custom",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same" => Ok(KeyType::Same),
            "custom" => Ok(KeyType::Custom),
            other => Err(PayloadError::Metafield {
                key: "keyType".to_string(),
                message: format!("unknown key type '{}'", other),
            }),
        }
    }
}

/// The value type of the merchant-defined custom option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum CustomOptionKind {
    #[default]
    Text,
    Number,
    Select,
}

impl CustomOptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomOptionKind::Text => "text",
            CustomOptionKind::Number => "number",
            CustomOptionKind::Select => "select",
        }
    }
}

impl FromStr for CustomOptionKind {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(CustomOptionKind::Text),
            "number" => Ok(CustomOptionKind::Number),
            "select" => Ok(CustomOptionKind::Select),
            other => Err(PayloadError::Metafield {
                key: "customOptions".to_string(),
                message: format!("unknown option type '{}'", other),
            }),
        }
    }
}

/// A free-form name/type pair the merchant attaches to the bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(default)]
pub struct CustomOptions {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CustomOptionKind,
}

/// Bundle-wide settings that sit next to the block tree in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleSettings {
    pub key_type: KeyType,
    pub fabrication: bool,
    pub additional_keys: u32,
    pub custom_options: CustomOptions,
}

/// Partial update of [`BundleSettings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub key_type: Option<KeyType>,
    pub fabrication: Option<bool>,
    pub additional_keys: Option<u32>,
    pub custom_option_name: Option<String>,
    pub custom_option_kind: Option<CustomOptionKind>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_type(mut self, key_type: KeyType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    pub fn fabrication(mut self, fabrication: bool) -> Self {
        self.fabrication = Some(fabrication);
        self
    }

    pub fn additional_keys(mut self, count: u32) -> Self {
        self.additional_keys = Some(count);
        self
    }

    /// Takes the raw text of the additional-keys field; non-numeric or
    /// negative text becomes zero.
    pub fn additional_keys_text(mut self, raw: &str) -> Self {
        let count = leading_integer(raw)
            .map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX));
        self.additional_keys = Some(count);
        self
    }

    pub fn custom_option_name(mut self, name: impl Into<String>) -> Self {
        self.custom_option_name = Some(name.into());
        self
    }

    pub fn custom_option_kind(mut self, kind: CustomOptionKind) -> Self {
        self.custom_option_kind = Some(kind);
        self
    }

    pub(crate) fn apply_to(&self, settings: &mut BundleSettings) {
        if let Some(key_type) = self.key_type {
            settings.key_type = key_type;
        }
        if let Some(fabrication) = self.fabrication {
            settings.fabrication = fabrication;
        }
        if let Some(count) = self.additional_keys {
            settings.additional_keys = count;
        }
        if let Some(name) = &self.custom_option_name {
            settings.custom_options.name = name.clone();
        }
        if let Some(kind) = self.custom_option_kind {
            settings.custom_options.kind = kind;
        }
    }
}

/// Everything the host persists for a bundle-configured product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlePayload {
    #[serde(flatten)]
    pub settings: BundleSettings,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl BundlePayload {
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a payload from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, PayloadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PayloadError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&content)
    }
}
