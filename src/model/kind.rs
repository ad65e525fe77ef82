use crate::error::BundleError;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of field kinds a block can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Radio,
    MultiSelect,
    Text,
    File,
}

impl InputKind {
    pub const ALL: [InputKind; 4] = [
        InputKind::Radio,
        InputKind::MultiSelect,
        InputKind::Text,
        InputKind::File,
    ];

    /// Whether inputs of this kind carry an option list.
    pub fn has_options(self) -> bool {
        matches!(self, InputKind::Radio | InputKind::MultiSelect)
    }

    /// Whether options of this kind carry a default quantity.
    pub fn has_quantity(self) -> bool {
        matches!(self, InputKind::MultiSelect)
    }

    /// The wire name used in payloads and by the host UI.
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Radio => "radio",
            InputKind::MultiSelect => "multiSelect",
            InputKind::Text => "text",
            InputKind::File => "file",
        }
    }

    /// The label the admin panel shows in its type picker.
    pub fn label(self) -> &'static str {
        match self {
            InputKind::Radio => "Radio Button",
            InputKind::MultiSelect => "Multi-Select",
            InputKind::Text => "Text Box",
            InputKind::File => "File Upload",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BundleError::UnsupportedInputType(s.to_string()))
    }
}
