use std::fmt;
use thiserror::Error;

/// The kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Block,
    Input,
    Option,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Block => write!(f, "block"),
            EntityKind::Input => write!(f, "input"),
            EntityKind::Option => write!(f, "option"),
        }
    }
}

/// Errors raised by the editing model when a mutation cannot be applied.
///
/// All of these are recoverable: the host is expected to surface them to the
/// merchant or drop the attempted action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    #[error("No {entity} with id '{id}' exists")]
    NotFound { entity: EntityKind, id: u64 },

    #[error("Entity '{id}' rejected the change: {reason}")]
    InvalidShape { id: u64, reason: String },

    #[error("Unsupported input type: '{0}'")]
    UnsupportedInputType(String),

    #[error("No input draft is in progress")]
    NoActiveDraft,
}

impl BundleError {
    pub(crate) fn block_not_found(id: impl Into<u64>) -> Self {
        BundleError::NotFound {
            entity: EntityKind::Block,
            id: id.into(),
        }
    }

    pub(crate) fn input_not_found(id: impl Into<u64>) -> Self {
        BundleError::NotFound {
            entity: EntityKind::Input,
            id: id.into(),
        }
    }

    pub(crate) fn option_not_found(id: impl Into<u64>) -> Self {
        BundleError::NotFound {
            entity: EntityKind::Option,
            id: id.into(),
        }
    }

    pub(crate) fn invalid_shape(id: impl Into<u64>, reason: impl Into<String>) -> Self {
        BundleError::InvalidShape {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while encoding, restoring or handing off a bundle payload.
#[derive(Error, Debug, Clone)]
pub enum PayloadError {
    #[error("Failed to parse payload JSON: {0}")]
    Json(String),

    #[error("Metafield '{key}' could not be read: {message}")]
    Metafield { key: String, message: String },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Host rejected the payload: {0}")]
    Sink(String),

    #[error("Restored configuration is inconsistent: {0}")]
    Shape(#[from] BundleError),
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::Json(err.to_string())
    }
}
