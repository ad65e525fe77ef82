use super::payload::BundleSettings;
use crate::error::PayloadError;
use crate::model::Block;
use bincode::config::standard;
use bincode::{Decode, Encode};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// A binary image of a store's full state, including its id counter.
#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub next_id: u64,
    pub settings: BundleSettings,
    pub blocks: Vec<Block>,
}

impl StoreSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        bincode::encode_to_vec(self, standard())
            .map_err(|e| PayloadError::Snapshot(format!("Serialization failed: {}", e)))
    }

    /// Deserializes a snapshot from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        bincode::decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| PayloadError::Snapshot(format!("Deserialization failed: {}", e)))
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PayloadError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            PayloadError::Io(format!("Could not create file '{}': {}", path.display(), e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            PayloadError::Io(format!("Could not write to file '{}': {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Loads a snapshot from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PayloadError> {
        let path = path.as_ref();
        let mut file = fs::File::open(path).map_err(|e| {
            PayloadError::Io(format!("Could not open file '{}': {}", path.display(), e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            PayloadError::Io(format!("Could not read from file '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }
}
