//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! bundle_builder crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use bundle_builder::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let payload = BundlePayload::from_file("path/to/payload.json")?;
//! let store = BundleStore::from_payload(payload, StoreConfig::default())?;
//! println!("{}", store.summary());
//! # Ok(())
//! # }
//! ```

// Editing model
pub use crate::factory::InputFactory;
pub use crate::model::{
    Block, BlockId, BlockPatch, IdAllocator, Input, InputId, InputKind, InputOption, InputPatch,
    OptionId, OptionPatch, PriceAdjustment,
};
pub use crate::options::OptionListEditor;
pub use crate::store::{BundleStore, InputDraft, StoreBuilder, StoreConfig};

// Views
pub use crate::projection::{InputPage, project};
pub use crate::summary::SummaryFormatter;

// Persistence and host data
pub use crate::host::{HostProduct, HostProductData};
pub use crate::persistence::{
    BundlePayload, BundleSettings, CustomOptionKind, CustomOptions, KeyType, Metafield,
    PayloadSink, SettingsPatch, StoreSnapshot,
};

// Error types
pub use crate::error::{BundleError, EntityKind, PayloadError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
