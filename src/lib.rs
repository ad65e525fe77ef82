//! # bundle-builder - Product Bundle Configuration Model
//!
//! **bundle-builder** is the editing model behind a bundle configurator in an
//! e-commerce admin. A merchant groups typed inputs (radio, multi-select, free
//! text, file upload) into blocks, and radio/multi-select inputs carry a list
//! of priced options. The crate owns that tree and every edit made to it; the
//! rendering host only supplies product data and a save function.
//!
//! ## Core Workflow
//!
//! 1.  **Restore or start fresh**: build a [`BundleStore`](store::BundleStore) with
//!     `BundleStore::builder()`, or restore one from host metafields with
//!     `BundleStore::from_host` / `BundleStore::from_metafields`.
//! 2.  **Edit**: call the store's mutators in response to user actions. Each one
//!     validates the shape rules (options only on radio/multi-select inputs,
//!     quantities only on multi-select options) and returns the updated entity.
//! 3.  **Display**: query [`project`](projection::project) or
//!     `BundleStore::project_block` for a type-filtered, paged view.
//! 4.  **Save**: hand the [`BundlePayload`](persistence::BundlePayload) to the host
//!     through a [`PayloadSink`](persistence::PayloadSink).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bundle_builder::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = BundleStore::builder().with_page_size(5).build();
//!
//!     // A block with one radio input; the input comes with a seeded option.
//!     let block = store.create_block()?;
//!     store.update_block(block.id(), BlockPatch::new().title("Size"))?;
//!     let input = store.add_input(block.id(), InputKind::Radio)?;
//!
//!     // Add a second option and price it from raw form text.
//!     let large = store.add_option(block.id(), input.id())?;
//!     store.update_option(
//!         block.id(),
//!         input.id(),
//!         large.id(),
//!         OptionPatch::new().title("Large").price_adjustment_text("5.50"),
//!     )?;
//!
//!     let page = store.project_block(block.id(), InputKind::Radio, 1)?;
//!     println!("{} of {} pages", page.page_number, page.total_pages);
//!
//!     // Hand the payload to the host.
//!     let mut save = |payload: &BundlePayload| -> std::result::Result<(), PayloadError> {
//!         println!("{}", payload.to_json_pretty()?);
//!         Ok(())
//!     };
//!     store.save_with(&mut save)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod factory;
pub mod host;
pub mod model;
pub mod options;
pub mod persistence;
pub mod prelude;
pub mod projection;
pub mod store;
pub mod summary;
