use crate::error::{BundleError, PayloadError};
use crate::factory::InputFactory;
use crate::host::HostProduct;
use crate::model::{
    Block, BlockId, BlockPatch, IdAllocator, Input, InputId, InputKind, InputOption, InputPatch,
    OptionId, OptionPatch, check_options_shape,
};
use crate::options::OptionListEditor;
use crate::persistence::{
    BundlePayload, BundleSettings, Metafield, PayloadSink, SettingsPatch, StoreSnapshot,
};
use crate::projection::{InputPage, project};
use crate::summary::SummaryFormatter;
use itertools::Itertools;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod builder;
mod draft;

pub use builder::{DEFAULT_PAGE_SIZE, StoreBuilder, StoreConfig};
pub use draft::InputDraft;

/// Owns the blocks of one bundle configuration and every edit made to them.
///
/// Blocks are held behind `Arc` and replaced copy-on-write: a mutation never
/// changes a block that a caller still holds from [`BundleStore::snapshot`]
/// or from an earlier mutator's return value.
#[derive(Debug, Clone)]
pub struct BundleStore {
    config: StoreConfig,
    settings: BundleSettings,
    blocks: Vec<Arc<Block>>,
    ids: IdAllocator,
    draft: Option<InputDraft>,
}

impl Default for BundleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleStore {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_parts(config: StoreConfig, settings: BundleSettings) -> Self {
        Self {
            config,
            settings,
            blocks: Vec::new(),
            ids: IdAllocator::new(),
            draft: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn settings(&self) -> &BundleSettings {
        &self.settings
    }

    /// Blocks in creation order.
    pub fn blocks(&self) -> &[Arc<Block>] {
        &self.blocks
    }

    /// A cheap, immutable copy of the current block list.
    pub fn snapshot(&self) -> Vec<Arc<Block>> {
        self.blocks.clone()
    }

    pub fn block(&self, block_id: BlockId) -> Option<&Arc<Block>> {
        self.blocks.iter().find(|b| b.id() == block_id)
    }

    pub fn input(&self, block_id: BlockId, input_id: InputId) -> Option<&Input> {
        self.block(block_id)?.input(input_id)
    }

    pub fn option(
        &self,
        block_id: BlockId,
        input_id: InputId,
        option_id: OptionId,
    ) -> Option<&InputOption> {
        self.input(block_id, input_id)?.option(option_id)
    }

    pub fn draft(&self) -> Option<&InputDraft> {
        self.draft.as_ref()
    }

    // --- Blocks ---

    /// Appends a new, empty block.
    pub fn create_block(&mut self) -> Result<Arc<Block>, BundleError> {
        let id = self.ids.next_block().inspect_err(log_rejection)?;
        let block = Arc::new(Block::new(id, self.config.default_block_title.clone()));
        self.blocks.push(Arc::clone(&block));
        debug!(block_id = %block.id(), "created block");
        Ok(block)
    }

    /// Merges the supplied title and/or description; inputs are left alone.
    pub fn update_block(
        &mut self,
        block_id: BlockId,
        patch: BlockPatch,
    ) -> Result<Arc<Block>, BundleError> {
        let block = block_slot(&mut self.blocks, block_id)?;
        let slot = Arc::make_mut(block);
        if let Some(title) = patch.title {
            slot.title = title;
        }
        if let Some(description) = patch.description {
            slot.description = description;
        }
        debug!(block_id = %block_id, "updated block");
        Ok(Arc::clone(block))
    }

    /// Removes a block together with every input and option it owns.
    pub fn delete_block(&mut self, block_id: BlockId) -> Result<Arc<Block>, BundleError> {
        let position = self
            .blocks
            .iter()
            .position(|b| b.id() == block_id)
            .ok_or_else(|| BundleError::block_not_found(block_id))?;
        let removed = self.blocks.remove(position);
        debug!(
            block_id = %block_id,
            inputs = removed.inputs().len(),
            "deleted block"
        );
        Ok(removed)
    }

    // --- Inputs ---

    /// Creates a correctly shaped input of `kind` and appends it to the block.
    pub fn add_input(&mut self, block_id: BlockId, kind: InputKind) -> Result<Input, BundleError> {
        let block = Arc::make_mut(block_slot(&mut self.blocks, block_id)?);
        let input = InputFactory::create(kind, &mut self.ids).inspect_err(log_rejection)?;
        block.inputs.push(input.clone());
        debug!(block_id = %block_id, input_id = %input.id(), kind = %kind, "added input");
        Ok(input)
    }

    /// Like [`add_input`](Self::add_input) but takes the host's type name.
    pub fn add_input_named(
        &mut self,
        block_id: BlockId,
        type_name: &str,
    ) -> Result<Input, BundleError> {
        let kind = type_name
            .parse::<InputKind>()
            .inspect_err(log_rejection)?;
        self.add_input(block_id, kind)
    }

    /// Merges title, explanation and/or a replacement option list.
    ///
    /// Changing the kind or supplying options that do not fit the kind fails
    /// with [`BundleError::InvalidShape`] and leaves the input unchanged.
    pub fn update_input(
        &mut self,
        block_id: BlockId,
        input_id: InputId,
        patch: InputPatch,
    ) -> Result<Input, BundleError> {
        let block = find_block(&self.blocks, block_id)?;
        let position = block.input_position(input_id)?;
        let next = patched_input(&block.inputs()[position], patch).inspect_err(log_rejection)?;

        let mut ids = self.ids.clone();
        for option in next.options().unwrap_or_default() {
            ids.observe(option.id().get()).inspect_err(log_rejection)?;
        }
        self.ids = ids;
        Arc::make_mut(block_slot(&mut self.blocks, block_id)?).inputs[position] = next.clone();
        debug!(block_id = %block_id, input_id = %input_id, "updated input");
        Ok(next)
    }

    pub fn remove_input(&mut self, block_id: BlockId, input_id: InputId) -> Result<Input, BundleError> {
        let position = find_block(&self.blocks, block_id)?.input_position(input_id)?;
        let block = Arc::make_mut(block_slot(&mut self.blocks, block_id)?);
        let removed = block.inputs.remove(position);
        debug!(block_id = %block_id, input_id = %input_id, "removed input");
        Ok(removed)
    }

    // --- Options ---

    /// Appends a blank option to a radio or multi-select input.
    pub fn add_option(
        &mut self,
        block_id: BlockId,
        input_id: InputId,
    ) -> Result<InputOption, BundleError> {
        let block = find_block(&self.blocks, block_id)?;
        let position = block.input_position(input_id)?;
        let next = OptionListEditor::for_input(&block.inputs()[position])
            .and_then(|editor| editor.add_option(&mut self.ids))
            .inspect_err(log_rejection)?;
        let added = next[next.len() - 1].clone();

        self.replace_options(block_id, position, next)?;
        debug!(
            block_id = %block_id,
            input_id = %input_id,
            option_id = %added.id(),
            "added option"
        );
        Ok(added)
    }

    /// Merges `patch` into one option, coercing numeric fields first.
    pub fn update_option(
        &mut self,
        block_id: BlockId,
        input_id: InputId,
        option_id: OptionId,
        patch: OptionPatch,
    ) -> Result<InputOption, BundleError> {
        let block = find_block(&self.blocks, block_id)?;
        let position = block.input_position(input_id)?;
        let next = OptionListEditor::for_input(&block.inputs()[position])
            .and_then(|editor| editor.update_option(option_id, &patch))
            .inspect_err(log_rejection)?;
        let updated = next
            .iter()
            .find(|o| o.id() == option_id)
            .cloned()
            .ok_or_else(|| BundleError::option_not_found(option_id))?;

        self.replace_options(block_id, position, next)?;
        debug!(
            block_id = %block_id,
            input_id = %input_id,
            option_id = %option_id,
            "updated option"
        );
        Ok(updated)
    }

    pub fn remove_option(
        &mut self,
        block_id: BlockId,
        input_id: InputId,
        option_id: OptionId,
    ) -> Result<InputOption, BundleError> {
        let block = find_block(&self.blocks, block_id)?;
        let position = block.input_position(input_id)?;
        let input = &block.inputs()[position];
        let removed = input
            .option(option_id)
            .cloned()
            .ok_or_else(|| BundleError::option_not_found(option_id))?;
        let next = OptionListEditor::for_input(input)
            .and_then(|editor| editor.remove_option(option_id))
            .inspect_err(log_rejection)?;

        self.replace_options(block_id, position, next)?;
        debug!(
            block_id = %block_id,
            input_id = %input_id,
            option_id = %option_id,
            "removed option"
        );
        Ok(removed)
    }

    fn replace_options(
        &mut self,
        block_id: BlockId,
        position: usize,
        options: Vec<InputOption>,
    ) -> Result<(), BundleError> {
        let block = Arc::make_mut(block_slot(&mut self.blocks, block_id)?);
        block.inputs[position].options = Some(options);
        Ok(())
    }

    // --- Input draft ---

    /// Starts composing a new input for `block_id`, discarding any earlier draft.
    pub fn begin_input_draft(
        &mut self,
        block_id: BlockId,
        kind: InputKind,
    ) -> Result<&InputDraft, BundleError> {
        find_block(&self.blocks, block_id)?;
        if let Some(previous) = self.draft.take() {
            debug!(block_id = %previous.block_id(), "discarding unfinished input draft");
        }
        Ok(&*self.draft.insert(InputDraft::new(block_id, kind)))
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) -> Result<(), BundleError> {
        let draft = self.draft.as_mut().ok_or(BundleError::NoActiveDraft)?;
        draft.title = title.into();
        Ok(())
    }

    pub fn set_draft_explanation(
        &mut self,
        explanation: impl Into<String>,
    ) -> Result<(), BundleError> {
        let draft = self.draft.as_mut().ok_or(BundleError::NoActiveDraft)?;
        draft.explanation = explanation.into();
        Ok(())
    }

    /// Turns the draft into a real input on its block and clears it.
    ///
    /// If the block was deleted meanwhile the draft is dropped and `NotFound`
    /// is returned.
    pub fn commit_draft(&mut self) -> Result<Input, BundleError> {
        let draft = self.draft.take().ok_or(BundleError::NoActiveDraft)?;
        let block = Arc::make_mut(block_slot(&mut self.blocks, draft.block_id)?);

        let mut input = InputFactory::create(draft.kind, &mut self.ids).inspect_err(log_rejection)?;
        input.title = draft.title;
        input.explanation = draft.explanation;
        block.inputs.push(input.clone());
        debug!(
            block_id = %draft.block_id,
            input_id = %input.id(),
            kind = %draft.kind,
            "committed input draft"
        );
        Ok(input)
    }

    pub fn cancel_draft(&mut self) -> Option<InputDraft> {
        self.draft.take()
    }

    // --- Settings ---

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> &BundleSettings {
        patch.apply_to(&mut self.settings);
        debug!(key_type = %self.settings.key_type, "updated bundle settings");
        &self.settings
    }

    // --- Views ---

    /// One page of the block's inputs of `kind`, using the configured page size.
    pub fn project_block(
        &self,
        block_id: BlockId,
        kind: InputKind,
        page_number: usize,
    ) -> Result<InputPage<'_>, BundleError> {
        let block = find_block(&self.blocks, block_id)?;
        Ok(project(
            block.inputs(),
            kind,
            self.config.page_size,
            page_number,
        ))
    }

    pub fn summary(&self) -> String {
        SummaryFormatter::format_blocks(self.blocks.as_slice())
    }

    // --- Persistence ---

    pub fn to_payload(&self) -> BundlePayload {
        BundlePayload {
            settings: self.settings.clone(),
            blocks: self.blocks.iter().map(|b| b.as_ref().clone()).collect(),
        }
    }

    pub fn to_metafields(&self) -> Result<Vec<Metafield>, PayloadError> {
        self.to_payload()
            .to_metafields(&self.config.metafield_namespace)
    }

    /// Hands the current payload to the host's save function.
    pub fn save_with(&self, sink: &mut impl PayloadSink) -> Result<(), PayloadError> {
        let payload = self.to_payload();
        sink.save(&payload)?;
        info!(blocks = payload.blocks.len(), "handed bundle payload to host");
        Ok(())
    }

    /// Restores a store from a payload, checking every shape invariant.
    pub fn from_payload(payload: BundlePayload, config: StoreConfig) -> Result<Self, PayloadError> {
        let mut store = Self::builder()
            .with_config(config)
            .with_settings(payload.settings)
            .build();
        store.install_blocks(payload.blocks)?;
        info!(blocks = store.blocks.len(), "restored bundle configuration");
        Ok(store)
    }

    /// Restores a store from the metafields under the configured namespace.
    pub fn from_metafields(fields: &[Metafield], config: StoreConfig) -> Result<Self, PayloadError> {
        let payload = BundlePayload::from_metafields(fields, &config.metafield_namespace)?;
        Self::from_payload(payload, config)
    }

    /// Restores a store from the metafields attached to the host's product.
    pub fn from_host(product: &HostProduct, config: StoreConfig) -> Result<Self, PayloadError> {
        let values = product.bundle_metafields(&config.metafield_namespace);
        debug!(product_id = %product.id, fields = values.len(), "reading host metafields");
        let payload = BundlePayload::from_values(&values)?;
        Self::from_payload(payload, config)
    }

    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            next_id: self.ids.peek(),
            settings: self.settings.clone(),
            blocks: self.blocks.iter().map(|b| b.as_ref().clone()).collect(),
        }
    }

    pub fn from_snapshot(snapshot: StoreSnapshot, config: StoreConfig) -> Result<Self, PayloadError> {
        let mut store = Self::builder()
            .with_config(config)
            .with_settings(snapshot.settings)
            .build();
        store.ids = IdAllocator::starting_at(snapshot.next_id);
        store.install_blocks(snapshot.blocks)?;
        info!(blocks = store.blocks.len(), "restored bundle snapshot");
        Ok(store)
    }

    fn install_blocks(&mut self, blocks: Vec<Block>) -> Result<(), BundleError> {
        if let Some(duplicate) = blocks.iter().map(Block::id).duplicates().next() {
            return Err(BundleError::invalid_shape(
                duplicate,
                "block id appears more than once",
            ));
        }
        for block in &blocks {
            block.validate()?;
            block.observe_ids(&mut self.ids)?;
        }
        self.blocks = blocks.into_iter().map(Arc::new).collect();
        Ok(())
    }
}

fn find_block(blocks: &[Arc<Block>], block_id: BlockId) -> Result<&Arc<Block>, BundleError> {
    blocks
        .iter()
        .find(|b| b.id() == block_id)
        .ok_or_else(|| BundleError::block_not_found(block_id))
}

fn block_slot(
    blocks: &mut [Arc<Block>],
    block_id: BlockId,
) -> Result<&mut Arc<Block>, BundleError> {
    blocks
        .iter_mut()
        .find(|b| b.id() == block_id)
        .ok_or_else(|| BundleError::block_not_found(block_id))
}

/// Applies `patch` to a copy of `current`, rejecting anything that would
/// break the kind-determined shape.
fn patched_input(current: &Input, patch: InputPatch) -> Result<Input, BundleError> {
    if let Some(kind) = patch.kind {
        if kind != current.kind() {
            return Err(BundleError::invalid_shape(
                current.id(),
                format!(
                    "cannot change type from {} to {}; remove the input and add a new one",
                    current.kind(),
                    kind
                ),
            ));
        }
    }
    if let Some(options) = &patch.options {
        check_options_shape(current.id(), current.kind(), Some(options))?;
    }

    let mut next = current.clone();
    if let Some(title) = patch.title {
        next.title = title;
    }
    if let Some(explanation) = patch.explanation {
        next.explanation = explanation;
    }
    if let Some(options) = patch.options {
        next.options = Some(options);
    }
    Ok(next)
}

fn log_rejection(err: &BundleError) {
    warn!(error = %err, "rejected bundle edit");
}
