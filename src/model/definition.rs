use super::id::{BlockId, IdAllocator, InputId, OptionId};
use super::kind::InputKind;
use super::price::PriceAdjustment;
use crate::error::BundleError;
use bincode::{Decode, Encode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A titled group of inputs presented together in the bundle configurator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Block {
    id: BlockId,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) inputs: Vec<Input>,
}

/// A single configurable field within a block.
///
/// `options` is present exactly when the kind is radio or multi-select; this
/// is checked whenever an input enters the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Input {
    id: InputId,
    #[serde(rename = "type")]
    kind: InputKind,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) options: Option<Vec<InputOption>>,
}

/// A selectable, optionally priced choice of a radio or multi-select input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct InputOption {
    id: OptionId,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) price_adjustment: PriceAdjustment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) quantity: Option<u32>,
}

impl Block {
    pub(crate) fn new(id: BlockId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            inputs: Vec::new(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Inputs in display order.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input(&self, input_id: InputId) -> Option<&Input> {
        self.inputs.iter().find(|i| i.id == input_id)
    }

    pub(crate) fn input_position(&self, input_id: InputId) -> Result<usize, BundleError> {
        self.inputs
            .iter()
            .position(|i| i.id == input_id)
            .ok_or_else(|| BundleError::input_not_found(input_id))
    }

    /// Checks every invariant of the block and the inputs it owns.
    pub fn validate(&self) -> Result<(), BundleError> {
        if let Some(duplicate) = self.inputs.iter().map(|i| i.id).duplicates().next() {
            return Err(BundleError::invalid_shape(
                duplicate,
                format!("input id appears more than once in block '{}'", self.id),
            ));
        }
        self.inputs.iter().try_for_each(Input::validate)
    }

    /// Registers every id in this block with `ids`.
    pub(crate) fn observe_ids(&self, ids: &mut IdAllocator) -> Result<(), BundleError> {
        ids.observe(self.id.get())?;
        for input in &self.inputs {
            ids.observe(input.id.get())?;
            for option in input.options().unwrap_or_default() {
                ids.observe(option.id.get())?;
            }
        }
        Ok(())
    }
}

impl Input {
    /// Builds an input without checking its shape; callers go through the factory.
    pub(crate) fn from_parts(
        id: InputId,
        kind: InputKind,
        options: Option<Vec<InputOption>>,
    ) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            explanation: String::new(),
            options,
        }
    }

    pub fn id(&self) -> InputId {
        self.id
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// The option list, or `None` for text and file inputs.
    pub fn options(&self) -> Option<&[InputOption]> {
        self.options.as_deref()
    }

    pub fn option(&self, option_id: OptionId) -> Option<&InputOption> {
        self.options()?.iter().find(|o| o.id == option_id)
    }

    pub fn validate(&self) -> Result<(), BundleError> {
        check_options_shape(self.id, self.kind, self.options())
    }
}

impl InputOption {
    /// A blank option; `quantity` starts at 1 for multi-select inputs and is absent otherwise.
    pub fn new(id: OptionId, is_multi_select: bool) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            price_adjustment: PriceAdjustment::ZERO,
            quantity: is_multi_select.then_some(1),
        }
    }

    pub fn id(&self) -> OptionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price_adjustment(&self) -> PriceAdjustment {
        self.price_adjustment
    }

    /// The default quantity, present only on multi-select options.
    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }
}

/// Verifies that `options` has exactly the shape `kind` demands.
pub(crate) fn check_options_shape(
    input_id: InputId,
    kind: InputKind,
    options: Option<&[InputOption]>,
) -> Result<(), BundleError> {
    let Some(options) = options else {
        if kind.has_options() {
            return Err(BundleError::invalid_shape(
                input_id,
                format!("{} inputs require an option list", kind),
            ));
        }
        return Ok(());
    };

    if !kind.has_options() {
        return Err(BundleError::invalid_shape(
            input_id,
            format!("{} inputs cannot carry options", kind),
        ));
    }
    if let Some(duplicate) = options.iter().map(|o| o.id).duplicates().next() {
        return Err(BundleError::invalid_shape(
            input_id,
            format!("option id '{}' appears more than once", duplicate),
        ));
    }
    for option in options {
        match (kind.has_quantity(), option.quantity) {
            (true, None) => {
                return Err(BundleError::invalid_shape(
                    input_id,
                    format!("option '{}' is missing its quantity", option.id),
                ));
            }
            (true, Some(0)) => {
                return Err(BundleError::invalid_shape(
                    input_id,
                    format!("option '{}' has a quantity below 1", option.id),
                ));
            }
            (false, Some(_)) => {
                return Err(BundleError::invalid_shape(
                    input_id,
                    format!("{} options cannot carry a quantity", kind),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
