//! Partial field updates submitted by the host.
//!
//! A patch only names the fields it wants to change; every `None` field leaves
//! the stored value untouched.

use super::definition::InputOption;
use super::kind::InputKind;
use super::price::{PriceAdjustment, leading_integer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BlockPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Changes to an input's fields.
///
/// `kind` exists so a caller that tries to retype an input gets an explicit
/// rejection; it is only accepted when it matches the current kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputPatch {
    pub kind: Option<InputKind>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub options: Option<Vec<InputOption>>,
}

impl InputPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn options(mut self, options: Vec<InputOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// Changes to a single option.
///
/// Numeric fields hold what the edit surface produced; the option editor
/// coerces them before they are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_adjustment: Option<PriceAdjustment>,
    pub quantity: Option<i64>,
}

impl OptionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price_adjustment(mut self, price: PriceAdjustment) -> Self {
        self.price_adjustment = Some(price);
        self
    }

    /// Takes the raw text of a price field; non-numeric text becomes zero.
    pub fn price_adjustment_text(mut self, raw: &str) -> Self {
        self.price_adjustment = Some(PriceAdjustment::parse_lenient(raw));
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Takes the raw text of a quantity field; non-numeric text becomes 1.
    pub fn quantity_text(mut self, raw: &str) -> Self {
        self.quantity = Some(leading_integer(raw).unwrap_or(1));
        self
    }
}
