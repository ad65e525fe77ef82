use crate::error::BundleError;
use crate::model::{IdAllocator, Input, InputId, InputOption, OptionId, OptionPatch};

/// Edits the option list of a single input.
///
/// The editor borrows the current list and every operation returns a fresh
/// list, leaving the borrowed one as it was.
#[derive(Debug, Clone, Copy)]
pub struct OptionListEditor<'a> {
    input_id: InputId,
    is_multi_select: bool,
    options: &'a [InputOption],
}

impl<'a> OptionListEditor<'a> {
    pub fn new(input_id: InputId, is_multi_select: bool, options: &'a [InputOption]) -> Self {
        Self {
            input_id,
            is_multi_select,
            options,
        }
    }

    /// Opens the option list of `input`, failing for kinds that have none.
    pub fn for_input(input: &'a Input) -> Result<Self, BundleError> {
        let options = input.options().ok_or_else(|| {
            BundleError::invalid_shape(
                input.id(),
                format!("{} inputs have no option list", input.kind()),
            )
        })?;
        Ok(Self::new(
            input.id(),
            input.kind().has_quantity(),
            options,
        ))
    }

    pub fn options(&self) -> &'a [InputOption] {
        self.options
    }

    /// Appends a blank option (zero price, quantity 1 when multi-select).
    pub fn add_option(&self, ids: &mut IdAllocator) -> Result<Vec<InputOption>, BundleError> {
        let mut next = self.options.to_vec();
        next.push(InputOption::new(ids.next_option()?, self.is_multi_select));
        Ok(next)
    }

    /// Merges `patch` into the option with `option_id`.
    ///
    /// A quantity below 1 is stored as 1. Supplying a quantity for an option
    /// list that does not track quantities is rejected.
    pub fn update_option(
        &self,
        option_id: OptionId,
        patch: &OptionPatch,
    ) -> Result<Vec<InputOption>, BundleError> {
        let position = self.position(option_id)?;
        if patch.quantity.is_some() && !self.is_multi_select {
            return Err(BundleError::invalid_shape(
                self.input_id,
                "only multi-select options carry a quantity",
            ));
        }

        let mut next = self.options.to_vec();
        let option = &mut next[position];
        if let Some(title) = &patch.title {
            option.title = title.clone();
        }
        if let Some(description) = &patch.description {
            option.description = description.clone();
        }
        if let Some(price) = patch.price_adjustment {
            option.price_adjustment = price;
        }
        if let Some(quantity) = patch.quantity {
            option.quantity = Some(coerce_quantity(quantity));
        }
        Ok(next)
    }

    pub fn remove_option(&self, option_id: OptionId) -> Result<Vec<InputOption>, BundleError> {
        let position = self.position(option_id)?;
        let mut next = self.options.to_vec();
        next.remove(position);
        Ok(next)
    }

    fn position(&self, option_id: OptionId) -> Result<usize, BundleError> {
        self.options
            .iter()
            .position(|o| o.id() == option_id)
            .ok_or_else(|| BundleError::option_not_found(option_id))
    }
}

/// Clamps a submitted quantity to the valid range; anything below 1 becomes 1.
pub fn coerce_quantity(raw: i64) -> u32 {
    if raw < 1 {
        1
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceAdjustment;

    fn seeded(is_multi_select: bool) -> (IdAllocator, Vec<InputOption>) {
        let mut ids = IdAllocator::starting_at(10);
        let options = vec![InputOption::new(ids.next_option().unwrap(), is_multi_select)];
        (ids, options)
    }

    #[test]
    fn test_add_option_leaves_source_untouched() {
        let (mut ids, options) = seeded(true);
        let editor = OptionListEditor::new(InputId::from_raw(1), true, &options);
        let next = editor.add_option(&mut ids).unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].quantity(), Some(1));
        assert_ne!(next[0].id(), next[1].id());
    }

    #[test]
    fn test_update_coerces_numeric_text() {
        let (_, options) = seeded(true);
        let id = options[0].id();
        let editor = OptionListEditor::new(InputId::from_raw(1), true, &options);

        let next = editor
            .update_option(id, &OptionPatch::new().price_adjustment_text("abc").quantity_text("0"))
            .unwrap();
        assert_eq!(next[0].price_adjustment(), PriceAdjustment::ZERO);
        assert_eq!(next[0].quantity(), Some(1));

        let next = editor
            .update_option(id, &OptionPatch::new().quantity_text("many"))
            .unwrap();
        assert_eq!(next[0].quantity(), Some(1));

        let next = editor
            .update_option(id, &OptionPatch::new().quantity(-4))
            .unwrap();
        assert_eq!(next[0].quantity(), Some(1));
    }

    #[test]
    fn test_quantity_rejected_on_radio_options() {
        let (_, options) = seeded(false);
        let id = options[0].id();
        let editor = OptionListEditor::new(InputId::from_raw(3), false, &options);
        let err = editor
            .update_option(id, &OptionPatch::new().quantity(2))
            .unwrap_err();
        assert!(matches!(err, BundleError::InvalidShape { id: 3, .. }));
    }

    #[test]
    fn test_missing_option_is_not_found() {
        let (_, options) = seeded(false);
        let editor = OptionListEditor::new(InputId::from_raw(1), false, &options);
        let missing = OptionId::from_raw(999);
        assert_eq!(
            editor.remove_option(missing).unwrap_err(),
            BundleError::option_not_found(missing)
        );
    }

    #[test]
    fn test_coerce_quantity_bounds() {
        assert_eq!(coerce_quantity(0), 1);
        assert_eq!(coerce_quantity(7), 7);
        assert_eq!(coerce_quantity(i64::MAX), u32::MAX);
    }
}
