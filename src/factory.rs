use crate::error::BundleError;
use crate::model::{IdAllocator, Input, InputKind, InputOption};

/// Produces correctly shaped inputs for each [`InputKind`].
pub struct InputFactory;

impl InputFactory {
    /// Creates a blank input of the given kind.
    ///
    /// Radio and multi-select inputs start with exactly one seeded option so the
    /// edit surface is never empty; text and file inputs have no option list.
    /// Fails only when the id counter is exhausted.
    pub fn create(kind: InputKind, ids: &mut IdAllocator) -> Result<Input, BundleError> {
        let id = ids.next_input()?;
        let options = if kind.has_options() {
            Some(vec![InputOption::new(ids.next_option()?, kind.has_quantity())])
        } else {
            None
        };
        Ok(Input::from_parts(id, kind, options))
    }

    /// Creates an input from the host's wire name for its type (e.g. `"multiSelect"`).
    pub fn create_named(type_name: &str, ids: &mut IdAllocator) -> Result<Input, BundleError> {
        let kind = type_name.parse::<InputKind>()?;
        Self::create(kind, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_option_shapes() {
        let mut ids = IdAllocator::new();

        let radio = InputFactory::create(InputKind::Radio, &mut ids).unwrap();
        let options = radio.options().expect("radio has options");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].quantity(), None);

        let multi = InputFactory::create(InputKind::MultiSelect, &mut ids).unwrap();
        let options = multi.options().expect("multi-select has options");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].quantity(), Some(1));

        for kind in [InputKind::Text, InputKind::File] {
            let input = InputFactory::create(kind, &mut ids).unwrap();
            assert!(input.options().is_none());
            assert!(input.validate().is_ok());
        }
    }

    #[test]
    fn test_unknown_type_name_fails() {
        let mut ids = IdAllocator::new();
        let err = InputFactory::create_named("checkbox", &mut ids).unwrap_err();
        assert_eq!(err, BundleError::UnsupportedInputType("checkbox".to_string()));
        // Nothing was allocated for the rejected request.
        assert_eq!(ids.peek(), 1);
    }
}
