//! Property-based tests for the editing model
//!
//! Random edit sequences are replayed against a store and the shape and id
//! invariants are checked after every step.

mod common;

use bundle_builder::prelude::{
    BlockId, BlockPatch, BundlePayload, BundleStore, Input, InputKind, OptionPatch, StoreConfig,
    project,
};
use common::store_with_block;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Edit {
    AddInput(InputKind),
    AddOption(usize),
    UpdateOption {
        input: usize,
        option: usize,
        price: String,
        quantity: Option<i64>,
    },
    RemoveOption(usize, usize),
    RemoveInput(usize),
    RetitleBlock(String),
}

fn kind_strategy() -> impl Strategy<Value = InputKind> {
    prop::sample::select(InputKind::ALL.to_vec())
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => kind_strategy().prop_map(Edit::AddInput),
        3 => any::<usize>().prop_map(Edit::AddOption),
        3 => (any::<usize>(), any::<usize>(), "[-0-9a-df-z. ]{0,8}", prop::option::of(-5i64..10))
            .prop_map(|(input, option, price, quantity)| Edit::UpdateOption {
                input,
                option,
                price,
                quantity,
            }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(i, o)| Edit::RemoveOption(i, o)),
        1 => any::<usize>().prop_map(Edit::RemoveInput),
        1 => "[A-Za-z ]{0,12}".prop_map(Edit::RetitleBlock),
    ]
}

/// Applies `edit` to the store's first block; rejected edits are fine.
fn apply(store: &mut BundleStore, block_id: BlockId, edit: &Edit) {
    let inputs: Vec<Input> = store.block(block_id).unwrap().inputs().to_vec();
    let pick = |index: usize| (!inputs.is_empty()).then(|| &inputs[index % inputs.len()]);

    match edit {
        Edit::AddInput(kind) => {
            store.add_input(block_id, *kind).unwrap();
        }
        Edit::AddOption(index) => {
            if let Some(input) = pick(*index) {
                let _ = store.add_option(block_id, input.id());
            }
        }
        Edit::UpdateOption {
            input,
            option,
            price,
            quantity,
        } => {
            let Some(input) = pick(*input) else { return };
            let Some(options) = input.options().filter(|o| !o.is_empty()) else {
                return;
            };
            let option_id = options[*option % options.len()].id();
            let mut patch = OptionPatch::new().price_adjustment_text(price);
            if let Some(quantity) = quantity {
                patch = patch.quantity(*quantity);
            }
            let _ = store.update_option(block_id, input.id(), option_id, patch);
        }
        Edit::RemoveOption(input, option) => {
            let Some(input) = pick(*input) else { return };
            let Some(options) = input.options().filter(|o| !o.is_empty()) else {
                return;
            };
            let option_id = options[*option % options.len()].id();
            store.remove_option(block_id, input.id(), option_id).unwrap();
        }
        Edit::RemoveInput(index) => {
            if let Some(input) = pick(*index) {
                store.remove_input(block_id, input.id()).unwrap();
            }
        }
        Edit::RetitleBlock(title) => {
            store
                .update_block(block_id, BlockPatch::new().title(title.as_str()))
                .unwrap();
        }
    }
}

fn assert_shape(store: &BundleStore) -> Result<(), TestCaseError> {
    for block in store.blocks() {
        prop_assert!(block.validate().is_ok());
        for input in block.inputs() {
            prop_assert_eq!(input.options().is_some(), input.kind().has_options());
            for option in input.options().unwrap_or_default() {
                prop_assert_eq!(option.quantity().is_some(), input.kind().has_quantity());
                prop_assert!(option.quantity().is_none_or(|q| q >= 1));
            }
        }
    }
    Ok(())
}

fn all_ids(store: &BundleStore) -> Vec<u64> {
    let mut ids = Vec::new();
    for block in store.blocks() {
        ids.push(block.id().get());
        for input in block.inputs() {
            ids.push(input.id().get());
            for option in input.options().unwrap_or_default() {
                ids.push(option.id().get());
            }
        }
    }
    ids
}

proptest! {
    #[test]
    fn prop_shape_holds_after_every_edit(edits in prop::collection::vec(edit_strategy(), 1..40)) {
        let (mut store, block_id) = store_with_block();
        for edit in &edits {
            apply(&mut store, block_id, edit);
            assert_shape(&store)?;
        }
    }

    #[test]
    fn prop_ids_stay_unique(edits in prop::collection::vec(edit_strategy(), 1..40)) {
        let (mut store, block_id) = store_with_block();
        for edit in &edits {
            apply(&mut store, block_id, edit);
        }
        let ids = all_ids(&store);
        let distinct: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(distinct.len(), ids.len());
    }

    #[test]
    fn prop_payload_restore_preserves_tree(edits in prop::collection::vec(edit_strategy(), 1..25)) {
        let (mut store, block_id) = store_with_block();
        for edit in &edits {
            apply(&mut store, block_id, edit);
        }
        let json = store.to_payload().to_json().unwrap();
        let restored = BundleStore::from_payload(
            BundlePayload::from_json(&json).unwrap(),
            StoreConfig::default(),
        )
        .unwrap();
        prop_assert_eq!(restored.to_payload(), store.to_payload());
    }

    #[test]
    fn prop_pages_cover_every_matching_input(
        kinds in prop::collection::vec(kind_strategy(), 0..30),
        page_size in 1usize..8,
    ) {
        let (mut store, block_id) = store_with_block();
        for kind in &kinds {
            store.add_input(block_id, *kind).unwrap();
        }
        let matching = kinds.iter().filter(|k| **k == InputKind::Radio).count();

        let first = store.project_block(block_id, InputKind::Radio, 1).unwrap();
        let total_pages = first.total_pages;
        prop_assert_eq!(total_pages, matching.div_ceil(store.config().page_size));

        let inputs = store.block(block_id).unwrap().inputs();
        let pages_for_size = matching.div_ceil(page_size);
        let mut covered = 0;
        for page_number in 1..=pages_for_size {
            let page = project(inputs, InputKind::Radio, page_size, page_number);
            prop_assert!(page.visible.len() <= page_size);
            prop_assert!(page.visible.iter().all(|i| i.kind() == InputKind::Radio));
            prop_assert_eq!(page.total_pages, pages_for_size);
            covered += page.visible.len();
        }
        prop_assert_eq!(covered, matching);
        prop_assert!(project(inputs, InputKind::Radio, page_size, pages_for_size + 1).is_empty());
    }

    #[test]
    fn prop_n_blocks_get_n_ids(n in 1usize..60) {
        let mut store = BundleStore::new();
        let ids: HashSet<_> = (0..n).map(|_| store.create_block().unwrap().id()).collect();
        prop_assert_eq!(ids.len(), n);
    }

    #[test]
    fn prop_quantity_text_is_never_below_one(raw in ".{0,10}") {
        let (mut store, block_id) = store_with_block();
        let input = store.add_input(block_id, InputKind::MultiSelect).unwrap();
        let option_id = input.options().unwrap()[0].id();

        let option = store
            .update_option(block_id, input.id(), option_id, OptionPatch::new().quantity_text(&raw))
            .unwrap();
        prop_assert!(option.quantity().unwrap() >= 1);
    }

    #[test]
    fn prop_update_leaves_other_fields_alone(title in "[a-z]{1,10}") {
        let (mut store, block_id) = store_with_block();
        let input = store.add_input(block_id, InputKind::MultiSelect).unwrap();
        let before = input.options().unwrap()[0].clone();

        let after = store
            .update_option(block_id, input.id(), before.id(), OptionPatch::new().title(title.as_str()))
            .unwrap();

        prop_assert_eq!(after.title(), title.as_str());
        prop_assert_eq!(after.description(), before.description());
        prop_assert_eq!(after.price_adjustment(), before.price_adjustment());
        prop_assert_eq!(after.quantity(), before.quantity());
    }
}
