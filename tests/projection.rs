//! Tests for the type-filtered, paged input view.
mod common;
use common::*;
use bundle_builder::prelude::*;

#[cfg(test)]
mod projection_tests {
    use super::*;

    fn titles(page: &InputPage<'_>) -> Vec<String> {
        page.visible.iter().map(|i| i.title().to_string()).collect()
    }

    #[test]
    fn test_twelve_radio_inputs_split_into_three_pages() {
        let (store, block_id, _) = store_with_radio_inputs(12);

        let first = store.project_block(block_id, InputKind::Radio, 1).unwrap();
        let second = store.project_block(block_id, InputKind::Radio, 2).unwrap();
        let third = store.project_block(block_id, InputKind::Radio, 3).unwrap();

        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 12);
        assert_eq!(titles(&first), ["R1", "R2", "R3", "R4", "R5"]);
        assert_eq!(titles(&second), ["R6", "R7", "R8", "R9", "R10"]);
        assert_eq!(titles(&third), ["R11", "R12"]);

        assert!(!first.has_previous());
        assert!(first.has_next());
        assert!(third.has_previous());
        assert!(!third.has_next());
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let (store, block_id, _) = store_with_radio_inputs(12);

        let beyond = store.project_block(block_id, InputKind::Radio, 4).unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_pages, 3);

        let zero = store.project_block(block_id, InputKind::Radio, 0).unwrap();
        assert!(zero.is_empty());
        assert!(!zero.has_next());
    }

    #[test]
    fn test_filter_skips_other_kinds() {
        let (store, block_id, _) = store_with_radio_inputs(3);

        let text = store.project_block(block_id, InputKind::Text, 1).unwrap();
        assert_eq!(text.total_items, 3);
        assert!(text.visible.iter().all(|i| i.kind() == InputKind::Text));

        let files = store.project_block(block_id, InputKind::File, 1).unwrap();
        assert_eq!(files.total_pages, 0);
        assert!(files.is_empty());
    }

    #[test]
    fn test_page_size_comes_from_config() {
        let (store, block_id, _) = store_with_radio_inputs(7);
        let blocks = store.snapshot();

        let narrow = BundleStore::from_payload(
            store.to_payload(),
            StoreConfig {
                page_size: 2,
                ..StoreConfig::default()
            },
        )
        .expect("Failed to restore store");
        let page = narrow.project_block(block_id, InputKind::Radio, 4).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(titles(&page), ["R7"]);

        // Same data through the free function with a different page size.
        let direct = project(blocks[0].inputs(), InputKind::Radio, 3, 3);
        assert_eq!(titles(&direct), ["R7"]);
    }

    #[test]
    fn test_zero_page_size_yields_no_pages() {
        let (store, block_id, _) = store_with_radio_inputs(4);
        let inputs = store.block(block_id).unwrap().inputs();

        let page = project(inputs, InputKind::Radio, 0, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 4);
        assert!(page.is_empty());
    }

    #[test]
    fn test_projection_of_missing_block_is_not_found() {
        let store = BundleStore::new();
        let err = store
            .project_block(BlockId::from_raw(8), InputKind::Radio, 1)
            .unwrap_err();
        assert!(matches!(err, BundleError::NotFound { id: 8, .. }));
    }
}
