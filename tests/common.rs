//! Common test utilities for building bundle stores and host data.
use bundle_builder::prelude::*;

/// A store with one titled block and nothing else in it.
#[allow(dead_code)]
pub fn store_with_block() -> (BundleStore, BlockId) {
    let mut store = BundleStore::new();
    let block = store.create_block().expect("Failed to create block");
    store
        .update_block(block.id(), BlockPatch::new().title("Size"))
        .expect("Failed to title block");
    (store, block.id())
}

/// A store whose only block holds `count` radio inputs titled "R1".."Rn",
/// each followed by a text input so kind filtering has something to skip.
#[allow(dead_code)]
pub fn store_with_radio_inputs(count: usize) -> (BundleStore, BlockId, Vec<InputId>) {
    let (mut store, block_id) = store_with_block();
    let mut radio_ids = Vec::with_capacity(count);
    for n in 1..=count {
        let input = store
            .add_input(block_id, InputKind::Radio)
            .expect("Failed to add radio input");
        store
            .update_input(block_id, input.id(), InputPatch::new().title(format!("R{}", n)))
            .expect("Failed to title radio input");
        store
            .add_input(block_id, InputKind::Text)
            .expect("Failed to add text input");
        radio_ids.push(input.id());
    }
    (store, block_id, radio_ids)
}

/// Collects every payload handed to it, standing in for the host's save call.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<BundlePayload>,
}

impl PayloadSink for MemorySink {
    fn save(&mut self, payload: &BundlePayload) -> std::result::Result<(), PayloadError> {
        self.saved.push(payload.clone());
        Ok(())
    }
}

/// Builds the host's product JSON with the given bundle metafield values.
#[allow(dead_code)]
pub fn host_product_json(fields: &[(&str, &str, &str)]) -> String {
    let edges: Vec<serde_json::Value> = fields
        .iter()
        .map(|(namespace, key, value)| {
            serde_json::json!({
                "node": { "namespace": namespace, "key": key, "value": value }
            })
        })
        .collect();
    serde_json::json!({
        "product": {
            "id": "gid://shopify/Product/1001",
            "title": "Keyed padlock",
            "metafields": { "edges": edges },
            "images": {
                "edges": [
                    { "node": { "id": "img-1", "url": "https://cdn.example/1.png", "altText": "Front" } },
                    { "node": { "id": "img-2", "url": "https://cdn.example/2.png", "altText": null } },
                    { "node": { "id": "img-3", "url": "https://cdn.example/3.png" } }
                ]
            }
        }
    })
    .to_string()
}

/// Blocks JSON for a "Size" block with a radio input and a multi-select input.
#[allow(dead_code)]
pub const SAMPLE_BLOCKS_JSON: &str = r#"[
    {
        "id": 10,
        "title": "Size",
        "description": "Pick one",
        "inputs": [
            {
                "id": 11,
                "type": "radio",
                "title": "Body size",
                "explanation": "",
                "options": [
                    { "id": 12, "title": "Small", "description": "", "priceAdjustment": 0 },
                    { "id": 13, "title": "Large", "description": "", "priceAdjustment": 5.5 }
                ]
            },
            {
                "id": 14,
                "type": "multiSelect",
                "title": "Extras",
                "explanation": "Any number",
                "options": [
                    { "id": 15, "title": "Spare key", "description": "", "priceAdjustment": 2.25, "quantity": 2 }
                ]
            },
            { "id": 16, "type": "text", "title": "Engraving", "explanation": "Up to 20 characters" }
        ]
    }
]"#;
