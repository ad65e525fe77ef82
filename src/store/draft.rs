use crate::model::{BlockId, InputKind};

/// An input the merchant is filling in before it is added to a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDraft {
    pub(crate) block_id: BlockId,
    pub(crate) kind: InputKind,
    pub(crate) title: String,
    pub(crate) explanation: String,
}

impl InputDraft {
    pub(crate) fn new(block_id: BlockId, kind: InputKind) -> Self {
        Self {
            block_id,
            kind,
            title: String::new(),
            explanation: String::new(),
        }
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
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
}
