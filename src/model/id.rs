use crate::error::BundleError;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id, e.g. one read back from a host payload.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`Block`](super::Block) within a store.
    BlockId
);
entity_id!(
    /// Identifies an [`Input`](super::Input) within its owning block.
    InputId
);
entity_id!(
    /// Identifies an [`InputOption`](super::InputOption) within its owning input.
    OptionId
);

/// Hands out monotonically increasing ids for every entity kind.
///
/// One counter is shared by blocks, inputs and options, so an id is unique
/// across the whole store and therefore within every containment scope.
/// `u64::MAX` is never handed out or accepted; the counter never wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes allocation at `next`; values below 1 are raised to 1.
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> u64 {
        self.next
    }

    fn next_raw(&mut self) -> Result<u64, BundleError> {
        let id = self.next;
        self.next = id
            .checked_add(1)
            .ok_or_else(|| BundleError::invalid_shape(id, "id counter is exhausted"))?;
        Ok(id)
    }

    pub fn next_block(&mut self) -> Result<BlockId, BundleError> {
        self.next_raw().map(BlockId)
    }

    pub fn next_input(&mut self) -> Result<InputId, BundleError> {
        self.next_raw().map(InputId)
    }

    pub fn next_option(&mut self) -> Result<OptionId, BundleError> {
        self.next_raw().map(OptionId)
    }

    /// Records an id that was created elsewhere so it is never handed out again.
    ///
    /// An id that leaves no room for a successor is rejected and the counter
    /// is left as it was.
    pub fn observe(&mut self, raw: u64) -> Result<(), BundleError> {
        let after = raw
            .checked_add(1)
            .ok_or_else(|| BundleError::invalid_shape(raw, "id is too large to track"))?;
        self.next = self.next.max(after);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic_across_kinds() {
        let mut ids = IdAllocator::new();
        let block = ids.next_block().unwrap();
        let input = ids.next_input().unwrap();
        let option = ids.next_option().unwrap();
        assert_eq!(block.get(), 1);
        assert_eq!(input.get(), 2);
        assert_eq!(option.get(), 3);
        assert_eq!(ids.peek(), 4);
    }

    #[test]
    fn test_observe_skips_past_foreign_ids() {
        let mut ids = IdAllocator::new();
        ids.observe(41).unwrap();
        assert_eq!(ids.next_block().unwrap().get(), 42);

        // Observing an older id never moves the counter backwards.
        ids.observe(7).unwrap();
        assert_eq!(ids.next_option().unwrap().get(), 43);
    }

    #[test]
    fn test_observe_rejects_id_without_successor() {
        let mut ids = IdAllocator::new();
        let err = ids.observe(u64::MAX).unwrap_err();
        assert!(matches!(err, BundleError::InvalidShape { id: u64::MAX, .. }));
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn test_allocation_stops_at_the_top_of_the_range() {
        let mut ids = IdAllocator::new();
        ids.observe(u64::MAX - 2).unwrap();
        assert_eq!(ids.next_input().unwrap().get(), u64::MAX - 1);
        assert!(matches!(
            ids.next_option(),
            Err(BundleError::InvalidShape { .. })
        ));
        // A failed allocation does not move the counter.
        assert_eq!(ids.peek(), u64::MAX);
    }

    #[test]
    fn test_starting_at_zero_is_raised() {
        let ids = IdAllocator::starting_at(0);
        assert_eq!(ids.peek(), 1);
    }
}
