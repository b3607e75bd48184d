use shared_types::{SecureHash, StateRef};
use std::collections::HashMap;

/// Hands out destination state refs.
///
/// Every source transaction hash is replaced by one fresh random hash for the
/// lifetime of the allocator; the output index is kept. Rows that referenced
/// the same source state therefore keep referencing the same new state.
#[derive(Debug, Default)]
pub struct StateRefAllocator {
    assigned: HashMap<SecureHash, SecureHash>,
}

impl StateRefAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, source: &StateRef) -> StateRef {
        let txhash = *self.assigned.entry(source.txhash).or_insert_with(|| loop {
            let candidate = SecureHash::random_sha256();
            if candidate != source.txhash {
                break candidate;
            }
        });
        StateRef::new(txhash, source.index)
    }

    /// Number of distinct source transactions seen.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
