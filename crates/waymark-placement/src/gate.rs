use std::collections::BTreeMap;

use waymark_blocks::BlockId;

/// Gets the last word on a batch before it is written, given the blocks it
/// consumes. A refusal drops the batch and turns building off.
pub trait PlacementGate {
    fn approve(&mut self, required: &BTreeMap<BlockId, u32>) -> bool;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysApprove;

impl PlacementGate for AlwaysApprove {
    fn approve(&mut self, _required: &BTreeMap<BlockId, u32>) -> bool {
        true
    }
}

impl<F> PlacementGate for F
where
    F: FnMut(&BTreeMap<BlockId, u32>) -> bool,
{
    fn approve(&mut self, required: &BTreeMap<BlockId, u32>) -> bool {
        self(required)
    }
}

/// Finite stock of blocks; approved batches are deducted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockBudget {
    pub remaining: BTreeMap<BlockId, u32>,
}

impl BlockBudget {
    pub fn new(remaining: BTreeMap<BlockId, u32>) -> Self {
        Self { remaining }
    }
}

impl PlacementGate for BlockBudget {
    fn approve(&mut self, required: &BTreeMap<BlockId, u32>) -> bool {
        let enough = required
            .iter()
            .all(|(id, n)| self.remaining.get(id).copied().unwrap_or(0) >= *n);
        if !enough {
            return false;
        }
        for (id, n) in required {
            if let Some(have) = self.remaining.get_mut(id) {
                *have -= n;
            }
        }
        true
    }
}
