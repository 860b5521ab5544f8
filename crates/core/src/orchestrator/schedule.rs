use std::collections::BTreeMap;

use alloy::primitives::Address;

use crate::types::{
    action::RegisterAuctionParams,
    primitives::{AuctionId, BlockNumber, CurrencyAmount},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Register {
        caller: Address,
        params: RegisterAuctionParams,
    },
    Bid {
        auction_id: AuctionId,
        bidder: Address,
        amount: CurrencyAmount,
    },
    End {
        auction_id: AuctionId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledIntent {
    pub block: BlockNumber,
    pub intent: Intent,
}

/// Intents keyed by the block they become due. Within a block they keep the
/// order they were added in.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    pending: BTreeMap<BlockNumber, Vec<Intent>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: BlockNumber, intent: Intent) {
        self.pending.entry(block).or_default().push(intent);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn last_block(&self) -> Option<BlockNumber> {
        self.pending.keys().next_back().copied()
    }

    /// Removes and returns every intent due at or before `block`.
    pub fn take_due(&mut self, block: BlockNumber) -> Vec<ScheduledIntent> {
        let later = match block.as_u64().checked_add(1) {
            Some(next) => self.pending.split_off(&BlockNumber::new(next)),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.pending, later);

        due.into_iter()
            .flat_map(|(block, intents)| {
                intents
                    .into_iter()
                    .map(move |intent| ScheduledIntent { block, intent })
            })
            .collect()
    }
}

impl FromIterator<ScheduledIntent> for Schedule {
    fn from_iter<I: IntoIterator<Item = ScheduledIntent>>(iter: I) -> Self {
        let mut schedule = Schedule::new();
        for scheduled in iter {
            schedule.push(scheduled.block, scheduled.intent);
        }
        schedule
    }
}
