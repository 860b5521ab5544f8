use std::cmp::Ordering;

use alloy::primitives::Address;

use super::primitives::{BidId, CurrencyAmount};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bidding {
    pub id: BidId,
    pub bidder: Address,
    pub amount: CurrencyAmount,
    /// Cleared once, when the bid is evicted from the ranked set.
    pub active: bool,
}

impl Bidding {
    pub fn new(id: BidId, bidder: Address, amount: CurrencyAmount) -> Self {
        Self {
            id,
            bidder,
            amount,
            active: true,
        }
    }

    /// Rank order: larger amount first, then earlier submission.
    pub fn rank_cmp(&self, other: &Bidding) -> Ordering {
        other
            .amount
            .cmp(&self.amount)
            .then_with(|| self.id.cmp(&other.id))
    }

    pub fn outranks(&self, other: &Bidding) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }
}
