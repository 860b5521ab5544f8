use alloy::primitives::Address;
use podium_abi::IPrizeRegistry;

use super::primitives::{AuctionId, BidId, BlockNumber, CurrencyAmount, PrizeItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterAuctionParams {
    pub id: AuctionId,
    pub start_block: BlockNumber,
    pub end_block: BlockNumber,
    pub prize_items: Vec<PrizeItem>,
    pub num_winners: u32,
}

/// Value returned to a bidder whose bid left the ranked set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refund {
    pub bid_id: BidId,
    pub recipient: Address,
    pub amount: CurrencyAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidReceipt {
    pub auction_id: AuctionId,
    pub bid_id: BidId,
    pub refund: Option<Refund>,
    pub minimum_bid: CurrencyAmount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Award {
    pub rank: u32,
    pub item: PrizeItem,
    pub winner: Address,
    pub bid_id: BidId,
}

impl Award {
    /// The registry call that moves this prize out of `custodian`'s hands.
    pub fn transfer_call(&self, custodian: Address) -> IPrizeRegistry::transferFromCall {
        IPrizeRegistry::transferFromCall {
            from: custodian,
            to: self.winner,
            tokenId: self.item.as_u256(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub auction_id: AuctionId,
    /// In rank order.
    pub awards: Vec<Award>,
    /// Items left in custody because fewer bids than prizes were ranked.
    pub unassigned: Vec<PrizeItem>,
}

impl Settlement {
    pub fn winners(&self) -> impl Iterator<Item = Address> + '_ {
        self.awards.iter().map(|award| award.winner)
    }
}
