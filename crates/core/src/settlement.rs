use crate::{
    ledger::BidLedger,
    types::{
        action::{Award, Settlement},
        auction::AuctionInfo,
    },
};

/// Pairs the final ranked set with the prize list, best rank first. Ranks
/// beyond the prize list get nothing; prizes beyond the ranked set stay in
/// custody.
pub fn plan_settlement(info: &AuctionInfo, ledger: &BidLedger) -> Settlement {
    let awards: Vec<Award> = ledger
        .top_biddings()
        .into_iter()
        .take(info.capacity())
        .zip(info.prize_items.iter().copied())
        .enumerate()
        .map(|(rank, (bidding, item))| Award {
            rank: rank as u32,
            item,
            winner: bidding.bidder,
            bid_id: bidding.id,
        })
        .collect();

    let unassigned = info.prize_items[awards.len()..].to_vec();

    Settlement {
        auction_id: info.id,
        awards,
        unassigned,
    }
}
