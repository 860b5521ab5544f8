use alloy::{
    primitives::{Address, LogData},
    sol_types::SolEvent,
};
use podium_abi::{AuctionEnded, AuctionRegistered, BidPlaced, BiddingRefund, PrizeAwarded};

use super::{
    action::{Award, Refund},
    auction::AuctionInfo,
    primitives::{AuctionId, BidId, CurrencyAmount},
};

/// Journal entry appended by every successful engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    AuctionRegistered(AuctionInfo),
    BidPlaced {
        auction_id: AuctionId,
        bid_id: BidId,
        bidder: Address,
        amount: CurrencyAmount,
    },
    BiddingRefund {
        auction_id: AuctionId,
        refund: Refund,
    },
    PrizeAwarded {
        auction_id: AuctionId,
        award: Award,
    },
    AuctionEnded {
        auction_id: AuctionId,
        winners: u32,
    },
}

impl EngineEvent {
    pub fn as_refund(&self) -> Option<&Refund> {
        match self {
            EngineEvent::BiddingRefund { refund, .. } => Some(refund),
            _ => None,
        }
    }

    /// EVM log encoding, matching the events a contract deployment emits.
    pub fn to_log_data(&self) -> LogData {
        match self {
            EngineEvent::AuctionRegistered(info) => AuctionRegistered {
                auctionId: info.id.as_u256(),
                startBlock: info.start_block.as_u64(),
                endBlock: info.end_block.as_u64(),
                prizeItems: info.prize_items.iter().map(|item| item.as_u256()).collect(),
                numWinners: info.num_winners,
            }
            .encode_log_data(),
            EngineEvent::BidPlaced {
                auction_id,
                bid_id,
                bidder,
                amount,
            } => BidPlaced {
                auctionId: auction_id.as_u256(),
                bidId: bid_id.as_u64(),
                user: *bidder,
                amount: amount.as_u256(),
            }
            .encode_log_data(),
            EngineEvent::BiddingRefund { refund, .. } => BiddingRefund {
                user: refund.recipient,
                amount: refund.amount.as_u256(),
            }
            .encode_log_data(),
            EngineEvent::PrizeAwarded { auction_id, award } => PrizeAwarded {
                auctionId: auction_id.as_u256(),
                prizeItem: award.item.as_u256(),
                winner: award.winner,
                rank: award.rank,
            }
            .encode_log_data(),
            EngineEvent::AuctionEnded {
                auction_id,
                winners,
            } => AuctionEnded {
                auctionId: auction_id.as_u256(),
                winners: *winners,
            }
            .encode_log_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{U256, address, keccak256};

    #[test]
    fn refund_log_uses_contract_topic() {
        let recipient = address!("0x0000000000000000000000000000000000000001");
        let event = EngineEvent::BiddingRefund {
            auction_id: AuctionId::from(1),
            refund: Refund {
                bid_id: BidId::new(0),
                recipient,
                amount: CurrencyAmount::from(1_100u128),
            },
        };

        let log = event.to_log_data();
        let topics = log.topics();
        assert_eq!(topics[0], keccak256("BiddingRefund(address,uint256)"));
        assert_eq!(topics[1], recipient.into_word());
        assert_eq!(U256::from_be_slice(&log.data), U256::from(1_100u64));
    }
}
