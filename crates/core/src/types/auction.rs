use super::primitives::{AuctionId, BlockNumber, PrizeItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionInfo {
    pub id: AuctionId,
    pub start_block: BlockNumber,
    pub end_block: BlockNumber,
    /// The item at position `r` goes to the rank-`r` winner.
    pub prize_items: Vec<PrizeItem>,
    pub num_winners: u32,
    pub ended: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionPhase {
    PreStart { blocks_until_start: u64 },
    Active { blocks_remaining: u64 },
    /// Bidding window over, prizes not yet distributed.
    Closed,
    Settled,
}

impl AuctionInfo {
    pub fn phase(&self, current_block: BlockNumber) -> AuctionPhase {
        let current = current_block.as_u64();
        let start = self.start_block.as_u64();
        let end = self.end_block.as_u64();

        if self.ended {
            AuctionPhase::Settled
        } else if current < start {
            AuctionPhase::PreStart {
                blocks_until_start: start - current,
            }
        } else if current < end {
            AuctionPhase::Active {
                blocks_remaining: end - current,
            }
        } else {
            AuctionPhase::Closed
        }
    }

    pub fn is_active_at(&self, block: BlockNumber) -> bool {
        self.start_block <= block && block < self.end_block
    }

    pub fn is_over_at(&self, block: BlockNumber) -> bool {
        block >= self.end_block
    }

    pub fn capacity(&self) -> usize {
        self.num_winners as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> AuctionInfo {
        AuctionInfo {
            id: AuctionId::from(1),
            start_block: BlockNumber::new(10),
            end_block: BlockNumber::new(20),
            prize_items: vec![PrizeItem::from(0)],
            num_winners: 1,
            ended: false,
        }
    }

    #[test]
    fn phase_follows_half_open_window() {
        let info = info();
        assert_eq!(
            info.phase(BlockNumber::new(7)),
            AuctionPhase::PreStart {
                blocks_until_start: 3
            }
        );
        assert_eq!(
            info.phase(BlockNumber::new(10)),
            AuctionPhase::Active {
                blocks_remaining: 10
            }
        );
        assert_eq!(
            info.phase(BlockNumber::new(19)),
            AuctionPhase::Active {
                blocks_remaining: 1
            }
        );
        assert_eq!(info.phase(BlockNumber::new(20)), AuctionPhase::Closed);
    }

    #[test]
    fn settled_overrides_block_position() {
        let mut info = info();
        info.ended = true;
        assert_eq!(info.phase(BlockNumber::new(25)), AuctionPhase::Settled);
        assert!(!info.is_active_at(BlockNumber::new(20)));
        assert!(info.is_over_at(BlockNumber::new(20)));
    }
}
