//! Per-auction bid book: the chronological history of every bid and the
//! ranked index of the ones still holding a winning slot.

use alloy::primitives::Address;

use crate::{
    error::{HistoryError, ValidationError},
    types::{
        bidding::Bidding,
        config::EngineConfig,
        primitives::{BidId, CurrencyAmount},
    },
};

#[derive(Debug, Default)]
pub struct BidLedger {
    /// Indexed by `BidId`.
    history: Vec<Bidding>,
    /// Active bids, best first. Never longer than the auction's winner count.
    ranked: Vec<BidId>,
    minimum_bid: CurrencyAmount,
    escrowed: CurrencyAmount,
}

/// An admitted bid staged against the ledger that planned it. Nothing is
/// mutated until the plan is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidPlan {
    bidding: Bidding,
    ranked: Vec<BidId>,
    evicted: Option<Bidding>,
    minimum_bid: CurrencyAmount,
}

impl BidPlan {
    pub fn bidding(&self) -> &Bidding {
        &self.bidding
    }

    pub fn evicted(&self) -> Option<&Bidding> {
        self.evicted.as_ref()
    }

    pub fn minimum_bid(&self) -> CurrencyAmount {
        self.minimum_bid
    }
}

impl BidLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> BidId {
        BidId::new(self.history.len() as u64)
    }

    pub fn minimum_bid(&self) -> CurrencyAmount {
        self.minimum_bid
    }

    /// Total value held for the bids currently ranked.
    pub fn escrowed(&self) -> CurrencyAmount {
        self.escrowed
    }

    pub fn get(&self, id: BidId) -> Option<&Bidding> {
        self.history.get(id.index())
    }

    pub fn history(&self) -> &[Bidding] {
        &self.history
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    /// Up to `limit` bids starting at `offset`, in submission order. A short
    /// last page is returned as is; only an offset past the end is an error.
    pub fn partial_history(&self, offset: usize, limit: usize) -> Result<&[Bidding], HistoryError> {
        let size = self.history.len();
        if offset > size {
            return Err(HistoryError::OutOfRange { offset, size });
        }

        let end = offset.saturating_add(limit).min(size);
        Ok(&self.history[offset..end])
    }

    pub fn top_biddings(&self) -> Vec<Bidding> {
        self.ranked
            .iter()
            .map(|id| self.history[id.index()].clone())
            .collect()
    }

    pub fn plan(
        &self,
        bidder: Address,
        amount: CurrencyAmount,
        capacity: usize,
        config: &EngineConfig,
    ) -> Result<BidPlan, ValidationError> {
        let insufficient = ValidationError::InsufficientAmount {
            amount,
            minimum: self.minimum_bid,
        };

        if !config.admission.admits(amount, self.minimum_bid) {
            return Err(insufficient);
        }
        // only reachable when the rule admits a bid equal to a zero threshold
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }

        let bidding = Bidding::new(self.next_id(), bidder, amount);
        let position = self
            .ranked
            .partition_point(|id| self.history[id.index()].outranks(&bidding));

        let mut ranked = Vec::with_capacity(self.ranked.len() + 1);
        ranked.extend_from_slice(&self.ranked[..position]);
        ranked.push(bidding.id);
        ranked.extend_from_slice(&self.ranked[position..]);

        let evicted = if ranked.len() > capacity {
            match ranked.pop() {
                // A bid that would rank last in a full book never gets a slot.
                Some(lowest) if lowest == bidding.id => return Err(insufficient),
                Some(lowest) => Some(self.history[lowest.index()].clone()),
                None => None,
            }
        } else {
            None
        };

        let low = match ranked.last() {
            Some(id) if *id == bidding.id => bidding.amount,
            Some(id) => self.history[id.index()].amount,
            None => CurrencyAmount::ZERO,
        };
        let minimum_bid = if ranked.len() >= capacity {
            low.saturating_add(config.increment)
        } else {
            low.saturating_sub(config.increment)
        };

        Ok(BidPlan {
            bidding,
            ranked,
            evicted,
            minimum_bid,
        })
    }

    pub(crate) fn commit(&mut self, plan: BidPlan) -> BidId {
        debug_assert_eq!(plan.bidding.id, self.next_id(), "stale bid plan");

        if let Some(evicted) = &plan.evicted {
            self.history[evicted.id.index()].active = false;
            self.escrowed = self.escrowed.saturating_sub(evicted.amount);
        }

        let id = plan.bidding.id;
        self.escrowed = self.escrowed.saturating_add(plan.bidding.amount);
        self.history.push(plan.bidding);
        self.ranked = plan.ranked;
        self.minimum_bid = plan.minimum_bid;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::AdmissionRule;
    use alloy::primitives::{U256, address};

    const ALICE: Address = address!("0x0000000000000000000000000000000000000001");
    const BOB: Address = address!("0x0000000000000000000000000000000000000002");
    const CAROL: Address = address!("0x0000000000000000000000000000000000000003");
    const DAVE: Address = address!("0x0000000000000000000000000000000000000004");

    /// `tenths` tenths of a whole 18-decimal unit.
    fn tenths(tenths: u64) -> CurrencyAmount {
        CurrencyAmount::new(U256::from(tenths) * U256::from(100_000_000_000_000_000u64))
    }

    fn place(ledger: &mut BidLedger, bidder: Address, amount: CurrencyAmount, capacity: usize) -> BidPlan {
        let plan = ledger
            .plan(bidder, amount, capacity, &EngineConfig::default())
            .expect("bid should be admitted");
        ledger.commit(plan.clone());
        plan
    }

    fn ranked_amounts(ledger: &BidLedger) -> Vec<CurrencyAmount> {
        ledger.top_biddings().iter().map(|b| b.amount).collect()
    }

    #[test]
    fn first_bid_only_needs_to_be_positive() {
        let ledger = BidLedger::new();
        assert_eq!(ledger.minimum_bid(), CurrencyAmount::ZERO);
        assert_eq!(
            ledger.plan(ALICE, CurrencyAmount::ZERO, 3, &EngineConfig::default()),
            Err(ValidationError::InsufficientAmount {
                amount: CurrencyAmount::ZERO,
                minimum: CurrencyAmount::ZERO,
            })
        );
        let inclusive = EngineConfig::default().with_admission(AdmissionRule::AtLeast);
        assert_eq!(
            ledger.plan(ALICE, CurrencyAmount::ZERO, 3, &inclusive),
            Err(ValidationError::ZeroAmount)
        );
        assert!(
            ledger
                .plan(ALICE, CurrencyAmount::from(1u128), 3, &EngineConfig::default())
                .is_ok()
        );
    }

    #[test]
    fn threshold_tracks_fill_state() {
        let mut ledger = BidLedger::new();

        place(&mut ledger, ALICE, tenths(11), 3);
        assert_eq!(ledger.minimum_bid(), tenths(10));
        place(&mut ledger, BOB, tenths(12), 3);
        assert_eq!(ledger.minimum_bid(), tenths(10));
        place(&mut ledger, CAROL, tenths(15), 3);
        assert_eq!(ledger.minimum_bid(), tenths(12));
        assert_eq!(ranked_amounts(&ledger), vec![tenths(15), tenths(12), tenths(11)]);

        let plan = place(&mut ledger, DAVE, tenths(13), 3);
        let evicted = plan.evicted().expect("lowest bid evicted");
        assert_eq!(evicted.bidder, ALICE);
        assert_eq!(evicted.amount, tenths(11));
        assert_eq!(ledger.minimum_bid(), tenths(13));
        assert_eq!(ranked_amounts(&ledger), vec![tenths(15), tenths(13), tenths(12)]);
        assert!(!ledger.get(BidId::new(0)).unwrap().active);
        assert_eq!(ledger.escrowed(), tenths(40));
    }

    #[test]
    fn rejects_amount_not_above_threshold() {
        let mut ledger = BidLedger::new();
        place(&mut ledger, ALICE, tenths(10), 1);
        place(&mut ledger, BOB, tenths(15), 1);
        assert_eq!(ledger.minimum_bid(), tenths(16));

        let err = ledger
            .plan(CAROL, tenths(16), 1, &EngineConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientAmount {
                amount: tenths(16),
                minimum: tenths(16),
            }
        );

        let inclusive = EngineConfig::default().with_admission(AdmissionRule::AtLeast);
        assert!(ledger.plan(CAROL, tenths(16), 1, &inclusive).is_ok());
    }

    #[test]
    fn eviction_prefers_latest_among_equal_amounts() {
        let mut ledger = BidLedger::new();
        let inclusive = EngineConfig::default().with_admission(AdmissionRule::AtLeast);
        for (bidder, amount) in [(ALICE, 17), (BOB, 16), (CAROL, 16)] {
            let plan = ledger.plan(bidder, tenths(amount), 3, &inclusive).unwrap();
            ledger.commit(plan);
        }

        let plan = ledger.plan(DAVE, tenths(17), 3, &inclusive).unwrap();
        assert_eq!(plan.evicted().map(|b| b.bidder), Some(CAROL));
        ledger.commit(plan);

        let order: Vec<_> = ledger.top_biddings().iter().map(|b| b.id.as_u64()).collect();
        assert_eq!(order, vec![0, 3, 1]);
    }

    #[test]
    fn bid_that_would_rank_last_in_full_book_is_rejected() {
        let config = EngineConfig::new(CurrencyAmount::ZERO, AdmissionRule::AtLeast);
        let mut ledger = BidLedger::new();
        let plan = ledger.plan(ALICE, tenths(10), 1, &config).unwrap();
        ledger.commit(plan);

        assert!(matches!(
            ledger.plan(BOB, tenths(10), 1, &config),
            Err(ValidationError::InsufficientAmount { .. })
        ));
        assert_eq!(ledger.history_size(), 1);
    }

    #[test]
    fn plan_leaves_ledger_untouched() {
        let mut ledger = BidLedger::new();
        place(&mut ledger, ALICE, tenths(10), 1);

        let plan = ledger
            .plan(BOB, tenths(20), 1, &EngineConfig::default())
            .unwrap();
        assert!(plan.evicted().is_some());
        assert_eq!(ledger.history_size(), 1);
        assert!(ledger.get(BidId::new(0)).unwrap().active);
        assert_eq!(ledger.minimum_bid(), tenths(11));
    }

    #[test]
    fn under_capacity_threshold_saturates_at_zero() {
        let mut ledger = BidLedger::new();
        place(&mut ledger, ALICE, CurrencyAmount::from(5u128), 2);
        assert_eq!(ledger.minimum_bid(), CurrencyAmount::ZERO);
    }

    #[test]
    fn partial_history_pages() {
        let mut ledger = BidLedger::new();
        for i in 1..=50u64 {
            place(&mut ledger, ALICE, tenths(10 + i), 10);
        }

        let page = ledger.partial_history(10, 20).unwrap();
        assert_eq!(page.len(), 20);
        assert_eq!(page[0].id, BidId::new(10));
        assert_eq!(page[19].id, BidId::new(29));

        assert_eq!(ledger.partial_history(45, 20).unwrap().len(), 5);
        assert!(ledger.partial_history(50, 20).unwrap().is_empty());
        assert_eq!(ledger.partial_history(0, usize::MAX).unwrap().len(), 50);
        assert_eq!(
            ledger.partial_history(51, 1),
            Err(HistoryError::OutOfRange {
                offset: 51,
                size: 50
            })
        );
    }
}
