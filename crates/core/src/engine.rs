use std::{collections::BTreeMap, sync::Arc};

use alloy::primitives::Address;
use tracing::{debug, info, warn};

use crate::{
    capabilities::{AdminPolicy, Clock, PrizeTransfer, ValueTransfer},
    error::{Error, RegistryError},
    ledger::BidLedger,
    registry::AuctionRegistry,
    settlement,
    types::{
        action::{BidReceipt, RegisterAuctionParams, Refund, Settlement},
        auction::{AuctionInfo, AuctionPhase},
        bidding::Bidding,
        config::EngineConfig,
        event::EngineEvent,
        primitives::{AuctionId, CurrencyAmount},
    },
    validation,
};

/// Runs registration, bidding and settlement for any number of independent
/// auctions. Every operation takes `&mut self` and either completes or
/// leaves the engine exactly as it found it.
pub struct AuctionEngine<C, V, P>
where
    C: Clock,
    V: ValueTransfer,
    P: PrizeTransfer,
{
    clock: C,
    value: V,
    prizes: P,
    admin: Arc<dyn AdminPolicy>,
    config: EngineConfig,
    registry: AuctionRegistry,
    ledgers: BTreeMap<AuctionId, BidLedger>,
    events: Vec<EngineEvent>,
}

impl<C, V, P> AuctionEngine<C, V, P>
where
    C: Clock,
    V: ValueTransfer,
    P: PrizeTransfer,
{
    pub fn new(
        clock: C,
        value: V,
        prizes: P,
        admin: impl AdminPolicy + 'static,
        config: EngineConfig,
    ) -> Self {
        Self {
            clock,
            value,
            prizes,
            admin: Arc::new(admin),
            config,
            registry: AuctionRegistry::new(),
            ledgers: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn value_transfer(&self) -> &V {
        &self.value
    }

    pub fn value_transfer_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn prize_transfer(&self) -> &P {
        &self.prizes
    }

    pub fn prize_transfer_mut(&mut self) -> &mut P {
        &mut self.prizes
    }

    pub fn registry(&self) -> &AuctionRegistry {
        &self.registry
    }

    pub fn register_auction(
        &mut self,
        caller: Address,
        params: RegisterAuctionParams,
    ) -> Result<&AuctionInfo, Error> {
        self.admin.authorize(caller)?;

        let info = self.registry.register(params)?;
        self.ledgers.insert(info.id, BidLedger::new());
        self.events.push(EngineEvent::AuctionRegistered(info.clone()));

        info!(
            auction_id = %info.id,
            start_block = %info.start_block,
            end_block = %info.end_block,
            num_winners = info.num_winners,
            prizes = info.prize_items.len(),
            "auction registered"
        );
        Ok(info)
    }

    pub fn bid(
        &mut self,
        auction_id: AuctionId,
        bidder: Address,
        amount: CurrencyAmount,
    ) -> Result<BidReceipt, Error> {
        let info = self.registry.get(auction_id)?;
        let current_block = self.clock.current_block();
        validation::validate_bid(info, current_block)?;

        let ledger = self
            .ledgers
            .get_mut(&auction_id)
            .ok_or(RegistryError::UnknownAuction(auction_id))?;
        let plan = ledger.plan(bidder, amount, info.capacity(), &self.config)?;

        let refund = plan.evicted().map(|evicted| Refund {
            bid_id: evicted.id,
            recipient: evicted.bidder,
            amount: evicted.amount,
        });

        if let Some(refund) = &refund {
            if let Err(err) = self.value.refund(refund.recipient, refund.amount) {
                warn!(
                    auction_id = %auction_id,
                    bidder = %bidder,
                    amount = %amount,
                    error = %err,
                    "bid rejected, eviction refund failed"
                );
                return Err(err.into());
            }
        }

        self.value.credit(bidder, amount);
        let minimum_bid = plan.minimum_bid();
        let bid_id = ledger.commit(plan);

        info!(
            auction_id = %auction_id,
            bid_id = %bid_id,
            bidder = %bidder,
            amount = %amount,
            "bid accepted"
        );
        debug!(auction_id = %auction_id, minimum_bid = %minimum_bid, "admission threshold updated");

        self.events.push(EngineEvent::BidPlaced {
            auction_id,
            bid_id,
            bidder,
            amount,
        });

        if let Some(refund) = refund {
            info!(
                auction_id = %auction_id,
                bid_id = %refund.bid_id,
                recipient = %refund.recipient,
                amount = %refund.amount,
                "bid evicted and refunded"
            );
            self.events
                .push(EngineEvent::BiddingRefund { auction_id, refund });
        }

        Ok(BidReceipt {
            auction_id,
            bid_id,
            refund,
            minimum_bid,
        })
    }

    pub fn end_auction(&mut self, auction_id: AuctionId) -> Result<Settlement, Error> {
        let info = self.registry.get(auction_id)?;
        validation::validate_end(info, self.clock.current_block())?;

        let ledger = self.ledger(auction_id)?;
        let settlement = settlement::plan_settlement(info, ledger);

        if let Err(err) = self.prizes.transfer_batch(&settlement.awards) {
            warn!(auction_id = %auction_id, error = %err, "settlement aborted, prize transfer failed");
            return Err(err.into());
        }
        self.registry.mark_ended(auction_id)?;

        for award in &settlement.awards {
            self.events.push(EngineEvent::PrizeAwarded {
                auction_id,
                award: *award,
            });
        }
        self.events.push(EngineEvent::AuctionEnded {
            auction_id,
            winners: settlement.awards.len() as u32,
        });

        info!(
            auction_id = %auction_id,
            winners = settlement.awards.len(),
            unassigned = settlement.unassigned.len(),
            "auction settled"
        );
        Ok(settlement)
    }

    pub fn auction_info(&self, auction_id: AuctionId) -> Result<&AuctionInfo, Error> {
        Ok(self.registry.get(auction_id)?)
    }

    pub fn phase(&self, auction_id: AuctionId) -> Result<AuctionPhase, Error> {
        Ok(self
            .registry
            .get(auction_id)?
            .phase(self.clock.current_block()))
    }

    pub fn minimum_bid(&self, auction_id: AuctionId) -> Result<CurrencyAmount, Error> {
        Ok(self.ledger(auction_id)?.minimum_bid())
    }

    pub fn escrowed(&self, auction_id: AuctionId) -> Result<CurrencyAmount, Error> {
        Ok(self.ledger(auction_id)?.escrowed())
    }

    pub fn top_biddings(&self, auction_id: AuctionId) -> Result<Vec<Bidding>, Error> {
        Ok(self.ledger(auction_id)?.top_biddings())
    }

    pub fn bidding_history(&self, auction_id: AuctionId) -> Result<&[Bidding], Error> {
        Ok(self.ledger(auction_id)?.history())
    }

    pub fn bidding_history_size(&self, auction_id: AuctionId) -> Result<usize, Error> {
        Ok(self.ledger(auction_id)?.history_size())
    }

    pub fn partial_bidding_history(
        &self,
        auction_id: AuctionId,
        offset: usize,
        limit: usize,
    ) -> Result<&[Bidding], Error> {
        Ok(self.ledger(auction_id)?.partial_history(offset, limit)?)
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    fn ledger(&self, auction_id: AuctionId) -> Result<&BidLedger, RegistryError> {
        self.ledgers
            .get(&auction_id)
            .ok_or(RegistryError::UnknownAuction(auction_id))
    }
}
