use alloy::{hex, primitives::Address, sol_types::SolCall};
use podium_core::{
    AuctionEngine, AuctionId, AuctionPhase, Award, BidReceipt, Clock, CompletionReason, Error,
    ExecutedIntent, Intent, IntentOutcome, IntentResult, OrchestratorResult, PrizeTransfer,
    Settlement, ValueTransfer,
};
use serde::Serialize;

use super::amount::human_units;

/// Everything a scenario run produced, in a form that prints as text or
/// serializes to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub completion: String,
    pub summary: Summary,
    pub actions: Vec<ActionReport>,
    pub auctions: Vec<AuctionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub registrations: u32,
    pub bids_accepted: u32,
    pub bids_rejected: u32,
    pub refunds: u32,
    pub settlements: u32,
    pub failures: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub scheduled_block: u64,
    pub executed_block: u64,
    pub action: String,
    pub ok: bool,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuctionReport {
    pub id: String,
    pub phase: String,
    pub minimum_bid: String,
    pub escrowed: String,
    pub history_size: usize,
    pub ranked: Vec<RankedBid>,
    pub awards: Vec<AwardReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedBid {
    pub rank: usize,
    pub bid_id: u64,
    pub bidder: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AwardReport {
    pub rank: u32,
    pub item: String,
    pub winner: String,
    /// `transferFrom` calldata a prize registry contract would receive.
    pub calldata: String,
}

impl From<&OrchestratorResult> for Summary {
    fn from(result: &OrchestratorResult) -> Self {
        Self {
            registrations: result.registrations,
            bids_accepted: result.bids_accepted,
            bids_rejected: result.bids_rejected,
            refunds: result.refunds,
            settlements: result.settlements,
            failures: result.failures,
        }
    }
}

impl RunReport {
    pub fn build<C, V, P>(
        result: &OrchestratorResult,
        executed: &[ExecutedIntent],
        engine: &AuctionEngine<C, V, P>,
        decimals: u8,
    ) -> Result<Self, Error>
    where
        C: Clock,
        V: ValueTransfer,
        P: PrizeTransfer,
    {
        let completion = match result.reason {
            CompletionReason::ScheduleExhausted => "schedule exhausted",
            CompletionReason::BlockStreamEnded => "block stream ended",
        };

        let actions = executed
            .iter()
            .map(|entry| ActionReport {
                scheduled_block: entry.scheduled.as_u64(),
                executed_block: entry.executed.as_u64(),
                action: describe_intent(&entry.intent, decimals),
                ok: entry.outcome.is_success(),
                outcome: describe_outcome(&entry.outcome, decimals),
            })
            .collect();

        let custodian = engine.prize_transfer().custodian();
        let auctions = engine
            .registry()
            .ids()
            .map(|id| {
                let settlement = executed.iter().find_map(|entry| match &entry.outcome {
                    IntentOutcome::Success(IntentResult::Settled(settlement))
                        if settlement.auction_id == id =>
                    {
                        Some(settlement)
                    }
                    _ => None,
                });
                auction_report(engine, id, settlement, custodian, decimals)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            completion: completion.to_string(),
            summary: Summary::from(result),
            actions,
            auctions,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for action in &self.actions {
            let marker = if action.ok { "ok " } else { "ERR" };
            out.push_str(&format!(
                "[block {:>4}] {marker} {} -> {}\n",
                action.executed_block, action.action, action.outcome
            ));
        }

        for auction in &self.auctions {
            out.push_str(&format!(
                "\nauction {} ({}): minimum bid {}, escrowed {}, {} bids\n",
                auction.id, auction.phase, auction.minimum_bid, auction.escrowed, auction.history_size
            ));
            for bid in &auction.ranked {
                out.push_str(&format!(
                    "  #{} bid {} by {} for {}\n",
                    bid.rank, bid.bid_id, bid.bidder, bid.amount
                ));
            }
            for award in &auction.awards {
                out.push_str(&format!(
                    "  prize {} -> {} (rank {})\n",
                    award.item, award.winner, award.rank
                ));
            }
        }

        let s = &self.summary;
        out.push_str(&format!(
            "\n{}: {} registered, {} bids accepted, {} rejected, {} refunds, {} settled, {} other failures\n",
            self.completion,
            s.registrations,
            s.bids_accepted,
            s.bids_rejected,
            s.refunds,
            s.settlements,
            s.failures
        ));
        out
    }
}

fn describe_intent(intent: &Intent, decimals: u8) -> String {
    match intent {
        Intent::Register { caller, params } => {
            format!("register auction {} by {caller}", params.id)
        }
        Intent::Bid {
            auction_id,
            bidder,
            amount,
        } => format!(
            "bid {} on auction {auction_id} by {bidder}",
            human_units(*amount, decimals)
        ),
        Intent::End { auction_id } => format!("end auction {auction_id}"),
    }
}

fn describe_outcome(outcome: &IntentOutcome, decimals: u8) -> String {
    match outcome {
        IntentOutcome::Success(IntentResult::Registered(info)) => format!(
            "registered auction {} for blocks {}..{} with {} winners",
            info.id, info.start_block, info.end_block, info.num_winners
        ),
        IntentOutcome::Success(IntentResult::BidAccepted(receipt)) => {
            describe_receipt(receipt, decimals)
        }
        IntentOutcome::Success(IntentResult::Settled(settlement)) => format!(
            "auction {} settled, {} prizes awarded, {} unassigned",
            settlement.auction_id,
            settlement.awards.len(),
            settlement.unassigned.len()
        ),
        IntentOutcome::Failed { error } => format!("rejected: {error}"),
    }
}

fn describe_receipt(receipt: &BidReceipt, decimals: u8) -> String {
    let mut text = format!(
        "bid {} accepted on auction {}, minimum now {}",
        receipt.bid_id,
        receipt.auction_id,
        human_units(receipt.minimum_bid, decimals)
    );
    if let Some(refund) = &receipt.refund {
        text.push_str(&format!(
            ", refunded {} to {} for bid {}",
            human_units(refund.amount, decimals),
            refund.recipient,
            refund.bid_id
        ));
    }
    text
}

fn describe_phase(phase: AuctionPhase) -> String {
    match phase {
        AuctionPhase::PreStart { blocks_until_start } => {
            format!("starts in {blocks_until_start} blocks")
        }
        AuctionPhase::Active { blocks_remaining } => {
            format!("active, {blocks_remaining} blocks left")
        }
        AuctionPhase::Closed => "closed, awaiting settlement".to_string(),
        AuctionPhase::Settled => "settled".to_string(),
    }
}

fn award_report(award: &Award, custodian: Address) -> AwardReport {
    AwardReport {
        rank: award.rank,
        item: award.item.to_string(),
        winner: award.winner.to_string(),
        calldata: hex::encode_prefixed(award.transfer_call(custodian).abi_encode()),
    }
}

fn auction_report<C, V, P>(
    engine: &AuctionEngine<C, V, P>,
    id: AuctionId,
    settlement: Option<&Settlement>,
    custodian: Address,
    decimals: u8,
) -> Result<AuctionReport, Error>
where
    C: Clock,
    V: ValueTransfer,
    P: PrizeTransfer,
{
    let ranked = engine
        .top_biddings(id)?
        .into_iter()
        .enumerate()
        .map(|(rank, bidding)| RankedBid {
            rank,
            bid_id: bidding.id.as_u64(),
            bidder: bidding.bidder.to_string(),
            amount: human_units(bidding.amount, decimals),
        })
        .collect();

    Ok(AuctionReport {
        id: id.to_string(),
        phase: describe_phase(engine.phase(id)?),
        minimum_bid: human_units(engine.minimum_bid(id)?, decimals),
        escrowed: human_units(engine.escrowed(id)?, decimals),
        history_size: engine.bidding_history_size(id)?,
        ranked,
        awards: settlement
            .map(|settlement| {
                settlement
                    .awards
                    .iter()
                    .map(|award| award_report(award, custodian))
                    .collect()
            })
            .unwrap_or_default(),
    })
}
