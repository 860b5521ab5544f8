use futures::StreamExt;
use tracing::debug;

use crate::{
    blocks::BlockStream,
    capabilities::{ManualClock, PrizeTransfer, ValueTransfer},
    engine::AuctionEngine,
    error::{BlockStreamError, Error},
    orchestrator::{
        BlockResult, CompletionReason, ExecutedIntent, Intent, IntentOutcome, IntentResult,
        OrchestratorResult, Schedule,
    },
    types::primitives::BlockNumber,
};

/// Replays a schedule of intents against an engine, one block at a time.
/// The engine's clock follows the block stream.
pub struct Orchestrator<V, P>
where
    V: ValueTransfer,
    P: PrizeTransfer,
{
    engine: AuctionEngine<ManualClock, V, P>,
    schedule: Schedule,
    executed: Vec<ExecutedIntent>,
    last_block: Option<BlockNumber>,
    registrations: u32,
    bids_accepted: u32,
    bids_rejected: u32,
    refunds: u32,
    settlements: u32,
    failures: u32,
}

impl<V, P> Orchestrator<V, P>
where
    V: ValueTransfer,
    P: PrizeTransfer,
{
    pub fn new(engine: AuctionEngine<ManualClock, V, P>, schedule: Schedule) -> Self {
        Self {
            engine,
            schedule,
            executed: Vec::new(),
            last_block: None,
            registrations: 0,
            bids_accepted: 0,
            bids_rejected: 0,
            refunds: 0,
            settlements: 0,
            failures: 0,
        }
    }

    pub async fn run<B>(&mut self, mut blocks: B) -> Result<OrchestratorResult, Error>
    where
        B: BlockStream,
    {
        while let Some(block) = blocks.next().await {
            let block = block?;
            match self.handle_block(block)? {
                BlockResult::Continue => continue,
                BlockResult::Finished(result) => return Ok(result),
            }
        }

        Ok(self.finalize(CompletionReason::BlockStreamEnded))
    }

    pub fn handle_block(&mut self, block: BlockNumber) -> Result<BlockResult, Error> {
        if let Some(previous) = self.last_block {
            if block < previous {
                return Err(BlockStreamError::OutOfOrder {
                    previous,
                    next: block,
                }
                .into());
            }
        }
        self.last_block = Some(block);
        self.engine.clock().set(block);

        let due = self.schedule.take_due(block);
        if !due.is_empty() {
            debug!(block = %block, intents = due.len(), "executing due intents");
        }

        for scheduled in due {
            let outcome = self.execute(&scheduled.intent);
            self.record(&scheduled.intent, &outcome);
            self.executed.push(ExecutedIntent {
                scheduled: scheduled.block,
                executed: block,
                intent: scheduled.intent,
                outcome,
            });
        }

        if self.schedule.is_empty() {
            return Ok(BlockResult::Finished(
                self.finalize(CompletionReason::ScheduleExhausted),
            ));
        }

        Ok(BlockResult::Continue)
    }

    pub fn engine(&self) -> &AuctionEngine<ManualClock, V, P> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AuctionEngine<ManualClock, V, P> {
        &mut self.engine
    }

    pub fn executed(&self) -> &[ExecutedIntent] {
        &self.executed
    }

    pub fn into_engine(self) -> AuctionEngine<ManualClock, V, P> {
        self.engine
    }

    fn execute(&mut self, intent: &Intent) -> IntentOutcome {
        let result = match intent {
            Intent::Register { caller, params } => self
                .engine
                .register_auction(*caller, params.clone())
                .map(|info| IntentResult::Registered(info.clone())),
            Intent::Bid {
                auction_id,
                bidder,
                amount,
            } => self
                .engine
                .bid(*auction_id, *bidder, *amount)
                .map(IntentResult::BidAccepted),
            Intent::End { auction_id } => self
                .engine
                .end_auction(*auction_id)
                .map(IntentResult::Settled),
        };

        match result {
            Ok(result) => IntentOutcome::Success(result),
            Err(error) => IntentOutcome::Failed { error },
        }
    }

    fn record(&mut self, intent: &Intent, outcome: &IntentOutcome) {
        match outcome {
            IntentOutcome::Success(IntentResult::Registered(_)) => {
                self.registrations += 1;
            }
            IntentOutcome::Success(IntentResult::BidAccepted(receipt)) => {
                self.bids_accepted += 1;
                if receipt.refund.is_some() {
                    self.refunds += 1;
                }
            }
            IntentOutcome::Success(IntentResult::Settled(_)) => {
                self.settlements += 1;
            }
            IntentOutcome::Failed { .. } if matches!(intent, Intent::Bid { .. }) => {
                self.bids_rejected += 1;
            }
            IntentOutcome::Failed { .. } => {
                self.failures += 1;
            }
        }
    }

    fn finalize(&self, reason: CompletionReason) -> OrchestratorResult {
        OrchestratorResult {
            registrations: self.registrations,
            bids_accepted: self.bids_accepted,
            bids_rejected: self.bids_rejected,
            refunds: self.refunds,
            settlements: self.settlements,
            failures: self.failures,
            reason,
        }
    }
}
