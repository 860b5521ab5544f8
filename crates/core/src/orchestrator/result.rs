use crate::{
    error::Error,
    types::{
        action::{BidReceipt, Settlement},
        auction::AuctionInfo,
        primitives::BlockNumber,
    },
};

use super::Intent;

pub enum BlockResult {
    Continue,
    Finished(OrchestratorResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorResult {
    pub registrations: u32,
    pub bids_accepted: u32,
    pub bids_rejected: u32,
    pub refunds: u32,
    pub settlements: u32,
    pub failures: u32,
    pub reason: CompletionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    ScheduleExhausted,
    BlockStreamEnded,
}

#[derive(Debug)]
pub enum IntentResult {
    Registered(AuctionInfo),
    BidAccepted(BidReceipt),
    Settled(Settlement),
}

#[derive(Debug)]
pub enum IntentOutcome {
    Success(IntentResult),
    Failed { error: Error },
}

impl IntentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IntentOutcome::Success(_))
    }
}

#[derive(Debug)]
pub struct ExecutedIntent {
    /// Block the intent was scheduled for.
    pub scheduled: BlockNumber,
    /// Block it actually ran at.
    pub executed: BlockNumber,
    pub intent: Intent,
    pub outcome: IntentOutcome,
}
