pub mod blocks;
pub mod capabilities;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod registry;
pub mod settlement;
pub mod types;
pub mod validation;

pub use blocks::{BlockProducer, BlockStream, BoxBlockStream};
pub use capabilities::*;
pub use engine::AuctionEngine;
pub use error::*;
pub use ledger::{BidLedger, BidPlan};
pub use orchestrator::{
    CompletionReason, ExecutedIntent, Intent, IntentOutcome, IntentResult, Orchestrator,
    OrchestratorResult, Schedule, ScheduledIntent,
};
pub use registry::AuctionRegistry;
pub use settlement::plan_settlement;
pub use types::*;
