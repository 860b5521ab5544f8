pub mod core;
pub mod result;
pub mod schedule;

pub use self::core::Orchestrator;
pub use result::{
    BlockResult, CompletionReason, ExecutedIntent, IntentOutcome, IntentResult,
    OrchestratorResult,
};
pub use schedule::{Intent, Schedule, ScheduledIntent};
