use podium_core::{
    AuctionEngine, BlockProducer, BlockNumber, Error, ManualClock, Orchestrator, PrizeVault,
    SingleAdmin, Treasury,
};
use tracing::info;

use crate::{config::Scenario, domain::RunReport};

/// Replay a resolved scenario block by block and report what happened.
pub async fn run(scenario: Scenario) -> Result<RunReport, Error> {
    let mut vault = PrizeVault::new(scenario.admin);
    vault.deposit(scenario.prizes.iter().copied());

    let engine = AuctionEngine::new(
        ManualClock::new(BlockNumber::ZERO),
        Treasury::new(),
        vault,
        SingleAdmin::new(scenario.admin),
        scenario.engine,
    );

    let last_block = scenario.last_block();
    info!(
        intents = scenario.schedule.len(),
        last_block = %last_block,
        "replaying scenario"
    );

    let mut orchestrator = Orchestrator::new(engine, scenario.schedule);
    let blocks = BlockProducer::new(BlockNumber::ZERO, last_block).into_stream();
    let result = orchestrator.run(blocks).await?;

    RunReport::build(
        &result,
        orchestrator.executed(),
        orchestrator.engine(),
        scenario.decimals,
    )
}
