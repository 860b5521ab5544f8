use std::fmt;

use crate::config::{ActionKind, ScenarioConfig, ScenarioError, resolve_scenario};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub auctions: usize,
    pub prize_items: usize,
    pub bids: usize,
    pub settlements: usize,
    pub last_block: u64,
    pub decimals: u8,
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scenario ok: {} auctions, {} prize items, {} bids, {} settlements, last block {} ({} decimals)",
            self.auctions,
            self.prize_items,
            self.bids,
            self.settlements,
            self.last_block,
            self.decimals
        )
    }
}

/// Validate a scenario without running it.
pub fn check(config: &ScenarioConfig) -> Result<CheckSummary, ScenarioError> {
    let scenario = resolve_scenario(config)?;
    let count = |kind: ActionKind| config.actions.iter().filter(|a| a.kind == kind).count();

    Ok(CheckSummary {
        auctions: config.auctions.len(),
        prize_items: scenario.prizes.len(),
        bids: count(ActionKind::Bid),
        settlements: count(ActionKind::End),
        last_block: scenario.last_block().as_u64(),
        decimals: scenario.decimals,
    })
}
