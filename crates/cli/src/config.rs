use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use podium_core::{
    AdmissionRule, AuctionId, BlockNumber, EngineConfig, Intent, PrizeItem,
    RegisterAuctionParams, Schedule,
};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::amount::{AmountError, base_units};

pub const DEFAULT_SCENARIO_PATH: &str = "scenario.toml";
const DEFAULT_DECIMALS: u8 = 18;

#[derive(Debug, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    /// Administrator allowed to register auctions; also holds the prizes.
    pub admin: String,
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default, rename = "auction")]
    pub auctions: Vec<AuctionConfig>,
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionConfig>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct EngineSection {
    /// Human amount, e.g. "0.1".
    pub increment: Option<String>,
    #[serde(default)]
    pub admission: AdmissionSetting,
    pub decimals: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionSetting {
    #[default]
    Strict,
    AtLeast,
}

impl From<AdmissionSetting> for AdmissionRule {
    fn from(setting: AdmissionSetting) -> Self {
        match setting {
            AdmissionSetting::Strict => AdmissionRule::Strict,
            AdmissionSetting::AtLeast => AdmissionRule::AtLeast,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct AuctionConfig {
    pub id: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub prize_items: Vec<u64>,
    pub num_winners: u32,
    /// Block the registration is submitted at.
    #[serde(default)]
    pub register_at: u64,
    /// Registering caller, the administrator when omitted.
    pub caller: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Bid,
    End,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ActionConfig {
    pub block: u64,
    pub kind: ActionKind,
    pub auction: u64,
    pub bidder: Option<String>,
    /// Human amount, e.g. "1.1".
    pub amount: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse toml at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("invalid address {value:?} for {field}")]
    InvalidAddress { field: String, value: String },
    #[error("invalid {field}: {source}")]
    InvalidAmount { field: String, source: AmountError },
    #[error("engine increment must be greater than zero")]
    ZeroIncrement,
    #[error("action {index}: bids need a bidder and an amount")]
    IncompleteBid { index: usize },
    #[error("action {index} refers to auction {auction}, which the scenario never registers")]
    UnknownAuction { index: usize, auction: u64 },
}

/// A scenario resolved into engine inputs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub admin: Address,
    pub engine: EngineConfig,
    pub decimals: u8,
    /// Every prize item any auction names, deposited with the administrator
    /// before the run.
    pub prizes: Vec<PrizeItem>,
    pub schedule: Schedule,
}

impl Scenario {
    pub fn last_block(&self) -> BlockNumber {
        self.schedule.last_block().unwrap_or(BlockNumber::ZERO)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ScenarioConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

pub fn resolve_scenario(config: &ScenarioConfig) -> Result<Scenario, ScenarioError> {
    let admin = parse_address("admin", &config.admin)?;
    let decimals = config.engine.decimals.unwrap_or(DEFAULT_DECIMALS);

    let mut engine = EngineConfig::default().with_admission(config.engine.admission.into());
    if let Some(increment) = &config.engine.increment {
        let increment = parse_amount("engine.increment", increment, decimals)?;
        if increment.is_zero() {
            return Err(ScenarioError::ZeroIncrement);
        }
        engine = engine.with_increment(increment);
    }

    let mut schedule = Schedule::new();
    let mut prizes = Vec::new();
    for (index, auction) in config.auctions.iter().enumerate() {
        let caller = match &auction.caller {
            Some(caller) => parse_address(&format!("auction {index} caller"), caller)?,
            None => admin,
        };
        let prize_items: Vec<PrizeItem> =
            auction.prize_items.iter().copied().map(PrizeItem::from).collect();
        prizes.extend(prize_items.iter().copied());

        schedule.push(
            BlockNumber::new(auction.register_at),
            Intent::Register {
                caller,
                params: RegisterAuctionParams {
                    id: AuctionId::from(auction.id),
                    start_block: BlockNumber::new(auction.start_block),
                    end_block: BlockNumber::new(auction.end_block),
                    prize_items,
                    num_winners: auction.num_winners,
                },
            },
        );
    }

    for (index, action) in config.actions.iter().enumerate() {
        if !config.auctions.iter().any(|a| a.id == action.auction) {
            return Err(ScenarioError::UnknownAuction {
                index,
                auction: action.auction,
            });
        }
        let auction_id = AuctionId::from(action.auction);

        let intent = match action.kind {
            ActionKind::Bid => {
                let (Some(bidder), Some(amount)) = (&action.bidder, &action.amount) else {
                    return Err(ScenarioError::IncompleteBid { index });
                };
                Intent::Bid {
                    auction_id,
                    bidder: parse_address(&format!("action {index} bidder"), bidder)?,
                    amount: parse_amount(&format!("action {index} amount"), amount, decimals)?,
                }
            }
            ActionKind::End => Intent::End { auction_id },
        };
        schedule.push(BlockNumber::new(action.block), intent);
    }

    Ok(Scenario {
        admin,
        engine,
        decimals,
        prizes,
        schedule,
    })
}

fn parse_address(field: &str, value: &str) -> Result<Address, ScenarioError> {
    value.trim().parse().map_err(|_| ScenarioError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_amount(
    field: &str,
    value: &str,
    decimals: u8,
) -> Result<podium_core::CurrencyAmount, ScenarioError> {
    base_units(value, decimals).map_err(|source| ScenarioError::InvalidAmount {
        field: field.to_string(),
        source,
    })
}
