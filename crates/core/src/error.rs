use alloy::primitives::Address;
use thiserror::Error;

use crate::types::primitives::{AuctionId, BlockNumber, CurrencyAmount, PrizeItem};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    BlockStream(#[from] BlockStreamError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{caller} is not allowed to register auctions")]
    Unauthorized { caller: Address },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown auction {0}")]
    UnknownAuction(AuctionId),

    #[error("auction {0} already registered")]
    DuplicateAuction(AuctionId),

    #[error("invalid window: start block {start} must be before end block {end}")]
    InvalidWindow { start: BlockNumber, end: BlockNumber },

    #[error("auction must have at least one winner")]
    NoWinners,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("auction not active")]
    AuctionNotActive,

    #[error("bid amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient amount: {amount} does not clear minimum bid {minimum}")]
    InsufficientAmount {
        amount: CurrencyAmount,
        minimum: CurrencyAmount,
    },

    #[error("auction not over yet")]
    AuctionNotOver,

    #[error("auction already ended")]
    AuctionEnded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("offset {offset} is past the end of a history of {size} bids")]
    OutOfRange { offset: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("refund of {amount} to {recipient} failed: {reason}")]
    Refund {
        recipient: Address,
        amount: CurrencyAmount,
        reason: String,
    },

    #[error("transfer of prize {item} to {recipient} failed: {reason}")]
    Prize {
        item: PrizeItem,
        recipient: Address,
        reason: String,
    },

    /// A settlement failed and returning an already moved prize failed too.
    #[error("could not return prize {item} to custody after \"{cause}\": {reason}")]
    Rollback {
        item: PrizeItem,
        cause: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockStreamError {
    #[error("block stream went backwards: {next} after {previous}")]
    OutOfOrder {
        previous: BlockNumber,
        next: BlockNumber,
    },
}
