use crate::{
    error::{RegistryError, ValidationError},
    registry::AuctionRegistry,
    types::{action::RegisterAuctionParams, auction::AuctionInfo, primitives::BlockNumber},
};

pub fn validate_register(
    params: &RegisterAuctionParams,
    registry: &AuctionRegistry,
) -> Result<(), RegistryError> {
    if registry.contains(params.id) {
        return Err(RegistryError::DuplicateAuction(params.id));
    }

    if params.start_block >= params.end_block {
        return Err(RegistryError::InvalidWindow {
            start: params.start_block,
            end: params.end_block,
        });
    }

    if params.num_winners == 0 {
        return Err(RegistryError::NoWinners);
    }

    Ok(())
}

pub fn validate_bid(info: &AuctionInfo, current_block: BlockNumber) -> Result<(), ValidationError> {
    if info.ended || !info.is_active_at(current_block) {
        return Err(ValidationError::AuctionNotActive);
    }

    Ok(())
}

pub fn validate_end(info: &AuctionInfo, current_block: BlockNumber) -> Result<(), ValidationError> {
    if !info.is_over_at(current_block) {
        return Err(ValidationError::AuctionNotOver);
    }

    if info.ended {
        return Err(ValidationError::AuctionEnded);
    }

    Ok(())
}
