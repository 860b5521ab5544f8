use std::collections::BTreeMap;

use crate::{
    error::RegistryError,
    types::{
        action::RegisterAuctionParams,
        auction::AuctionInfo,
        primitives::AuctionId,
    },
    validation,
};

#[derive(Debug, Default)]
pub struct AuctionRegistry {
    auctions: BTreeMap<AuctionId, AuctionInfo>,
}

impl AuctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, params: RegisterAuctionParams) -> Result<&AuctionInfo, RegistryError> {
        validation::validate_register(&params, self)?;

        let info = AuctionInfo {
            id: params.id,
            start_block: params.start_block,
            end_block: params.end_block,
            prize_items: params.prize_items,
            num_winners: params.num_winners,
            ended: false,
        };
        Ok(self.auctions.entry(params.id).or_insert(info))
    }

    pub fn get(&self, id: AuctionId) -> Result<&AuctionInfo, RegistryError> {
        self.auctions
            .get(&id)
            .ok_or(RegistryError::UnknownAuction(id))
    }

    pub fn contains(&self, id: AuctionId) -> bool {
        self.auctions.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = AuctionId> + '_ {
        self.auctions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }

    pub(crate) fn mark_ended(&mut self, id: AuctionId) -> Result<(), RegistryError> {
        let info = self
            .auctions
            .get_mut(&id)
            .ok_or(RegistryError::UnknownAuction(id))?;
        info.ended = true;
        Ok(())
    }
}
