//! In-process collaborators, used by the scenario runner and by tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use alloy::primitives::Address;

use crate::{
    capabilities::traits::{Clock, PrizeTransfer, ValueTransfer},
    error::TransferError,
    types::{
        action::Award,
        primitives::{BlockNumber, CurrencyAmount, PrizeItem},
    },
};

/// Clock whose height is set by hand. Clones share the same height.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    block: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(block: BlockNumber) -> Self {
        Self {
            block: Arc::new(AtomicU64::new(block.as_u64())),
        }
    }

    pub fn set(&self, block: BlockNumber) {
        self.block.store(block.as_u64(), Ordering::SeqCst);
    }

    pub fn advance(&self, blocks: u64) -> BlockNumber {
        let previous = self.block.fetch_add(blocks, Ordering::SeqCst);
        BlockNumber::new(previous + blocks)
    }
}

impl Clock for ManualClock {
    fn current_block(&self) -> BlockNumber {
        BlockNumber::new(self.block.load(Ordering::SeqCst))
    }
}

/// Native value held on behalf of bidders.
#[derive(Debug, Default)]
pub struct Treasury {
    custody: CurrencyAmount,
    received: HashMap<Address, CurrencyAmount>,
    refunded: HashMap<Address, CurrencyAmount>,
    refunds: Vec<(Address, CurrencyAmount)>,
    rejecting: HashSet<Address>,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every refund to `recipient` fail until `accept_refunds_to`.
    pub fn reject_refunds_to(&mut self, recipient: Address) {
        self.rejecting.insert(recipient);
    }

    pub fn accept_refunds_to(&mut self, recipient: Address) {
        self.rejecting.remove(&recipient);
    }

    pub fn custody(&self) -> CurrencyAmount {
        self.custody
    }

    pub fn received_from(&self, bidder: Address) -> CurrencyAmount {
        self.received.get(&bidder).copied().unwrap_or_default()
    }

    pub fn refunded_to(&self, bidder: Address) -> CurrencyAmount {
        self.refunded.get(&bidder).copied().unwrap_or_default()
    }

    pub fn refunds(&self) -> &[(Address, CurrencyAmount)] {
        &self.refunds
    }
}

impl ValueTransfer for Treasury {
    fn credit(&mut self, from: Address, amount: CurrencyAmount) {
        self.custody = self.custody.saturating_add(amount);
        let received = self.received.entry(from).or_default();
        *received = received.saturating_add(amount);
    }

    fn refund(
        &mut self,
        recipient: Address,
        amount: CurrencyAmount,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&recipient) {
            return Err(TransferError::Refund {
                recipient,
                amount,
                reason: "recipient rejected the transfer".into(),
            });
        }

        if self.custody < amount {
            return Err(TransferError::Refund {
                recipient,
                amount,
                reason: format!("only {} held in custody", self.custody),
            });
        }

        self.custody = self.custody.saturating_sub(amount);
        let refunded = self.refunded.entry(recipient).or_default();
        *refunded = refunded.saturating_add(amount);
        self.refunds.push((recipient, amount));
        Ok(())
    }
}

/// Prize ownership book for items the engine holds as `custodian`.
#[derive(Debug)]
pub struct PrizeVault {
    custodian: Address,
    owners: HashMap<PrizeItem, Address>,
    frozen: HashSet<PrizeItem>,
    transfers: Vec<(PrizeItem, Address)>,
}

impl PrizeVault {
    pub fn new(custodian: Address) -> Self {
        Self {
            custodian,
            owners: HashMap::new(),
            frozen: HashSet::new(),
            transfers: Vec::new(),
        }
    }

    pub fn deposit(&mut self, items: impl IntoIterator<Item = PrizeItem>) {
        for item in items {
            self.owners.insert(item, self.custodian);
        }
    }

    /// Make any transfer of `item` fail.
    pub fn freeze(&mut self, item: PrizeItem) {
        self.frozen.insert(item);
    }

    pub fn thaw(&mut self, item: PrizeItem) {
        self.frozen.remove(&item);
    }

    pub fn owner_of(&self, item: PrizeItem) -> Option<Address> {
        self.owners.get(&item).copied()
    }

    pub fn transfers(&self) -> &[(PrizeItem, Address)] {
        &self.transfers
    }

    /// Items leave custody only from the custodian; any holder may hand one
    /// back.
    fn check(&self, item: PrizeItem, recipient: Address) -> Result<(), TransferError> {
        let reject = |reason: &str| TransferError::Prize {
            item,
            recipient,
            reason: reason.to_string(),
        };

        if self.frozen.contains(&item) {
            return Err(reject("item is frozen"));
        }
        match self.owners.get(&item) {
            None => Err(reject("unknown item")),
            Some(owner) if *owner == self.custodian || recipient == self.custodian => Ok(()),
            Some(_) => Err(reject("item not held in custody")),
        }
    }

    fn apply(&mut self, item: PrizeItem, recipient: Address) {
        self.owners.insert(item, recipient);
        self.transfers.push((item, recipient));
    }
}

impl PrizeTransfer for PrizeVault {
    fn custodian(&self) -> Address {
        self.custodian
    }

    fn transfer(&mut self, item: PrizeItem, recipient: Address) -> Result<(), TransferError> {
        self.check(item, recipient)?;
        self.apply(item, recipient);
        Ok(())
    }

    /// Checks the whole batch before moving anything, so a rejected batch
    /// leaves no transfers behind.
    fn transfer_batch(&mut self, awards: &[Award]) -> Result<(), TransferError> {
        let mut seen = HashSet::with_capacity(awards.len());
        for award in awards {
            if !seen.insert(award.item) {
                return Err(TransferError::Prize {
                    item: award.item,
                    recipient: award.winner,
                    reason: "item awarded twice".to_string(),
                });
            }
            self.check(award.item, award.winner)?;
        }

        for award in awards {
            self.apply(award.item, award.winner);
        }
        Ok(())
    }
}
